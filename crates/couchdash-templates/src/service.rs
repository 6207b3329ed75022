//! Placeholder recognition and substitution

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::{TemplateScope, ValueFormatter, VariableFormat};

// `$name` | `[[name]]` / `[[name:format]]` | `${name}` / `${name:format}`
static VARIABLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(\w+)|\[\[(\w+?)(?::(\w+))?\]\]|\$\{(\w+)(?::([^\}]+))?\}").expect("valid regex")
});

/// Rewrites query text against a scope.
///
/// Hosts with their own variable engine implement this; closures of the
/// right shape implement it too.
pub trait TemplateService {
    fn replace(&self, text: &str, scope: &TemplateScope) -> String;
}

impl<F> TemplateService for F
where
    F: Fn(&str, &TemplateScope) -> String,
{
    fn replace(&self, text: &str, scope: &TemplateScope) -> String {
        self(text, scope)
    }
}

/// Built-in substitution following the dashboard templating syntax
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTemplateService;

impl TemplateService for DefaultTemplateService {
    fn replace(&self, text: &str, scope: &TemplateScope) -> String {
        let mut replaced = 0usize;
        let result = VARIABLE_REGEX.replace_all(text, |caps: &Captures| {
            match substitute(caps, scope) {
                Some(value) => {
                    replaced += 1;
                    value
                }
                None => caps[0].to_string(),
            }
        });
        tracing::trace!(replaced, "substituted template variables");
        result.into_owned()
    }
}

/// Replacement for one placeholder, `None` to leave it as written
fn substitute(caps: &Captures, scope: &TemplateScope) -> Option<String> {
    let name = caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(4))?;
    let value = scope.get(name.as_str())?;
    let format = match caps.get(3).or_else(|| caps.get(5)) {
        Some(spec) => Some(spec.as_str().parse::<VariableFormat>().ok()?),
        None => None,
    };
    Some(ValueFormatter::format(value, format))
}

/// Replace every bound placeholder in `text` with its value from `scope`.
///
/// Placeholders with no binding, or with a format this crate does not know,
/// are passed through unchanged.
pub fn resolve(text: &str, scope: &TemplateScope) -> String {
    DefaultTemplateService.replace(text, scope)
}

/// Variable names referenced by `text`, in order of first occurrence
pub fn extract_variables(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for caps in VARIABLE_REGEX.captures_iter(text) {
        if let Some(name) = caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(4))
            && seen.insert(name.as_str())
        {
            names.push(name.as_str().to_string());
        }
    }
    names
}

/// Check whether `text` references any template variable
pub fn contains_variables(text: &str) -> bool {
    VARIABLE_REGEX.is_match(text)
}

#[cfg(test)]
mod tests;
