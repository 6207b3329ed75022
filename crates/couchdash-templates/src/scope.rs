//! Variable bindings supplied by the host at execution time

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

/// Current value of a template variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariableValue {
    Single(String),
    /// Multi-select or "All" selections
    Multi(Vec<String>),
}

impl VariableValue {
    pub fn values(&self) -> &[String] {
        match self {
            VariableValue::Single(value) => std::slice::from_ref(value),
            VariableValue::Multi(values) => values,
        }
    }

    pub fn is_multi(&self) -> bool {
        matches!(self, VariableValue::Multi(_))
    }
}

impl From<&str> for VariableValue {
    fn from(value: &str) -> Self {
        VariableValue::Single(value.to_string())
    }
}

impl From<String> for VariableValue {
    fn from(value: String) -> Self {
        VariableValue::Single(value)
    }
}

impl From<Vec<String>> for VariableValue {
    fn from(values: Vec<String>) -> Self {
        VariableValue::Multi(values)
    }
}

/// One entry of the host's scoped variables: `{"text": ..., "value": ...}`
#[derive(Deserialize)]
struct ScopedVar {
    #[serde(default)]
    value: serde_json::Value,
}

impl From<ScopedVar> for VariableValue {
    fn from(var: ScopedVar) -> Self {
        match var.value {
            serde_json::Value::Array(items) => {
                VariableValue::Multi(items.into_iter().map(json_to_text).collect())
            }
            other => VariableValue::Single(json_to_text(other)),
        }
    }
}

fn json_to_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Variable name to value, valid for a single dispatch.
///
/// A scope is built by the host for each execution and dropped afterwards;
/// nothing in this crate keeps one around.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateScope {
    vars: IndexMap<String, VariableValue>,
}

impl<'de> Deserialize<'de> for TemplateScope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = IndexMap::<String, ScopedVar>::deserialize(deserializer)?;
        Ok(Self {
            vars: raw
                .into_iter()
                .map(|(name, var)| (name, VariableValue::from(var)))
                .collect(),
        })
    }
}

impl TemplateScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the host's scoped variables object
    pub fn from_json(json: &str) -> couchdash_core::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<VariableValue>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn with_values<I, S>(self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect::<Vec<_>>();
        self.with_var(name, VariableValue::Multi(values))
    }

    pub fn get(&self, name: &str) -> Option<&VariableValue> {
        self.vars.get(name)
    }

    /// Copy of this scope with `other`'s bindings layered on top
    pub fn merged(&self, other: &TemplateScope) -> Self {
        let mut vars = self.vars.clone();
        vars.extend(other.vars.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self { vars }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_host_scoped_vars() {
        let scope = TemplateScope::from_json(
            r#"{
                "city": { "text": "Paris", "value": "Paris" },
                "limit": { "text": "10", "value": 10 },
                "types": { "text": "hotel + airport", "value": ["hotel", "airport"] },
                "empty": { "text": "", "value": null }
            }"#,
        )
        .unwrap();

        assert_eq!(scope.get("city"), Some(&VariableValue::Single("Paris".into())));
        assert_eq!(scope.get("limit"), Some(&VariableValue::Single("10".into())));
        assert_eq!(
            scope.get("types"),
            Some(&VariableValue::Multi(vec!["hotel".into(), "airport".into()]))
        );
        assert_eq!(scope.get("empty"), Some(&VariableValue::Single(String::new())));
        assert_eq!(scope.names().collect::<Vec<_>>(), ["city", "limit", "types", "empty"]);
    }

    #[test]
    fn test_merged_overrides_without_touching_originals() {
        let base = TemplateScope::new().with_var("a", "1").with_var("b", "2");
        let overlay = TemplateScope::new().with_var("b", "3");
        let merged = base.merged(&overlay);

        assert_eq!(merged.get("a"), Some(&VariableValue::from("1")));
        assert_eq!(merged.get("b"), Some(&VariableValue::from("3")));
        assert_eq!(base.get("b"), Some(&VariableValue::from("2")));
    }

    #[test]
    fn test_values_view() {
        assert_eq!(VariableValue::from("x").values(), ["x".to_string()]);
        let multi = VariableValue::from(vec!["a".to_string(), "b".to_string()]);
        assert!(multi.is_multi());
        assert_eq!(multi.values().len(), 2);
    }
}
