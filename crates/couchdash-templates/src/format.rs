//! Formatting of variable values into query text

use std::str::FromStr;

use crate::VariableValue;

/// Format modifier written as `${var:format}` or `[[var:format]]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableFormat {
    /// `{a,b}`; the default for multi-valued variables
    Glob,
    Csv,
    Pipe,
    Raw,
    Json,
    /// `(a|b)` with every value regex-escaped
    Regex,
    /// `'a','b'` with embedded quotes doubled
    SqlString,
    SingleQuote,
    DoubleQuote,
}

impl FromStr for VariableFormat {
    type Err = ();

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let format = match name {
            "glob" => VariableFormat::Glob,
            "csv" => VariableFormat::Csv,
            "pipe" => VariableFormat::Pipe,
            "raw" => VariableFormat::Raw,
            "json" => VariableFormat::Json,
            "regex" => VariableFormat::Regex,
            "sqlstring" => VariableFormat::SqlString,
            "singlequote" => VariableFormat::SingleQuote,
            "doublequote" => VariableFormat::DoubleQuote,
            _ => return Err(()),
        };
        Ok(format)
    }
}

/// Value formatting helpers
pub struct ValueFormatter;

impl ValueFormatter {
    /// Quote a string for SQL++
    pub fn sqlquote(value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }

    pub fn single_quote(value: &str) -> String {
        format!("'{}'", value.replace('\'', "\\'"))
    }

    pub fn double_quote(value: &str) -> String {
        format!("\"{}\"", value.replace('"', "\\\""))
    }

    /// Render a value with an explicit format, or the default rules when
    /// `format` is `None`
    pub fn format(value: &VariableValue, format: Option<VariableFormat>) -> String {
        let values = value.values();
        match format {
            None | Some(VariableFormat::Glob) => match value {
                VariableValue::Single(v) => v.clone(),
                VariableValue::Multi(vs) if vs.is_empty() => String::new(),
                VariableValue::Multi(vs) if vs.len() == 1 => vs[0].clone(),
                VariableValue::Multi(vs) => format!("{{{}}}", vs.join(",")),
            },
            Some(VariableFormat::Csv) | Some(VariableFormat::Raw) => values.join(","),
            Some(VariableFormat::Pipe) => values.join("|"),
            Some(VariableFormat::Json) => match value {
                VariableValue::Single(v) => serde_json::Value::from(v.as_str()).to_string(),
                VariableValue::Multi(vs) => serde_json::Value::from(vs.clone()).to_string(),
            },
            Some(VariableFormat::Regex) => match value {
                VariableValue::Multi(vs) if vs.len() > 1 => {
                    let escaped: Vec<String> = vs.iter().map(|v| regex::escape(v)).collect();
                    format!("({})", escaped.join("|"))
                }
                _ => values.iter().map(|v| regex::escape(v)).collect::<Vec<_>>().join(""),
            },
            Some(VariableFormat::SqlString) => join_with(values, Self::sqlquote),
            Some(VariableFormat::SingleQuote) => join_with(values, Self::single_quote),
            Some(VariableFormat::DoubleQuote) => join_with(values, Self::double_quote),
        }
    }
}

fn join_with(values: &[String], quote: fn(&str) -> String) -> String {
    values
        .iter()
        .map(|v| quote(v))
        .collect::<Vec<_>>()
        .join(",")
}
