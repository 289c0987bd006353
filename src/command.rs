//! Parsers for the `wait` command's `--var` and `--until` arguments.

use serde_json::Value;
use std::str::FromStr;

/// Parse `key=value`. A value that isn't valid JSON is taken as a string.
pub fn parse_var(s: &str) -> Result<(String, Value), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected `key=value`, got `{}`", s))?;
    if key.is_empty() {
        return Err(format!("missing variable name in `{}`", s));
    }

    Ok((key.to_owned(), parse_value(value)))
}

fn parse_value(s: &str) -> Value {
    serde_json::from_str(s).unwrap_or_else(|_| Value::String(s.to_owned()))
}

/// `<json pointer>=<value>`, satisfied once the value at the pointer equals the expected value
#[derive(Clone, Debug, PartialEq)]
pub struct Until {
    pointer: String,
    expected: Value,
}

impl Until {
    pub fn pointer(&self) -> &str {
        &self.pointer
    }

    pub fn expected(&self) -> &Value {
        &self.expected
    }

    pub fn matches(&self, value: &Value) -> bool {
        value.pointer(&self.pointer) == Some(&self.expected)
    }
}

impl FromStr for Until {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (pointer, expected) = s
            .split_once('=')
            .ok_or_else(|| format!("expected `<pointer>=<value>`, got `{}`", s))?;
        if !pointer.is_empty() && !pointer.starts_with('/') {
            return Err(format!("json pointer must start with `/`, got `{}`", pointer));
        }

        Ok(Self {
            pointer: pointer.to_owned(),
            expected: parse_value(expected),
        })
    }
}
