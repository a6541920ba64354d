//! Field rules for product input.
//!
//! Text fields: required, string, bounded length (in characters, after trimming).
//! Price: required, numeric (JSON number or numeric string), at least zero.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

pub const PRODUCT_NAME_MAX_CHARS: usize = 255;
pub const COLOR_MAX_CHARS: usize = 100;
pub const CATEGORY_MAX_CHARS: usize = 100;

/// Field-level validation failures, keyed by input field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn field(&self, name: &str) -> Option<&[String]> {
        self.0.get(name).map(Vec::as_slice)
    }

    fn message_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }
}

impl core::fmt::Display for ValidationErrors {
    /// First message, plus a count of the rest.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let Some(first) = self.0.values().flatten().next() else {
            return f.write_str("validation failed");
        };
        f.write_str(first)?;
        match self.message_count() - 1 {
            0 => Ok(()),
            1 => f.write_str(" (and 1 more error)"),
            n => write!(f, " (and {n} more errors)"),
        }
    }
}

impl std::error::Error for ValidationErrors {}

pub(crate) fn text(
    errors: &mut ValidationErrors,
    value: Option<&Value>,
    field: &str,
    max_chars: usize,
) -> Option<String> {
    let raw = match value {
        None | Some(Value::Null) => {
            errors.add(field, required(field));
            return None;
        }
        Some(Value::String(s)) => s.trim(),
        Some(_) => {
            errors.add(field, format!("The {field} field must be a string."));
            return None;
        }
    };

    if raw.is_empty() {
        errors.add(field, required(field));
        return None;
    }
    if raw.chars().count() > max_chars {
        errors.add(
            field,
            format!("The {field} field must not be greater than {max_chars} characters."),
        );
        return None;
    }
    Some(raw.to_string())
}

pub(crate) fn non_negative_number(
    errors: &mut ValidationErrors,
    value: Option<&Value>,
    field: &str,
) -> Option<f64> {
    let number = match value {
        None | Some(Value::Null) => {
            errors.add(field, required(field));
            return None;
        }
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) if s.trim().is_empty() => {
            errors.add(field, required(field));
            return None;
        }
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    let Some(number) = number.filter(|n| n.is_finite()) else {
        errors.add(field, format!("The {field} field must be a number."));
        return None;
    };

    if number < 0.0 {
        errors.add(field, format!("The {field} field must be at least 0."));
        return None;
    }
    Some(number)
}

fn required(field: &str) -> String {
    format!("The {field} field is required.")
}
