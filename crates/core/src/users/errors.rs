//! Field-level violation list returned by the user forms.

use serde::Serialize;
use serde_json::Value;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Field path; nested fields are dotted (`emergency_contact.phone`).
    pub field: String,
    /// Machine-readable rule name (`required`, `length`, `rut`, ...).
    pub code: String,
    /// User-facing message.
    pub message: String,
}

/// Every violation found while validating one form, ordered by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("invalid fields: {}", field_list(.violations))]
pub struct FormErrors {
    violations: Vec<FieldViolation>,
}

fn field_list(violations: &[FieldViolation]) -> String {
    let mut names: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
    names.dedup();
    names.join(", ")
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten `validator` derive output into violations.
    pub fn from_validation(errors: &ValidationErrors) -> Self {
        let mut out = Self::new();
        out.collect(errors, "");
        out
    }

    fn collect(&mut self, errors: &ValidationErrors, prefix: &str) {
        for (field, kind) in errors.errors() {
            let path = if prefix.is_empty() {
                field.to_string()
            } else {
                format!("{prefix}.{field}")
            };
            match kind {
                ValidationErrorsKind::Field(list) => {
                    for err in list {
                        self.push(path.clone(), err.code.to_string(), describe(err));
                    }
                }
                ValidationErrorsKind::Struct(inner) => self.collect(inner, &path),
                ValidationErrorsKind::List(items) => {
                    for (idx, inner) in items {
                        self.collect(inner, &format!("{path}[{idx}]"));
                    }
                }
            }
        }
    }

    pub fn push(
        &mut self,
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.violations.push(FieldViolation {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        });
    }

    /// Replace whatever was reported for `field` with a single violation.
    pub fn replace(&mut self, field: &str, code: &str, message: impl Into<String>) {
        self.violations.retain(|v| v.field != field);
        self.push(field, code, message);
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldViolation> {
        self.violations.iter()
    }

    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldViolation> {
        self.violations.iter().filter(move |v| v.field == field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.for_field(field).next().is_some()
    }

    /// First message reported for `field`, as a form would display it.
    pub fn message(&self, field: &str) -> Option<&str> {
        self.violations
            .iter()
            .find(|v| v.field == field)
            .map(|v| v.message.as_str())
    }

    /// Distinct field paths, in order.
    pub fn fields(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.violations.iter().map(|v| v.field.as_str()).collect();
        names.dedup();
        names
    }

    /// Sort by field and convert to a `Result`.
    pub fn into_result(mut self) -> Result<(), Self> {
        if self.violations.is_empty() {
            return Ok(());
        }
        self.violations.sort_by(|a, b| a.field.cmp(&b.field));
        Err(self)
    }
}

/// User-facing message for a derive-produced error. Explicit messages win;
/// otherwise the built-in rule is described from its params.
fn describe(err: &ValidationError) -> String {
    if let Some(message) = &err.message {
        return message.to_string();
    }

    let param = |name: &str| err.params.get(name);

    match &*err.code {
        "length" => {
            let len = param("value")
                .and_then(Value::as_str)
                .map(|s| s.chars().count() as u64);
            let min = param("min").and_then(Value::as_u64);
            let max = param("max").and_then(Value::as_u64);
            match (len, min, max) {
                (Some(len), Some(min), _) if len < min => {
                    format!("Debe tener al menos {min} caracteres")
                }
                (_, _, Some(max)) => format!("No puede exceder {max} caracteres"),
                (_, Some(min), None) => format!("Debe tener al menos {min} caracteres"),
                _ => "Largo inválido".to_string(),
            }
        }
        "range" => match (param("min"), param("max")) {
            (Some(min), None) => format!("Debe ser mayor o igual a {min}"),
            (None, Some(max)) => format!("Debe ser menor o igual a {max}"),
            (Some(min), Some(max)) => format!("Debe estar entre {min} y {max}"),
            (None, None) => "Valor fuera de rango".to_string(),
        },
        "email" => "Correo electrónico inválido".to_string(),
        _ => "Valor inválido".to_string(),
    }
}
