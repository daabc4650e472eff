use std::collections::BTreeMap;

use crate::types::DbId;

/// Per-field validation messages, keyed by wire field name.
///
/// A `BTreeMap` keeps the rendered error body in a stable order.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Validation failed for fields: {}", field_names(.0))]
    InvalidFields(FieldErrors),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

fn field_names(errors: &FieldErrors) -> String {
    errors.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
}

/// Append `message` to the list for `field`.
pub fn push_field_error(errors: &mut FieldErrors, field: &str, message: impl Into<String>) {
    errors
        .entry(field.to_string())
        .or_default()
        .push(message.into());
}

/// Fold `validator` derive output into `target`, preferring each rule's
/// custom message over its code.
pub fn collect_validation_errors(target: &mut FieldErrors, errors: &validator::ValidationErrors) {
    for (field, field_errors) in errors.field_errors() {
        for err in field_errors {
            let message = err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| err.code.to_string());
            push_field_error(target, &field.to_string(), message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_fields_display_lists_field_names() {
        let mut errors = FieldErrors::new();
        errors.insert("style".into(), vec!["bad".into()]);
        errors.insert("code".into(), vec!["This field is required.".into()]);

        let err = CoreError::InvalidFields(errors);
        assert_eq!(err.to_string(), "Validation failed for fields: code, style");
    }

    #[test]
    fn push_field_error_appends() {
        let mut errors = FieldErrors::new();
        push_field_error(&mut errors, "code", "first");
        push_field_error(&mut errors, "code", "second");
        assert_eq!(errors["code"], vec!["first".to_string(), "second".to_string()]);
    }

    #[test]
    fn not_found_display() {
        let err = CoreError::NotFound {
            entity: "Snippet",
            id: 7,
        };
        assert_eq!(err.to_string(), "Entity not found: Snippet with id 7");
    }
}
