//! Snippet choice sets and payload validation.
//!
//! A [`SnippetPayload`] is what clients send; [`SnippetFields`] is what
//! survives validation. Decoding collects every failing field into a
//! [`FieldErrors`] map instead of stopping at the first problem.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{push_field_error, FieldErrors};

/// Maximum title length in characters.
pub const TITLE_MAX_LENGTH: usize = 100;

pub const DEFAULT_LANGUAGE: &str = "python";
pub const DEFAULT_STYLE: &str = "friendly";

/// All accepted language tags, sorted.
pub const LANGUAGES: &[&str] = &[
    "bash",
    "c",
    "clojure",
    "cpp",
    "csharp",
    "css",
    "d",
    "diff",
    "erlang",
    "go",
    "groovy",
    "haskell",
    "html",
    "java",
    "javascript",
    "json",
    "latex",
    "lisp",
    "lua",
    "markdown",
    "objective-c",
    "ocaml",
    "perl",
    "php",
    "python",
    "r",
    "ruby",
    "rust",
    "scala",
    "sql",
    "tcl",
    "text",
    "xml",
    "yaml",
];

/// All accepted highlight style tags, sorted.
pub const STYLES: &[&str] = &[
    "eighties",
    "friendly",
    "mocha",
    "ocean",
    "ocean-light",
    "solarized-dark",
    "solarized-light",
];

const MSG_REQUIRED: &str = "This field is required.";
const MSG_BLANK: &str = "This field may not be blank.";
const MSG_NOT_STRING: &str = "Not a valid string.";
const MSG_NOT_BOOLEAN: &str = "Must be a valid boolean.";
const MSG_NULL_CHARACTER: &str = "Null characters are not allowed.";

/// Incoming snippet representation. Every field is optional on the wire;
/// which ones are required depends on the operation.
///
/// Values are kept as raw JSON so a wrongly typed field is reported in the
/// field error map next to every other problem instead of failing the whole
/// body. Read-only fields (`id`, `owner`, `url`, `highlight`) are not
/// declared and are silently dropped by serde.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SnippetPayload {
    pub title: Option<Value>,
    pub code: Option<Value>,
    pub linenos: Option<Value>,
    pub language: Option<Value>,
    pub style: Option<Value>,
}

/// Validated, client-writable snippet fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetFields {
    pub title: String,
    pub code: String,
    pub linenos: bool,
    pub language: String,
    pub style: String,
}

/// How an update treats fields missing from the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// PUT: `code` must be present; other absent fields keep stored values.
    Full,
    /// PATCH: nothing is required; absent fields keep stored values.
    Partial,
}

/// Validate a creation payload, filling defaults for optional fields.
pub fn decode_create(payload: &SnippetPayload) -> Result<SnippetFields, FieldErrors> {
    decode(payload, None, true)
}

/// Validate an update payload against the currently stored fields.
pub fn decode_update(
    existing: &SnippetFields,
    payload: &SnippetPayload,
    mode: UpdateMode,
) -> Result<SnippetFields, FieldErrors> {
    decode(payload, Some(existing), mode == UpdateMode::Full)
}

fn decode(
    payload: &SnippetPayload,
    base: Option<&SnippetFields>,
    code_required: bool,
) -> Result<SnippetFields, FieldErrors> {
    let mut errors = FieldErrors::new();

    let title = match text(&mut errors, "title", payload.title.as_ref()) {
        Some(title) => {
            if title.chars().count() > TITLE_MAX_LENGTH {
                push_field_error(
                    &mut errors,
                    "title",
                    format!("Ensure this field has no more than {TITLE_MAX_LENGTH} characters."),
                );
            }
            reject_null_characters(&mut errors, "title", title);
            title.to_string()
        }
        None => base.map(|b| b.title.clone()).unwrap_or_default(),
    };

    let code = match (text(&mut errors, "code", payload.code.as_ref()), base) {
        (Some(code), _) => {
            if code.trim().is_empty() {
                push_field_error(&mut errors, "code", MSG_BLANK);
            }
            reject_null_characters(&mut errors, "code", code);
            code.to_string()
        }
        // Present but not a string; already reported.
        (None, _) if payload.code.is_some() => String::new(),
        (None, Some(base)) if !code_required => base.code.clone(),
        (None, _) => {
            push_field_error(&mut errors, "code", MSG_REQUIRED);
            String::new()
        }
    };

    let linenos = match payload.linenos.as_ref() {
        Some(Value::Bool(linenos)) => *linenos,
        Some(_) => {
            push_field_error(&mut errors, "linenos", MSG_NOT_BOOLEAN);
            false
        }
        None => base.map(|b| b.linenos).unwrap_or(false),
    };

    let language = text(&mut errors, "language", payload.language.as_ref());
    let language = choice(
        &mut errors,
        "language",
        language,
        base.map(|b| b.language.as_str()),
        DEFAULT_LANGUAGE,
        LANGUAGES,
    );
    let style = text(&mut errors, "style", payload.style.as_ref());
    let style = choice(
        &mut errors,
        "style",
        style,
        base.map(|b| b.style.as_str()),
        DEFAULT_STYLE,
        STYLES,
    );

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(SnippetFields {
        title,
        code,
        linenos,
        language,
        style,
    })
}

/// The supplied string, or `None` when absent. A non-string value is
/// recorded as an error and also yields `None`.
fn text<'a>(errors: &mut FieldErrors, field: &str, value: Option<&'a Value>) -> Option<&'a str> {
    match value? {
        Value::String(s) => Some(s),
        _ => {
            push_field_error(errors, field, MSG_NOT_STRING);
            None
        }
    }
}

/// Text columns cannot store NUL.
fn reject_null_characters(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.contains('\0') {
        push_field_error(errors, field, MSG_NULL_CHARACTER);
    }
}

/// Resolve an enumerated field: supplied value, then stored value, then default.
fn choice(
    errors: &mut FieldErrors,
    field: &str,
    given: Option<&str>,
    stored: Option<&str>,
    default: &str,
    allowed: &[&str],
) -> String {
    match given {
        Some(value) if allowed.contains(&value) => value.to_string(),
        Some(value) => {
            push_field_error(errors, field, format!("\"{value}\" is not a valid choice."));
            value.to_string()
        }
        None => stored.unwrap_or(default).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn payload_with_code(code: &str) -> SnippetPayload {
        SnippetPayload {
            code: Some(code.into()),
            ..Default::default()
        }
    }

    fn stored() -> SnippetFields {
        SnippetFields {
            title: "Stored".into(),
            code: "print(1)".into(),
            linenos: true,
            language: "python".into(),
            style: "mocha".into(),
        }
    }

    #[test]
    fn choice_sets_are_sorted_and_contain_defaults() {
        assert!(LANGUAGES.windows(2).all(|w| w[0] < w[1]));
        assert!(STYLES.windows(2).all(|w| w[0] < w[1]));
        assert!(LANGUAGES.contains(&DEFAULT_LANGUAGE));
        assert!(STYLES.contains(&DEFAULT_STYLE));
    }

    #[test]
    fn create_fills_defaults() {
        let fields = decode_create(&payload_with_code("foo = \"bar\"\n")).unwrap();
        assert_eq!(fields.title, "");
        assert_eq!(fields.code, "foo = \"bar\"\n");
        assert!(!fields.linenos);
        assert_eq!(fields.language, DEFAULT_LANGUAGE);
        assert_eq!(fields.style, DEFAULT_STYLE);
    }

    #[test]
    fn create_requires_code() {
        let errors = decode_create(&SnippetPayload::default()).unwrap_err();
        assert_eq!(errors["code"], vec![MSG_REQUIRED.to_string()]);
    }

    #[test]
    fn create_rejects_blank_code() {
        let errors = decode_create(&payload_with_code("   \n")).unwrap_err();
        assert_eq!(errors["code"], vec![MSG_BLANK.to_string()]);
    }

    #[test]
    fn title_length_is_bounded() {
        let mut payload = payload_with_code("x");
        payload.title = Some("a".repeat(TITLE_MAX_LENGTH).into());
        assert!(decode_create(&payload).is_ok());

        payload.title = Some("a".repeat(TITLE_MAX_LENGTH + 1).into());
        let errors = decode_create(&payload).unwrap_err();
        assert_eq!(
            errors["title"],
            vec!["Ensure this field has no more than 100 characters.".to_string()]
        );
    }

    #[test]
    fn unknown_choices_are_reported_together() {
        let payload = SnippetPayload {
            language: Some("klingon".into()),
            style: Some("neon".into()),
            ..Default::default()
        };
        let errors = decode_create(&payload).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(
            errors["language"],
            vec!["\"klingon\" is not a valid choice.".to_string()]
        );
        assert!(errors.contains_key("style"));
        assert!(errors.contains_key("code"));
    }

    #[test]
    fn full_update_requires_code_but_keeps_other_fields() {
        let errors =
            decode_update(&stored(), &SnippetPayload::default(), UpdateMode::Full).unwrap_err();
        assert!(errors.contains_key("code"));

        let fields =
            decode_update(&stored(), &payload_with_code("print(2)"), UpdateMode::Full).unwrap();
        assert_eq!(fields.code, "print(2)");
        assert_eq!(fields.title, "Stored");
        assert!(fields.linenos);
        assert_eq!(fields.style, "mocha");
    }

    #[test]
    fn partial_update_requires_nothing() {
        assert_matches!(
            decode_update(&stored(), &SnippetPayload::default(), UpdateMode::Partial),
            Ok(fields) if fields == stored()
        );

        let payload = SnippetPayload {
            title: Some("Renamed".into()),
            ..Default::default()
        };
        let fields = decode_update(&stored(), &payload, UpdateMode::Partial).unwrap();
        assert_eq!(fields.title, "Renamed");
        assert_eq!(fields.code, "print(1)");
    }

    #[test]
    fn partial_update_still_validates_supplied_fields() {
        let payload = SnippetPayload {
            style: Some("neon".into()),
            ..Default::default()
        };
        let errors = decode_update(&stored(), &payload, UpdateMode::Partial).unwrap_err();
        assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["style"]);
    }

    #[test]
    fn read_only_fields_are_ignored() {
        let payload: SnippetPayload = serde_json::from_value(serde_json::json!({
            "id": 99,
            "owner": "mallory",
            "code": "x = 1",
        }))
        .unwrap();
        let fields = decode_create(&payload).unwrap();
        assert_eq!(fields.code, "x = 1");
    }

    #[test]
    fn wrongly_typed_fields_are_field_errors() {
        let payload: SnippetPayload = serde_json::from_value(serde_json::json!({
            "title": [],
            "code": 5,
            "linenos": "yes",
            "style": false,
        }))
        .unwrap();
        let errors = decode_create(&payload).unwrap_err();
        assert_eq!(errors["title"], vec![MSG_NOT_STRING.to_string()]);
        assert_eq!(errors["code"], vec![MSG_NOT_STRING.to_string()]);
        assert_eq!(errors["linenos"], vec![MSG_NOT_BOOLEAN.to_string()]);
        assert_eq!(errors["style"], vec![MSG_NOT_STRING.to_string()]);
        assert!(!errors.contains_key("language"));
    }

    #[test]
    fn wrongly_typed_code_is_not_reported_as_missing_on_patch() {
        let payload = SnippetPayload {
            code: Some(serde_json::json!({"a": 1})),
            ..Default::default()
        };
        let errors = decode_update(&stored(), &payload, UpdateMode::Partial).unwrap_err();
        assert_eq!(errors["code"], vec![MSG_NOT_STRING.to_string()]);
    }

    #[test]
    fn null_characters_are_rejected() {
        let mut payload = payload_with_code("a\0b");
        payload.title = Some("nul\0title".into());
        let errors = decode_create(&payload).unwrap_err();
        assert_eq!(errors["code"], vec![MSG_NULL_CHARACTER.to_string()]);
        assert_eq!(errors["title"], vec![MSG_NULL_CHARACTER.to_string()]);
    }

    #[test]
    fn json_null_counts_as_absent() {
        let payload: SnippetPayload = serde_json::from_value(serde_json::json!({
            "code": "x",
            "title": null,
        }))
        .unwrap();
        assert_eq!(decode_create(&payload).unwrap().title, "");
    }
}
