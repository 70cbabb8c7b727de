//! Shared helpers for command handlers.

use std::path::Path;

use smartstore_core::validation::{FieldError, FormValues};

use crate::error::CliError;

/// Read a JSON object for `--from-file` flags as raw form values.
///
/// Strings are taken verbatim, numbers and booleans in their JSON spelling,
/// `null` as an empty value.
pub fn read_form_file(path: &Path) -> Result<FormValues, CliError> {
    let contents = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&contents)?;
    form_values_from_json(value)
}

fn form_values_from_json(value: serde_json::Value) -> Result<FormValues, CliError> {
    let serde_json::Value::Object(map) = value else {
        return Err(CliError::Validation {
            field: "from-file".into(),
            reason: "expected a JSON object".into(),
        });
    };
    map.into_iter()
        .map(|(key, value)| {
            let text = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Null => String::new(),
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                other => {
                    return Err(CliError::Validation {
                        field: key,
                        reason: format!("expected a scalar, got {other}"),
                    });
                }
            };
            Ok((key, text))
        })
        .collect()
}

/// Merge flag values over file values; flags win.
pub fn merge_fields(
    from_file: Option<&Path>,
    flags: impl IntoIterator<Item = (&'static str, Option<String>)>,
) -> Result<FormValues, CliError> {
    let mut values = match from_file {
        Some(path) => read_form_file(path)?,
        None => FormValues::new(),
    };
    for (field, value) in flags {
        if let Some(value) = value {
            values.insert(field.to_owned(), value);
        }
    }
    Ok(values)
}

/// Fold form validation errors into one usage error naming the first field.
pub fn validation_error(errors: &[FieldError]) -> CliError {
    let field = errors.first().map_or("input", |e| e.field).to_owned();
    let reason = errors
        .iter()
        .map(|e| e.message.clone())
        .collect::<Vec<_>>()
        .join("; ");
    CliError::Validation { field, reason }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_scalars_become_form_text() {
        let values =
            form_values_from_json(json!({ "name": "Webcam", "price": 49.99, "description": null }))
                .unwrap();
        assert_eq!(values["name"], "Webcam");
        assert_eq!(values["price"], "49.99");
        assert_eq!(values["description"], "");
    }

    #[test]
    fn nested_values_are_rejected() {
        assert!(form_values_from_json(json!({ "name": ["a"] })).is_err());
        assert!(form_values_from_json(json!([1, 2])).is_err());
    }

    #[test]
    fn flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.json");
        std::fs::write(&path, r#"{"name":"Webcam","price":"49.99"}"#).unwrap();

        let values = merge_fields(
            Some(&path),
            [("name", Some("Webcam Pro".to_owned())), ("price", None)],
        )
        .unwrap();
        assert_eq!(values["name"], "Webcam Pro");
        assert_eq!(values["price"], "49.99");
    }
}
