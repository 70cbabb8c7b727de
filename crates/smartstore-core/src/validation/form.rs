// ── Live form state ──
//
// Tracks values plus touched/dirty flags for one modal form. Errors are
// computed on demand; they become visible once a field was edited or left.

use std::collections::BTreeSet;

use thiserror::Error;

use super::{FieldError, FormSchema, FormValues};

/// Why a submission was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("form is read-only")]
    ReadOnly,
    #[error("{} field(s) invalid", .0.len())]
    Invalid(Vec<FieldError>),
}

#[derive(Debug, Clone)]
pub struct FormState {
    schema: FormSchema,
    values: FormValues,
    touched: BTreeSet<&'static str>,
    dirty: BTreeSet<&'static str>,
    read_only: bool,
}

impl FormState {
    /// A blank form (create mode).
    pub fn new(schema: FormSchema) -> Self {
        let values = schema.blank_values();
        Self {
            schema,
            values,
            touched: BTreeSet::new(),
            dirty: BTreeSet::new(),
            read_only: false,
        }
    }

    /// A form prefilled with `values` (edit and view modes).
    pub fn with_values(schema: FormSchema, values: FormValues) -> Self {
        let mut form = Self::new(schema);
        for (field, value) in values {
            if form.schema.field(&field).is_some() {
                form.values.insert(field, value);
            }
        }
        form
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn value(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    /// Change a field value and return its validation result.
    ///
    /// Unknown fields and read-only forms are left unchanged.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> Option<FieldError> {
        if self.read_only {
            return None;
        }
        let spec = self.schema.field(field)?;
        let name = spec.name;
        let value = value.into();
        let error = spec.validate(Some(&value));
        self.values.insert(name.to_owned(), value);
        self.dirty.insert(name);
        error
    }

    /// Mark a field as visited.
    pub fn blur(&mut self, field: &str) {
        if let Some(spec) = self.schema.field(field) {
            self.touched.insert(spec.name);
        }
    }

    pub fn touch_all(&mut self) {
        self.touched = self.schema.fields().iter().map(|f| f.name).collect();
    }

    pub fn is_touched(&self, field: &str) -> bool {
        self.touched.contains(field)
    }

    pub fn is_dirty(&self, field: &str) -> bool {
        self.dirty.contains(field)
    }

    /// Every current error, whether visible or not.
    pub fn errors(&self) -> Vec<FieldError> {
        self.schema.validate(&self.values)
    }

    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    /// The error to display for `field`, if it was touched or edited.
    pub fn visible_error(&self, field: &str) -> Option<FieldError> {
        if !self.is_touched(field) && !self.is_dirty(field) {
            return None;
        }
        let spec = self.schema.field(field)?;
        spec.validate(self.value(field))
    }

    /// Validate everything; on success return the trimmed values.
    ///
    /// A refused submission marks every field as touched so all errors show.
    pub fn submit(&mut self) -> Result<FormValues, SubmitError> {
        if self.read_only {
            return Err(SubmitError::ReadOnly);
        }
        let errors = self.errors();
        if !errors.is_empty() {
            self.touch_all();
            return Err(SubmitError::Invalid(errors));
        }
        Ok(self
            .values
            .iter()
            .map(|(k, v)| (k.clone(), v.trim().to_owned()))
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::validation::{FieldSpec, Violation};
    use pretty_assertions::assert_eq;

    fn schema() -> FormSchema {
        FormSchema::new(vec![
            FieldSpec::new("name", "Name")
                .required()
                .max_length(20)
                .whitespace(),
            FieldSpec::new("description", "Description")
                .max_length(200)
                .whitespace(),
        ])
    }

    #[test]
    fn errors_hidden_until_touched_or_dirty() {
        let mut form = FormState::new(schema());
        assert!(!form.is_valid());
        assert_eq!(form.visible_error("name"), None);

        form.blur("name");
        assert_eq!(
            form.visible_error("name").unwrap().violation,
            Violation::Required
        );
    }

    #[test]
    fn set_reports_and_marks_dirty() {
        let mut form = FormState::new(schema());
        let err = form.set("name", "  ").unwrap();
        assert_eq!(err.violation, Violation::Whitespace);
        assert!(form.is_dirty("name"));
        assert!(form.set("name", "Books").is_none());
        assert!(form.set("unknown", "x").is_none());
        assert_eq!(form.value("unknown"), None);
    }

    #[test]
    fn blocked_submit_touches_every_field() {
        let mut form = FormState::new(schema());
        let err = form.submit().unwrap_err();

        match err {
            SubmitError::Invalid(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].message, "Name is required");
            }
            SubmitError::ReadOnly => panic!("form is editable"),
        }
        assert!(form.is_touched("name"));
        assert!(form.is_touched("description"));
    }

    #[test]
    fn submit_returns_trimmed_values() {
        let mut form = FormState::new(schema());
        form.set("name", " Books ");
        let values = form.submit().unwrap();
        assert_eq!(values["name"], "Books");
        assert_eq!(values["description"], "");
    }

    #[test]
    fn read_only_form_refuses_edits_and_submission() {
        let values = FormValues::from([("name".to_owned(), "Audio".to_owned())]);
        let mut form = FormState::with_values(schema(), values).read_only(true);
        assert!(form.set("name", "").is_none());
        assert_eq!(form.value("name"), Some("Audio"));
        assert_eq!(form.submit().unwrap_err(), SubmitError::ReadOnly);
    }
}
