// ── Form validation ──
//
// Declarative per-field rule sets evaluated on change, on blur and on
// submit. Each field reports at most one error, chosen in the order
// required → length → whitespace → numeric.

mod form;

use std::collections::BTreeMap;

use serde::Serialize;
use strum::{Display, IntoStaticStr};

pub use form::{FormState, SubmitError};

/// Raw form input keyed by field name.
pub type FormValues = BTreeMap<String, String>;

/// One validation rule attached to a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    Required,
    /// Inclusive lower bound on the trimmed length, in characters.
    MinLength(usize),
    /// Inclusive upper bound on the trimmed length, in characters.
    MaxLength(usize),
    /// Reject values consisting solely of whitespace.
    Whitespace,
    /// Numeric floor; implies the value must parse as a number.
    Min(f64),
}

/// Which rule a field violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Violation {
    Required,
    MinLength,
    MaxLength,
    Whitespace,
    Numeric,
    Min,
}

/// A field-level validation failure with its display message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub violation: Violation,
    pub message: String,
}

/// Rules and labels for one form field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    rules: Vec<Rule>,
    /// Prefix for numeric bounds in messages (`$0.01`).
    unit: &'static str,
}

impl FieldSpec {
    pub fn new(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            rules: Vec::new(),
            unit: "",
        }
    }

    pub fn required(self) -> Self {
        self.rule(Rule::Required)
    }

    pub fn min_length(self, n: usize) -> Self {
        self.rule(Rule::MinLength(n))
    }

    pub fn max_length(self, n: usize) -> Self {
        self.rule(Rule::MaxLength(n))
    }

    pub fn whitespace(self) -> Self {
        self.rule(Rule::Whitespace)
    }

    pub fn min(self, floor: f64) -> Self {
        self.rule(Rule::Min(floor))
    }

    pub fn currency(mut self, unit: &'static str) -> Self {
        self.unit = unit;
        self
    }

    fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn is_required(&self) -> bool {
        self.rules.contains(&Rule::Required)
    }

    fn has_whitespace_rule(&self) -> bool {
        self.rules.contains(&Rule::Whitespace)
    }

    fn numeric_floor(&self) -> Option<f64> {
        self.rules.iter().find_map(|r| match r {
            Rule::Min(floor) => Some(*floor),
            _ => None,
        })
    }

    /// Validate one raw value. `None` is treated as an empty string.
    pub fn validate(&self, raw: Option<&str>) -> Option<FieldError> {
        let raw = raw.unwrap_or_default();

        if raw.is_empty() {
            return self.is_required().then(|| self.error(Violation::Required));
        }

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            if self.has_whitespace_rule() {
                return Some(self.error(Violation::Whitespace));
            }
            return self.is_required().then(|| self.error(Violation::Required));
        }

        let length = trimmed.chars().count();
        for rule in &self.rules {
            match *rule {
                Rule::MinLength(n) if length < n => return Some(self.error(Violation::MinLength)),
                Rule::MaxLength(n) if length > n => return Some(self.error(Violation::MaxLength)),
                _ => {}
            }
        }

        if let Some(floor) = self.numeric_floor() {
            let Some(value) = trimmed.parse::<f64>().ok().filter(|v| v.is_finite()) else {
                return Some(self.error(Violation::Numeric));
            };
            if value < floor {
                return Some(self.error(Violation::Min));
            }
        }

        None
    }

    fn error(&self, violation: Violation) -> FieldError {
        FieldError {
            field: self.name,
            violation,
            message: self.message(violation),
        }
    }

    fn message(&self, violation: Violation) -> String {
        let label = self.label;
        let bound = |pick: fn(&Rule) -> Option<usize>| {
            self.rules.iter().find_map(pick).unwrap_or_default()
        };
        match violation {
            Violation::Required => format!("{label} is required"),
            Violation::MinLength => {
                let n = bound(|r| match r {
                    Rule::MinLength(n) => Some(*n),
                    _ => None,
                });
                format!("{label} must have at least {n} characters")
            }
            Violation::MaxLength => {
                let n = bound(|r| match r {
                    Rule::MaxLength(n) => Some(*n),
                    _ => None,
                });
                format!("{label} cannot exceed {n} characters")
            }
            Violation::Whitespace => format!("{label} cannot be only whitespace"),
            Violation::Numeric => format!("{label} must be a valid number"),
            Violation::Min => format!(
                "{label} must be at least {}{}",
                self.unit,
                self.numeric_floor().unwrap_or_default()
            ),
        }
    }
}

/// Ordered field specs for one form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSchema {
    fields: Vec<FieldSpec>,
}

impl FormSchema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Validate every field, in schema order.
    pub fn validate(&self, values: &FormValues) -> Vec<FieldError> {
        self.fields
            .iter()
            .filter_map(|f| f.validate(values.get(f.name).map(String::as_str)))
            .collect()
    }

    /// Empty values for every field (create mode).
    pub fn blank_values(&self) -> FormValues {
        self.fields
            .iter()
            .map(|f| (f.name.to_owned(), String::new()))
            .collect()
    }
}
