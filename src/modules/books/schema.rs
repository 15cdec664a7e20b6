//! JSON Schema validation for submitted book records.
//!
//! The schema document lives in `schemas/book.json`; which fields are
//! required and how they are typed is configuration there, not code here.

use jsonschema::error::ValidationErrorKind;
use jsonschema::{ValidationError, Validator};
use serde_json::Value;

const BOOK_SCHEMA: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/schemas/book.json"));

/// Outcome of checking a candidate record against the book schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaCheck {
    pub valid: bool,
    pub violations: Vec<String>,
}

/// Compiled validator for submitted book records.
pub struct SchemaValidator {
    validator: Validator,
}

impl SchemaValidator {
    /// Compile the embedded book schema.
    ///
    /// A malformed schema document fails here, at startup, never at
    /// request time.
    pub fn for_books() -> anyhow::Result<Self> {
        let schema: Value = serde_json::from_str(BOOK_SCHEMA)
            .map_err(|err| anyhow::anyhow!("book schema is not valid JSON: {err}"))?;
        let validator = jsonschema::validator_for(&schema)
            .map_err(|err| anyhow::anyhow!("book schema failed to compile: {err}"))?;

        Ok(Self { validator })
    }

    /// Check an untyped candidate record against the schema.
    ///
    /// Pure function of the candidate: no storage, no side effects.
    /// Violations carry one message per failed check, in the engine's
    /// keyword evaluation order; `required` violations follow the order of
    /// the schema's `required` array. Unknown extra fields pass.
    pub fn check(&self, candidate: &Value) -> SchemaCheck {
        let violations: Vec<String> = self
            .validator
            .iter_errors(candidate)
            .map(|error| format_violation(&error))
            .collect();

        SchemaCheck {
            valid: violations.is_empty(),
            violations,
        }
    }
}

/// Render one violation in jsonschema "stack" style, e.g.
/// `instance requires property "year"`.
fn format_violation(error: &ValidationError<'_>) -> String {
    let location = instance_label(&error.instance_path.to_string());
    match &error.kind {
        ValidationErrorKind::Required { property } => {
            format!("{location} requires property {property}")
        }
        _ => format!("{location}: {error}"),
    }
}

/// Map a JSON pointer (`/pages`) to a dotted instance path (`instance.pages`).
fn instance_label(pointer: &str) -> String {
    if pointer.is_empty() {
        "instance".to_string()
    } else {
        format!("instance{}", pointer.replace('/', "."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_record() -> Value {
        json!({
            "isbn": "0691161518",
            "amazon_url": "http://a.co/eobPtX2",
            "author": "Matthew Lane",
            "language": "english",
            "pages": 264,
            "publisher": "Princeton University Press",
            "title": "Power-Up: Unlocking the Hidden Mathematics in Video Games",
            "year": 2017
        })
    }

    #[test]
    fn complete_record_passes() {
        let validator = SchemaValidator::for_books().unwrap();
        let check = validator.check(&full_record());

        assert!(check.valid);
        assert!(check.violations.is_empty());
    }

    #[test]
    fn extra_fields_are_not_rejected() {
        let validator = SchemaValidator::for_books().unwrap();
        let mut candidate = full_record();
        candidate["shelf"] = json!("A3");

        assert!(validator.check(&candidate).valid);
    }

    #[test]
    fn missing_year_is_reported_by_name() {
        let validator = SchemaValidator::for_books().unwrap();
        let mut candidate = full_record();
        candidate.as_object_mut().unwrap().remove("year");

        let check = validator.check(&candidate);
        assert!(!check.valid);
        assert_eq!(
            check.violations,
            vec!["instance requires property \"year\"".to_string()]
        );
    }

    #[test]
    fn missing_fields_follow_schema_order() {
        let validator = SchemaValidator::for_books().unwrap();
        let mut candidate = full_record();
        let record = candidate.as_object_mut().unwrap();
        record.remove("publisher");
        record.remove("year");

        let check = validator.check(&candidate);
        assert_eq!(
            check.violations,
            vec![
                "instance requires property \"publisher\"".to_string(),
                "instance requires property \"year\"".to_string(),
            ]
        );
    }

    #[test]
    fn non_integer_pages_is_a_violation() {
        let validator = SchemaValidator::for_books().unwrap();
        let mut candidate = full_record();
        candidate["pages"] = json!("264");

        let check = validator.check(&candidate);
        assert!(!check.valid);
        assert!(check.violations[0].contains("pages"));
    }

    #[test]
    fn zero_pages_is_a_violation() {
        let validator = SchemaValidator::for_books().unwrap();
        let mut candidate = full_record();
        candidate["pages"] = json!(0);

        assert!(!validator.check(&candidate).valid);
    }

    #[test]
    fn non_object_candidate_is_rejected() {
        let validator = SchemaValidator::for_books().unwrap();
        let check = validator.check(&json!("not a record"));

        assert!(!check.valid);
        assert_eq!(check.violations.len(), 1);
    }
}
