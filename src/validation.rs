//! Field checks for course payloads.
//!
//! Create requires every field; update only checks the fields it carries.
//! Both report failures as a map keyed by field name.

use serde_json::{Map, Value};

use crate::error::CourseError;
use crate::models::{CoursePatch, NewCourse};

/// A decoded request body.
pub type Payload = Map<String, Value>;

/// Failures keyed by field name. Empty means valid.
pub type FieldErrors = Map<String, Value>;

pub const REQUIRED_FIELDS: [&str; 4] = ["code", "name", "credits", "term"];

pub const MUST_BE_STRING: &str = "Must be a string";
pub const MUST_NOT_BE_EMPTY: &str = "Must not be empty";
pub const MUST_BE_POSITIVE_INTEGER: &str = "Must be a positive integer";

#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    MissingFields(Vec<String>),
    Invalid(FieldErrors),
}

impl Rejection {
    pub fn into_field_errors(self) -> FieldErrors {
        match self {
            Rejection::MissingFields(fields) => {
                let mut errors = FieldErrors::new();
                errors.insert(
                    "missing_fields".to_string(),
                    Value::Array(fields.into_iter().map(Value::String).collect()),
                );
                errors
            }
            Rejection::Invalid(errors) => errors,
        }
    }
}

impl From<Rejection> for CourseError {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::MissingFields(fields) => CourseError::MissingFields(fields),
            Rejection::Invalid(errors) => CourseError::Validation(errors),
        }
    }
}

pub fn validate_create(payload: &Payload) -> FieldErrors {
    parse_new_course(payload)
        .err()
        .map(Rejection::into_field_errors)
        .unwrap_or_default()
}

pub fn validate_update(payload: &Payload) -> FieldErrors {
    parse_course_patch(payload)
        .err()
        .map(Rejection::into_field_errors)
        .unwrap_or_default()
}

/// Checks a create payload and extracts the new course from it.
///
/// Missing fields short-circuit before any type check runs.
pub fn parse_new_course(payload: &Payload) -> Result<NewCourse, Rejection> {
    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| !payload.contains_key(**field))
        .map(|field| field.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(Rejection::MissingFields(missing));
    }

    let mut errors = FieldErrors::new();
    let code = text(payload, "code", &mut errors);
    let name = text(payload, "name", &mut errors);
    let credits = positive_integer(payload, "credits", &mut errors);
    let term = positive_integer(payload, "term", &mut errors);

    match (code, name, credits, term) {
        (Some(code), Some(name), Some(credits), Some(term)) if errors.is_empty() => Ok(NewCourse {
            code,
            name,
            credits,
            term,
        }),
        _ => Err(Rejection::Invalid(errors)),
    }
}

/// Checks whichever course fields an update payload carries. Unknown keys are ignored.
pub fn parse_course_patch(payload: &Payload) -> Result<CoursePatch, Rejection> {
    let mut errors = FieldErrors::new();
    let patch = CoursePatch {
        code: text(payload, "code", &mut errors),
        name: text(payload, "name", &mut errors),
        credits: positive_integer(payload, "credits", &mut errors),
        term: positive_integer(payload, "term", &mut errors),
    };

    if errors.is_empty() {
        Ok(patch)
    } else {
        Err(Rejection::Invalid(errors))
    }
}

fn text(payload: &Payload, field: &str, errors: &mut FieldErrors) -> Option<String> {
    match payload.get(field)? {
        Value::String(s) if s.trim().is_empty() => {
            errors.insert(field.to_string(), MUST_NOT_BE_EMPTY.into());
            None
        }
        Value::String(s) => Some(s.clone()),
        _ => {
            errors.insert(field.to_string(), MUST_BE_STRING.into());
            None
        }
    }
}

// Booleans and floats are not integers here, even 3.0.
fn positive_integer(payload: &Payload, field: &str, errors: &mut FieldErrors) -> Option<i64> {
    match payload.get(field)?.as_i64() {
        Some(n) if n > 0 => Some(n),
        _ => {
            errors.insert(field.to_string(), MUST_BE_POSITIVE_INTEGER.into());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Payload {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn valid_create_payload_has_no_errors() {
        let body = payload(json!({"code": "IF101", "name": "Algoritma", "credits": 3, "term": 1}));

        assert!(validate_create(&body).is_empty());
        assert_eq!(
            parse_new_course(&body),
            Ok(NewCourse {
                code: "IF101".to_string(),
                name: "Algoritma".to_string(),
                credits: 3,
                term: 1,
            })
        );
    }

    #[test]
    fn missing_fields_short_circuit_type_checks() {
        let body = payload(json!({"code": 5, "credits": -1}));

        let errors = validate_create(&body);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["missing_fields"], json!(["name", "term"]));
    }

    #[test]
    fn empty_payload_lists_every_field() {
        let errors = validate_create(&Payload::new());
        assert_eq!(errors["missing_fields"], json!(["code", "name", "credits", "term"]));
    }

    #[test]
    fn negative_credits_rejected() {
        let body = payload(json!({"code": "IF999", "name": "X", "credits": -1, "term": 1}));

        let errors = validate_create(&body);
        assert_eq!(Value::Object(errors), json!({"credits": "Must be a positive integer"}));
    }

    #[test]
    fn all_type_errors_accumulate() {
        let body = payload(json!({"code": 101, "name": null, "credits": 0, "term": "1"}));

        let errors = validate_create(&body);
        assert_eq!(
            Value::Object(errors),
            json!({
                "code": "Must be a string",
                "name": "Must be a string",
                "credits": "Must be a positive integer",
                "term": "Must be a positive integer",
            })
        );
    }

    #[test]
    fn booleans_and_floats_are_not_integers() {
        let body = payload(json!({"code": "IF101", "name": "Algoritma", "credits": true, "term": 2.0}));

        let errors = validate_create(&body);
        assert_eq!(errors["credits"], MUST_BE_POSITIVE_INTEGER);
        assert_eq!(errors["term"], MUST_BE_POSITIVE_INTEGER);
    }

    #[test]
    fn integers_beyond_i64_are_rejected() {
        let body = payload(json!({"code": "IF101", "name": "Algoritma", "credits": u64::MAX, "term": 1}));

        let errors = validate_create(&body);
        assert_eq!(errors["credits"], MUST_BE_POSITIVE_INTEGER);
    }

    #[test]
    fn blank_text_rejected() {
        let body = payload(json!({"code": "   ", "name": "", "credits": 3, "term": 1}));

        let errors = validate_create(&body);
        assert_eq!(errors["code"], MUST_NOT_BE_EMPTY);
        assert_eq!(errors["name"], MUST_NOT_BE_EMPTY);
    }

    #[test]
    fn term_has_no_upper_bound() {
        let body = payload(json!({"code": "IF101", "name": "Algoritma", "credits": 3, "term": 14}));
        assert!(validate_create(&body).is_empty());
    }

    #[test]
    fn update_checks_only_present_fields() {
        let body = payload(json!({"credits": 4}));

        assert!(validate_update(&body).is_empty());
        assert_eq!(
            parse_course_patch(&body),
            Ok(CoursePatch {
                credits: Some(4),
                ..Default::default()
            })
        );
    }

    #[test]
    fn update_accumulates_errors_for_present_fields() {
        let body = payload(json!({"name": 7, "term": 0}));

        let errors = validate_update(&body);
        assert_eq!(
            Value::Object(errors),
            json!({"name": "Must be a string", "term": "Must be a positive integer"})
        );
    }

    #[test]
    fn update_ignores_unknown_keys() {
        let body = payload(json!({"id": 99, "lecturer": "Budi"}));

        let patch = parse_course_patch(&body).expect("valid patch");
        assert!(patch.is_empty());
    }

    #[test]
    fn rejection_converts_to_course_error() {
        let err: CourseError = Rejection::MissingFields(vec!["code".to_string()]).into();
        assert!(matches!(err, CourseError::MissingFields(fields) if fields == ["code"]));
    }
}
