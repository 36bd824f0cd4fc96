//! User sanitation and validation

use thiserror::Error;

use super::entity::NewUser;
use super::input::{AgeInput, AgeValue, NormalizedInput, UserInput};
use crate::domain::DomainError;

const MIN_EMAIL_LENGTH: usize = 5;
const MIN_NAME_LENGTH: usize = 2;
const MAX_NAME_LENGTH: usize = 100;
const MIN_AGE: i64 = 1;
const MAX_AGE: i64 = 150;

/// Every field violation found in one candidate, in field order
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation failed: {}", violations.join(", "))]
pub struct UserValidationError {
    violations: Vec<String>,
}

impl UserValidationError {
    pub fn violations(&self) -> &[String] {
        &self.violations
    }
}

impl From<UserValidationError> for DomainError {
    fn from(err: UserValidationError) -> Self {
        DomainError::validation(err.violations)
    }
}

/// Normalize raw input without judging it
///
/// Trims and lowercases the email, trims the name and coerces the age. Blank
/// ages count as absent; fractional numbers are truncated toward zero.
pub fn sanitize(input: &UserInput) -> NormalizedInput {
    NormalizedInput {
        email: input.email.as_deref().map(|e| e.trim().to_lowercase()),
        name: input.name.as_deref().map(|n| n.trim().to_string()),
        age: input.age.as_ref().and_then(coerce_age),
    }
}

fn coerce_age(age: &AgeInput) -> Option<AgeValue> {
    match age {
        AgeInput::Integer(n) => Some(AgeValue::Number(*n)),
        AgeInput::Float(f) => {
            Some(truncate(*f).unwrap_or_else(|| AgeValue::NotANumber(f.to_string())))
        }
        AgeInput::Text(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return None;
            }
            if let Ok(n) = trimmed.parse::<i64>() {
                return Some(AgeValue::Number(n));
            }
            let parsed = trimmed.parse::<f64>().ok().and_then(truncate);
            Some(parsed.unwrap_or_else(|| AgeValue::NotANumber(trimmed.to_string())))
        }
    }
}

fn truncate(value: f64) -> Option<AgeValue> {
    // `as` saturates, out-of-range values then fail the range check
    value.is_finite().then(|| AgeValue::Number(value.trunc() as i64))
}

/// Check a sanitized candidate against every field constraint
pub fn validate(input: &NormalizedInput) -> Result<(), UserValidationError> {
    check(input).map(|_| ())
}

/// Sanitize first, then validate, returning the clean record
pub fn validate_and_sanitize(input: &UserInput) -> Result<NewUser, UserValidationError> {
    check(&sanitize(input))
}

fn check(input: &NormalizedInput) -> Result<NewUser, UserValidationError> {
    let email = check_email(input.email.as_deref());
    let name = check_name(input.name.as_deref());
    let age = check_age(input.age.as_ref());

    match (email, name, age) {
        (Ok(email), Ok(name), Ok(age)) => Ok(NewUser::new(email, name, age)),
        (email, name, age) => Err(UserValidationError {
            violations: [email.err(), name.err(), age.err()]
                .into_iter()
                .flatten()
                .collect(),
        }),
    }
}

fn check_email(email: Option<&str>) -> Result<String, String> {
    match email {
        None | Some("") => Err("Email is required".to_string()),
        Some(e) if !e.contains('@') => Err("Invalid email format".to_string()),
        Some(e) if e.chars().count() < MIN_EMAIL_LENGTH => Err(format!(
            "Email must be at least {} characters",
            MIN_EMAIL_LENGTH
        )),
        Some(e) => Ok(e.to_string()),
    }
}

fn check_name(name: Option<&str>) -> Result<String, String> {
    let Some(name) = name.filter(|n| !n.is_empty()) else {
        return Err("Name is required".to_string());
    };

    let length = name.chars().count();

    if length < MIN_NAME_LENGTH {
        Err(format!("Name must be at least {} characters", MIN_NAME_LENGTH))
    } else if length > MAX_NAME_LENGTH {
        Err(format!("Name must be at most {} characters", MAX_NAME_LENGTH))
    } else {
        Ok(name.to_string())
    }
}

fn check_age(age: Option<&AgeValue>) -> Result<Option<i32>, String> {
    match age {
        None => Ok(None),
        Some(AgeValue::NotANumber(_)) => Err("Age must be a valid number".to_string()),
        Some(AgeValue::Number(n)) if *n < MIN_AGE => Err("Age must be greater than 0".to_string()),
        Some(AgeValue::Number(n)) if *n > MAX_AGE => {
            Err(format!("Age must be at most {}", MAX_AGE))
        }
        Some(AgeValue::Number(n)) => i32::try_from(*n)
            .map(Some)
            .map_err(|_| "Age must be a valid number".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(email: Option<&str>, name: Option<&str>, age: Option<AgeInput>) -> UserInput {
        UserInput {
            email: email.map(String::from),
            name: name.map(String::from),
            age,
        }
    }

    fn violations(input: &UserInput) -> Vec<String> {
        validate(&sanitize(input))
            .unwrap_err()
            .violations()
            .to_vec()
    }

    // Sanitizer

    #[test]
    fn test_sanitize_normalizes_fields() {
        let raw = input(Some("  Ada@Example.COM "), Some("  Ada Lovelace  "), Some("36".into()));
        let clean = sanitize(&raw);

        assert_eq!(clean.email.as_deref(), Some("ada@example.com"));
        assert_eq!(clean.name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(clean.age, Some(AgeValue::Number(36)));
    }

    #[test]
    fn test_sanitize_age_coercion() {
        let cases = [
            (None, None),
            (Some(AgeInput::Text("   ".to_string())), None),
            (Some(AgeInput::Integer(0)), Some(AgeValue::Number(0))),
            (Some(AgeInput::Float(25.9)), Some(AgeValue::Number(25))),
            (Some(AgeInput::Text("30.2".to_string())), Some(AgeValue::Number(30))),
            (
                Some(AgeInput::Text(" abc ".to_string())),
                Some(AgeValue::NotANumber("abc".to_string())),
            ),
        ];

        for (age, expected) in cases {
            let clean = sanitize(&input(None, None, age.clone()));
            assert_eq!(clean.age, expected, "age input {:?}", age);
        }
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let samples = [
            input(Some(" MiXeD@Case.Org "), Some(" Bob "), Some("  41 ".into())),
            input(None, Some("x"), Some(AgeInput::Float(12.75))),
            input(Some(""), None, Some("not a number".into())),
            input(Some("A@B"), Some("  "), Some(AgeInput::Integer(-4))),
            UserInput::default(),
        ];

        for sample in samples {
            let once = sanitize(&sample);
            let twice = sanitize(&UserInput::from(once.clone()));
            assert_eq!(once, twice);
        }
    }

    // Validator

    #[test]
    fn test_valid_input_passes() {
        let clean = validate_and_sanitize(&input(
            Some("Ada@Example.com"),
            Some(" Ada "),
            Some(36.into()),
        ))
        .unwrap();

        assert_eq!(clean.email(), "ada@example.com");
        assert_eq!(clean.name(), "Ada");
        assert_eq!(clean.age(), Some(36));
    }

    #[test]
    fn test_age_is_optional() {
        let clean = validate_and_sanitize(&input(Some("a@b.co"), Some("Al"), None)).unwrap();
        assert_eq!(clean.age(), None);
    }

    #[test]
    fn test_missing_email_and_name_are_both_reported() {
        assert_eq!(
            violations(&UserInput::default()),
            vec!["Email is required", "Name is required"]
        );
    }

    #[test]
    fn test_all_violations_are_collected() {
        assert_eq!(
            violations(&input(Some("no-at-sign"), Some("A"), Some("abc".into()))),
            vec![
                "Invalid email format",
                "Name must be at least 2 characters",
                "Age must be a valid number",
            ]
        );
    }

    #[test]
    fn test_email_rules() {
        assert_eq!(violations(&input(Some("   "), Some("Al"), None)), vec!["Email is required"]);
        assert_eq!(violations(&input(Some("abc"), Some("Al"), None)), vec!["Invalid email format"]);
        assert_eq!(
            violations(&input(Some("a@b"), Some("Al"), None)),
            vec!["Email must be at least 5 characters"]
        );
        assert!(validate_and_sanitize(&input(Some("a@b.c"), Some("Al"), None)).is_ok());
    }

    #[test]
    fn test_name_length_bounds() {
        let max = "n".repeat(100);
        let too_long = "n".repeat(101);

        assert!(validate_and_sanitize(&input(Some("a@b.co"), Some(&max), None)).is_ok());
        assert_eq!(
            violations(&input(Some("a@b.co"), Some(&too_long), None)),
            vec!["Name must be at most 100 characters"]
        );
        assert_eq!(
            violations(&input(Some("a@b.co"), Some("   "), None)),
            vec!["Name is required"]
        );
    }

    #[test]
    fn test_age_bounds() {
        let valid = |age: i64| {
            validate_and_sanitize(&input(Some("a@b.co"), Some("Al"), Some(age.into())))
        };

        assert!(valid(1).is_ok());
        assert!(valid(150).is_ok());
        assert_eq!(valid(0).unwrap_err().violations(), ["Age must be greater than 0"]);
        assert_eq!(valid(-5).unwrap_err().violations(), ["Age must be greater than 0"]);
        assert_eq!(valid(151).unwrap_err().violations(), ["Age must be at most 150"]);
    }

    #[test]
    fn test_validation_error_converts_to_domain_error() {
        let err = validate_and_sanitize(&UserInput::default()).unwrap_err();
        let domain: DomainError = err.into();

        assert_eq!(
            domain,
            DomainError::validation(vec![
                "Email is required".to_string(),
                "Name is required".to_string(),
            ])
        );
    }
}
