use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use super::values::{Field, FormValues};

/// Default minimum length of the first name.
pub const DEFAULT_FIRST_NAME_MIN: usize = 5;

/// A field value that failed its rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must have at least {min} characters")]
    TooShort { field: Field, min: usize },
    #[error("{field} is a required field")]
    Required { field: Field },
    #[error("{field} must be a valid email address")]
    InvalidEmail { field: Field },
}

impl ValidationError {
    /// The field this error belongs to.
    pub fn field(&self) -> Field {
        match self {
            Self::TooShort { field, .. } | Self::Required { field } | Self::InvalidEmail { field } => {
                *field
            }
        }
    }
}

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("valid hardcoded regex")
});

/// A single predicate bound to one form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// At least `n` characters. An empty value fails too.
    MinLength(usize),
    /// Must be non-empty.
    Required,
    /// Must be non-empty and shaped like `local@domain.tld`.
    Email,
    /// Always passes.
    Optional,
}

impl FieldRule {
    /// Checks `value` against this rule, attributing any failure to `field`.
    pub fn check(self, field: Field, value: &str) -> Result<(), ValidationError> {
        match self {
            Self::MinLength(min) if value.chars().count() < min => {
                Err(ValidationError::TooShort { field, min })
            }
            Self::Required if value.is_empty() => Err(ValidationError::Required { field }),
            Self::Email if value.is_empty() => Err(ValidationError::Required { field }),
            Self::Email if !EMAIL_RE.is_match(value) => {
                Err(ValidationError::InvalidEmail { field })
            }
            _ => Ok(()),
        }
    }
}

/// The rule for every field. Passed to the controller when it is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    rules: [FieldRule; 4],
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::with_first_name_min(DEFAULT_FIRST_NAME_MIN)
    }
}

impl RuleSet {
    /// The standard schema with a custom minimum first-name length.
    pub fn with_first_name_min(min: usize) -> Self {
        Self {
            rules: [
                FieldRule::MinLength(min),
                FieldRule::Required,
                FieldRule::Email,
                FieldRule::Optional,
            ],
        }
    }

    /// Returns the rule bound to `field`.
    pub fn rule(&self, field: Field) -> FieldRule {
        self.rules[field.index()]
    }

    /// Validates a single field of `values`.
    pub fn validate_field(&self, field: Field, values: &FormValues) -> Result<(), ValidationError> {
        self.rule(field).check(field, values.get(field))
    }

    /// Validates every field from scratch.
    pub fn validate(&self, values: &FormValues) -> ValidationState {
        let mut state = ValidationState::default();
        for field in Field::ALL {
            state.set(field, self.validate_field(field, values));
        }
        state
    }
}

/// The current error, if any, of each field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationState {
    errors: [Option<ValidationError>; 4],
}

impl ValidationState {
    /// Returns the error recorded for `field`.
    pub fn error(&self, field: Field) -> Option<&ValidationError> {
        self.errors[field.index()].as_ref()
    }

    /// Records the outcome of validating `field`, replacing any previous one.
    pub fn set(&mut self, field: Field, result: Result<(), ValidationError>) {
        self.errors[field.index()] = result.err();
    }

    /// Number of fields currently failing.
    pub fn error_count(&self) -> usize {
        self.errors.iter().flatten().count()
    }

    pub fn is_valid(&self) -> bool {
        self.error_count() == 0
    }

    /// Current errors in display order.
    pub fn errors(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter().flatten()
    }

    /// Forgets every error.
    pub fn clear(&mut self) {
        self.errors = Default::default();
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;

    fn values(first: &str, last: &str, email: &str, message: &str) -> FormValues {
        FormValues {
            first_name: first.into(),
            last_name: last.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    // --- FieldRule ---

    #[test]
    fn first_name_too_short() {
        let err = FieldRule::MinLength(5)
            .check(Field::FirstName, "Bob")
            .unwrap_err();
        assert_eq!(err.to_string(), "firstName must have at least 5 characters");
    }

    #[test]
    fn first_name_exactly_min_passes() {
        assert_eq!(FieldRule::MinLength(5).check(Field::FirstName, "Alice"), Ok(()));
    }

    #[test]
    fn min_length_counts_chars_not_bytes() {
        assert_eq!(FieldRule::MinLength(5).check(Field::FirstName, "Zoë Ø"), Ok(()));
        assert!(FieldRule::MinLength(5).check(Field::FirstName, "Éoïn").is_err());
    }

    #[test]
    fn empty_first_name_is_too_short() {
        assert_eq!(
            FieldRule::MinLength(5).check(Field::FirstName, ""),
            Err(ValidationError::TooShort {
                field: Field::FirstName,
                min: 5
            })
        );
    }

    #[test]
    fn last_name_required() {
        let err = FieldRule::Required.check(Field::LastName, "").unwrap_err();
        assert_eq!(err.to_string(), "lastName is a required field");
        assert_eq!(FieldRule::Required.check(Field::LastName, "J"), Ok(()));
    }

    #[test]
    fn email_accepts_common_shapes() {
        for email in ["leeroy@jenk.ins", "a.b+c@mail.example.com", "x@y.io"] {
            assert_eq!(FieldRule::Email.check(Field::Email, email), Ok(()), "{email}");
        }
    }

    #[test]
    fn email_rejects_malformed() {
        for email in [
            "leeroy.jenkins",
            "leeroy@",
            "@jenk.ins",
            "leeroy@jenkins",
            "leeroy@@jenk.ins",
            "lee roy@jenk.ins",
            "leeroy@jenk.",
        ] {
            assert_eq!(
                FieldRule::Email.check(Field::Email, email),
                Err(ValidationError::InvalidEmail { field: Field::Email }),
                "{email}"
            );
        }
    }

    #[test]
    fn email_messages_mention_email() {
        let empty = FieldRule::Email.check(Field::Email, "").unwrap_err();
        let bad = FieldRule::Email.check(Field::Email, "nope").unwrap_err();
        assert!(empty.to_string().to_lowercase().contains("email"));
        assert!(bad.to_string().to_lowercase().contains("email"));
        assert_eq!(bad.to_string(), "email must be a valid email address");
    }

    #[test]
    fn error_reports_its_field() {
        let err = FieldRule::Required.check(Field::LastName, "").unwrap_err();
        assert_eq!(err.field(), Field::LastName);
    }

    // --- RuleSet ---

    #[test]
    fn all_empty_yields_three_errors() {
        let state = RuleSet::default().validate(&FormValues::default());
        assert_eq!(state.error_count(), 3);
        assert!(state.error(Field::Message).is_none());
    }

    #[test]
    fn missing_email_yields_one_error() {
        let state = RuleSet::default().validate(&values("Leeroy", "Jenkins!", "", ""));
        assert_eq!(state.error_count(), 1);
        let err = state.error(Field::Email).unwrap();
        assert!(err.to_string().contains("email"));
    }

    #[test]
    fn missing_last_name_is_reported() {
        let state = RuleSet::default().validate(&values("Leeroy", "", "leeroy@jenk.ins", ""));
        assert_eq!(state.error_count(), 1);
        assert_eq!(
            state.error(Field::LastName).map(ToString::to_string),
            Some("lastName is a required field".to_string())
        );
    }

    #[test]
    fn fully_valid_has_no_errors() {
        let state =
            RuleSet::default().validate(&values("Leeroy", "Jenkins!", "leeroy@jenk.ins", ""));
        assert!(state.is_valid());
        assert_eq!(state.errors().count(), 0);
    }

    #[test]
    fn custom_min_length_is_honoured() {
        let rules = RuleSet::with_first_name_min(2);
        assert_eq!(
            rules.validate_field(Field::FirstName, &values("Bo", "", "", "")),
            Ok(())
        );
        let err = rules
            .validate_field(Field::FirstName, &values("B", "", "", ""))
            .unwrap_err();
        assert_eq!(err.to_string(), "firstName must have at least 2 characters");
    }

    #[test]
    fn errors_are_in_display_order() {
        let state = RuleSet::default().validate(&FormValues::default());
        let fields: Vec<Field> = state.errors().map(ValidationError::field).collect();
        assert_eq!(fields, vec![Field::FirstName, Field::LastName, Field::Email]);
    }

    // --- ValidationState ---

    #[test]
    fn set_replaces_previous_result() {
        let mut state = ValidationState::default();
        state.set(
            Field::LastName,
            Err(ValidationError::Required {
                field: Field::LastName,
            }),
        );
        assert_eq!(state.error_count(), 1);
        state.set(Field::LastName, Ok(()));
        assert!(state.is_valid());
    }

    #[test]
    fn clear_forgets_all() {
        let mut state = RuleSet::default().validate(&FormValues::default());
        state.clear();
        assert!(state.is_valid());
    }

    // --- Properties ---

    #[quickcheck]
    fn error_count_matches_failing_rules(first: String, last: String, email: String, msg: String) -> bool {
        let rules = RuleSet::default();
        let v = values(&first, &last, &email, &msg);
        let failing = Field::ALL
            .iter()
            .filter(|&&f| rules.validate_field(f, &v).is_err())
            .count();
        rules.validate(&v).error_count() == failing
    }

    #[quickcheck]
    fn validation_is_idempotent(first: String, last: String, email: String, msg: String) -> bool {
        let rules = RuleSet::default();
        let v = values(&first, &last, &email, &msg);
        rules.validate(&v) == rules.validate(&v)
    }

    #[quickcheck]
    fn message_never_fails(msg: String) -> bool {
        RuleSet::default()
            .validate_field(Field::Message, &values("", "", "", &msg))
            .is_ok()
    }
}
