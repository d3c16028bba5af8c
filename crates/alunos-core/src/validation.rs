// ABOUTME: Field validators for student input and the first-failure-wins validation chain.
// ABOUTME: Each field has a pure predicate and a fixed message surfaced verbatim to clients.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use regex::Regex;
use thiserror::Error;

use crate::student::{NewStudent, Status, StudentInput};

static DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date regex"));

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

const ENROLLMENT_CODE_LEN: usize = 6;

/// The validated fields of a student, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    BirthDate,
    EnrollmentCode,
    Status,
    Email,
}

impl Field {
    pub const ORDER: [Field; 5] = [
        Field::Name,
        Field::BirthDate,
        Field::EnrollmentCode,
        Field::Status,
        Field::Email,
    ];

    /// Fixed human-readable message returned when this field is rejected.
    pub fn message(&self) -> &'static str {
        match self {
            Field::Name => "Name cannot be null or made up only of spaces.",
            Field::BirthDate => "Birth date must be valid and earlier than the current date.",
            Field::EnrollmentCode => "Enrollment code must have exactly 6 characters.",
            Field::Status => "Status must be one of: ACTIVE, INACTIVE, GRADUATED, IN_PROGRESS.",
            Field::Email => "Email cannot be null and must be a valid email.",
        }
    }
}

/// The first field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{}", .field.message())]
pub struct ValidationError {
    pub field: Field,
}

impl From<Field> for ValidationError {
    fn from(field: Field) -> Self {
        Self { field }
    }
}

pub fn valid_name(name: Option<&str>) -> bool {
    name.is_some_and(|n| !n.trim().is_empty())
}

/// Accepts `YYYY-MM-DD` naming a real calendar day whose start (UTC) lies
/// strictly before `now`.
pub fn valid_birth_date(birth_date: Option<&str>, now: DateTime<Utc>) -> bool {
    parse_birth_date(birth_date, now).is_some()
}

/// Length is counted in UTF-16 code units, untrimmed, so a character outside
/// the Basic Multilingual Plane counts twice.
pub fn valid_enrollment_code(code: Option<&str>) -> bool {
    code.is_some_and(|c| c.encode_utf16().count() == ENROLLMENT_CODE_LEN)
}

pub fn valid_status(status: Option<&str>) -> bool {
    status.is_some_and(|s| s.parse::<Status>().is_ok())
}

pub fn valid_email(email: Option<&str>) -> bool {
    email.is_some_and(|e| EMAIL_SHAPE.is_match(e))
}

fn parse_birth_date(raw: Option<&str>, now: DateTime<Utc>) -> Option<NaiveDate> {
    let raw = raw?;
    if !DATE_SHAPE.is_match(raw) {
        return None;
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    (date.and_time(NaiveTime::MIN).and_utc() < now).then_some(date)
}

impl StudentInput {
    /// Validate against the current time. See [`StudentInput::validate_at`].
    pub fn validate(&self) -> Result<NewStudent, ValidationError> {
        self.validate_at(Utc::now())
    }

    /// Run the validators in [`Field::ORDER`] and stop at the first failure.
    /// On success the raw strings are promoted to typed fields.
    pub fn validate_at(&self, now: DateTime<Utc>) -> Result<NewStudent, ValidationError> {
        if let Some(field) = Field::ORDER
            .into_iter()
            .find(|field| !self.is_valid(*field, now))
        {
            return Err(field.into());
        }

        // Cannot fail once every field has passed.
        let birth_date =
            parse_birth_date(self.birth_date.as_deref(), now).ok_or(Field::BirthDate)?;
        let status = self
            .status
            .as_deref()
            .and_then(|s| s.parse::<Status>().ok())
            .ok_or(Field::Status)?;

        Ok(NewStudent {
            name: self.name.clone().unwrap_or_default(),
            birth_date,
            enrollment_code: self.enrollment_code.clone().unwrap_or_default(),
            status,
            email: self.email.clone().unwrap_or_default(),
        })
    }

    /// Apply the predicate for a single field.
    pub fn is_valid(&self, field: Field, now: DateTime<Utc>) -> bool {
        match field {
            Field::Name => valid_name(self.name.as_deref()),
            Field::BirthDate => valid_birth_date(self.birth_date.as_deref(), now),
            Field::EnrollmentCode => valid_enrollment_code(self.enrollment_code.as_deref()),
            Field::Status => valid_status(self.status.as_deref()),
            Field::Email => valid_email(self.email.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn valid_input() -> StudentInput {
        StudentInput {
            name: Some("Ana Silva".to_string()),
            birth_date: Some("2000-05-10".to_string()),
            enrollment_code: Some("ABC123".to_string()),
            status: Some("ATIVO".to_string()),
            email: Some("ana@x.com".to_string()),
        }
    }

    #[test]
    fn name_requires_non_blank_text() {
        assert!(valid_name(Some("Ana")));
        assert!(valid_name(Some("  Ana  ")));
        assert!(!valid_name(Some("")));
        assert!(!valid_name(Some(" \t\n ")));
        assert!(!valid_name(None));
    }

    #[test]
    fn birth_date_must_be_well_formed_and_in_the_past() {
        assert!(valid_birth_date(Some("2000-05-10"), now()));
        assert!(valid_birth_date(Some("2024-06-14"), now()));
        // Midnight of the current day already lies in the past.
        assert!(valid_birth_date(Some("2024-06-15"), now()));
        assert!(!valid_birth_date(Some("2024-06-16"), now()));
        assert!(!valid_birth_date(Some("2999-01-01"), now()));
    }

    #[test]
    fn birth_date_rejects_bad_shapes_and_impossible_days() {
        assert!(!valid_birth_date(None, now()));
        assert!(!valid_birth_date(Some(""), now()));
        assert!(!valid_birth_date(Some("10/05/2000"), now()));
        assert!(!valid_birth_date(Some("2000-5-10"), now()));
        assert!(!valid_birth_date(Some("2000-05-10T00:00:00"), now()));
        assert!(!valid_birth_date(Some("2023-02-30"), now()));
        assert!(!valid_birth_date(Some("2000-13-01"), now()));
        assert!(valid_birth_date(Some("2020-02-29"), now()));
    }

    #[test]
    fn enrollment_code_counts_raw_characters() {
        assert!(valid_enrollment_code(Some("ABC123")));
        assert!(valid_enrollment_code(Some(" ABC12")));
        // U+1F600 sits outside the BMP and takes two UTF-16 units.
        assert!(valid_enrollment_code(Some("ABCD\u{1F600}")));
        assert!(!valid_enrollment_code(Some("ABC\u{1F600}")));
        assert!(!valid_enrollment_code(Some("ABCDE\u{1F600}")));
        assert!(valid_enrollment_code(Some("ABCDÉ1")));
        assert!(!valid_enrollment_code(Some("AB12")));
        assert!(!valid_enrollment_code(Some("ABC1234")));
        assert!(!valid_enrollment_code(None));
    }

    #[test]
    fn status_accepts_only_wire_values() {
        for value in ["ATIVO", "INATIVO", "FORMADO", "GRADUANDO"] {
            assert!(valid_status(Some(value)), "{value} should be accepted");
        }
        assert!(!valid_status(Some("ACTIVE")));
        assert!(!valid_status(Some("")));
        assert!(!valid_status(None));
    }

    #[test]
    fn email_follows_simple_pattern() {
        assert!(valid_email(Some("ana@x.com")));
        assert!(valid_email(Some("a.b+c@sub.example.org")));
        assert!(!valid_email(Some("ana@x")));
        assert!(!valid_email(Some("ana x@x.com")));
        assert!(!valid_email(Some("@x.com")));
        assert!(!valid_email(Some("ana@@x.com")));
        assert!(!valid_email(None));
    }

    #[test]
    fn valid_input_is_promoted_to_typed_fields() {
        let student = valid_input().validate_at(now()).unwrap();
        assert_eq!(student.name, "Ana Silva");
        assert_eq!(student.birth_date, NaiveDate::from_ymd_opt(2000, 5, 10).unwrap());
        assert_eq!(student.enrollment_code, "ABC123");
        assert_eq!(student.status, Status::Active);
        assert_eq!(student.email, "ana@x.com");
    }

    #[test]
    fn first_failing_field_wins() {
        let input = StudentInput {
            name: Some("   ".to_string()),
            birth_date: Some("2999-01-01".to_string()),
            enrollment_code: Some("AB12".to_string()),
            status: Some("NOPE".to_string()),
            email: Some("not-an-email".to_string()),
        };
        assert_eq!(input.validate_at(now()).unwrap_err().field, Field::Name);

        let input = StudentInput {
            name: Some("Ana".to_string()),
            ..input
        };
        assert_eq!(input.validate_at(now()).unwrap_err().field, Field::BirthDate);

        let input = StudentInput {
            birth_date: Some("2000-05-10".to_string()),
            ..input
        };
        assert_eq!(
            input.validate_at(now()).unwrap_err().field,
            Field::EnrollmentCode
        );

        let input = StudentInput {
            enrollment_code: Some("ABC123".to_string()),
            ..input
        };
        assert_eq!(input.validate_at(now()).unwrap_err().field, Field::Status);

        let input = StudentInput {
            status: Some("INATIVO".to_string()),
            ..input
        };
        assert_eq!(input.validate_at(now()).unwrap_err().field, Field::Email);
    }

    #[test]
    fn is_valid_agrees_with_each_predicate() {
        let input = valid_input();
        for field in Field::ORDER {
            assert!(input.is_valid(field, now()), "{field:?} should pass");
        }

        let future = StudentInput {
            birth_date: Some("2999-01-01".to_string()),
            ..valid_input()
        };
        assert!(!future.is_valid(Field::BirthDate, now()));
        assert!(future.is_valid(Field::Status, now()));
    }

    #[test]
    fn empty_input_fails_on_name() {
        let err = StudentInput::default().validate_at(now()).unwrap_err();
        assert_eq!(err.field, Field::Name);
        assert_eq!(
            err.to_string(),
            "Name cannot be null or made up only of spaces."
        );
    }

    #[test]
    fn error_message_matches_field_message() {
        for field in Field::ORDER {
            assert_eq!(ValidationError::from(field).to_string(), field.message());
        }
    }
}
