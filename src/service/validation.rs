//! Submission validation. Each rule is a standalone function so it can be checked in isolation;
//! `NewSubmission::from_json` composes them in the order the write endpoint applies them.

use crate::error::ValidationError;
use crate::model::{Gender, NewSubmission};
use chrono::NaiveDate;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use validator::ValidateEmail;

pub const REQUIRED_FIELDS: [&str; 5] = ["name", "email", "phone", "gender", "dob"];

pub const NAME_MIN_LEN: usize = 2;
pub const NAME_MAX_LEN: usize = 100;
pub const EMAIL_MAX_LEN: usize = 150;
const DATE_FORMAT: &str = "%Y-%m-%d";

// `[:space:]` is ASCII-only; `\s` would also admit Unicode spaces such as U+00A0.
static NAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z[:space:]]+$").expect("static regex"));
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9+\-[:space:]()]{10,20}$").expect("static regex"));

/// Text of a body field. Strings are taken as-is and numbers as their decimal text;
/// anything else (absent, null, bool, array, object) counts as missing.
fn field_text(body: &Value, field: &str) -> Option<String> {
    match body.get(field)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Trimmed values of all required fields, or the names of the ones missing or blank.
pub fn required_fields(body: &Value) -> Result<[String; 5], ValidationError> {
    let values = REQUIRED_FIELDS.map(|f| field_text(body, f).map(|s| s.trim().to_string()));
    let missing: Vec<&'static str> = REQUIRED_FIELDS
        .iter()
        .zip(values.iter())
        .filter(|(_, v)| v.as_deref().map_or(true, str::is_empty))
        .map(|(f, _)| *f)
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }
    Ok(values.map(Option::unwrap_or_default))
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let len = name.chars().count();
    if !(NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len) || !NAME_RE.is_match(name) {
        return Err(ValidationError::InvalidName);
    }
    Ok(())
}

/// The domain must be dotted with a non-empty last label; bare hosts like `localhost` are rejected.
fn has_dotted_domain(email: &str) -> bool {
    email
        .rsplit_once('@')
        .and_then(|(_, domain)| domain.rsplit_once('.'))
        .is_some_and(|(head, tld)| !head.is_empty() && !tld.is_empty())
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.chars().count() > EMAIL_MAX_LEN || !email.validate_email() || !has_dotted_domain(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if !PHONE_RE.is_match(phone) {
        return Err(ValidationError::InvalidPhone);
    }
    Ok(())
}

pub fn validate_gender(gender: &str) -> Result<Gender, ValidationError> {
    gender.parse().map_err(|_| ValidationError::InvalidGender)
}

/// Parses an exact `YYYY-MM-DD` date no later than `today`. Strings that parse but render
/// differently (`2024-2-03`) are rejected.
pub fn validate_dob(dob: &str, today: NaiveDate) -> Result<NaiveDate, ValidationError> {
    let date = NaiveDate::parse_from_str(dob, DATE_FORMAT).map_err(|_| ValidationError::InvalidDate)?;
    if date.format(DATE_FORMAT).to_string() != dob {
        return Err(ValidationError::InvalidDate);
    }
    if date > today {
        return Err(ValidationError::FutureDate);
    }
    Ok(date)
}

impl NewSubmission {
    /// Validate a decoded request body. The first failing rule wins.
    pub fn from_json(body: &Value, today: NaiveDate) -> Result<Self, ValidationError> {
        let [name, email, phone, gender, dob] = required_fields(body)?;
        validate_name(&name)?;
        validate_email(&email)?;
        validate_phone(&phone)?;
        let gender = validate_gender(&gender)?;
        let dob = validate_dob(&dob, today)?;
        Ok(NewSubmission {
            name,
            email,
            phone,
            gender,
            dob,
        })
    }
}
