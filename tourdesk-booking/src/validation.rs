use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use crate::draft::{BookingDraft, BookingField};

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern is valid")
});

pub const NAME_REQUIRED: &str = "Full name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Please enter a valid email";
pub const PHONE_REQUIRED: &str = "Phone number is required";
pub const PARTY_SIZE_INVALID: &str = "At least one person is required";
pub const PARTY_SIZE_TOO_LARGE: &str = "Party size is too large";

static VALID: FieldStatus = FieldStatus::Valid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldStatus {
    Valid,
    Invalid(String),
}

impl FieldStatus {
    fn check(ok: bool, reason: &str) -> Self {
        if ok {
            FieldStatus::Valid
        } else {
            FieldStatus::Invalid(reason.to_string())
        }
    }
}

/// Outcome of running every rule over a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    statuses: BTreeMap<BookingField, FieldStatus>,
}

impl ValidationReport {
    pub fn status(&self, field: BookingField) -> &FieldStatus {
        self.statuses.get(&field).unwrap_or(&VALID)
    }

    pub fn is_valid(&self) -> bool {
        self.statuses.values().all(|s| *s == FieldStatus::Valid)
    }

    pub fn errors(&self) -> ValidationErrors {
        let map = self
            .statuses
            .iter()
            .filter_map(|(field, status)| match status {
                FieldStatus::Invalid(reason) => Some((*field, reason.clone())),
                FieldStatus::Valid => None,
            })
            .collect();
        ValidationErrors(map)
    }
}

/// Evaluate all rules at once. Pickup and special requests are free text.
pub fn validate(draft: &BookingDraft) -> ValidationReport {
    let mut statuses = BTreeMap::new();

    statuses.insert(
        BookingField::FullName,
        FieldStatus::check(!draft.full_name.trim().is_empty(), NAME_REQUIRED),
    );

    let email = draft.email.expose().trim();
    let email_status = if email.is_empty() {
        FieldStatus::Invalid(EMAIL_REQUIRED.to_string())
    } else {
        FieldStatus::check(EMAIL_REGEX.is_match(email), EMAIL_INVALID)
    };
    statuses.insert(BookingField::Email, email_status);

    statuses.insert(
        BookingField::Phone,
        FieldStatus::check(!draft.phone.expose().trim().is_empty(), PHONE_REQUIRED),
    );
    statuses.insert(BookingField::PartySize, party_size_status(draft));

    ValidationReport { statuses }
}

/// Whole numbers beyond `u32::MAX` are told apart from zero or junk input.
fn party_size_status(draft: &BookingDraft) -> FieldStatus {
    if draft.parsed_party_size().is_some() {
        return FieldStatus::Valid;
    }

    let raw = draft.party_size.trim();
    let digits = raw.strip_prefix('+').unwrap_or(raw);
    let positive_integer = !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && digits.bytes().any(|b| b != b'0');

    if positive_integer {
        FieldStatus::Invalid(PARTY_SIZE_TOO_LARGE.to_string())
    } else {
        FieldStatus::Invalid(PARTY_SIZE_INVALID.to_string())
    }
}

/// Field name → message for every field that failed its rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<BookingField, String>);

impl ValidationErrors {
    pub fn get(&self, field: BookingField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: BookingField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = BookingField> + '_ {
        self.0.keys().copied()
    }

    /// Drop one field's error, leaving the rest untouched.
    #[must_use]
    pub fn without(mut self, field: BookingField) -> Self {
        self.0.remove(&field);
        self
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
        f.write_str(&parts.join("; "))
    }
}
