//! Parsing and validation of submitted forms.
//!
//! Each form struct deserializes leniently (every field defaults to empty)
//! so that missing fields surface as field-level errors rather than a
//! rejected request.

pub mod artist;
pub mod choices;
pub mod show;
pub mod venue;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]*$").expect("phone pattern is valid"));

/// Validation messages keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    /// `Ok(value)` when nothing was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

/// Trimmed value, or `None` when blank.
pub(crate) fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

pub(crate) fn require(errors: &mut FieldErrors, field: &'static str, value: &str) -> String {
    match non_empty(value) {
        Some(value) => value,
        None => {
            errors.add(field, "This field is required.");
            String::new()
        }
    }
}

pub(crate) fn check_phone(errors: &mut FieldErrors, value: &str) -> Option<String> {
    let phone = non_empty(value);
    match &phone {
        None => errors.add("phone", "This field is required."),
        Some(phone) if !PHONE_PATTERN.is_match(phone) => {
            errors.add("phone", "Phone number should only contain digits")
        }
        Some(_) => {}
    }
    phone
}

pub(crate) fn check_state(errors: &mut FieldErrors, value: &str) -> String {
    let state = require(errors, "state", value);
    if !state.is_empty() && !choices::is_state(&state) {
        errors.add("state", "Invalid state.");
    }
    state
}

/// Every submitted genre must be a known choice; one bad value rejects the
/// whole list.
pub(crate) fn check_genres(errors: &mut FieldErrors, values: &[String]) -> Vec<String> {
    let genres: Vec<String> = values.iter().filter_map(|genre| non_empty(genre)).collect();
    if genres.is_empty() {
        errors.add("genres", "This field is required.");
    } else if genres.iter().any(|genre| !choices::is_genre(genre)) {
        errors.add("genres", "Invalid genre.");
    }
    genres
}

/// Optional link; when present it must be an absolute http(s) URL.
pub(crate) fn check_url(
    errors: &mut FieldErrors,
    field: &'static str,
    value: &str,
) -> Option<String> {
    let link = non_empty(value)?;
    let valid = Url::parse(&link)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some())
        .unwrap_or(false);
    if !valid {
        errors.add(field, "Invalid URL.");
    }
    Some(link)
}

/// HTML checkboxes are only submitted when ticked.
pub(crate) fn checkbox(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|value| value != "false")
}
