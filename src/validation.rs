use std::fmt;
use std::sync::LazyLock;

use jiff::civil::Date;
use regex::Regex;
use url::Url;

/// Largest attachment the certificate form accepts.
pub const MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;

/// Content types the certificate form accepts for attachments.
pub const ALLOWED_FILE_TYPES: [&str; 4] =
    ["application/pdf", "image/jpeg", "image/png", "image/jpg"];

/// Minimum password length for login and signup.
pub const MIN_PASSWORD_CHARS: usize = 6;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"));

/// Field-level validation failures, in the order the rules ran.
/// An empty set means the draft was accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: Vec<(String, String)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.entries.push((field.into(), message.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// First message recorded for a field, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, message)| message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }

    /// Accept `value` when no rule failed.
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// Presence plus shape, with the reference wording.
pub fn check_email(errors: &mut FieldErrors, field: &str, value: &str) {
    let value = value.trim();
    if value.is_empty() {
        errors.push(field, "Email is required");
    } else if !is_valid_email(value) {
        errors.push(field, "Email is invalid");
    }
}

pub fn check_password(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.is_empty() {
        errors.push(field, "Password is required");
    } else if value.chars().count() < MIN_PASSWORD_CHARS {
        errors.push(field, "Password must be at least 6 characters");
    }
}

/// Empty input counts as absent; anything else must parse as an
/// absolute URL.
pub fn parse_optional_url(errors: &mut FieldErrors, field: &str, value: &str) -> Option<Url> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    match Url::parse(value) {
        Ok(url) => Some(url),
        Err(_) => {
            errors.push(field, "Enter a valid URL, including the scheme (https://...)");
            None
        }
    }
}

/// `None` always comes with a recorded error.
pub fn parse_required_date(
    errors: &mut FieldErrors,
    field: &str,
    value: &str,
    required_message: &str,
) -> Option<Date> {
    let value = value.trim();
    if value.is_empty() {
        errors.push(field, required_message);
        return None;
    }
    match value.parse::<Date>() {
        Ok(date) => Some(date),
        Err(_) => {
            errors.push(field, "Enter a valid date (YYYY-MM-DD)");
            None
        }
    }
}

/// What the presentation layer reports about a picked file. Only
/// metadata ever reaches the core; the bytes are never read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    pub name: String,
    pub content_type: String,
    pub size: u64,
}

pub fn check_file(errors: &mut FieldErrors, field: &str, file: &FileHandle) {
    if !ALLOWED_FILE_TYPES.contains(&file.content_type.as_str()) {
        errors.push(field, "Please upload only PDF or image files");
    }
    if file.size > MAX_FILE_BYTES {
        errors.push(field, "File size should be less than 5MB");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_accepts_plain_address() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("john.doe@university.edu"));
    }

    #[test]
    fn email_rejects_malformed_address() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@dot"));
    }

    #[test]
    fn check_email_reports_presence_before_shape() {
        let mut errors = FieldErrors::new();
        check_email(&mut errors, "email", "   ");
        assert_eq!(errors.get("email"), Some("Email is required"));

        let mut errors = FieldErrors::new();
        check_email(&mut errors, "email", "nope");
        assert_eq!(errors.get("email"), Some("Email is invalid"));
    }

    #[test]
    fn password_length_boundary() {
        let mut errors = FieldErrors::new();
        check_password(&mut errors, "password", "12345");
        assert_eq!(
            errors.get("password"),
            Some("Password must be at least 6 characters")
        );

        let mut errors = FieldErrors::new();
        check_password(&mut errors, "password", "secret");
        assert!(errors.is_empty());
    }

    #[test]
    fn url_accepts_absolute_and_rejects_junk() {
        let mut errors = FieldErrors::new();
        let url = parse_optional_url(&mut errors, "url", "https://example.com");
        assert!(errors.is_empty());
        assert_eq!(url.map(|u| u.to_string()), Some("https://example.com/".into()));

        let mut errors = FieldErrors::new();
        assert!(parse_optional_url(&mut errors, "url", "not a url").is_none());
        assert!(errors.get("url").is_some());
    }

    #[test]
    fn url_treats_empty_as_absent() {
        let mut errors = FieldErrors::new();
        assert!(parse_optional_url(&mut errors, "url", "  ").is_none());
        assert!(errors.is_empty());
    }

    #[test]
    fn date_parses_iso_and_rejects_other_shapes() {
        let mut errors = FieldErrors::new();
        let date = parse_required_date(&mut errors, "issue_date", "2024-01-15", "required");
        assert!(errors.is_empty());
        assert_eq!(date.map(|d| d.to_string()), Some("2024-01-15".into()));

        let mut errors = FieldErrors::new();
        assert!(parse_required_date(&mut errors, "issue_date", "15/01/2024", "required").is_none());
        assert_eq!(errors.get("issue_date"), Some("Enter a valid date (YYYY-MM-DD)"));
    }

    #[test]
    fn small_pdf_is_accepted() {
        let file = FileHandle {
            name: "cert.pdf".into(),
            content_type: "application/pdf".into(),
            size: 1024,
        };
        let mut errors = FieldErrors::new();
        check_file(&mut errors, "file", &file);
        assert!(errors.is_empty());
    }

    #[test]
    fn oversized_png_is_rejected_on_size() {
        let file = FileHandle {
            name: "scan.png".into(),
            content_type: "image/png".into(),
            size: 10 * 1024 * 1024,
        };
        let mut errors = FieldErrors::new();
        check_file(&mut errors, "file", &file);
        assert_eq!(errors.get("file"), Some("File size should be less than 5MB"));
    }

    #[test]
    fn text_file_is_rejected_on_type() {
        let file = FileHandle {
            name: "notes.txt".into(),
            content_type: "text/plain".into(),
            size: 10,
        };
        let mut errors = FieldErrors::new();
        check_file(&mut errors, "file", &file);
        assert_eq!(errors.get("file"), Some("Please upload only PDF or image files"));
    }

    #[test]
    fn field_errors_keep_rule_order() {
        let mut errors = FieldErrors::new();
        errors.push("name", "Name is required");
        errors.push("level", "Level is required");
        let fields: Vec<&str> = errors.iter().map(|(field, _)| field).collect();
        assert_eq!(fields, vec!["name", "level"]);
        assert_eq!(errors.len(), 2);
    }
}
