use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Field name → message for every field that failed.
pub type FieldErrors = BTreeMap<&'static str, &'static str>;

pub const FIELD_NAMES: [&str; 4] = ["name", "email", "subject", "message"];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactFields {
    pub fn get(&self, field: &str) -> Option<&str> {
        match field {
            "name" => Some(&self.name),
            "email" => Some(&self.email),
            "subject" => Some(&self.subject),
            "message" => Some(&self.message),
            _ => None,
        }
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static email pattern"))
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Error message for one field, `None` when it is acceptable.
pub fn check_field(field: &str, value: &str) -> Option<&'static str> {
    let blank = value.trim().is_empty();
    match field {
        "name" if blank => Some("Please enter your name"),
        "email" if blank => Some("Please enter your email"),
        "email" if !is_valid_email(value) => Some("Please enter a valid email"),
        "subject" if blank => Some("Please enter a subject"),
        "message" if blank => Some("Please enter your message"),
        _ => None,
    }
}

pub fn validate(fields: &ContactFields) -> FieldErrors {
    FIELD_NAMES
        .iter()
        .filter_map(|name| {
            let value = fields.get(name).unwrap_or_default();
            check_field(name, value).map(|msg| (*name, msg))
        })
        .collect()
}

pub fn submit(fields: &ContactFields) -> Result<(), FieldErrors> {
    let errors = validate(fields);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
