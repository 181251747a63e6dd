use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::domain::customer::{Customer, CustomerDraft};

// Word characters are spelled out instead of `\w` so the patterns keep the
// ASCII semantics of the original system.
static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new("^[a-zA-ZñÑáéíóúÁÉÍÓÚ]+( [a-zA-ZñÑáéíóúÁÉÍÓÚ]+)*$")
        .expect("name pattern compiles")
});

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new("^[0-9A-Za-z_.-]+@([0-9A-Za-z_-]+\\.)+[0-9A-Za-z_-]{2,4}$")
        .expect("email pattern compiles")
});

static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\+34|0034|34)?[6789]\d{8}$").expect("phone pattern compiles")
});

/// A field failed its format check. The message keeps the original Spanish
/// wording surfaced to end users.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("El formato del {field} es inválido: {value}")]
pub struct ValidationError {
    pub field: &'static str,
    pub value: String,
}

/// Structural validation seam: reject an entity before it reaches storage.
pub trait Validator<T> {
    fn validate(&self, entity: &T) -> Result<(), ValidationError>;
}

/// Validates customer fields against fixed patterns. Stateless; the compiled
/// patterns are shared process-wide.
#[derive(Clone, Copy, Debug, Default)]
pub struct CustomerValidator;

impl CustomerValidator {
    pub fn new() -> Self {
        Self
    }

    /// Checks run in a fixed order and stop at the first invalid field, so a
    /// customer invalid in several fields reports only the first.
    fn validate_fields(
        &self,
        name: &str,
        email: &str,
        phone: Option<&str>,
    ) -> Result<(), ValidationError> {
        check_field("nombre", name, &NAME_PATTERN)?;
        check_field("correo electrónico", email, &EMAIL_PATTERN)?;
        match phone {
            // The phone is optional: absent or empty skips the check.
            None | Some("") => Ok(()),
            Some(phone) => check_field("teléfono", phone, &PHONE_PATTERN),
        }
    }
}

fn check_field(
    field: &'static str,
    value: &str,
    pattern: &Regex,
) -> Result<(), ValidationError> {
    if pattern.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError { field, value: value.to_string() })
    }
}

impl Validator<CustomerDraft> for CustomerValidator {
    fn validate(&self, entity: &CustomerDraft) -> Result<(), ValidationError> {
        self.validate_fields(&entity.name, &entity.email, entity.phone.as_deref())
    }
}

impl Validator<Customer> for CustomerValidator {
    fn validate(&self, entity: &Customer) -> Result<(), ValidationError> {
        self.validate_fields(&entity.name, &entity.email, entity.phone.as_deref())
    }
}
