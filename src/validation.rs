//! Checkout form validation.

use thiserror::Error;

use crate::shipping::ShippingInfo;

/// Second digits a Vietnamese mobile number may start with after the `0`.
pub const MOBILE_PREFIXES: [char; 5] = ['3', '5', '7', '8', '9'];

/// Length of a mobile number, in digits.
pub const PHONE_LENGTH: usize = 10;

/// A checkout form rule violation.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Blank name.
    #[error("please enter your full name")]
    MissingName,

    /// Email is not shaped like `local@domain.tld`.
    #[error("please enter a valid email address")]
    InvalidEmail,

    /// Blank address.
    #[error("please enter a delivery address")]
    MissingAddress,

    /// Phone is not a ten digit mobile number.
    #[error(
        "please enter a valid phone number (10 digits starting with 03, 05, 07, 08 or 09)"
    )]
    InvalidPhone,
}

/// Every rule the form breaks, in rule order.
#[must_use]
pub fn violations(info: &ShippingInfo) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if info.name.trim().is_empty() {
        errors.push(ValidationError::MissingName);
    }
    if !is_valid_email(&info.email) {
        errors.push(ValidationError::InvalidEmail);
    }
    if info.address.trim().is_empty() {
        errors.push(ValidationError::MissingAddress);
    }
    if !is_valid_phone(&info.phone) {
        errors.push(ValidationError::InvalidPhone);
    }

    errors
}

/// Check the form, stopping at the first broken rule.
///
/// # Errors
///
/// Returns the first [`ValidationError`] in rule order: name, email, address, phone.
pub fn validate(info: &ShippingInfo) -> Result<(), ValidationError> {
    violations(info).into_iter().next().map_or(Ok(()), Err)
}

/// `local@domain.tld`: one `@`, no whitespace, and a dot with text on both
/// sides somewhere in the domain.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .match_indices('.')
        .any(|(dot, _)| dot > 0 && dot + 1 < domain.len())
}

/// Ten digits, starting with `0` and one of [`MOBILE_PREFIXES`].
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    let mut chars = phone.chars();

    phone.len() == PHONE_LENGTH
        && phone.chars().all(|c| c.is_ascii_digit())
        && chars.next() == Some('0')
        && chars.next().is_some_and(|c| MOBILE_PREFIXES.contains(&c))
}
