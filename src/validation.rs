//! Field validation shared by the booking handler and the proxy orders API.
//!
//! The handler only checks the phone number before it submits. The proxy
//! re-checks every required field, the phone, the email and the inline logo
//! when an order arrives.

use std::sync::LazyLock;

use base64::{
    Engine as _, alphabet,
    engine::{GeneralPurpose, GeneralPurposeConfig},
};
use regex::Regex;

pub const PHONE_HINT: &str = "Enter SA number: 0XXXXXXXXX or +27XXXXXXXXX";

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:0|\+27)[1-9][0-9]{8}$").expect("phone pattern compiles"));

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles"));

/// Number of leading logo characters checked for base64 decodability.
const LOGO_PROBE_CHARS: usize = 200;

/// Standard alphabet with padding, tolerating non-zero trailing bits.
const LOGO_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Accepts `0XXXXXXXXX` or `+27XXXXXXXXX` where the first subscriber digit is 1-9.
/// Surrounding whitespace is ignored.
pub fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value.trim())
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

pub fn is_data_url(value: &str) -> bool {
    value.starts_with("data:")
}

/// A logo is either a data URL with a payload separator, or raw base64
/// whose first characters decode cleanly.
pub fn check_logo(logo: &str) -> Result<(), String> {
    if is_data_url(logo) {
        if !logo.contains(',') {
            return Err("logo_image data URL malformed.".into());
        }
        return Ok(());
    }

    let probe: String = logo.trim().chars().take(LOGO_PROBE_CHARS).collect();
    LOGO_BASE64
        .decode(probe.as_bytes())
        .map(|_| ())
        .map_err(|_| format!("logo_image not valid base64 (first {LOGO_PROBE_CHARS} chars failed)."))
}

/// Validates an order as the proxy receives it.
///
/// `required` pairs each required field name with its current value.
pub fn validate_order(
    required: &[(&str, &str)],
    contact_number: &str,
    contact_email: &str,
    logo_image: &str,
) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for (name, value) in required {
        if value.is_empty() {
            errors.push(format!("Missing required field: {name}"));
        }
    }

    if !contact_number.is_empty() && !PHONE_RE.is_match(contact_number) {
        errors.push("Invalid contact_number format (expect 0XXXXXXXXX or +27XXXXXXXXX).".into());
    }

    if !contact_email.is_empty() && !is_valid_email(contact_email) {
        errors.push("Invalid contact_email format.".into());
    }

    if !logo_image.is_empty() {
        if let Err(err) = check_logo(logo_image) {
            errors.push(err);
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_local_and_international_numbers() {
        for phone in ["0821234567", "+27821234567", "0123456789", " 0821234567 "] {
            assert!(is_valid_phone(phone), "{phone} should pass");
        }
    }

    #[test]
    fn rejects_malformed_numbers() {
        for phone in [
            "", "123", "0021234567", "+27021234567", "082123456", "08212345678", "27821234567",
            "+2782123456a", "0821 234567",
        ] {
            assert!(!is_valid_phone(phone), "{phone} should fail");
        }
    }

    #[test]
    fn email_needs_at_and_dot() {
        assert!(is_valid_email("jane@club.co.za"));
        assert!(!is_valid_email("jane@club"));
        assert!(!is_valid_email("jane club@x.com"));
    }

    #[test]
    fn logo_accepts_data_url_and_raw_base64() {
        assert!(check_logo("data:image/png;base64,iVBORw0KGgo=").is_ok());
        assert!(check_logo("iVBORw0KGgo=").is_ok());
        assert!(check_logo("data:image/png;base64").is_err());
        assert!(check_logo("https://example.com/logo.png").is_err());
    }

    #[test]
    fn raw_logo_with_loose_trailing_bits_is_accepted() {
        assert!(check_logo("QR==").is_ok());
        assert!(check_logo("iVBORw0KGgp=").is_ok());
        assert!(check_logo("QR=").is_err());
    }

    #[test]
    fn validate_order_collects_every_problem() {
        let errors = validate_order(
            &[("first_name", ""), ("surname", "Doe")],
            "123",
            "nope",
            "data:broken",
        )
        .unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors[0], "Missing required field: first_name");
    }

    #[test]
    fn validate_order_passes_complete_input() {
        assert!(validate_order(&[("first_name", "Jane")], "0821234567", "j@x.io", "").is_ok());
    }
}
