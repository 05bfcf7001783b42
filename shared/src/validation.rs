//! Validation utilities for the Supplier Marketplace Platform
//!
//! Syntactic pre-filters only; none of these guarantee the value exists
//! upstream (a valid-looking city may still fail geocoding).

/// Validate a city name before attempting a geocoding lookup.
///
/// Accepts letters, whitespace, hyphens, apostrophes and periods, with a
/// trimmed length of at least 2 characters.
pub fn validate_city_name(text: &str) -> Result<(), &'static str> {
    let trimmed = text.trim();
    if trimmed.chars().count() < 2 {
        return Err("City name must be at least 2 characters");
    }
    let valid = trimmed
        .chars()
        .all(|c| c.is_alphabetic() || c.is_whitespace() || matches!(c, '-' | '\'' | '.'));
    if !valid {
        return Err("City name contains invalid characters");
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters");
    }
    Ok(())
}

/// Validate a phone number (10 digits, ignoring separators; +91 prefix allowed)
pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() == 10 {
        return Ok(());
    }
    if digits.len() == 12 && digits.starts_with("91") {
        return Ok(());
    }
    Err("Invalid phone number")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_city_names() {
        assert!(validate_city_name("Mumbai").is_ok());
        assert!(validate_city_name("New Delhi").is_ok());
        assert!(validate_city_name("Port-of-Spain").is_ok());
        assert!(validate_city_name("St. John's").is_ok());
        assert!(validate_city_name("  Pune  ").is_ok());
    }

    #[test]
    fn test_city_name_too_short() {
        assert!(validate_city_name("M").is_err());
        assert!(validate_city_name("").is_err());
        assert!(validate_city_name("   a   ").is_err());
    }

    #[test]
    fn test_city_name_invalid_characters() {
        assert!(validate_city_name("Mumbai1").is_err());
        assert!(validate_city_name("Delhi;DROP").is_err());
        assert!(validate_city_name("city@home").is_err());
    }

    #[test]
    fn test_password_minimum_length() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("longenough").is_ok());
    }

    #[test]
    fn test_phone_numbers() {
        assert!(validate_phone("9876543210").is_ok());
        assert!(validate_phone("+91 98765 43210").is_ok());
        assert!(validate_phone("98765-43210").is_ok());
        assert!(validate_phone("12345").is_err());
    }
}
