//! Common validation utilities.

use validator::ValidationError;

/// Validates that an email domain string has the `@domain.tld` shape.
pub fn validate_email_domain(domain: &str) -> Result<(), ValidationError> {
    lazy_static::lazy_static! {
        static ref DOMAIN_REGEX: regex::Regex =
            regex::Regex::new(r"^@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap();
    }

    if DOMAIN_REGEX.is_match(domain) {
        Ok(())
    } else {
        let mut err = ValidationError::new("email_domain_format");
        err.message = Some("Email domain must look like @example.edu".into());
        Err(err)
    }
}

/// Normalizes an email domain so it always carries the leading `@`.
pub fn normalize_email_domain(domain: &str) -> String {
    if domain.starts_with('@') {
        domain.to_string()
    } else {
        format!("@{}", domain)
    }
}

/// Extracts the `@domain.tld` part of an email address.
pub fn email_domain_of(email: &str) -> Option<String> {
    email.split_once('@').map(|(_, d)| format!("@{}", d))
}

/// Validates that a feedback rating is within the 1-5 range.
pub fn validate_rating(rating: i32) -> Result<(), ValidationError> {
    if (1..=5).contains(&rating) {
        Ok(())
    } else {
        let mut err = ValidationError::new("rating_range");
        err.message = Some("Rating must be between 1 and 5".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email_domain() {
        assert!(validate_email_domain("@acme.edu").is_ok());
        assert!(validate_email_domain("@cs.acme.ac.in").is_ok());
        assert!(validate_email_domain("acme.edu").is_err());
        assert!(validate_email_domain("@acme").is_err());
        assert!(validate_email_domain("@").is_err());
        assert!(validate_email_domain("").is_err());
    }

    #[test]
    fn test_validate_email_domain_error_message() {
        let err = validate_email_domain("acme.edu").unwrap_err();
        assert_eq!(
            err.message.unwrap().to_string(),
            "Email domain must look like @example.edu"
        );
    }

    #[test]
    fn test_normalize_email_domain() {
        assert_eq!(normalize_email_domain("acme.edu"), "@acme.edu");
        assert_eq!(normalize_email_domain("@acme.edu"), "@acme.edu");
    }

    #[test]
    fn test_email_domain_of() {
        assert_eq!(
            email_domain_of("alice@acme.edu"),
            Some("@acme.edu".to_string())
        );
        assert_eq!(email_domain_of("no-at-sign"), None);
    }

    #[test]
    fn test_validate_rating() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(3).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
        assert!(validate_rating(-1).is_err());
    }
}
