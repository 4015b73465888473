//! Format validation for string fields
//!
//! Pre-compiled regex validators for the `email`, `uri`, `uuid` and
//! `binary` string formats, plus the `/body/flags` envelope used by the
//! `pattern` constraint.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

// ============================================================================
// Pre-compiled Regex Patterns
// ============================================================================

/// Email regex pattern (RFC 5322 simplified)
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
});

/// URI regex pattern (scheme followed by a non-empty remainder)
static URI_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*:[^\s]+$").unwrap()
});

/// UUID regex pattern (RFC 4122 versions 1 to 5)
static UUID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[1-5][0-9a-fA-F]{3}-[89abAB][0-9a-fA-F]{3}-[0-9a-fA-F]{12}$").unwrap()
});

/// Base64 regex pattern (padded)
static BASE64_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9+/]{4})*(?:[A-Za-z0-9+/]{2}==|[A-Za-z0-9+/]{3}=)?$").unwrap()
});

/// Slash-delimited regular expression: `/body/flags`
static PATTERN_ENVELOPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^/(.*?)/([gimy]*)$").unwrap()
});

// ============================================================================
// Format Validators
// ============================================================================

/// Validate email format
///
/// # Example
/// ```
/// use tableschema_field::formats::validate_email;
///
/// assert!(validate_email("user@example.com"));
/// assert!(!validate_email("invalid-email"));
/// ```
pub fn validate_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// Validate URI format
///
/// # Example
/// ```
/// use tableschema_field::formats::validate_uri;
///
/// assert!(validate_uri("https://example.com"));
/// assert!(validate_uri("mailto:user@example.com"));
/// assert!(!validate_uri("example.com"));
/// ```
pub fn validate_uri(value: &str) -> bool {
    URI_REGEX.is_match(value)
}

/// Validate UUID format
pub fn validate_uuid(value: &str) -> bool {
    UUID_REGEX.is_match(value)
}

/// Validate base64 encoded binary
pub fn validate_binary(value: &str) -> bool {
    BASE64_REGEX.is_match(value)
}

// ============================================================================
// Pattern Envelope
// ============================================================================

/// Compile a `/body/flags` pattern string
///
/// `i` and `m` switch on case-insensitive and multi-line matching; `g` and
/// `y` change nothing for a single test and are accepted silently.
/// Returns a human-readable reason when the envelope or the body is invalid.
pub fn compile_pattern(pattern: &str) -> Result<Regex, String> {
    let caps = PATTERN_ENVELOPE
        .captures(pattern)
        .ok_or_else(|| "expected a /body/flags regular expression".to_string())?;
    let body = caps.get(1).map_or("", |m| m.as_str());
    let flags = caps.get(2).map_or("", |m| m.as_str());

    RegexBuilder::new(body)
        .case_insensitive(flags.contains('i'))
        .multi_line(flags.contains('m'))
        .build()
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(validate_email("user@example.com"));
        assert!(validate_email("first.last+tag@sub.domain.org"));
        assert!(!validate_email("@example.com"));
        assert!(!validate_email("user@"));
    }

    #[test]
    fn test_uri_validation() {
        assert!(validate_uri("http://localhost:8080/path"));
        assert!(validate_uri("urn:isbn:0451450523"));
        assert!(!validate_uri("no scheme"));
    }

    #[test]
    fn test_uuid_validation() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000"));
        assert!(validate_uuid("6ba7b810-9dad-11d1-80b4-00c04fd430c8"));
        assert!(!validate_uuid("550e8400e29b41d4a716446655440000"));
        assert!(!validate_uuid("00000000-0000-0000-0000-000000000000"));
    }

    #[test]
    fn test_binary_validation() {
        assert!(validate_binary("aGVsbG8="));
        assert!(validate_binary(""));
        assert!(!validate_binary("not base64!"));
    }

    #[test]
    fn test_compile_pattern() {
        let re = compile_pattern("/^[a-z]+$/").unwrap();
        assert!(re.is_match("abc"));
        assert!(!re.is_match("ABC"));

        let re = compile_pattern("/^[a-z]+$/i").unwrap();
        assert!(re.is_match("ABC"));

        // The lazy body stops at the first slash that is followed by flags only
        let re = compile_pattern("/a/b/").unwrap();
        assert!(re.is_match("a/b"));
    }

    #[test]
    fn test_compile_pattern_errors() {
        assert!(compile_pattern("^[a-z]+$").is_err());
        assert!(compile_pattern("/[a-z/").is_err());
        assert!(compile_pattern("/abc/x").is_err());
    }
}
