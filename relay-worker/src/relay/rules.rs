//! Recipient allow-pattern and confirmation code extraction.

use regex::Regex;

use crate::error::ConfigError;

/// Reason given when a recipient is not an allowed address.
pub const REJECT_REASON: &str = "Unknown address";

const CODE_PATTERN: &str = r"Slack confirmation code: ([A-Z0-9-]+)";

/// Lowercase a recipient.
///
/// Whitespace is kept, so a padded address never matches the allow-pattern.
pub fn normalize_recipient(recipient: &str) -> String {
    recipient.to_lowercase()
}

/// Matches `users+<1-8 ASCII digits>@<domain>` against normalized recipients.
#[derive(Debug, Clone)]
pub struct RecipientRule {
    domain: String,
    pattern: Regex,
}

impl RecipientRule {
    pub fn for_domain(domain: &str) -> Result<Self, ConfigError> {
        let domain = domain.trim().to_lowercase();

        if domain.is_empty() || domain.contains('@') || domain.chars().any(char::is_whitespace)
        {
            return Err(ConfigError::InvalidRecipientDomain { domain });
        }

        let pattern = Regex::new(&format!(r"^users\+[0-9]{{1,8}}@{}$", regex::escape(&domain)))?;

        Ok(Self { domain, pattern })
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Test an already normalized recipient.
    pub fn matches(&self, recipient: &str) -> bool {
        self.pattern.is_match(recipient)
    }
}

/// Pulls the confirmation code token out of a subject line.
#[derive(Debug, Clone)]
pub struct CodeExtractor {
    pattern: Regex,
}

impl CodeExtractor {
    pub fn new() -> Result<Self, ConfigError> {
        Ok(Self {
            pattern: Regex::new(CODE_PATTERN)?,
        })
    }

    /// The first captured code in `subject`, if present.
    pub fn extract<'a>(&self, subject: &'a str) -> Option<&'a str> {
        self.pattern
            .captures(subject)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule() -> RecipientRule {
        RecipientRule::for_domain("tgopi.com").unwrap()
    }

    #[test]
    fn test_normalize_recipient() {
        assert_eq!(normalize_recipient("Users+3@TGOPI.com"), "users+3@tgopi.com");
    }

    #[test]
    fn test_normalize_keeps_whitespace() {
        let normalized = normalize_recipient(" users+5@tgopi.com\n");
        assert_eq!(normalized, " users+5@tgopi.com\n");
        assert!(!rule().matches(&normalized));
    }

    #[test]
    fn test_recipient_digit_bounds() {
        let rule = rule();
        assert!(rule.matches("users+1@tgopi.com"));
        assert!(rule.matches("users+12345678@tgopi.com"));
        assert!(!rule.matches("users+123456789@tgopi.com"));
        assert!(!rule.matches("users+@tgopi.com"));
        assert!(!rule.matches("users+12a@tgopi.com"));
    }

    #[test]
    fn test_recipient_non_ascii_digits() {
        let rule = rule();
        // Arabic-Indic and fullwidth digits
        assert!(!rule.matches("users+\u{663}\u{664}@tgopi.com"));
        assert!(!rule.matches("users+\u{ff15}@tgopi.com"));
        assert!(!rule.matches(&normalize_recipient("USERS+\u{ff15}@TGOPI.COM")));
    }

    #[test]
    fn test_recipient_anchored() {
        let rule = rule();
        assert!(!rule.matches("xusers+1@tgopi.com"));
        assert!(!rule.matches("users+1@tgopi.com.evil.net"));
        assert!(!rule.matches("users+1@sub.tgopi.com"));
        assert!(!rule.matches("admin@tgopi.com"));
    }

    #[test]
    fn test_recipient_domain_is_literal() {
        // The dot in the domain must not match any character
        assert!(!rule().matches("users+1@tgopixcom"));
    }

    #[test]
    fn test_recipient_domain_normalized() {
        let rule = RecipientRule::for_domain(" TGOPI.com ").unwrap();
        assert_eq!(rule.domain(), "tgopi.com");
        assert!(rule.matches(&normalize_recipient("Users+3@TGOPI.COM")));
    }

    #[test]
    fn test_recipient_domain_invalid() {
        assert!(matches!(
            RecipientRule::for_domain(""),
            Err(ConfigError::InvalidRecipientDomain { .. })
        ));
        assert!(matches!(
            RecipientRule::for_domain("a@b.com"),
            Err(ConfigError::InvalidRecipientDomain { .. })
        ));
    }

    #[test]
    fn test_extract_code() {
        let extractor = CodeExtractor::new().unwrap();
        assert_eq!(
            extractor.extract("Slack confirmation code: ABC123"),
            Some("ABC123")
        );
        assert_eq!(
            extractor.extract("Your Slack confirmation code: Q7X-K2P is ready"),
            Some("Q7X-K2P")
        );
    }

    #[test]
    fn test_extract_code_missing() {
        let extractor = CodeExtractor::new().unwrap();
        assert_eq!(extractor.extract("Welcome to Slack"), None);
        assert_eq!(extractor.extract("Slack confirmation code: abc123"), None);
        assert_eq!(extractor.extract(""), None);
    }

    #[test]
    fn test_extract_code_stops_at_lowercase() {
        let extractor = CodeExtractor::new().unwrap();
        assert_eq!(
            extractor.extract("Slack confirmation code: AB12cd"),
            Some("AB12")
        );
    }
}
