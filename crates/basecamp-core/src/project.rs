//! Project identity: display name, URL-safe slug and derived site URLs

use crate::error::BasecampError;
use regex::Regex;
use std::sync::LazyLock;

static INVALID_SLUG_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9-]").expect("static pattern"));

static REPEATED_HYPHENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-+").expect("static pattern"));

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("static pattern")
});

/// Domain suffix Lando assigns to local apps
pub const DEFAULT_DOMAIN_SUFFIX: &str = "lndo.site";

/// Human name plus the slug used for app names, hostnames and `.env` values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectIdentity {
    pub name: String,
    pub slug: String,
}

impl ProjectIdentity {
    pub fn new(name: &str) -> Result<Self, BasecampError> {
        Ok(Self {
            name: name.to_string(),
            slug: sanitize_project_name(name)?,
        })
    }

    /// Local site URL, e.g. `https://my-project.lndo.site`
    pub fn site_url(&self, domain_suffix: &str) -> String {
        format!("https://{}.{}", self.slug, domain_suffix)
    }

    /// Admin URL for a Bedrock-style `wp/` core directory
    pub fn admin_url(&self, domain_suffix: &str) -> String {
        format!("{}/wp/wp-admin", self.site_url(domain_suffix))
    }
}

/// Sanitize a project name for use in URLs and container names.
///
/// ASCII lowercase, spaces to hyphens, drop anything outside `[a-z0-9-]`,
/// collapse repeated hyphens, trim hyphens from both ends.
pub fn sanitize_project_name(name: &str) -> Result<String, BasecampError> {
    let lowered = name.replace(' ', "-").to_ascii_lowercase();

    let stripped = INVALID_SLUG_CHARS.replace_all(&lowered, "");
    let collapsed = REPEATED_HYPHENS.replace_all(&stripped, "-");
    let sanitized = collapsed.trim_matches('-');

    if sanitized.is_empty() {
        return Err(BasecampError::EmptyProjectName);
    }

    Ok(sanitized.to_string())
}

/// Loose address check used by the email prompt: one `@`, a dotted domain, no spaces
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_basic_name() {
        assert_eq!(sanitize_project_name("My Project").unwrap(), "my-project");
    }

    #[test]
    fn test_sanitize_strips_punctuation() {
        assert_eq!(
            sanitize_project_name("Acme & Sons, Inc.").unwrap(),
            "acme-sons-inc"
        );
        assert_eq!(sanitize_project_name("Café Délice").unwrap(), "caf-dlice");
    }

    #[test]
    fn test_sanitize_lowercases_ascii_only() {
        // non-ASCII letters are dropped rather than folded
        assert_eq!(sanitize_project_name("İstanbul Site").unwrap(), "stanbul-site");
        assert_eq!(sanitize_project_name("ÉCOLE 42").unwrap(), "cole-42");
        assert!(sanitize_project_name("İ").is_err());
    }

    #[test]
    fn test_sanitize_collapses_and_trims_hyphens() {
        assert_eq!(
            sanitize_project_name("  --Hello   World--  ").unwrap(),
            "hello-world"
        );
        assert_eq!(sanitize_project_name("a---b").unwrap(), "a-b");
    }

    #[test]
    fn test_sanitize_keeps_digits() {
        assert_eq!(sanitize_project_name("Site 2024").unwrap(), "site-2024");
    }

    #[test]
    fn test_sanitize_empty_result_is_error() {
        assert!(matches!(
            sanitize_project_name("!!!"),
            Err(BasecampError::EmptyProjectName)
        ));
        assert!(matches!(
            sanitize_project_name("   "),
            Err(BasecampError::EmptyProjectName)
        ));
        assert!(sanitize_project_name("").is_err());
    }

    #[test]
    fn test_identity_urls() {
        let project = ProjectIdentity::new("Built North").unwrap();
        assert_eq!(project.slug, "built-north");
        assert_eq!(
            project.site_url(DEFAULT_DOMAIN_SUFFIX),
            "https://built-north.lndo.site"
        );
        assert_eq!(
            project.admin_url("test"),
            "https://built-north.test/wp/wp-admin"
        );
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("admin@example.com"));
        assert!(is_valid_email("dev+wp@studio.co.uk"));
        assert!(!is_valid_email("admin"));
        assert!(!is_valid_email("admin@localhost"));
        assert!(!is_valid_email("ad min@example.com"));
        assert!(!is_valid_email("a@b@example.com"));
        assert!(!is_valid_email("admin@example..com"));
    }
}
