//! Core domain types shared by the site components.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, SiteError};

// ---------------------------------------------------------------------------
// BusinessIdentity
// ---------------------------------------------------------------------------

/// Contact and canonical-URL record for the business behind the site.
///
/// Built once at startup and shared read-only by every component. The
/// `website` origin never ends in `/`, so root-relative paths can be appended
/// directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BusinessIdentityRecord")]
pub struct BusinessIdentity {
    name: String,
    phone: String,
    phone_link: String,
    website: String,
}

/// Unvalidated form of [`BusinessIdentity`] as it appears in TOML.
#[derive(Debug, Deserialize)]
struct BusinessIdentityRecord {
    name: String,
    phone: String,
    phone_link: String,
    website: String,
}

impl TryFrom<BusinessIdentityRecord> for BusinessIdentity {
    type Error = SiteError;

    fn try_from(raw: BusinessIdentityRecord) -> Result<Self> {
        Self::new(raw.name, raw.phone, raw.phone_link, raw.website)
    }
}

/// Placeholder identity written by `config init`; meant to be edited.
impl Default for BusinessIdentity {
    fn default() -> Self {
        Self {
            name: "Example Home Services".into(),
            phone: "(555) 010-0000".into(),
            phone_link: "tel:+15550100000".into(),
            website: "https://example.com".into(),
        }
    }
}

impl BusinessIdentity {
    /// Validate and build an identity. Trailing slashes on `website` are stripped.
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        phone_link: impl Into<String>,
        website: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        let phone = phone.into();
        let phone_link = phone_link.into();
        let website = website.into();

        if name.trim().is_empty() {
            return Err(SiteError::config("business name must not be empty"));
        }
        if phone.trim().is_empty() {
            return Err(SiteError::config("business phone must not be empty"));
        }
        if !phone_link.starts_with("tel:") || phone_link.len() <= "tel:".len() {
            return Err(SiteError::config(format!(
                "phone_link must be a dialable tel: URI, got '{phone_link}'"
            )));
        }

        let website = normalize_origin(&website)?;

        Ok(Self {
            name,
            phone,
            phone_link,
            website,
        })
    }

    /// Business display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Phone number in display form, e.g. `(555) 010-0000`.
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Dialable phone target, e.g. `tel:+15550100000`.
    pub fn phone_link(&self) -> &str {
        &self.phone_link
    }

    /// Canonical origin without a trailing slash.
    pub fn website(&self) -> &str {
        &self.website
    }

    /// Absolute URL for a root-relative path (`"/services"` → `https://…/services`).
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{path}", self.website)
    }
}

fn normalize_origin(website: &str) -> Result<String> {
    let trimmed = website.trim().trim_end_matches('/');

    let parsed = Url::parse(trimmed)
        .map_err(|e| SiteError::config(format!("invalid website '{website}': {e}")))?;

    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(SiteError::config(format!(
            "website must be an absolute http(s) origin, got '{website}'"
        )));
    }
    if parsed.path() != "/" || parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(SiteError::config(format!(
            "website must be a bare origin without path, query, or fragment, got '{website}'"
        )));
    }

    Ok(trimmed.to_string())
}

// ---------------------------------------------------------------------------
// NavigationStep
// ---------------------------------------------------------------------------

/// One ancestor (or the current page) in a breadcrumb trail.
///
/// A step without `href` is not navigable and marks the current page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationStep {
    /// Display label.
    pub label: String,
    /// Root-relative target path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl NavigationStep {
    /// A navigable step.
    pub fn link(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: Some(href.into()),
        }
    }

    /// A non-navigable step (the current page).
    pub fn current(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: None,
        }
    }
}

/// Parses the command-line form `Label=/path`, or `Label` for a step without a link.
impl std::str::FromStr for NavigationStep {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self> {
        let (label, href) = match s.split_once('=') {
            Some((label, href)) => (label.trim(), Some(href.trim())),
            None => (s.trim(), None),
        };

        if label.is_empty() {
            return Err(SiteError::invalid_input(format!(
                "navigation step '{s}' has an empty label"
            )));
        }

        Ok(Self {
            label: label.to_string(),
            href: href.filter(|h| !h.is_empty()).map(str::to_string),
        })
    }
}

// ---------------------------------------------------------------------------
// TrailVariant
// ---------------------------------------------------------------------------

/// Style profile for the visual breadcrumb trail.
///
/// Only CSS classes differ between variants; structured data is unaffected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailVariant {
    /// Dark text for light page backgrounds.
    #[default]
    Light,
    /// Light text for dark hero backgrounds.
    Dark,
}

impl std::fmt::Display for TrailVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Light => f.write_str("light"),
            Self::Dark => f.write_str("dark"),
        }
    }
}

impl std::str::FromStr for TrailVariant {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(SiteError::invalid_input(format!(
                "unknown trail variant '{other}' (expected light or dark)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(website: &str) -> Result<BusinessIdentity> {
        BusinessIdentity::new("Acme Plumbing", "(555) 010-0000", "tel:+15550100000", website)
    }

    #[test]
    fn identity_strips_trailing_slash() {
        let id = identity("https://example.com/").expect("valid identity");
        assert_eq!(id.website(), "https://example.com");
        assert_eq!(id.url_for("/"), "https://example.com/");
        assert_eq!(id.url_for("/services"), "https://example.com/services");
    }

    #[test]
    fn identity_rejects_relative_or_pathful_websites() {
        assert!(identity("example.com").is_err());
        assert!(identity("/services").is_err());
        assert!(identity("ftp://example.com").is_err());
        assert!(identity("https://example.com/blog").is_err());
    }

    #[test]
    fn identity_rejects_bad_phone_link() {
        let err = BusinessIdentity::new("Acme", "555", "5550100", "https://example.com")
            .unwrap_err();
        assert!(err.to_string().contains("tel:"));
    }

    #[test]
    fn identity_deserializes_through_validation() {
        let toml_str = r#"
name = "Acme Plumbing"
phone = "(555) 010-0000"
phone_link = "tel:+15550100000"
website = "https://acme.example///"
"#;
        let id: BusinessIdentity = toml::from_str(toml_str).expect("parse identity");
        assert_eq!(id.website(), "https://acme.example");

        let bad = toml_str.replace("https://acme.example///", "not a url");
        assert!(toml::from_str::<BusinessIdentity>(&bad).is_err());
    }

    #[test]
    fn step_parses_cli_form() {
        let step: NavigationStep = "Services=/services".parse().expect("parse");
        assert_eq!(step, NavigationStep::link("Services", "/services"));

        let step: NavigationStep = "Plumbing".parse().expect("parse");
        assert_eq!(step, NavigationStep::current("Plumbing"));

        let step: NavigationStep = "Plumbing=".parse().expect("parse");
        assert_eq!(step.href, None);

        assert!("=/services".parse::<NavigationStep>().is_err());
    }

    #[test]
    fn variant_parses_case_insensitively() {
        assert_eq!("Dark".parse::<TrailVariant>().expect("parse"), TrailVariant::Dark);
        assert_eq!(TrailVariant::default().to_string(), "light");
        assert!("sepia".parse::<TrailVariant>().is_err());
    }

    #[test]
    fn step_serialization_omits_missing_href() {
        let json = serde_json::to_string(&NavigationStep::current("Plumbing")).expect("serialize");
        assert_eq!(json, r#"{"label":"Plumbing"}"#);
    }
}
