//! Site configuration for LocalSite.
//!
//! User config lives at `~/.localsite/localsite.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SiteError};
use crate::types::{BusinessIdentity, TrailVariant};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "localsite.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".localsite";

// ---------------------------------------------------------------------------
// Config structs (matching localsite.toml schema)
// ---------------------------------------------------------------------------

/// Top-level site config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Business identity shared by every component.
    #[serde(default)]
    pub business: BusinessIdentity,

    /// Call-to-action overlay settings.
    #[serde(default)]
    pub overlay: OverlayConfig,

    /// Breadcrumb trail settings.
    #[serde(default)]
    pub breadcrumb: BreadcrumbConfig,

    /// Crawler directives (robots.txt).
    #[serde(default)]
    pub directives: DirectivesConfig,
}

/// `[overlay]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// Scroll offset the page must exceed before the overlay shows.
    #[serde(default = "default_scroll_threshold")]
    pub scroll_threshold: f64,

    /// Viewport widths below this are compact.
    #[serde(default = "default_compact_breakpoint")]
    pub compact_breakpoint: u32,

    /// In-page anchor targeted by the quote action.
    #[serde(default = "default_quote_anchor")]
    pub quote_anchor: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            scroll_threshold: default_scroll_threshold(),
            compact_breakpoint: default_compact_breakpoint(),
            quote_anchor: default_quote_anchor(),
        }
    }
}

fn default_scroll_threshold() -> f64 {
    100.0
}
fn default_compact_breakpoint() -> u32 {
    768
}
fn default_quote_anchor() -> String {
    "#quote".into()
}

/// `[breadcrumb]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BreadcrumbConfig {
    /// Default style profile.
    #[serde(default)]
    pub variant: TrailVariant,
}

/// `[directives]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectivesConfig {
    /// Rule groups in output order.
    #[serde(default = "default_rules")]
    pub rules: Vec<CrawlerRuleConfig>,
}

impl Default for DirectivesConfig {
    fn default() -> Self {
        Self {
            rules: default_rules(),
        }
    }
}

/// `[[directives.rules]]` entry: one crawler group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerRuleConfig {
    /// Crawler identifier, `*` for all.
    pub user_agent: String,
    /// Allowed path patterns.
    #[serde(default)]
    pub allow: Vec<String>,
    /// Disallowed path patterns.
    #[serde(default)]
    pub disallow: Vec<String>,
}

fn default_rules() -> Vec<CrawlerRuleConfig> {
    vec![CrawlerRuleConfig {
        user_agent: "*".into(),
        allow: vec!["/".into()],
        disallow: vec!["/api/".into()],
    }]
}

impl SiteConfig {
    /// Check values that serde alone cannot enforce.
    pub fn validate(&self) -> Result<()> {
        let overlay = &self.overlay;
        if !overlay.scroll_threshold.is_finite() || overlay.scroll_threshold < 0.0 {
            return Err(SiteError::config(format!(
                "overlay.scroll_threshold must be a non-negative number, got {}",
                overlay.scroll_threshold
            )));
        }
        if overlay.compact_breakpoint == 0 {
            return Err(SiteError::config("overlay.compact_breakpoint must be positive"));
        }
        if !overlay.quote_anchor.starts_with('#') || overlay.quote_anchor.len() < 2 {
            return Err(SiteError::config(format!(
                "overlay.quote_anchor must be an in-page anchor like '#quote', got '{}'",
                overlay.quote_anchor
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.localsite/`).
pub fn config_dir() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| SiteError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.localsite/localsite.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the site config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<SiteConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(SiteConfig::default());
    }

    load_config_from(&path)
}

/// Load the site config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<SiteConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| SiteError::io(path, e))?;
    parse_config(&content)
        .map_err(|e| SiteError::config(format!("failed to load {}: {e}", path.display())))
}

/// Parse and validate config text.
pub fn parse_config(content: &str) -> Result<SiteConfig> {
    let config: SiteConfig =
        toml::from_str(content).map_err(|e| SiteError::config(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
///
/// An existing file is left alone unless `force` is set.
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = config_file_path()?;
    write_default_config(&path, force)?;
    Ok(path)
}

/// Write the default config to `path`, creating parent directories.
pub fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(SiteError::config(format!(
            "{} already exists; pass --force to overwrite it",
            path.display()
        )));
    }

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| SiteError::io(dir, e))?;
    }

    let config = SiteConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| SiteError::Serialization(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| SiteError::io(path, e))?;
    tracing::info!(?path, force, "wrote default config file");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = SiteConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("phone_link"));
        assert!(toml_str.contains("scroll_threshold"));
        assert!(toml_str.contains("user_agent"));
    }

    #[test]
    fn config_roundtrip() {
        let config = SiteConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed = parse_config(&toml_str).expect("deserialize");
        assert_eq!(parsed.overlay.scroll_threshold, 100.0);
        assert_eq!(parsed.overlay.compact_breakpoint, 768);
        assert_eq!(parsed.business.website(), "https://example.com");
        assert_eq!(parsed.directives.rules.len(), 1);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[business]
name = "Riverside Plumbing"
phone = "(555) 123-4567"
phone_link = "tel:+15551234567"
website = "https://riverside.example/"

[breadcrumb]
variant = "dark"
"#;
        let config = parse_config(toml_str).expect("parse");
        assert_eq!(config.business.name(), "Riverside Plumbing");
        assert_eq!(config.business.website(), "https://riverside.example");
        assert_eq!(config.breadcrumb.variant, TrailVariant::Dark);
        assert_eq!(config.overlay.quote_anchor, "#quote");
    }

    #[test]
    fn invalid_business_is_a_config_error() {
        let toml_str = r#"
[business]
name = "Riverside Plumbing"
phone = "(555) 123-4567"
phone_link = "tel:+15551234567"
website = "riverside.example"
"#;
        let err = parse_config(toml_str).unwrap_err();
        assert!(matches!(err, SiteError::Config { .. }));
    }

    #[test]
    fn overlay_values_are_validated() {
        let err = parse_config("[overlay]\nscroll_threshold = -5.0\n").unwrap_err();
        assert!(err.to_string().contains("scroll_threshold"));

        let err = parse_config("[overlay]\nquote_anchor = \"/quote\"\n").unwrap_err();
        assert!(err.to_string().contains("quote_anchor"));

        let err = parse_config("[overlay]\ncompact_breakpoint = 0\n").unwrap_err();
        assert!(err.to_string().contains("compact_breakpoint"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_config_from(Path::new("/nonexistent/localsite.toml")).unwrap_err();
        assert!(matches!(err, SiteError::Io { .. }));
    }

    #[test]
    fn init_keeps_existing_file_unless_forced() {
        let dir = std::env::temp_dir().join(format!("localsite-init-{}", std::process::id()));
        let path = dir.join("nested").join(CONFIG_FILE_NAME);
        let _ = std::fs::remove_dir_all(&dir);

        write_default_config(&path, false).expect("first write");
        assert!(load_config_from(&path).is_ok());

        std::fs::write(&path, "# hand-edited\n").expect("edit");
        let err = write_default_config(&path, false).unwrap_err();
        assert!(matches!(err, SiteError::Config { .. }));
        assert!(err.to_string().contains("--force"));
        assert_eq!(
            std::fs::read_to_string(&path).expect("read"),
            "# hand-edited\n"
        );

        write_default_config(&path, true).expect("forced write");
        let content = std::fs::read_to_string(&path).expect("read");
        assert!(content.contains("scroll_threshold"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
