//! Crawler directives (`robots.txt`) for LocalSite.
//!
//! Rule groups come from config; the sitemap and host lines are derived from
//! the same [`BusinessIdentity`] the page components use.

use std::fmt::Write as _;

use serde::Serialize;
use tracing::{debug, instrument};

use localsite_shared::{BusinessIdentity, CrawlerRuleConfig, DirectivesConfig, Result, SiteError};

/// Path of the sitemap relative to the site origin.
pub const SITEMAP_PATH: &str = "/sitemap.xml";

/// One `User-agent` group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlerRule {
    pub user_agent: String,
    pub allow: Vec<String>,
    pub disallow: Vec<String>,
}

/// Complete rule set for the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlerDirectives {
    pub rules: Vec<CrawlerRule>,
    pub sitemap: String,
    pub host: String,
}

impl CrawlerDirectives {
    /// Validate configured rule groups and bind them to the site origin.
    #[instrument(skip_all, fields(groups = config.rules.len()))]
    pub fn from_config(identity: &BusinessIdentity, config: &DirectivesConfig) -> Result<Self> {
        let rules = config
            .rules
            .iter()
            .map(validate_rule)
            .collect::<Result<Vec<_>>>()?;

        debug!(groups = rules.len(), "crawler directives built");

        Ok(Self {
            rules,
            sitemap: identity.url_for(SITEMAP_PATH),
            host: identity.website().to_string(),
        })
    }

    /// Render as `robots.txt` text.
    pub fn to_robots_txt(&self) -> String {
        let mut out = String::new();

        for rule in &self.rules {
            let _ = writeln!(out, "User-agent: {}", rule.user_agent);
            for path in &rule.allow {
                let _ = writeln!(out, "Allow: {path}");
            }
            for path in &rule.disallow {
                let _ = writeln!(out, "Disallow: {path}");
            }
            out.push('\n');
        }

        let _ = writeln!(out, "Sitemap: {}", self.sitemap);
        let _ = writeln!(out, "Host: {}", self.host);
        out
    }
}

fn validate_rule(rule: &CrawlerRuleConfig) -> Result<CrawlerRule> {
    let user_agent = rule.user_agent.trim();
    if user_agent.is_empty() {
        return Err(SiteError::config("crawler rule has an empty user_agent"));
    }

    for path in rule.allow.iter().chain(&rule.disallow) {
        if !path.starts_with('/') {
            return Err(SiteError::config(format!(
                "crawler rule for '{user_agent}' has pattern '{path}' that does not start with '/'"
            )));
        }
    }

    Ok(CrawlerRule {
        user_agent: user_agent.to_string(),
        allow: rule.allow.clone(),
        disallow: rule.disallow.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> BusinessIdentity {
        BusinessIdentity::new(
            "Acme Plumbing",
            "(555) 010-0000",
            "tel:+15550100000",
            "https://example.com/",
        )
        .expect("valid identity")
    }

    #[test]
    fn default_rules_render_robots_txt() {
        let directives =
            CrawlerDirectives::from_config(&identity(), &DirectivesConfig::default())
                .expect("build");

        assert_eq!(
            directives.to_robots_txt(),
            "User-agent: *\n\
             Allow: /\n\
             Disallow: /api/\n\
             \n\
             Sitemap: https://example.com/sitemap.xml\n\
             Host: https://example.com\n"
        );
    }

    #[test]
    fn groups_keep_config_order() {
        let config: DirectivesConfig = toml::from_str(
            r#"
[[rules]]
user_agent = "Googlebot"
allow = ["/"]

[[rules]]
user_agent = "GPTBot"
disallow = ["/"]
"#,
        )
        .expect("parse");

        let robots = CrawlerDirectives::from_config(&identity(), &config)
            .expect("build")
            .to_robots_txt();

        let google = robots.find("User-agent: Googlebot").expect("googlebot group");
        let gpt = robots.find("User-agent: GPTBot").expect("gptbot group");
        assert!(google < gpt);
        assert!(robots.contains("User-agent: GPTBot\nDisallow: /\n"));
    }

    #[test]
    fn rejects_bad_rules() {
        let config = DirectivesConfig {
            rules: vec![CrawlerRuleConfig {
                user_agent: " ".into(),
                allow: vec![],
                disallow: vec![],
            }],
        };
        assert!(CrawlerDirectives::from_config(&identity(), &config).is_err());

        let config = DirectivesConfig {
            rules: vec![CrawlerRuleConfig {
                user_agent: "*".into(),
                allow: vec!["admin".into()],
                disallow: vec![],
            }],
        };
        let err = CrawlerDirectives::from_config(&identity(), &config).unwrap_err();
        assert!(err.to_string().contains("does not start with '/'"));
    }
}
