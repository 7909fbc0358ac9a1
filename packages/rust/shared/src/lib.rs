//! Shared types, error model, and configuration for LocalSite.
//!
//! This crate is the foundation depended on by all other LocalSite crates.
//! It provides:
//! - [`SiteError`]: the unified error type
//! - Domain types ([`BusinessIdentity`], [`NavigationStep`], [`TrailVariant`])
//! - Configuration ([`SiteConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    BreadcrumbConfig, CrawlerRuleConfig, DirectivesConfig, OverlayConfig, SiteConfig, config_dir,
    config_file_path, init_config, load_config, load_config_from, parse_config, write_default_config,
};
pub use error::{Result, SiteError};
pub use types::{BusinessIdentity, NavigationStep, TrailVariant};
