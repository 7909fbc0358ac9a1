//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use localsite_breadcrumb::{BreadcrumbTrail, PageHead};
use localsite_directives::CrawlerDirectives;
use localsite_overlay::{AdaptiveCtaOverlay, OverlaySettings, ScrollSignal};
use localsite_shared::{
    BusinessIdentity, NavigationStep, SiteConfig, TrailVariant, init_config, load_config,
    load_config_from, write_default_config,
};
use maud::{DOCTYPE, html};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// LocalSite: breadcrumb trail, call-to-action overlay, and crawler directives.
#[derive(Parser)]
#[command(
    name = "localsite",
    version,
    about = "Render the interactive parts of a local-business marketing site.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.localsite/localsite.toml.
    #[arg(long = "config", global = true, env = "LOCALSITE_CONFIG")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// What `breadcrumb` prints.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum TrailFormat {
    /// JSON-LD structured data only.
    Json,
    /// Visual trail markup only.
    Html,
    /// Minimal page: JSON-LD in the head, trail in the body.
    Page,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Build the breadcrumb trail for a page.
    Breadcrumb {
        /// Ancestor step as `Label=/path`, or `Label` for the current page.
        /// Repeat in ancestor → descendant order; "Home" is added automatically.
        #[arg(long = "step")]
        steps: Vec<NavigationStep>,

        /// Read steps from a JSON file (array of {label, href}).
        #[arg(long, conflicts_with = "steps")]
        steps_json: Option<PathBuf>,

        /// Style profile (defaults to the configured one).
        #[arg(long)]
        variant: Option<TrailVariant>,

        /// Output format.
        #[arg(long, default_value = "page")]
        format: TrailFormat,
    },

    /// Replay scroll offsets through the call-to-action overlay.
    Overlay {
        /// Scroll offsets, comma-separated.
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        offsets: Vec<f64>,

        /// Viewport width in px; both layouts are rendered when omitted.
        #[arg(long)]
        width: Option<u32>,
    },

    /// Print crawler directives (robots.txt).
    Robots {
        /// Print the rule set as JSON instead.
        #[arg(long)]
        json: bool,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init {
        /// Overwrite an existing config file.
        #[arg(long)]
        force: bool,
    },
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing subscriber based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "localsite=info",
        1 => "localsite=debug",
        _ => "localsite=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // stdout carries rendered output
    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config_file.as_deref();
    match cli.command {
        Command::Breadcrumb {
            steps,
            steps_json,
            variant,
            format,
        } => cmd_breadcrumb(config_path, &steps, steps_json.as_deref(), variant, &format),
        Command::Overlay { offsets, width } => cmd_overlay(config_path, &offsets, width),
        Command::Robots { json } => cmd_robots(config_path, json),
        Command::Config { action } => match action {
            ConfigAction::Init { force } => cmd_config_init(config_path, force),
            ConfigAction::Show => cmd_config_show(config_path),
        },
    }
}

fn resolve_config(path: Option<&Path>) -> Result<SiteConfig> {
    let config = match path {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    Ok(config)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_breadcrumb(
    config_path: Option<&Path>,
    steps: &[NavigationStep],
    steps_json: Option<&Path>,
    variant: Option<TrailVariant>,
    format: &TrailFormat,
) -> Result<()> {
    let config = resolve_config(config_path)?;
    let variant = variant.unwrap_or(config.breadcrumb.variant);

    let trail = match steps_json {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .wrap_err_with(|| format!("failed to read {}", path.display()))?;
            let value: serde_json::Value = serde_json::from_str(&content)
                .wrap_err_with(|| format!("{} is not valid JSON", path.display()))?;
            BreadcrumbTrail::from_json(&config.business, &value)?
        }
        None => BreadcrumbTrail::new(&config.business, steps)?,
    };
    info!(entries = trail.entries().len(), %variant, "breadcrumb trail built");

    match format {
        TrailFormat::Json => {
            println!("{}", trail.structured_data().to_json_pretty()?);
        }
        TrailFormat::Html => {
            println!("{}", trail.render(variant).into_string());
        }
        TrailFormat::Page => {
            println!("{}", render_page(&config.business, &trail, variant)?);
        }
    }
    Ok(())
}

/// Minimal standalone page: JSON-LD in `<head>`, visual trail in `<body>`.
fn render_page(
    business: &BusinessIdentity,
    trail: &BreadcrumbTrail,
    variant: TrailVariant,
) -> localsite_shared::Result<String> {
    let mut head = PageHead::new();
    let body = trail.attach(&mut head, variant)?;
    let page = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (business.name()) }
                (head.render())
            }
            body { (body) }
        }
    };
    Ok(page.into_string())
}

fn cmd_overlay(config_path: Option<&Path>, offsets: &[f64], width: Option<u32>) -> Result<()> {
    let config = resolve_config(config_path)?;
    let overlay = AdaptiveCtaOverlay::new(
        Arc::new(config.business.clone()),
        OverlaySettings::from(&config.overlay),
    );
    let viewport = width.map(|w| overlay.classify(w));

    let signal = ScrollSignal::new();
    let mounted = overlay.mount(&signal);

    println!("  initial  {}", mounted.visibility());
    for offset in offsets {
        signal.emit(*offset);
        println!("  {offset:>7}  {}", mounted.visibility());
    }
    println!();

    match viewport {
        Some(class) => info!(?class, "rendering for known viewport"),
        None => info!("viewport unknown, rendering both layouts"),
    }
    println!("{}", mounted.render(viewport).into_string());

    mounted.unmount();
    Ok(())
}

fn cmd_robots(config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = resolve_config(config_path)?;
    let directives = CrawlerDirectives::from_config(&config.business, &config.directives)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&directives)?);
    } else {
        print!("{}", directives.to_robots_txt());
    }
    Ok(())
}

fn cmd_config_init(config_path: Option<&Path>, force: bool) -> Result<()> {
    let path = match config_path {
        Some(path) => {
            write_default_config(path, force)?;
            path.to_path_buf()
        }
        None => init_config(force)?,
    };
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config_path: Option<&Path>) -> Result<()> {
    let config = resolve_config(config_path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
