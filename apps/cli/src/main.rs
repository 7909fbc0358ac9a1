//! LocalSite CLI: render the breadcrumb trail, call-to-action overlay, and
//! crawler directives of a local-business marketing site.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
