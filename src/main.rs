// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! languagemodels - pick and fetch local language models within a memory budget
//!
//! Entry point for the `languagemodels` CLI.

use clap::Parser;

use languagemodels::cli::{Cli, Commands};
use languagemodels::commands;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let mut env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());

    // `-v` shows downloads and construction, `-vv` selection decisions.
    // `RUST_LOG` still takes precedence.
    let directive = match cli.verbose {
        0 => None,
        1 => Some("languagemodels=info"),
        _ => Some("languagemodels=debug"),
    };
    if let Some(directive) = directive {
        if let Ok(parsed) = directive.parse() {
            env_filter = env_filter.add_directive(parsed);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let settings_path = commands::settings_path(cli.config.as_deref());
    tracing::debug!("Using settings file {}", settings_path.display());

    match &cli.command {
        Commands::List(args) => commands::list::execute(args, cli.format, &settings_path)?,
        Commands::Select(args) => commands::select::execute(args, cli.format, &settings_path)?,
        Commands::Budget(args) => commands::budget::execute(args, cli.format, &settings_path)?,
        Commands::Fetch(args) => commands::fetch::execute(args, cli.format, &settings_path)?,
    }

    Ok(())
}
