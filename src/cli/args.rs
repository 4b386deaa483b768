// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! CLI argument definitions using Clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::models::Purpose;

/// Pick and fetch small local language models within a memory budget
#[derive(Parser, Debug)]
#[command(name = "languagemodels")]
#[command(version, about = "Pick and fetch local language models within a memory budget")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Settings file path (defaults to $LANGUAGEMODELS_HOME/settings.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the model catalog in priority order
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show which model would be used for a purpose
    Select(SelectArgs),

    /// Show or persist the memory budget
    Budget(BudgetArgs),

    /// Download the artifacts for the selected model
    Fetch(FetchArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show models for this purpose
    #[arg(short, long, value_parser = parse_purpose)]
    pub purpose: Option<Purpose>,
}

#[derive(Args, Debug)]
pub struct SelectArgs {
    /// Purpose to select for (instruct, embedding)
    #[arg(value_parser = parse_purpose)]
    pub purpose: Purpose,

    #[command(flatten)]
    pub overrides: SelectionOverrides,
}

/// Per-invocation overrides shared by `select` and `fetch`
#[derive(Args, Debug, Default)]
pub struct SelectionOverrides {
    /// Budget override: GB number, size string ("250mb") or tier ("large")
    #[arg(short, long)]
    pub budget: Option<String>,

    /// License filter regex, anchored at the start of the license string
    #[arg(short, long)]
    pub license: Option<String>,
}

#[derive(Args, Debug)]
pub struct BudgetArgs {
    /// Persist a budget (GB number, size string or tier) to the settings file
    #[arg(long)]
    pub set: Option<String>,

    /// Persist a license filter to the settings file (empty string clears it)
    #[arg(long)]
    pub license: Option<String>,
}

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Purpose to fetch for (instruct, embedding)
    #[arg(value_parser = parse_purpose)]
    pub purpose: Purpose,

    /// Only fetch the tokenizer artifacts
    #[arg(long)]
    pub tokenizer_only: bool,

    /// Hide the download progress bar
    #[arg(long)]
    pub quiet: bool,

    #[command(flatten)]
    pub overrides: SelectionOverrides,
}

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Text,

    /// JSON output
    Json,
}

fn parse_purpose(value: &str) -> Result<Purpose, String> {
    value.parse()
}
