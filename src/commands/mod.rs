// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Subcommand implementations
//!
//! Each command splits into a pure `render` step returning the output text and
//! an `execute` wrapper that loads configuration and prints.

pub mod budget;
pub mod fetch;
pub mod list;
pub mod select;

use std::path::{Path, PathBuf};

use crate::cli::args::SelectionOverrides;
use crate::config::{tier_or_size, BudgetConfig, ProcessEnv, Settings};
use crate::error::Result;
use crate::models::Catalog;

/// Settings file to use: explicit path or the default location
pub fn settings_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(Settings::default_path)
}

/// Catalog named in settings, or the built-in one
pub fn load_catalog(settings: &Settings) -> Result<Catalog> {
    match &settings.catalog {
        Some(path) => Catalog::load_from_file(path),
        None => Ok(Catalog::builtin()),
    }
}

/// Budget configuration from the process environment, settings and CLI overrides
pub fn budget_config(settings: Settings, overrides: &SelectionOverrides) -> Result<BudgetConfig> {
    let mut config = BudgetConfig::with_sources(Box::new(ProcessEnv), settings);
    if let Some(budget) = overrides.budget.as_deref() {
        config.set_budget(tier_or_size(budget)?)?;
    }
    if let Some(license) = overrides.license.as_deref() {
        config.set_license_filter(license)?;
    }
    Ok(config)
}
