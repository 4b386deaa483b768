// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Artifact download command

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::cli::args::{FetchArgs, OutputFormat};
use crate::config::{BudgetConfig, Settings};
use crate::error::{LmError, Result};
use crate::models::{select_name, Catalog, Purpose};
use crate::registry::artifact_plan;
use crate::runtime::{ArtifactStore, HubArtifactStore};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchReport {
    pub model: String,
    pub files: Vec<PathBuf>,
}

/// Execute the fetch command
pub fn execute(args: &FetchArgs, format: OutputFormat, settings_path: &Path) -> Result<()> {
    let settings = Settings::load_from(settings_path)?;
    let catalog = super::load_catalog(&settings)?;
    let namespace = settings.namespace.clone();
    let store = HubArtifactStore::from_settings(&settings)?.with_progress(!args.quiet);
    let config = super::budget_config(settings, &args.overrides)?;

    let report = fetch(
        &catalog,
        &config,
        &store,
        &namespace,
        args.purpose,
        args.tokenizer_only,
    )?;
    print!("{}", render(&report, format)?);
    Ok(())
}

/// Fetch every artifact the selected model needs through `store`
pub fn fetch(
    catalog: &Catalog,
    config: &BudgetConfig,
    store: &dyn ArtifactStore,
    namespace: &str,
    purpose: Purpose,
    tokenizer_only: bool,
) -> Result<FetchReport> {
    let name = select_name(
        catalog,
        purpose,
        config.budget()?,
        config.license_filter()?.as_ref(),
        config.pinned_instruct_model().as_deref(),
    )?;
    let descriptor = catalog
        .find(&name)
        .ok_or_else(|| LmError::Catalog(format!("{} is not in the catalog", name)))?;

    let files = artifact_plan(descriptor, tokenizer_only)
        .into_iter()
        .map(|filename| store.fetch(namespace, &name, filename))
        .collect::<Result<Vec<_>>>()?;

    Ok(FetchReport { model: name, files })
}

pub fn render(report: &FetchReport, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(report)?));
    }

    let mut out = format!("{}\n", report.model);
    for file in &report.files {
        out.push_str(&format!("  {}\n", file.display()));
    }
    Ok(out)
}
