// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Model selection command

use std::path::Path;

use serde::Serialize;

use crate::cli::args::{OutputFormat, SelectArgs};
use crate::config::{BudgetConfig, BudgetSource, Settings};
use crate::error::Result;
use crate::models::{select_name, Catalog, ModelDescriptor, Purpose};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Selection<'a> {
    purpose: Purpose,
    model: &'a str,
    pinned: bool,
    budget_gb: f64,
    budget_source: String,
    license_filter: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    descriptor: Option<&'a ModelDescriptor>,
}

/// Execute the select command
pub fn execute(args: &SelectArgs, format: OutputFormat, settings_path: &Path) -> Result<()> {
    let settings = Settings::load_from(settings_path)?;
    let catalog = super::load_catalog(&settings)?;
    let config = super::budget_config(settings, &args.overrides)?;
    print!("{}", render(&catalog, &config, args.purpose, format)?);
    Ok(())
}

/// Describe the model chosen for `purpose` under `config`
pub fn render(
    catalog: &Catalog,
    config: &BudgetConfig,
    purpose: Purpose,
    format: OutputFormat,
) -> Result<String> {
    let (budget, source) = config.resolve_budget()?;
    let license = config.license_filter()?;
    let pinned = match purpose {
        Purpose::Instruct => config.pinned_instruct_model(),
        Purpose::Embedding => None,
    };

    let name = select_name(catalog, purpose, budget, license.as_ref(), pinned.as_deref())?;
    let selection = Selection {
        purpose,
        model: &name,
        pinned: pinned.is_some(),
        budget_gb: budget,
        budget_source: source.to_string(),
        license_filter: license.as_ref().map(|f| f.pattern()),
        descriptor: catalog.find(&name),
    };

    if format == OutputFormat::Json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(&selection)?));
    }

    let mut out = format!("{}\n", name);
    if source != BudgetSource::Default || selection.pinned {
        out.push_str(&format!(
            "  budget {} GB from {}{}\n",
            budget,
            source,
            if selection.pinned { ", pinned" } else { "" }
        ));
    }
    Ok(out)
}
