// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Budget inspection and persistence command

use std::path::Path;

use serde::Serialize;

use crate::cli::args::{BudgetArgs, OutputFormat, SelectionOverrides};
use crate::config::{tier_or_size, BudgetConfig, Settings, SizeTier};
use crate::error::Result;
use crate::models::LicenseFilter;
use crate::registry::EVICTION_THRESHOLD_GB;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BudgetReport {
    budget_gb: f64,
    source: String,
    license_filter: Option<String>,
    instruct_model: Option<String>,
    evicts_inactive: bool,
}

/// Execute the budget command
pub fn execute(args: &BudgetArgs, format: OutputFormat, settings_path: &Path) -> Result<()> {
    let mut settings = Settings::load_from(settings_path)?;

    if args.set.is_some() || args.license.is_some() {
        apply(&mut settings, args)?;
        settings.save_to(settings_path)?;
        tracing::info!("Saved settings to {}", settings_path.display());
    }

    let config = super::budget_config(settings, &SelectionOverrides::default())?;
    print!("{}", render(&config, format)?);
    Ok(())
}

/// Validate and store the requested changes in `settings`
pub fn apply(settings: &mut Settings, args: &BudgetArgs) -> Result<()> {
    if let Some(size) = &args.set {
        tier_or_size(size)?;
        settings.size = Some(size.trim().to_string());
    }
    if let Some(pattern) = &args.license {
        settings.license = LicenseFilter::new(pattern)?.map(|f| f.pattern().to_string());
    }
    Ok(())
}

/// Current budget with its source and the related knobs
pub fn render(config: &BudgetConfig, format: OutputFormat) -> Result<String> {
    let (budget_gb, source) = config.resolve_budget()?;
    let report = BudgetReport {
        budget_gb,
        source: source.to_string(),
        license_filter: config.license_filter()?.map(|f| f.pattern().to_string()),
        instruct_model: config.pinned_instruct_model(),
        evicts_inactive: budget_gb < EVICTION_THRESHOLD_GB,
    };

    if format == OutputFormat::Json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(&report)?));
    }

    let mut out = format!("Budget:         {} GB ({})\n", report.budget_gb, report.source);
    out.push_str(&format!(
        "License filter: {}\n",
        report.license_filter.as_deref().unwrap_or("none")
    ));
    if let Some(model) = &report.instruct_model {
        out.push_str(&format!("Instruct model: {} (pinned)\n", model));
    }
    out.push_str(&format!(
        "Eviction:       {}\n",
        if report.evicts_inactive {
            "inactive models are unloaded"
        } else {
            "off"
        }
    ));
    let tiers: Vec<String> = SizeTier::ALL
        .iter()
        .map(|t| format!("{}={}", t, t.gigabytes()))
        .collect();
    out.push_str(&format!("Tiers:          {}\n", tiers.join(" ")));
    Ok(out)
}
