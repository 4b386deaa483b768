// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Catalog listing command

use std::path::Path;

use serde::Serialize;

use crate::cli::args::{ListArgs, OutputFormat, SelectionOverrides};
use crate::config::Settings;
use crate::error::Result;
use crate::models::{Catalog, LicenseFilter, Purpose};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ModelRow<'a> {
    rank: usize,
    name: &'a str,
    purpose: Purpose,
    params: f64,
    size_gb: f64,
    architecture: &'static str,
    license: &'a str,
    eligible: bool,
}

/// Execute the list command
pub fn execute(args: &ListArgs, format: OutputFormat, settings_path: &Path) -> Result<()> {
    let settings = Settings::load_from(settings_path)?;
    let catalog = super::load_catalog(&settings)?;
    let config = super::budget_config(settings, &SelectionOverrides::default())?;
    let license = config.license_filter()?;
    print!(
        "{}",
        render(&catalog, args.purpose, config.budget()?, license.as_ref(), format)?
    );
    Ok(())
}

/// Catalog in priority order, optionally restricted to one purpose.
///
/// Rows that pass both the budget and the license filter are marked eligible.
pub fn render(
    catalog: &Catalog,
    purpose: Option<Purpose>,
    budget: f64,
    license: Option<&LicenseFilter>,
    format: OutputFormat,
) -> Result<String> {
    let rows: Vec<ModelRow> = catalog
        .iter()
        .enumerate()
        .filter(|(_, m)| purpose.map_or(true, |p| m.purpose == p))
        .map(|(i, m)| ModelRow {
            rank: i + 1,
            name: &m.name,
            purpose: m.purpose,
            params: m.params,
            size_gb: m.size_gb(),
            architecture: m.architecture.display_name(),
            license: &m.license,
            eligible: m.fits(budget) && license.map_or(true, |f| f.matches(&m.license)),
        })
        .collect();

    if format == OutputFormat::Json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(&rows)?));
    }

    let mut out = format!(
        "  {:>3}  {:<30} {:<10} {:>8}  {:<27} LICENSE\n",
        "#", "NAME", "PURPOSE", "SIZE GB", "ARCHITECTURE"
    );
    for row in &rows {
        out.push_str(&format!(
            "{} {:>3}  {:<30} {:<10} {:>8.3}  {:<27} {}\n",
            if row.eligible { '*' } else { ' ' },
            row.rank,
            row.name,
            row.purpose.as_str(),
            row.size_gb,
            row.architecture,
            row.license
        ));
    }
    out.push_str(&format!("\n* fits the current budget of {} GB", budget));
    match license {
        Some(filter) => out.push_str(&format!(" and matches license {}\n", filter.pattern())),
        None => out.push('\n'),
    }
    Ok(out)
}
