// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Model selection
//!
//! Selection is a linear scan of the catalog in priority order. The first
//! descriptor with the requested purpose, a footprint strictly below the
//! budget and a matching license wins. There is no scoring.

use std::fmt;

use regex::Regex;

use crate::error::{LmError, Result};

use super::catalog::Catalog;
use super::schema::{ModelDescriptor, Purpose};

/// License restriction, matched as a pattern anchored at the start of the
/// license identifier (`"apache*"` accepts `"apache-2.0"`).
#[derive(Clone)]
pub struct LicenseFilter {
    pattern: String,
    regex: Regex,
}

impl LicenseFilter {
    /// Compile a filter. Returns `None` for an empty pattern.
    pub fn new(pattern: &str) -> Result<Option<Self>> {
        if pattern.is_empty() {
            return Ok(None);
        }

        let regex = Regex::new(&format!("^(?:{})", pattern)).map_err(|e| {
            LmError::InvalidLicensePattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            }
        })?;

        Ok(Some(Self {
            pattern: pattern.to_string(),
            regex,
        }))
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether a license identifier is accepted
    pub fn matches(&self, license: &str) -> bool {
        self.regex.is_match(license)
    }
}

impl fmt::Debug for LicenseFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LicenseFilter").field(&self.pattern).finish()
    }
}

impl PartialEq for LicenseFilter {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

/// Pick the best descriptor for a purpose within a budget
pub fn select<'a>(
    catalog: &'a Catalog,
    purpose: Purpose,
    budget_gb: f64,
    license: Option<&LicenseFilter>,
) -> Result<&'a ModelDescriptor> {
    let selected = catalog.iter().find(|model| {
        model.purpose == purpose
            && model.fits(budget_gb)
            && license.map_or(true, |filter| filter.matches(&model.license))
    });

    match selected {
        Some(model) => {
            tracing::debug!(
                model = %model.name,
                %purpose,
                budget_gb,
                "Selected model"
            );
            Ok(model)
        }
        None => Err(LmError::NoModelFound {
            purpose,
            budget: budget_gb,
            license: license.map(|f| f.pattern().to_string()),
        }),
    }
}

/// Resolve the model name for a purpose.
///
/// A pinned instruct model short-circuits the catalog search entirely; it is
/// meant for testing against a specific variant.
pub fn select_name(
    catalog: &Catalog,
    purpose: Purpose,
    budget_gb: f64,
    license: Option<&LicenseFilter>,
    pinned_instruct: Option<&str>,
) -> Result<String> {
    if purpose == Purpose::Instruct {
        if let Some(name) = pinned_instruct.filter(|n| !n.is_empty()) {
            tracing::debug!(model = name, "Using pinned instruct model");
            return Ok(name.to_string());
        }
    }

    select(catalog, purpose, budget_gb, license).map(|model| model.name.clone())
}
