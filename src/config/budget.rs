// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Memory budget and license configuration
//!
//! The budget is resolved lazily, on every read, from an ordered list of
//! sources. The first source that yields a value wins:
//!
//! 1. an explicit override from [`BudgetConfig::set_budget`]
//! 2. `LANGUAGEMODELS_SIZE` (named tier, then raw size string)
//! 3. the `size` field of the settings file (same rule)
//! 4. [`DEFAULT_BUDGET_GB`]

use std::fmt;
use std::str::FromStr;

use crate::error::Result;
use crate::models::LicenseFilter;

use super::env::{EnvSource, ProcessEnv, INSTRUCT_MODEL_VAR, LICENSE_VAR, SIZE_VAR};
use super::settings::Settings;
use super::size::{parse_size, BudgetValue, SizeTier, DEFAULT_BUDGET_GB};

/// One layer of budget configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetSource {
    /// Value stored by `set_budget`
    Override,
    /// An environment variable holding a tier or size string
    Environment(&'static str),
    /// The settings file `size` field
    Settings,
    /// Built-in default
    Default,
}

impl fmt::Display for BudgetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetSource::Override => write!(f, "override"),
            BudgetSource::Environment(var) => write!(f, "${}", var),
            BudgetSource::Settings => write!(f, "settings"),
            BudgetSource::Default => write!(f, "default"),
        }
    }
}

/// Resolution order, first match wins
pub const BUDGET_SOURCES: [BudgetSource; 4] = [
    BudgetSource::Override,
    BudgetSource::Environment(SIZE_VAR),
    BudgetSource::Settings,
    BudgetSource::Default,
];

/// Budget, license filter and pinned-model configuration
pub struct BudgetConfig {
    override_gb: Option<f64>,
    /// `Some(None)` means explicitly cleared, which also hides lower layers
    license_override: Option<Option<LicenseFilter>>,
    env: Box<dyn EnvSource>,
    settings: Settings,
}

impl BudgetConfig {
    /// Configuration backed by the process environment and default settings
    pub fn new() -> Self {
        Self::with_sources(Box::new(ProcessEnv), Settings::default())
    }

    /// Configuration backed by a specific environment and settings file
    pub fn with_sources(env: Box<dyn EnvSource>, settings: Settings) -> Self {
        Self {
            override_gb: None,
            license_override: None,
            env,
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Set the budget override. Numbers are GB; strings may carry a unit.
    ///
    /// Returns the parsed value in GB.
    pub fn set_budget(&mut self, value: impl Into<BudgetValue>) -> Result<f64> {
        let gb = value.into().to_gigabytes()?;
        tracing::debug!(budget_gb = gb, "Budget override set");
        self.override_gb = Some(gb);
        Ok(gb)
    }

    /// Remove the override, restoring environment/settings/default resolution
    pub fn clear_budget(&mut self) {
        self.override_gb = None;
    }

    pub fn budget_override(&self) -> Option<f64> {
        self.override_gb
    }

    /// Current budget in GB
    pub fn budget(&self) -> Result<f64> {
        self.resolve_budget().map(|(gb, _)| gb)
    }

    /// Current budget in GB and the layer it came from
    pub fn resolve_budget(&self) -> Result<(f64, BudgetSource)> {
        for source in BUDGET_SOURCES {
            if let Some(gb) = self.read_source(source)? {
                return Ok((gb, source));
            }
        }
        Ok((DEFAULT_BUDGET_GB, BudgetSource::Default))
    }

    fn read_source(&self, source: BudgetSource) -> Result<Option<f64>> {
        match source {
            BudgetSource::Override => Ok(self.override_gb),
            BudgetSource::Environment(var) => match self.env.non_empty(var) {
                Some(value) => tier_or_size(&value).map(Some),
                None => Ok(None),
            },
            BudgetSource::Settings => match self.settings.size.as_deref() {
                Some(value) if !value.is_empty() => tier_or_size(value).map(Some),
                _ => Ok(None),
            },
            BudgetSource::Default => Ok(Some(DEFAULT_BUDGET_GB)),
        }
    }

    /// Restrict acceptable licenses. An empty pattern removes the restriction.
    pub fn set_license_filter(&mut self, pattern: &str) -> Result<()> {
        let filter = LicenseFilter::new(pattern)?;
        tracing::debug!(pattern, "License filter set");
        self.license_override = Some(filter);
        Ok(())
    }

    /// Current license filter, if any
    pub fn license_filter(&self) -> Result<Option<LicenseFilter>> {
        if let Some(filter) = &self.license_override {
            return Ok(filter.clone());
        }
        if let Some(pattern) = self.env.non_empty(LICENSE_VAR) {
            return LicenseFilter::new(&pattern);
        }
        match self.settings.license.as_deref() {
            Some(pattern) => LicenseFilter::new(pattern),
            None => Ok(None),
        }
    }

    /// Pinned instruct model name, if configured
    pub fn pinned_instruct_model(&self) -> Option<String> {
        self.env
            .non_empty(INSTRUCT_MODEL_VAR)
            .or_else(|| self.settings.instruct_model.clone())
            .filter(|name| !name.is_empty())
    }
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BudgetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BudgetConfig")
            .field("override_gb", &self.override_gb)
            .field("license_override", &self.license_override)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// Named tier (case-insensitive exact match) or raw size string
pub fn tier_or_size(value: &str) -> Result<f64> {
    match SizeTier::from_str(value) {
        Ok(tier) => Ok(tier.gigabytes()),
        Err(_) => parse_size(value),
    }
}
