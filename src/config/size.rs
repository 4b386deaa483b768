// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Memory size parsing and named size tiers

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LmError, Result};

/// Budget used when nothing else is configured
pub const DEFAULT_BUDGET_GB: f64 = 0.40;

/// Named budget tiers accepted by `LANGUAGEMODELS_SIZE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeTier {
    Small,
    Base,
    Large,
    Xl,
    Xxl,
}

impl SizeTier {
    pub const ALL: [SizeTier; 5] = [
        SizeTier::Small,
        SizeTier::Base,
        SizeTier::Large,
        SizeTier::Xl,
        SizeTier::Xxl,
    ];

    /// Budget for this tier in GB
    pub fn gigabytes(&self) -> f64 {
        match self {
            SizeTier::Small => 0.2,
            SizeTier::Base => 0.40,
            SizeTier::Large => 1.0,
            SizeTier::Xl => 4.0,
            SizeTier::Xxl => 16.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SizeTier::Small => "small",
            SizeTier::Base => "base",
            SizeTier::Large => "large",
            SizeTier::Xl => "xl",
            SizeTier::Xxl => "xxl",
        }
    }
}

impl fmt::Display for SizeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SizeTier {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "small" => Ok(SizeTier::Small),
            "base" => Ok(SizeTier::Base),
            "large" => Ok(SizeTier::Large),
            "xl" => Ok(SizeTier::Xl),
            "xxl" => Ok(SizeTier::Xxl),
            _ => Err(format!("Unknown size tier: {}", s)),
        }
    }
}

/// A budget as supplied by a caller: a number of GB or a size string
#[derive(Debug, Clone, PartialEq)]
pub enum BudgetValue {
    Gigabytes(f64),
    Text(String),
}

impl BudgetValue {
    /// Convert to GB, validating the value
    pub fn to_gigabytes(&self) -> Result<f64> {
        match self {
            BudgetValue::Gigabytes(gb) => check_gigabytes(*gb, &gb.to_string()),
            BudgetValue::Text(text) => parse_size(text),
        }
    }
}

impl From<f64> for BudgetValue {
    fn from(value: f64) -> Self {
        BudgetValue::Gigabytes(value)
    }
}

impl From<f32> for BudgetValue {
    fn from(value: f32) -> Self {
        BudgetValue::Gigabytes(f64::from(value))
    }
}

impl From<u32> for BudgetValue {
    fn from(value: u32) -> Self {
        BudgetValue::Gigabytes(f64::from(value))
    }
}

impl From<i32> for BudgetValue {
    fn from(value: i32) -> Self {
        BudgetValue::Gigabytes(f64::from(value))
    }
}

impl From<&str> for BudgetValue {
    fn from(value: &str) -> Self {
        BudgetValue::Text(value.to_string())
    }
}

impl From<String> for BudgetValue {
    fn from(value: String) -> Self {
        BudgetValue::Text(value)
    }
}

/// Parse a size string into GB.
///
/// Accepts a number with an optional case-insensitive unit: `g`/`gb` for
/// gigabytes, `m`/`mb` for 1/1024 of a gigabyte. A bare number is in GB.
pub fn parse_size(text: &str) -> Result<f64> {
    let lowered = text.trim().to_lowercase();
    let stripped = lowered.trim_end_matches('b');

    let (number, multiplier) = if let Some(n) = stripped.strip_suffix('g') {
        (n, 1.0)
    } else if let Some(n) = stripped.strip_suffix('m') {
        (n, 1.0 / 1024.0)
    } else {
        (stripped, 1.0)
    };

    let value: f64 = number
        .trim()
        .parse()
        .map_err(|_| LmError::InvalidSizeFormat(text.to_string()))?;

    check_gigabytes(value * multiplier, text)
}

fn check_gigabytes(value: f64, original: &str) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(LmError::InvalidSizeFormat(original.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_parse_plain_numbers() {
        assert!(approx(parse_size("512").unwrap(), 512.0));
        assert!(approx(parse_size(".5").unwrap(), 0.5));
        assert!(approx(parse_size("2").unwrap(), 2.0));
    }

    #[test]
    fn test_parse_gigabytes() {
        assert!(approx(parse_size("4G").unwrap(), 4.0));
        assert!(approx(parse_size("4gb").unwrap(), 4.0));
        assert!(approx(parse_size("4GB").unwrap(), 4.0));
    }

    #[test]
    fn test_parse_megabytes() {
        assert!(approx(parse_size("256mb").unwrap(), 0.25));
        assert!(approx(parse_size("256M").unwrap(), 0.25));
        assert!(approx(parse_size("512mb").unwrap(), 0.5));
    }

    #[test]
    fn test_parse_invalid() {
        for bad in ["", "gb", "abc", "12kb", "1.2.3", "-1", "inf", "nan", "4 gigs"] {
            let err = parse_size(bad).unwrap_err();
            assert!(
                matches!(err, LmError::InvalidSizeFormat(ref s) if s == bad),
                "expected InvalidSizeFormat for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_budget_value_numeric() {
        assert!(approx(BudgetValue::from(16).to_gigabytes().unwrap(), 16.0));
        assert!(approx(BudgetValue::from(0.5).to_gigabytes().unwrap(), 0.5));
        assert!(BudgetValue::from(f64::NAN).to_gigabytes().is_err());
        assert!(BudgetValue::from(-2.0).to_gigabytes().is_err());
    }

    #[test]
    fn test_budget_value_text() {
        assert!(approx(BudgetValue::from("512mb").to_gigabytes().unwrap(), 0.5));
        assert!(BudgetValue::from("lots").to_gigabytes().is_err());
    }

    #[test]
    fn test_size_tier_values() {
        assert!(approx(SizeTier::Small.gigabytes(), 0.2));
        assert!(approx(SizeTier::Base.gigabytes(), DEFAULT_BUDGET_GB));
        assert!(approx(SizeTier::Large.gigabytes(), 1.0));
        assert!(approx(SizeTier::Xl.gigabytes(), 4.0));
        assert!(approx(SizeTier::Xxl.gigabytes(), 16.0));
    }

    #[test]
    fn test_size_tier_from_str() {
        assert_eq!(SizeTier::from_str("LARGE"), Ok(SizeTier::Large));
        assert_eq!(SizeTier::from_str("xxl"), Ok(SizeTier::Xxl));
        assert!(SizeTier::from_str("huge").is_err());
        assert!(SizeTier::from_str(" large").is_err());
    }

    #[test]
    fn test_size_tier_display_roundtrip() {
        for tier in SizeTier::ALL {
            assert_eq!(SizeTier::from_str(&tier.to_string()), Ok(tier));
        }
    }
}
