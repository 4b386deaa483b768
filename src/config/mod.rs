// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Configuration module
//!
//! Memory budget, license filter and settings-file handling.

pub mod budget;
pub mod env;
pub mod settings;
pub mod size;

pub use budget::{tier_or_size, BudgetConfig, BudgetSource, BUDGET_SOURCES};
pub use env::{EnvSource, ProcessEnv, HOME_VAR, INSTRUCT_MODEL_VAR, LICENSE_VAR, SIZE_VAR};
pub use settings::{Settings, DEFAULT_ENDPOINT, DEFAULT_NAMESPACE};
pub use size::{parse_size, BudgetValue, SizeTier, DEFAULT_BUDGET_GB};
