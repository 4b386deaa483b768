// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! languagemodels - budget-aware selection and caching of small local models.
//!
//! This crate exposes the library used by the `languagemodels` CLI
//! (`src/main.rs`) and by applications embedding it.
//!
//! Architecture highlights:
//! - `models`: the priority-ordered catalog and the selection policy
//! - `config`: memory budget, license filter and settings-file layers
//! - `runtime`: collaborator traits plus the hub artifact store and tokenizers
//! - `registry`: the cache of constructed (tokenizer, model) pairs with
//!   eviction and reload under tight budgets
//! - `cli`, `commands`: the command-line surface

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod registry;
pub mod runtime;

pub use config::BudgetConfig;
pub use error::{LmError, Result};
pub use models::{Catalog, ModelDescriptor, Purpose};
pub use registry::{HandleState, ModelPair, ModelRegistry, SharedRegistry};
