// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Loaded model cache
//!
//! [`ModelRegistry`] owns the budget configuration, the catalog and the cache
//! of constructed (tokenizer, model) pairs. Each call to
//! [`ModelRegistry::get_model`]:
//!
//! 1. resolves the model name from purpose, budget and license filter
//! 2. when the budget is below [`EVICTION_THRESHOLD_GB`] and a full model is
//!    requested, asks every other cached model to unload its weights
//! 3. constructs the pair on first use, or reloads the weights of a
//!    previously unloaded model
//!
//! Eviction always finishes before anything is constructed or reloaded.
//! Cache entries are never removed; only their weights are released.
//!
//! The registry has no internal locking. Mutating calls take `&mut self`;
//! wrap it in [`SharedRegistry`] to share it across threads.

mod builder;
mod entry;
mod loader;

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::config::{BudgetConfig, BudgetValue};
use crate::error::{LmError, Result};
use crate::models::{
    select_name, Catalog, LicenseFilter, ModelDescriptor, Purpose, TokenizerRecipe,
    MODEL_CONFIG, MODEL_WEIGHTS, TOKENIZER_DEFINITION,
};
use crate::runtime::ModelHandle;

pub use builder::ModelRegistryBuilder;
pub use entry::{HandleState, ModelPair};

use entry::CacheEntry;
use loader::ModelLoader;

/// Budgets below this many GB evict inactive models before loading
pub const EVICTION_THRESHOLD_GB: f64 = 4.0;

/// Registry shared between threads
pub type SharedRegistry = Arc<Mutex<ModelRegistry>>;

/// Files fetched for a descriptor, in fetch order
///
/// Hub tokenizer recipes resolve [`TOKENIZER_DEFINITION`] through the store
/// while the tokenizer is built, right after the vocabulary.
pub fn artifact_plan(descriptor: &ModelDescriptor, tokenizer_only: bool) -> Vec<&'static str> {
    let mut files = descriptor.architecture.tokenizer_artifacts().to_vec();
    if descriptor.architecture.tokenizer_recipe() != TokenizerRecipe::ConfigFile {
        files.push(TOKENIZER_DEFINITION);
    }
    if !tokenizer_only {
        files.push(MODEL_CONFIG);
        files.push(MODEL_WEIGHTS);
    }
    files
}

/// Budget-aware cache of constructed models
pub struct ModelRegistry {
    config: BudgetConfig,
    catalog: Catalog,
    loader: ModelLoader,
    cache: HashMap<String, CacheEntry>,
}

impl ModelRegistry {
    pub fn builder() -> ModelRegistryBuilder {
        ModelRegistryBuilder::new()
    }

    pub fn config(&self) -> &BudgetConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn namespace(&self) -> &str {
        &self.loader.namespace
    }

    /// Set the budget override; see [`BudgetConfig::set_budget`]
    pub fn set_budget(&mut self, value: impl Into<BudgetValue>) -> Result<f64> {
        self.config.set_budget(value)
    }

    pub fn clear_budget(&mut self) {
        self.config.clear_budget();
    }

    /// Current budget in GB
    pub fn budget(&self) -> Result<f64> {
        self.config.budget()
    }

    pub fn set_license_filter(&mut self, pattern: &str) -> Result<()> {
        self.config.set_license_filter(pattern)
    }

    pub fn license_filter(&self) -> Result<Option<LicenseFilter>> {
        self.config.license_filter()
    }

    /// Name of the model that would serve `purpose` under the current configuration
    pub fn resolve_name(&self, purpose: Purpose) -> Result<String> {
        let budget = self.config.budget()?;
        let license = self.config.license_filter()?;
        let pinned = self.config.pinned_instruct_model();
        select_name(
            &self.catalog,
            purpose,
            budget,
            license.as_ref(),
            pinned.as_deref(),
        )
    }

    /// Get the (tokenizer, model) pair for a purpose.
    ///
    /// With `tokenizer_only` no model is constructed, reloaded or evicted.
    pub fn get_model(&mut self, purpose: Purpose, tokenizer_only: bool) -> Result<ModelPair> {
        let budget = self.config.budget()?;
        let name = self.resolve_name(purpose)?;

        if budget < EVICTION_THRESHOLD_GB && !tokenizer_only {
            self.evict_except(&name)?;
        }

        let entry = match self.cache.entry(name) {
            Entry::Vacant(slot) => {
                let descriptor = self
                    .catalog
                    .find(slot.key())
                    .cloned()
                    .ok_or_else(|| {
                        LmError::Catalog(format!("{} is not in the catalog", slot.key()))
                    })?;
                slot.insert(self.loader.construct(descriptor, tokenizer_only)?)
            }
            Entry::Occupied(slot) => {
                let entry = slot.into_mut();
                if tokenizer_only {
                    tracing::debug!(model = %entry.descriptor.name, "Cache hit");
                } else if let Some(model) = entry.model.clone() {
                    reload(&entry.descriptor.name, model.as_ref())?;
                } else {
                    entry.model = Some(self.loader.construct_model(&entry.descriptor)?);
                    tracing::debug!(
                        model = %entry.descriptor.name,
                        "Upgraded tokenizer-only entry"
                    );
                }
                entry
            }
        };

        Ok(entry.pair())
    }

    /// Names with a cache entry, sorted
    pub fn cached_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.cache.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Lifecycle state of a cached name; `None` when absent
    pub fn state(&self, name: &str) -> Option<HandleState> {
        self.cache.get(name).map(CacheEntry::state)
    }

    /// Cached descriptors with their lifecycle state, sorted by name
    pub fn cached_models(&self) -> Vec<(&ModelDescriptor, HandleState)> {
        let mut models: Vec<_> = self
            .cache
            .values()
            .map(|entry| (&entry.descriptor, entry.state()))
            .collect();
        models.sort_by(|a, b| a.0.name.cmp(&b.0.name));
        models
    }

    /// Ask every cached model except `keep` to release its weights
    fn evict_except(&self, keep: &str) -> Result<()> {
        for (name, entry) in &self.cache {
            if name == keep {
                continue;
            }
            if let Some(model) = &entry.model {
                unload(name, model.as_ref())?;
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("config", &self.config)
            .field("namespace", &self.loader.namespace)
            .field("cached", &self.cached_names())
            .finish_non_exhaustive()
    }
}

fn unload(name: &str, model: &dyn ModelHandle) -> Result<()> {
    let Some(suspendable) = model.as_suspendable() else {
        return Ok(());
    };
    match suspendable.unload_model() {
        Ok(()) => {
            tracing::debug!(model = name, "Unloaded inactive model");
            Ok(())
        }
        Err(e) if e.is_capability_error() => {
            tracing::debug!(model = name, "Skipping unload: {}", e);
            Ok(())
        }
        Err(e) => Err(e),
    }
}

fn reload(name: &str, model: &dyn ModelHandle) -> Result<()> {
    let Some(suspendable) = model.as_suspendable() else {
        return Ok(());
    };
    match suspendable.load_model() {
        Ok(()) => {
            tracing::debug!(model = name, "Reloaded model");
            Ok(())
        }
        Err(e) if e.is_capability_error() => {
            tracing::debug!(model = name, "Skipping reload: {}", e);
            Ok(())
        }
        Err(e) => Err(e),
    }
}
