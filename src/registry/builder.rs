// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::BudgetConfig;
use crate::error::{LmError, Result};
use crate::models::Catalog;
use crate::runtime::{ArtifactStore, HubArtifactStore, InferenceRuntime, TokenizerFactory};

use super::loader::ModelLoader;
use super::ModelRegistry;

/// Builder for [`ModelRegistry`].
///
/// Only the inference runtime is required. Without an explicit store the
/// registry downloads through a [`HubArtifactStore`] configured from
/// settings, and the catalog comes from the settings file or the built-in list.
#[derive(Default)]
pub struct ModelRegistryBuilder {
    config: Option<BudgetConfig>,
    catalog: Option<Catalog>,
    namespace: Option<String>,
    store: Option<Arc<dyn ArtifactStore>>,
    tokenizers: Option<Arc<dyn TokenizerFactory>>,
    runtime: Option<Arc<dyn InferenceRuntime>>,
    progress: bool,
}

impl ModelRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: BudgetConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Override the artifact owner namespace from settings
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn store(mut self, store: Arc<dyn ArtifactStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn tokenizers(mut self, tokenizers: Arc<dyn TokenizerFactory>) -> Self {
        self.tokenizers = Some(tokenizers);
        self
    }

    pub fn runtime(mut self, runtime: Arc<dyn InferenceRuntime>) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Show download progress when the default hub store is used
    pub fn progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn build(self) -> Result<ModelRegistry> {
        let runtime = self
            .runtime
            .ok_or_else(|| LmError::Config("an inference runtime is required".to_string()))?;
        let config = self.config.unwrap_or_default();

        let catalog = match (self.catalog, &config.settings().catalog) {
            (Some(catalog), _) => catalog,
            (None, Some(path)) => Catalog::load_from_file(path)?,
            (None, None) => Catalog::builtin(),
        };

        let namespace = self
            .namespace
            .unwrap_or_else(|| config.settings().namespace.clone());

        let store: Arc<dyn ArtifactStore> = match self.store {
            Some(store) => store,
            None => Arc::new(
                HubArtifactStore::from_settings(config.settings())?.with_progress(self.progress),
            ),
        };

        let tokenizers = match self.tokenizers {
            Some(tokenizers) => tokenizers,
            None => default_tokenizers(Arc::clone(&store))?,
        };

        tracing::debug!(
            models = catalog.len(),
            namespace = %namespace,
            "Model registry ready"
        );

        Ok(ModelRegistry {
            config,
            catalog,
            loader: ModelLoader {
                namespace,
                store,
                tokenizers,
                runtime,
            },
            cache: HashMap::new(),
        })
    }
}

#[cfg(feature = "hf-tokenizers")]
fn default_tokenizers(store: Arc<dyn ArtifactStore>) -> Result<Arc<dyn TokenizerFactory>> {
    Ok(Arc::new(crate::runtime::HfTokenizerFactory::new(store)))
}

#[cfg(not(feature = "hf-tokenizers"))]
fn default_tokenizers(_store: Arc<dyn ArtifactStore>) -> Result<Arc<dyn TokenizerFactory>> {
    Err(LmError::Config(
        "no tokenizer factory configured and the hf-tokenizers feature is disabled".to_string(),
    ))
}
