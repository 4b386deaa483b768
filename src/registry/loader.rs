// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::sync::Arc;

use crate::error::{LmError, Result};
use crate::models::{ModelDescriptor, TokenizerRecipe, MODEL_CONFIG, MODEL_WEIGHTS};
use crate::runtime::{
    ArtifactStore, InferenceRuntime, ModelHandle, TextTokenizer, TokenizerFactory,
    TokenizerOptions, TokenizerSource,
};

use super::entry::CacheEntry;

/// Fetches artifacts and builds tokenizers and models for the registry
pub(super) struct ModelLoader {
    pub(super) namespace: String,
    pub(super) store: Arc<dyn ArtifactStore>,
    pub(super) tokenizers: Arc<dyn TokenizerFactory>,
    pub(super) runtime: Arc<dyn InferenceRuntime>,
}

impl ModelLoader {
    pub(super) fn construct(
        &self,
        descriptor: ModelDescriptor,
        tokenizer_only: bool,
    ) -> Result<CacheEntry> {
        let tokenizer = self.construct_tokenizer(&descriptor)?;
        let model = if tokenizer_only {
            None
        } else {
            Some(self.construct_model(&descriptor)?)
        };

        Ok(CacheEntry {
            descriptor,
            tokenizer,
            model,
        })
    }

    fn construct_tokenizer(&self, descriptor: &ModelDescriptor) -> Result<Arc<dyn TextTokenizer>> {
        let mut last = None;
        for filename in descriptor.architecture.tokenizer_artifacts() {
            last = Some(
                self.store
                    .fetch(&self.namespace, &descriptor.name, filename)?,
            );
        }

        let hub = TokenizerSource::Hub {
            namespace: self.namespace.clone(),
            model: descriptor.name.clone(),
        };
        let (source, options) = match descriptor.architecture.tokenizer_recipe() {
            TokenizerRecipe::PretrainedUnpadded => (hub, TokenizerOptions::unpadded()),
            TokenizerRecipe::Pretrained => (hub, TokenizerOptions::default()),
            TokenizerRecipe::ConfigFile => {
                let path = last.ok_or_else(|| {
                    LmError::Catalog(format!("no tokenizer config for {}", descriptor.name))
                })?;
                (TokenizerSource::File(path), TokenizerOptions::default())
            }
        };

        self.tokenizers.build(&source, options)
    }

    pub(super) fn construct_model(
        &self,
        descriptor: &ModelDescriptor,
    ) -> Result<Arc<dyn ModelHandle>> {
        self.store
            .fetch(&self.namespace, &descriptor.name, MODEL_CONFIG)?;
        let weights = self
            .store
            .fetch(&self.namespace, &descriptor.name, MODEL_WEIGHTS)?;
        let model_dir = weights.parent().ok_or_else(|| LmError::Artifact {
            model: descriptor.name.clone(),
            filename: MODEL_WEIGHTS.to_string(),
            message: format!("{} has no parent directory", weights.display()),
        })?;

        let kind = descriptor.architecture.runtime_kind();
        tracing::info!(
            model = %descriptor.name,
            %kind,
            compute = descriptor.quantization.compute_type().as_str(),
            "Constructing model"
        );
        self.runtime
            .construct(kind, model_dir, descriptor.quantization.compute_type())
    }
}
