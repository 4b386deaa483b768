// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Tokenizers backed by the HuggingFace `tokenizers` crate

use std::path::Path;
use std::sync::Arc;

use tokenizers::Tokenizer as HfTokenizer;

use crate::error::{LmError, Result};
use crate::models::TOKENIZER_DEFINITION;

use super::{ArtifactStore, TextTokenizer, TokenizerFactory, TokenizerOptions, TokenizerSource};

/// Factory resolving hub definitions through an artifact store
pub struct HfTokenizerFactory {
    store: Arc<dyn ArtifactStore>,
}

impl HfTokenizerFactory {
    pub fn new(store: Arc<dyn ArtifactStore>) -> Self {
        Self { store }
    }

    fn load(path: &Path) -> Result<HfTokenizer> {
        let inner = HfTokenizer::from_file(path).map_err(|e| {
            LmError::Tokenizer(format!("Failed to load {}: {}", path.display(), e))
        })?;
        tracing::debug!("Loaded tokenizer from {}", path.display());
        Ok(inner)
    }

    /// Build the concrete tokenizer for a source
    pub fn build_tokenizer(
        &self,
        source: &TokenizerSource,
        options: TokenizerOptions,
    ) -> Result<HfTextTokenizer> {
        let path = match source {
            TokenizerSource::File(path) => path.clone(),
            TokenizerSource::Hub { namespace, model } => {
                self.store.fetch(namespace, model, TOKENIZER_DEFINITION)?
            }
        };

        let mut inner = Self::load(&path)?;
        if options.disable_padding {
            inner.with_padding(None);
        }
        if options.disable_truncation {
            inner
                .with_truncation(None)
                .map_err(|e| LmError::Tokenizer(e.to_string()))?;
        }

        Ok(HfTextTokenizer { inner })
    }
}

impl TokenizerFactory for HfTokenizerFactory {
    fn build(
        &self,
        source: &TokenizerSource,
        options: TokenizerOptions,
    ) -> Result<Arc<dyn TextTokenizer>> {
        Ok(Arc::new(self.build_tokenizer(source, options)?))
    }
}

/// [`TextTokenizer`] over a loaded `tokenizers::Tokenizer`
pub struct HfTextTokenizer {
    inner: HfTokenizer,
}

impl HfTextTokenizer {
    pub fn inner(&self) -> &HfTokenizer {
        &self.inner
    }
}

impl TextTokenizer for HfTextTokenizer {
    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        let encoding = self
            .inner
            .encode(text, true)
            .map_err(|e| LmError::Tokenizer(e.to_string()))?;
        Ok(encoding.get_ids().to_vec())
    }

    fn decode(&self, ids: &[u32]) -> Result<String> {
        self.inner
            .decode(ids, true)
            .map_err(|e| LmError::Tokenizer(e.to_string()))
    }
}
