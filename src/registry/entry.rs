// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::models::ModelDescriptor;
use crate::runtime::{ModelHandle, TextTokenizer};

/// Lifecycle state of a cached model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HandleState {
    /// Only the tokenizer has been constructed
    TokenizerOnly,
    /// Suspendable model with weights in memory
    Loaded,
    /// Suspendable model whose weights were released
    Unloaded,
    /// Model without unload support; always resident
    Resident,
}

impl HandleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            HandleState::TokenizerOnly => "tokenizer-only",
            HandleState::Loaded => "loaded",
            HandleState::Unloaded => "unloaded",
            HandleState::Resident => "resident",
        }
    }
}

impl fmt::Display for HandleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A (tokenizer, model) pair handed out by the registry.
///
/// Clones share the cached objects.
#[derive(Clone)]
pub struct ModelPair {
    pub tokenizer: Arc<dyn TextTokenizer>,
    /// `None` for tokenizer-only requests that never built the model
    pub model: Option<Arc<dyn ModelHandle>>,
}

impl ModelPair {
    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }
}

impl fmt::Debug for ModelPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelPair")
            .field("model", &self.model.as_ref().map(|m| m.kind()))
            .finish_non_exhaustive()
    }
}

pub(super) struct CacheEntry {
    pub(super) descriptor: ModelDescriptor,
    pub(super) tokenizer: Arc<dyn TextTokenizer>,
    pub(super) model: Option<Arc<dyn ModelHandle>>,
}

impl CacheEntry {
    pub(super) fn pair(&self) -> ModelPair {
        ModelPair {
            tokenizer: Arc::clone(&self.tokenizer),
            model: self.model.clone(),
        }
    }

    pub(super) fn state(&self) -> HandleState {
        match &self.model {
            None => HandleState::TokenizerOnly,
            Some(model) => match model.as_suspendable() {
                Some(s) if s.is_loaded() => HandleState::Loaded,
                Some(_) => HandleState::Unloaded,
                None => HandleState::Resident,
            },
        }
    }
}
