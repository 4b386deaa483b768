// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Collaborator interfaces
//!
//! The registry does not download, tokenize or run models itself. It talks to
//! three collaborators:
//!
//! - an [`ArtifactStore`] that turns (namespace, model, filename) into a local path
//! - a [`TokenizerFactory`] that builds tokenizers from fetched files
//! - an [`InferenceRuntime`] that constructs Encoder/Generator/Translator objects
//!
//! Runtime objects that can release and re-materialize their weights expose
//! that through [`ModelHandle::as_suspendable`]. Kinds without the capability
//! return `None` and are left alone by eviction.

use std::any::Any;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::Result;
use crate::models::{ComputeType, RuntimeKind};

pub mod store;
#[cfg(feature = "hf-tokenizers")]
pub mod tokenizer;

pub use store::{DirectoryStore, HubArtifactStore};
#[cfg(feature = "hf-tokenizers")]
pub use tokenizer::HfTokenizerFactory;

/// Remote content store keyed by model name and filename
pub trait ArtifactStore: Send + Sync {
    /// Make `filename` of `namespace/model` available locally and return its path
    fn fetch(&self, namespace: &str, model: &str, filename: &str) -> Result<PathBuf>;
}

/// Where a tokenizer definition comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizerSource {
    /// Definition published alongside the model on the hub
    Hub { namespace: String, model: String },
    /// Definition in a local tokenizer config file
    File(PathBuf),
}

/// Post-construction tokenizer adjustments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenizerOptions {
    pub disable_padding: bool,
    pub disable_truncation: bool,
}

impl TokenizerOptions {
    /// Padding and truncation both switched off
    pub fn unpadded() -> Self {
        Self {
            disable_padding: true,
            disable_truncation: true,
        }
    }
}

/// A constructed tokenizer
pub trait TextTokenizer: Send + Sync {
    fn encode(&self, text: &str) -> Result<Vec<u32>>;
    fn decode(&self, ids: &[u32]) -> Result<String>;
}

/// Tokenizer library entry point
pub trait TokenizerFactory: Send + Sync {
    fn build(
        &self,
        source: &TokenizerSource,
        options: TokenizerOptions,
    ) -> Result<Arc<dyn TextTokenizer>>;
}

/// Capability of releasing weights and loading them again
pub trait Suspendable: Send + Sync {
    /// Release the weights while keeping the object usable for a later reload
    fn unload_model(&self) -> Result<()>;

    /// Bring released weights back into memory
    fn load_model(&self) -> Result<()>;

    fn is_loaded(&self) -> bool;
}

/// A constructed runtime model object
pub trait ModelHandle: Send + Sync {
    fn kind(&self) -> RuntimeKind;

    /// Unload/reload capability, if this kind has one
    fn as_suspendable(&self) -> Option<&dyn Suspendable> {
        None
    }

    /// Access to the concrete runtime object for inference calls
    fn as_any(&self) -> &dyn Any;
}

/// Inference runtime able to construct the three model kinds
pub trait InferenceRuntime: Send + Sync {
    fn construct(
        &self,
        kind: RuntimeKind,
        model_dir: &Path,
        compute: ComputeType,
    ) -> Result<Arc<dyn ModelHandle>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain;

    impl ModelHandle for Plain {
        fn kind(&self) -> RuntimeKind {
            RuntimeKind::Encoder
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn test_default_handle_is_not_suspendable() {
        let handle: Arc<dyn ModelHandle> = Arc::new(Plain);
        assert!(handle.as_suspendable().is_none());
        assert!(handle.as_any().downcast_ref::<Plain>().is_some());
    }

    #[test]
    fn test_tokenizer_options() {
        assert_eq!(
            TokenizerOptions::default(),
            TokenizerOptions {
                disable_padding: false,
                disable_truncation: false
            }
        );
        let unpadded = TokenizerOptions::unpadded();
        assert!(unpadded.disable_padding && unpadded.disable_truncation);
    }
}
