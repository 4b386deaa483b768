// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Model catalog
//!
//! The catalog is sorted in priority order with the best models first. The
//! best entry that fits the memory budget and matches the license filter is
//! selected, so the order here is the ranking.
//!
//! A replacement catalog may be loaded from TOML:
//!
//! ```toml
//! [[models]]
//! name = "flan-t5-small-ct2-int8"
//! purpose = "instruct"
//! params = 77e6
//! architecture = "encoder-decoder-transformer"
//! license = "apache-2.0"
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LmError, Result};

use super::schema::{Architecture, ModelDescriptor, Purpose};

/// Immutable, priority-ordered list of model descriptors
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    models: Vec<ModelDescriptor>,
}

/// On-disk catalog format
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub models: Vec<ModelDescriptor>,
}

impl Catalog {
    /// The built-in catalog
    pub fn builtin() -> Self {
        use Architecture::*;
        use Purpose::*;

        Self {
            models: vec![
                ModelDescriptor::new("flan-alpaca-xl-ct2-int8", Instruct, 3e9, EncoderDecoderTransformer, "cc-by-nc-4.0")
                    .with_datasets(&["c4", "flan", "alpaca"]),
                ModelDescriptor::new("flan-alpaca-gpt4-xl-ct2-int8", Instruct, 3e9, EncoderDecoderTransformer, "cc-by-nc-4.0")
                    .with_datasets(&["c4", "flan", "gpt4-alpaca"]),
                ModelDescriptor::new("flan-t5-xl-ct2-int8", Instruct, 3e9, EncoderDecoderTransformer, "apache-2.0")
                    .with_datasets(&["c4", "flan"]),
                ModelDescriptor::new("fastchat-t5-3b-v1.0-ct2-int8", Instruct, 3e9, EncoderDecoderTransformer, "apache-2.0")
                    .with_datasets(&["c4", "flan", "sharegpt"]),
                ModelDescriptor::new("LaMini-Flan-T5-783M-ct2-int8", Instruct, 783e6, EncoderDecoderTransformer, "cc-by-nc-4.0")
                    .with_datasets(&["c4", "flan", "lamini"]),
                ModelDescriptor::new("flan-t5-large-ct2-int8", Instruct, 783e6, EncoderDecoderTransformer, "apache-2.0")
                    .with_datasets(&["c4", "flan"]),
                ModelDescriptor::new("LaMini-Flan-T5-248M-ct2-int8", Instruct, 248e6, EncoderDecoderTransformer, "cc-by-nc-4.0")
                    .with_datasets(&["c4", "flan", "lamini"]),
                ModelDescriptor::new("flan-alpaca-base-ct2-int8", Instruct, 248e6, EncoderDecoderTransformer, "cc-by-nc-4.0")
                    .with_datasets(&["c4", "flan", "alpaca"]),
                ModelDescriptor::new("flan-t5-base-ct2-int8", Instruct, 248e6, EncoderDecoderTransformer, "apache-2.0")
                    .with_datasets(&["c4", "flan"]),
                ModelDescriptor::new("LaMini-Flan-T5-77M-ct2-int8", Instruct, 77e6, EncoderDecoderTransformer, "cc-by-nc-4.0")
                    .with_datasets(&["c4", "flan", "lamini"]),
                ModelDescriptor::new("flan-t5-small-ct2-int8", Instruct, 77e6, EncoderDecoderTransformer, "apache-2.0")
                    .with_datasets(&["c4", "flan"]),
                ModelDescriptor::new("LaMini-GPT-774M-ct2-int8", Instruct, 774e6, DecoderOnlyTransformer, "mit")
                    .with_datasets(&["webtext", "lamini"]),
                ModelDescriptor::new("LaMini-GPT-124M-ct2-int8", Instruct, 124e6, DecoderOnlyTransformer, "mit")
                    .with_datasets(&["webtext", "lamini"]),
                ModelDescriptor::new("all-MiniLM-L6-v2-ct2-int8", Embedding, 22e6, EncoderOnlyTransformer, "apache-2.0"),
            ],
        }
    }

    /// Build a catalog from descriptors, keeping their order
    pub fn from_descriptors(models: Vec<ModelDescriptor>) -> Result<Self> {
        if models.is_empty() {
            return Err(LmError::Catalog("catalog has no models".to_string()));
        }

        let mut seen = HashSet::new();
        for model in &models {
            if !seen.insert(model.name.as_str()) {
                return Err(LmError::Catalog(format!(
                    "duplicate model name: {}",
                    model.name
                )));
            }
            if !(model.params.is_finite() && model.params > 0.0) {
                return Err(LmError::Catalog(format!(
                    "invalid parameter count for {}: {}",
                    model.name, model.params
                )));
            }
        }

        Ok(Self { models })
    }

    /// Parse a catalog from TOML content
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content)?;
        Self::from_descriptors(file.models)
    }

    /// Load a catalog from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| LmError::Config(format!("Invalid catalog {}: {}", path.display(), e)))
    }

    /// Descriptors in priority order
    pub fn iter(&self) -> impl Iterator<Item = &ModelDescriptor> {
        self.models.iter()
    }

    pub fn models(&self) -> &[ModelDescriptor] {
        &self.models
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Find a descriptor by name
    pub fn find(&self, name: &str) -> Option<&ModelDescriptor> {
        self.models.iter().find(|m| m.name == name)
    }

    /// Descriptors for one purpose, in priority order
    pub fn by_purpose(&self, purpose: Purpose) -> Vec<&ModelDescriptor> {
        self.models.iter().filter(|m| m.purpose == purpose).collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
