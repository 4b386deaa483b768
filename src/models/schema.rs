// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Model catalog schema
//!
//! Defines the structure for model descriptors: purpose, architecture,
//! quantization, parameter count and license.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Weights file every runtime model directory contains
pub const MODEL_WEIGHTS: &str = "model.bin";

/// Runtime configuration file stored next to the weights
pub const MODEL_CONFIG: &str = "config.json";

/// Full tokenizer definition, fetched for every architecture
pub const TOKENIZER_DEFINITION: &str = "tokenizer.json";

/// Functional role a caller asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Purpose {
    /// Instruction-following text generation
    Instruct,
    /// Vector representations of text
    Embedding,
}

impl Purpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            Purpose::Instruct => "instruct",
            Purpose::Embedding => "embedding",
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Purpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "instruct" => Ok(Purpose::Instruct),
            "embedding" => Ok(Purpose::Embedding),
            _ => Err(format!("Unknown purpose: {}", s)),
        }
    }
}

/// Weight quantization of a catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quantization {
    /// 8-bit integer weights
    Int8,
}

impl Quantization {
    /// Compute precision the runtime should use for these weights
    pub fn compute_type(&self) -> ComputeType {
        match self {
            Quantization::Int8 => ComputeType::Int8,
        }
    }
}

/// Compute precision flag handed to the inference runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComputeType {
    Int8,
}

impl ComputeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComputeType::Int8 => "int8",
        }
    }
}

/// Kind of runtime object constructed for a model directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeKind {
    /// Encoder-only models (embeddings)
    Encoder,
    /// Decoder-only models (causal generation)
    Generator,
    /// Encoder-decoder models (sequence to sequence)
    Translator,
}

impl fmt::Display for RuntimeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeKind::Encoder => write!(f, "Encoder"),
            RuntimeKind::Generator => write!(f, "Generator"),
            RuntimeKind::Translator => write!(f, "Translator"),
        }
    }
}

/// How a tokenizer is constructed once its artifacts are present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizerRecipe {
    /// Hub-hosted definition, padding and truncation disabled
    PretrainedUnpadded,
    /// Hub-hosted definition as published
    Pretrained,
    /// Definition read from the fetched `tokenizer.json`
    ConfigFile,
}

/// Network architecture of a catalog entry
///
/// Determines the artifacts to fetch, the tokenizer recipe and the runtime kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Architecture {
    EncoderDecoderTransformer,
    DecoderOnlyTransformer,
    EncoderOnlyTransformer,
}

impl Architecture {
    /// Runtime object kind for this architecture
    pub fn runtime_kind(&self) -> RuntimeKind {
        match self {
            Architecture::EncoderOnlyTransformer => RuntimeKind::Encoder,
            Architecture::DecoderOnlyTransformer => RuntimeKind::Generator,
            Architecture::EncoderDecoderTransformer => RuntimeKind::Translator,
        }
    }

    /// Files fetched before the tokenizer is built.
    ///
    /// For [`TokenizerRecipe::ConfigFile`] the last entry is the config file.
    pub fn tokenizer_artifacts(&self) -> &'static [&'static str] {
        match self {
            Architecture::EncoderOnlyTransformer => &["vocabulary.txt"],
            Architecture::DecoderOnlyTransformer => &["vocabulary.json"],
            Architecture::EncoderDecoderTransformer => &["shared_vocabulary.txt", TOKENIZER_DEFINITION],
        }
    }

    pub fn tokenizer_recipe(&self) -> TokenizerRecipe {
        match self {
            Architecture::EncoderOnlyTransformer => TokenizerRecipe::PretrainedUnpadded,
            Architecture::DecoderOnlyTransformer => TokenizerRecipe::Pretrained,
            Architecture::EncoderDecoderTransformer => TokenizerRecipe::ConfigFile,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Architecture::EncoderDecoderTransformer => "encoder-decoder-transformer",
            Architecture::DecoderOnlyTransformer => "decoder-only-transformer",
            Architecture::EncoderOnlyTransformer => "encoder-only-transformer",
        }
    }
}

/// Catalog entry with metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Unique model identifier (e.g., "flan-t5-base-ct2-int8")
    pub name: String,

    /// Functional role
    pub purpose: Purpose,

    /// Training datasets (informational only)
    #[serde(default)]
    pub datasets: Vec<String>,

    /// Number of learnable parameters
    pub params: f64,

    #[serde(default = "default_quantization")]
    pub quantization: Quantization,

    pub architecture: Architecture,

    /// License identifier (e.g., "apache-2.0")
    pub license: String,
}

fn default_quantization() -> Quantization {
    Quantization::Int8
}

impl ModelDescriptor {
    /// Create a new int8 descriptor with no datasets
    pub fn new(
        name: impl Into<String>,
        purpose: Purpose,
        params: f64,
        architecture: Architecture,
        license: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            purpose,
            datasets: Vec::new(),
            params,
            quantization: Quantization::Int8,
            architecture,
            license: license.into(),
        }
    }

    /// Builder: set training datasets
    pub fn with_datasets(mut self, datasets: &[&str]) -> Self {
        self.datasets = datasets.iter().map(|d| d.to_string()).collect();
        self
    }

    /// Approximate memory footprint in GB (one byte per int8 parameter)
    pub fn size_gb(&self) -> f64 {
        self.params / 1e9
    }

    /// Whether this entry fits strictly below a budget in GB
    pub fn fits(&self, budget_gb: f64) -> bool {
        self.size_gb() < budget_gb
    }
}
