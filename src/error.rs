// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Error types for languagemodels
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

use crate::models::Purpose;

/// Main error type for model selection and caching
#[derive(Error, Debug)]
pub enum LmError {
    /// No catalog entry satisfies the purpose, budget and license filter
    #[error("No valid model found for {purpose} (budget {budget} GB, license filter {})", .license.as_deref().unwrap_or("none"))]
    NoModelFound {
        purpose: Purpose,
        budget: f64,
        license: Option<String>,
    },

    /// A budget string could not be parsed
    #[error("Invalid size format: {0:?}")]
    InvalidSizeFormat(String),

    /// A license filter pattern could not be compiled
    #[error("Invalid license pattern {pattern:?}: {message}")]
    InvalidLicensePattern { pattern: String, message: String },

    /// The model kind cannot release its weights
    #[error("Unload not supported for {0}")]
    UnloadUnsupported(String),

    /// The model kind cannot re-materialize its weights
    #[error("Load not supported for {0}")]
    LoadUnsupported(String),

    /// Artifact retrieval failed
    #[error("Failed to fetch {filename} for {model}: {message}")]
    Artifact {
        model: String,
        filename: String,
        message: String,
    },

    /// Tokenizer construction or use failed
    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    /// Inference runtime failed to construct or operate a model
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Catalog definition errors
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(String),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl LmError {
    /// Whether this error only signals a missing unload/load capability.
    ///
    /// These are the only failures the cache swallows.
    pub fn is_capability_error(&self) -> bool {
        matches!(
            self,
            LmError::UnloadUnsupported(_) | LmError::LoadUnsupported(_)
        )
    }
}

/// Result type alias for languagemodels operations
pub type Result<T> = std::result::Result<T, LmError>;

impl From<toml::de::Error> for LmError {
    fn from(err: toml::de::Error) -> Self {
        LmError::Toml(err.to_string())
    }
}
