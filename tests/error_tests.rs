// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::io;

use languagemodels::error::LmError;
use languagemodels::models::{Catalog, Purpose};

#[test]
fn test_io_error_conversion() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
    let err: LmError = io_error.into();

    match err {
        LmError::Io(_) => {} // Expected
        _ => panic!("Expected Io error, got different error type"),
    }
}

#[test]
fn test_json_error_conversion() {
    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: LmError = json_error.into();
    assert!(matches!(err, LmError::Json(_)));
    assert!(err.to_string().starts_with("JSON error:"));
}

#[test]
fn test_toml_error_conversion() {
    let err = Catalog::from_toml_str("models = [").unwrap_err();
    assert!(matches!(err, LmError::Toml(_)));
}

#[test]
fn test_config_error_display() {
    let error = LmError::Config("missing runtime".to_string());
    assert_eq!(error.to_string(), "Configuration error: missing runtime");
}

#[test]
fn test_no_model_found_display() {
    let error = LmError::NoModelFound {
        purpose: Purpose::Embedding,
        budget: 0.0,
        license: Some("gpl".to_string()),
    };
    assert_eq!(
        error.to_string(),
        "No valid model found for embedding (budget 0 GB, license filter gpl)"
    );
}

#[test]
fn test_artifact_error_display() {
    let error = LmError::Artifact {
        model: "flan-t5-small-ct2-int8".to_string(),
        filename: "model.bin".to_string(),
        message: "download failed with status: 404 Not Found".to_string(),
    };
    let msg = error.to_string();
    assert!(msg.contains("model.bin"));
    assert!(msg.contains("flan-t5-small-ct2-int8"));
    assert!(msg.contains("404"));
}

#[test]
fn test_invalid_license_pattern_display() {
    let error = LmError::InvalidLicensePattern {
        pattern: "(".to_string(),
        message: "unclosed group".to_string(),
    };
    assert!(error.to_string().contains("\"(\""));
}

#[test]
fn test_only_capability_errors_are_swallowable() {
    let swallowable = [
        LmError::UnloadUnsupported("Encoder".to_string()),
        LmError::LoadUnsupported("Encoder".to_string()),
    ];
    assert!(swallowable.iter().all(LmError::is_capability_error));

    let fatal = [
        LmError::Runtime("out of memory".to_string()),
        LmError::Tokenizer("bad vocab".to_string()),
        LmError::Catalog("unknown".to_string()),
        LmError::Io(io::Error::new(io::ErrorKind::Other, "disk")),
    ];
    assert!(!fatal.iter().any(LmError::is_capability_error));
}

#[test]
fn test_error_is_std_error() {
    fn assert_error<E: std::error::Error + Send + Sync + 'static>(_: &E) {}
    assert_error(&LmError::Config("x".to_string()));
}
