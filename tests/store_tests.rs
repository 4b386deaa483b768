// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::path::PathBuf;

use sha2::{Digest, Sha256};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use languagemodels::error::{LmError, Result};
use languagemodels::runtime::{ArtifactStore, HubArtifactStore};

const MODEL: &str = "flan-t5-small-ct2-int8";

fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Run a fetch against `endpoint` on a blocking thread
async fn fetch(endpoint: String, cache: PathBuf, filename: &'static str) -> Result<PathBuf> {
    tokio::task::spawn_blocking(move || {
        let store = HubArtifactStore::new(endpoint, cache)?;
        store.fetch("jncraton", MODEL, filename)
    })
    .await
    .unwrap()
}

#[tokio::test]
async fn test_download_into_cache_layout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/jncraton/{}/resolve/main/config.json", MODEL)))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"layers\": 6}"))
        .expect(1)
        .mount(&server)
        .await;

    let cache = TempDir::new().unwrap();
    let path = fetch(server.uri(), cache.path().to_path_buf(), "config.json")
        .await
        .unwrap();

    assert_eq!(
        path,
        cache.path().join("jncraton").join(MODEL).join("config.json")
    );
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{\"layers\": 6}");
    assert!(!path.with_file_name("config.json.part").exists());
}

#[tokio::test]
async fn test_cached_file_is_not_downloaded_again() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"weights".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let cache = TempDir::new().unwrap();
    let first = fetch(server.uri(), cache.path().to_path_buf(), "model.bin")
        .await
        .unwrap();
    let second = fetch(server.uri(), cache.path().to_path_buf(), "model.bin")
        .await
        .unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_verified_download_with_linked_etag() {
    let body = b"int8 weights".to_vec();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-linked-etag", format!("\"{}\"", sha256_hex(&body)).as_str())
                .set_body_bytes(body.clone()),
        )
        .mount(&server)
        .await;

    let cache = TempDir::new().unwrap();
    let path = fetch(server.uri(), cache.path().to_path_buf(), "model.bin")
        .await
        .unwrap();
    assert_eq!(std::fs::read(path).unwrap(), body);
}

#[tokio::test]
async fn test_checksum_mismatch_leaves_no_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-linked-etag", sha256_hex(b"something else").as_str())
                .set_body_bytes(b"tampered".to_vec()),
        )
        .mount(&server)
        .await;

    let cache = TempDir::new().unwrap();
    let err = fetch(server.uri(), cache.path().to_path_buf(), "model.bin")
        .await
        .unwrap_err();

    match err {
        LmError::Artifact { message, .. } => assert!(message.contains("SHA256")),
        other => panic!("expected artifact error, got {:?}", other),
    }
    let dir = cache.path().join("jncraton").join(MODEL);
    assert!(!dir.join("model.bin").exists());
    assert!(!dir.join("model.bin.part").exists());
}

#[tokio::test]
async fn test_missing_artifact_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let cache = TempDir::new().unwrap();
    let err = fetch(server.uri(), cache.path().to_path_buf(), "vocabulary.json")
        .await
        .unwrap_err();

    match err {
        LmError::Artifact {
            model,
            filename,
            message,
        } => {
            assert_eq!(model, MODEL);
            assert_eq!(filename, "vocabulary.json");
            assert!(message.contains("404"));
        }
        other => panic!("expected artifact error, got {:?}", other),
    }
}
