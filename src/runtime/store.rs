// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Artifact stores
//!
//! [`HubArtifactStore`] downloads files from a model hub and keeps them in a
//! local cache laid out as `<cache>/<namespace>/<model>/<filename>`.
//! [`DirectoryStore`] reads the same layout without touching the network.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::blocking::Client;
use sha2::{Digest, Sha256};

use crate::config::Settings;
use crate::error::{LmError, Result};

use super::ArtifactStore;

/// Hub response header carrying the SHA256 of large files
const LINKED_ETAG_HEADER: &str = "x-linked-etag";

fn artifact_path(root: &Path, namespace: &str, model: &str, filename: &str) -> PathBuf {
    root.join(namespace).join(model).join(filename)
}

fn artifact_error(model: &str, filename: &str, message: impl Into<String>) -> LmError {
    LmError::Artifact {
        model: model.to_string(),
        filename: filename.to_string(),
        message: message.into(),
    }
}

/// Downloading store backed by an on-disk cache
pub struct HubArtifactStore {
    client: Client,
    endpoint: String,
    cache_dir: PathBuf,
    progress: bool,
}

impl HubArtifactStore {
    /// Create a store for `endpoint` caching into `cache_dir`
    pub fn new(endpoint: impl Into<String>, cache_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&cache_dir).map_err(|e| {
            LmError::Config(format!(
                "Failed to create artifact directory {}: {}",
                cache_dir.display(),
                e
            ))
        })?;

        let client = Client::builder()
            .user_agent(concat!("languagemodels/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(30))
            .timeout(None)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            cache_dir,
            progress: false,
        })
    }

    /// Create a store from the endpoint and cache directory in settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(settings.endpoint.clone(), settings.artifact_dir())
    }

    /// Builder: show a progress bar while downloading
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Where a file is (or would be) cached
    pub fn local_path(&self, namespace: &str, model: &str, filename: &str) -> PathBuf {
        artifact_path(&self.cache_dir, namespace, model, filename)
    }

    /// Whether a file is already cached
    pub fn is_cached(&self, namespace: &str, model: &str, filename: &str) -> bool {
        self.local_path(namespace, model, filename).is_file()
    }

    fn url(&self, namespace: &str, model: &str, filename: &str) -> String {
        format!(
            "{}/{}/{}/resolve/main/{}",
            self.endpoint, namespace, model, filename
        )
    }

    fn download(&self, namespace: &str, model: &str, filename: &str, dest: &Path) -> Result<()> {
        let url = self.url(namespace, model, filename);
        tracing::info!("Downloading {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| artifact_error(model, filename, e.to_string()))?;

        if !response.status().is_success() {
            return Err(artifact_error(
                model,
                filename,
                format!("download failed with status: {}", response.status()),
            ));
        }

        let expected_sha256 = response
            .headers()
            .get(LINKED_ETAG_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim_matches('"').to_lowercase())
            .filter(|v| v.len() == 64 && v.chars().all(|c| c.is_ascii_hexdigit()));

        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let bar = match (self.progress, response.content_length()) {
            (true, Some(total)) => {
                let bar = ProgressBar::new(total);
                if let Ok(style) = ProgressStyle::with_template(
                    "{msg} [{bar:30}] {bytes}/{total_bytes} ({eta})",
                ) {
                    bar.set_style(style);
                }
                bar.set_message(format!("{}/{}", model, filename));
                Some(bar)
            }
            _ => None,
        };

        let mut reader: Box<dyn Read> = match &bar {
            Some(bar) => Box::new(bar.wrap_read(response)),
            None => Box::new(response),
        };

        let result = persist(
            reader.as_mut(),
            dest,
            expected_sha256.as_deref(),
            model,
            filename,
        );
        if let Some(bar) = bar {
            bar.finish_and_clear();
        }

        let downloaded = result?;
        tracing::info!("Download complete: {} ({} bytes)", dest.display(), downloaded);
        Ok(())
    }
}

/// Stream `reader` into `<dest>.part`, verify it and move it into place.
///
/// The partial file is removed on every failure.
fn persist(
    reader: &mut dyn Read,
    dest: &Path,
    expected_sha256: Option<&str>,
    model: &str,
    filename: &str,
) -> Result<u64> {
    let mut temp_name = dest.as_os_str().to_owned();
    temp_name.push(".part");
    let temp_path = PathBuf::from(temp_name);

    let result = write_verified(reader, &temp_path, expected_sha256, model, filename)
        .and_then(|downloaded| {
            std::fs::rename(&temp_path, dest)?;
            Ok(downloaded)
        });
    if result.is_err() && temp_path.exists() {
        if let Err(e) = std::fs::remove_file(&temp_path) {
            tracing::warn!("Failed to remove {}: {}", temp_path.display(), e);
        }
    }
    result
}

fn write_verified(
    reader: &mut dyn Read,
    temp_path: &Path,
    expected_sha256: Option<&str>,
    model: &str,
    filename: &str,
) -> Result<u64> {
    let mut file = File::create(temp_path)?;
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; 64 * 1024];
    let mut downloaded = 0u64;

    loop {
        let n = reader
            .read(&mut buf)
            .map_err(|e| artifact_error(model, filename, format!("read error: {}", e)))?;
        if n == 0 {
            break;
        }
        file.write_all(&buf[..n])?;
        hasher.update(&buf[..n]);
        downloaded += n as u64;
    }
    file.flush()?;

    if let Some(expected) = expected_sha256 {
        let hash = format!("{:x}", hasher.finalize());
        if hash != expected {
            return Err(artifact_error(
                model,
                filename,
                format!(
                    "SHA256 verification failed. Expected: {}, Got: {}",
                    expected, hash
                ),
            ));
        }
    }
    Ok(downloaded)
}

impl ArtifactStore for HubArtifactStore {
    fn fetch(&self, namespace: &str, model: &str, filename: &str) -> Result<PathBuf> {
        let path = self.local_path(namespace, model, filename);
        if path.is_file() {
            tracing::debug!("Artifact already cached: {}", path.display());
            return Ok(path);
        }

        self.download(namespace, model, filename, &path)?;
        Ok(path)
    }
}

/// Offline store reading a pre-populated directory
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ArtifactStore for DirectoryStore {
    fn fetch(&self, namespace: &str, model: &str, filename: &str) -> Result<PathBuf> {
        let path = artifact_path(&self.root, namespace, model, filename);
        if path.is_file() {
            Ok(path)
        } else {
            Err(artifact_error(
                model,
                filename,
                format!("not found at {}", path.display()),
            ))
        }
    }
}
