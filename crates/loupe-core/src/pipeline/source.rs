//! Where attachment bytes come from.
//!
//! The pipeline itself never does I/O; it asks a source for bytes and takes
//! it from there. Sources exist for local files, URLs, and in-memory
//! buffers, and embedders can bring their own (a chat attachment, an object
//! store key) by implementing the trait.

use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ExtractError, ExtractResult};

/// A single attachment's byte provider.
#[async_trait]
pub trait AttachmentSource: Send + Sync {
    /// Identifier used in logs and error messages: a path, a URL, a label.
    fn name(&self) -> &str;

    /// Fetch the raw bytes.
    async fn fetch(&self) -> ExtractResult<Vec<u8>>;
}

/// Reads an attachment from the local filesystem.
pub struct FileSource {
    path: PathBuf,
    name: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }
}

#[async_trait]
impl AttachmentSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> ExtractResult<Vec<u8>> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|e| ExtractError::Fetch {
                input: self.name.clone(),
                message: format!("read failed: {e}"),
            })
    }
}

/// Downloads an attachment over HTTP(S).
///
/// Takes a shared client so a batch reuses one connection pool.
pub struct UrlSource {
    url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl UrlSource {
    pub fn new(url: impl Into<String>, client: reqwest::Client, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            client,
            timeout,
        }
    }
}

#[async_trait]
impl AttachmentSource for UrlSource {
    fn name(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> ExtractResult<Vec<u8>> {
        let resp = self
            .client
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ExtractError::Fetch {
                input: self.url.clone(),
                message: format!("request failed: {e}"),
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ExtractError::Fetch {
                input: self.url.clone(),
                message: format!("HTTP {status}"),
            });
        }

        let bytes = resp.bytes().await.map_err(|e| ExtractError::Fetch {
            input: self.url.clone(),
            message: format!("body read failed: {e}"),
        })?;
        Ok(bytes.to_vec())
    }
}

/// Hands out bytes already in memory. Useful for embedders that fetched
/// upstream, and for tests.
pub struct BytesSource {
    name: String,
    bytes: Vec<u8>,
}

impl BytesSource {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

#[async_trait]
impl AttachmentSource for BytesSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> ExtractResult<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}
