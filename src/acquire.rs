//! Fetching a source image over HTTP.

use reqwest::{Client, StatusCode, Url};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;

#[derive(Debug, thiserror::Error)]
pub enum AcquireError {
    #[error("invalid URL `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("could not connect to {0}")]
    Connect(String),
    #[error("request to {0} timed out")]
    Timeout(String),
    #[error("server returned {status} for {url}")]
    Status { url: String, status: StatusCode },
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("failed to save download to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct DownloadOptions {
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// `<name>.jpg`, unless the name already ends in a JPEG extension.
pub fn download_target(name: &str) -> PathBuf {
    let name = name.trim();
    let lower = name.to_ascii_lowercase();
    if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
        PathBuf::from(name)
    } else {
        PathBuf::from(format!("{name}.jpg"))
    }
}

/// Accept only absolute http(s) URLs with a host.
pub fn validate_url(url: &str) -> Result<Url, AcquireError> {
    let invalid = |reason: &str| AcquireError::InvalidUrl { url: url.to_string(), reason: reason.to_string() };
    let parsed = Url::parse(url.trim()).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid("only http and https are supported"));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(invalid("missing host"));
    }
    Ok(parsed)
}

/// Download `url` into `dest`, streaming the body to disk.
///
/// On any failure after the file was created the partial file is removed.
pub async fn download(url: &str, dest: &Path, options: &DownloadOptions) -> Result<PathBuf, AcquireError> {
    let url = validate_url(url)?;
    let client = Client::builder()
        .user_agent(&options.user_agent)
        .timeout(options.timeout)
        .build()
        .map_err(AcquireError::Request)?;

    log::debug!("GET {url}");
    let mut response = client.get(url.clone()).send().await.map_err(|e| classify(&url, e))?;
    let status = response.status();
    if !status.is_success() {
        return Err(AcquireError::Status { url: url.to_string(), status });
    }

    let io_err = |source| AcquireError::Io { path: dest.to_path_buf(), source };
    let mut file = tokio::fs::File::create(dest).await.map_err(io_err)?;
    let result = async {
        let mut total = 0u64;
        while let Some(chunk) = response.chunk().await.map_err(|e| classify(&url, e))? {
            file.write_all(&chunk).await.map_err(io_err)?;
            total += chunk.len() as u64;
        }
        file.flush().await.map_err(io_err)?;
        Ok::<_, AcquireError>(total)
    }
    .await;

    match result {
        Ok(total) => {
            log::info!("Downloaded {total} bytes to {}", dest.display());
            Ok(dest.to_path_buf())
        }
        Err(e) => {
            drop(file);
            if let Err(rm) = tokio::fs::remove_file(dest).await {
                log::debug!("could not remove partial download {}: {rm}", dest.display());
            }
            Err(e)
        }
    }
}

fn classify(url: &Url, err: reqwest::Error) -> AcquireError {
    if err.is_timeout() {
        AcquireError::Timeout(url.to_string())
    } else if err.is_connect() {
        AcquireError::Connect(url.to_string())
    } else {
        AcquireError::Request(err)
    }
}
