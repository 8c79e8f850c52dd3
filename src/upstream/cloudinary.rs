//! Cloudinary Admin API implementation of `MediaSource`.
//!
//! Requests are authenticated with HTTP basic auth using the account's API
//! key and secret. Folder listings are followed across `next_cursor` pages so
//! a folder with many children is listed completely; resource listings are a
//! single request capped at `max_results`.

use std::fmt;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::{FolderEntry, MediaSource, ResourceEntry};
use crate::error::UpstreamError;

/// Default Admin API endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://api.cloudinary.com";

/// Page size requested for folder listings (upstream maximum).
const FOLDER_PAGE_SIZE: u32 = 500;

// =============================================================================
// Credentials
// =============================================================================

/// Account credentials for the Admin API.
#[derive(Clone)]
pub struct Credentials {
    /// Cloud (account) name, part of every endpoint path
    pub cloud_name: String,

    /// API key, sent as the basic auth user
    pub api_key: String,

    /// API secret, sent as the basic auth password
    pub api_secret: String,
}

impl Credentials {
    pub fn new(
        cloud_name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            cloud_name: cloud_name.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct FolderPage {
    #[serde(default)]
    folders: Vec<FolderEntry>,

    #[serde(default)]
    next_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResourcePage {
    #[serde(default)]
    resources: Vec<ResourceEntry>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

// =============================================================================
// Client
// =============================================================================

/// `MediaSource` backed by the Cloudinary Admin REST API.
#[derive(Clone)]
pub struct CloudinaryClient {
    http: Client,
    base_url: Url,
    credentials: Credentials,
}

impl CloudinaryClient {
    /// Create a client for the given API endpoint and account.
    pub fn new(base_url: Url, credentials: Credentials) -> Self {
        Self::with_http_client(Client::new(), base_url, credentials)
    }

    /// Create a client that reuses an existing `reqwest::Client`.
    pub fn with_http_client(http: Client, base_url: Url, credentials: Credentials) -> Self {
        Self {
            http,
            base_url,
            credentials,
        }
    }

    /// Get the cloud name this client talks to.
    pub fn cloud_name(&self) -> &str {
        &self.credentials.cloud_name
    }

    /// Build the full URL for an API path below `/v1_1/{cloud}/`.
    fn endpoint(&self, tail: &str) -> String {
        format!(
            "{}/v1_1/{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            urlencoding::encode(&self.credentials.cloud_name),
            tail
        )
    }

    fn get(&self, url: &str) -> RequestBuilder {
        self.http.get(url).basic_auth(
            &self.credentials.api_key,
            Some(&self.credentials.api_secret),
        )
    }

    /// Send a request and decode a successful JSON body.
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        target: &str,
    ) -> Result<T, UpstreamError> {
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(UpstreamError::NotFound(target.to_string()));
        }

        if !status.is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.error.message,
                Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
            };
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| UpstreamError::Decode(e.to_string()))
    }

    /// List every folder at `url`, following continuation cursors.
    async fn list_folders(
        &self,
        url: String,
        target: &str,
    ) -> Result<Vec<FolderEntry>, UpstreamError> {
        let mut folders = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut request = self
                .get(&url)
                .query(&[("max_results", FOLDER_PAGE_SIZE.to_string())]);

            if let Some(ref token) = cursor {
                request = request.query(&[("next_cursor", token)]);
            }

            let page: FolderPage = self.send(request, target).await?;
            folders.extend(page.folders);

            match page.next_cursor {
                Some(next) if !next.is_empty() => cursor = Some(next),
                _ => break,
            }
        }

        debug!(path = target, count = folders.len(), "Listed folders");
        Ok(folders)
    }
}

/// Percent-encode each segment of a folder path, keeping the slashes.
fn encode_folder_path(path: &str) -> String {
    path.split('/')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join("/")
}

#[async_trait]
impl MediaSource for CloudinaryClient {
    async fn root_folders(&self) -> Result<Vec<FolderEntry>, UpstreamError> {
        self.list_folders(self.endpoint("folders"), "<root>").await
    }

    async fn sub_folders(&self, path: &str) -> Result<Vec<FolderEntry>, UpstreamError> {
        let url = self.endpoint(&format!("folders/{}", encode_folder_path(path)));
        self.list_folders(url, path).await
    }

    async fn upload_resources(
        &self,
        prefix: &str,
        max_results: u32,
    ) -> Result<Vec<ResourceEntry>, UpstreamError> {
        let mut request = self
            .get(&self.endpoint("resources/image/upload"))
            .query(&[("max_results", max_results.to_string())]);

        if !prefix.is_empty() {
            request = request.query(&[("prefix", prefix)]);
        }

        let page: ResourcePage = self.send(request, prefix).await?;
        debug!(prefix = prefix, count = page.resources.len(), "Listed resources");
        Ok(page.resources)
    }
}

// =============================================================================
// Tests
// =============================================================================
