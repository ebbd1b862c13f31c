//! Firebase Cloud Storage over its REST API.
//!
//! Objects are addressed as `{host}/v0/b/{bucket}/o/{key}` with the key
//! percent-encoded as a single path segment (`videos/a.mp4` becomes
//! `videos%2Fa.mp4`). Public download URLs carry one of the object's
//! download tokens as a query parameter.

use crate::config::FirebaseConfig;
use crate::core::{ObjectStore, StoredObject};
use crate::utils::error::{Result, UploaderError};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use url::Url;

pub struct FirebaseStorage {
    client: Client,
    host: Url,
    bucket: String,
    app_id: Option<String>,
    auth_token: Option<String>,
}

impl FirebaseStorage {
    pub fn new(config: &FirebaseConfig) -> Result<Self> {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &FirebaseConfig) -> Result<Self> {
        let bucket = config.storage_bucket()?.to_string();
        let host = Url::parse(config.storage_host())?;
        if host.cannot_be_a_base() {
            return Err(UploaderError::InvalidConfigValueError {
                field: "firebase.storage_host".to_string(),
                value: config.storage_host().to_string(),
                reason: "Host must be an http(s) base URL".to_string(),
            });
        }

        Ok(Self {
            client,
            host,
            bucket,
            app_id: config.app_id.clone(),
            auth_token: config.auth_token.clone(),
        })
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// `{host}/v0/b/{bucket}/o`, optionally followed by the encoded object key.
    fn object_url(&self, key: Option<&str>) -> Url {
        let mut url = self.host.clone();
        url.set_query(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["v0", "b", self.bucket.as_str(), "o"]);
            if let Some(key) = key {
                segments.push(key);
            }
        }
        url
    }

    fn with_headers(&self, request: RequestBuilder) -> RequestBuilder {
        let mut request = request;
        if let Some(app_id) = &self.app_id {
            request = request.header("X-Firebase-GMPID", app_id);
        }
        if let Some(token) = &self.auth_token {
            request = request.header(reqwest::header::AUTHORIZATION, format!("Firebase {}", token));
        }
        request
    }

    async fn fetch_metadata(&self, key: &str) -> Result<StoredObject> {
        let url = self.object_url(Some(key));
        tracing::debug!("Fetching metadata: {}", url);

        let response = self.with_headers(self.client.get(url)).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UploaderError::UrlResolutionError {
                key: key.to_string(),
                message: format!("metadata request returned HTTP {}: {}", status.as_u16(), body),
            });
        }

        Ok(response.json::<StoredObject>().await?)
    }
}

#[async_trait]
impl ObjectStore for FirebaseStorage {
    async fn put_object(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredObject> {
        let mut url = self.object_url(None);
        url.query_pairs_mut()
            .append_pair("uploadType", "media")
            .append_pair("name", key);

        let size = data.len();
        tracing::debug!("POST {} ({} bytes, {})", url, size, content_type);

        let response = self
            .with_headers(self.client.post(url))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(data)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UploaderError::UploadRejected {
                key: key.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let object = response.json::<StoredObject>().await?;
        tracing::debug!(
            "Stored {} in bucket {} ({} bytes)",
            object.name,
            self.bucket,
            object.size.as_deref().unwrap_or("?")
        );
        Ok(object)
    }

    async fn download_url(&self, key: &str) -> Result<String> {
        let metadata = self.fetch_metadata(key).await?;
        let token = metadata
            .first_download_token()
            .ok_or_else(|| UploaderError::UrlResolutionError {
                key: key.to_string(),
                message: "object has no download token".to_string(),
            })?;

        let mut url = self.object_url(Some(key));
        url.query_pairs_mut()
            .append_pair("alt", "media")
            .append_pair("token", token);
        Ok(url.to_string())
    }
}
