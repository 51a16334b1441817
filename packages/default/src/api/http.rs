use super::{ApiError, EnvironmentApi, is_addressable_id};
use crate::models::config::ApiConfig;
use crate::models::environments::EnvironmentRecord;
use reqwest::{Client, Response, Url};
use tracing::debug;

/// reqwest-backed client for the environments service.
///
/// No timeout, retry or auth header is applied to any request.
#[derive(Debug, Clone)]
pub struct HttpEnvironmentApi {
    client: Client,
    collection_url: Url,
}

impl HttpEnvironmentApi {
    pub fn new(cfg: &ApiConfig) -> Result<Self, ApiError> {
        Self::with_client(Client::new(), cfg)
    }

    pub fn with_client(client: Client, cfg: &ApiConfig) -> Result<Self, ApiError> {
        let raw = format!("{}/environments", cfg.endpoint());
        let collection_url = Url::parse(&raw).map_err(|e| ApiError::InvalidBaseUrl {
            url: cfg.base_url.clone(),
            reason: e.to_string(),
        })?;

        if collection_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl {
                url: cfg.base_url.clone(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        Ok(Self {
            client,
            collection_url,
        })
    }

    /// `{base}/environments`
    pub fn collection_url(&self) -> &Url {
        &self.collection_url
    }

    /// `{base}/environments/{id}` with `id` encoded as one path segment.
    ///
    /// Ids that would not survive as their own segment are rejected rather
    /// than sent to a different resource.
    pub fn item_url(&self, id: &str) -> Result<Url, ApiError> {
        if !is_addressable_id(id) {
            return Err(ApiError::InvalidId { id: id.to_string() });
        }

        let mut url = self.collection_url.clone();
        // checked in `with_client`
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(id);
        }
        Ok(url)
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        url: &Url,
    ) -> Result<Response, ApiError> {
        let res = request.send().await.map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                url: url.to_string(),
                status,
                body,
            });
        }

        Ok(res)
    }
}

impl EnvironmentApi for HttpEnvironmentApi {
    async fn list(&self) -> Result<Vec<EnvironmentRecord>, ApiError> {
        let url = &self.collection_url;
        debug!("GET {}", url);

        let res = self.send(self.client.get(url.clone()), url).await?;
        let body = res.bytes().await.map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;

        serde_json::from_slice(&body).map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }

    async fn create(&self) -> Result<(), ApiError> {
        let url = &self.collection_url;
        debug!("POST {}", url);

        self.send(self.client.post(url.clone()), url).await?;
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<(), ApiError> {
        let url = self.item_url(id)?;
        debug!("DELETE {}", url);

        self.send(self.client.delete(url.clone()), &url).await?;
        Ok(())
    }
}
