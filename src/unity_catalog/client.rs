use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{error, info};

use super::types::{
    CreateMetastoreRequest, CreateMetastoreResponse, MetastoreList, MetastoreRecord,
    UpdateMetastoreRequest, UpdateMetastoreResponse,
};
use crate::config::ApiConfig;
use crate::util::errors::{Error, Result};

/// Metastore collection path, relative to a workspace URL.
const METASTORES_PATH: &str = "api/2.1/unity-catalog/metastores";

pub struct UnityCatalogClient {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl UnityCatalogClient {
    pub fn new(workspace_url: &str, config: &ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::HttpError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: format!("{}/{}", workspace_url.trim_end_matches('/'), METASTORES_PATH),
            token: config.token.clone(),
            client,
        })
    }

    /// Fetch a single metastore. A 404 means the id no longer resolves on
    /// this workspace, which callers treat as absent rather than a failure.
    pub async fn get_metastore(&self, metastore_id: &str) -> Result<Option<MetastoreRecord>> {
        let url = format!("{}/{}", self.base_url, metastore_id);
        let response = self.send(self.client.get(&url)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = Self::check_status(response).await?;
        Ok(Some(Self::decode(response).await?))
    }

    pub async fn list_metastores(&self) -> Result<Vec<MetastoreRecord>> {
        let response = self.send(self.client.get(&self.base_url)).await?;
        let response = Self::check_status(response).await?;
        let listing: MetastoreList = Self::decode(response).await?;
        Ok(listing.metastores)
    }

    pub async fn create_metastore(
        &self,
        request: &CreateMetastoreRequest,
    ) -> Result<CreateMetastoreResponse> {
        info!("Creating metastore {} at {}", request.name, self.base_url);
        let response = self.send(self.client.post(&self.base_url).json(request)).await?;
        let response = Self::check_status(response).await?;
        Self::decode(response).await
    }

    pub async fn update_metastore(
        &self,
        metastore_id: &str,
        request: &UpdateMetastoreRequest,
    ) -> Result<UpdateMetastoreResponse> {
        let url = format!("{}/{}", self.base_url, metastore_id);
        info!("Updating metastore {}", metastore_id);
        let response = self.send(self.client.patch(&url).json(request)).await?;
        let response = Self::check_status(response).await?;
        Self::decode(response).await
    }

    pub async fn delete_metastore(&self, metastore_id: &str) -> Result<()> {
        let url = format!("{}/{}", self.base_url, metastore_id);
        info!("Deleting metastore {}", metastore_id);
        let response = self.send(self.client.delete(&url)).await?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        request.send().await.map_err(|e| {
            error!("Failed to reach workspace API: {}", e);
            Error::HttpError(format!("Workspace API request failed: {e}"))
        })
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        error!("Workspace API returned error status: {}", status);
        let body = response.text().await.unwrap_or_default();
        Err(Error::HttpError(format!("Workspace API returned {status}: {body}")))
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        response.json().await.map_err(|e| {
            error!("Failed to parse JSON response: {}", e);
            Error::DecodingError(format!("Failed to parse workspace API response: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_workspace_relative() {
        let client =
            UnityCatalogClient::new("https://ws.cloud.example.com/", &ApiConfig::default()).unwrap();
        assert_eq!(
            client.base_url,
            "https://ws.cloud.example.com/api/2.1/unity-catalog/metastores"
        );
    }
}
