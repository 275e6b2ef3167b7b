use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, header};
use std::time::Duration;
use url::Url;

use crate::api::ComposeValidator;
use crate::errors::ClientError;
use crate::model::ValidationResponse;
use crate::request::ValidationRequest;

/// HTTP client for the compose validation endpoint
#[derive(Clone)]
pub struct ComposeClient {
    /// HTTP client for API requests
    client: Client,
    /// Bearer token for authentication
    api_key: String,
    /// API root, e.g. `https://dashboard.quantcdn.io/api/v3`
    base_url: Url,
}

impl ComposeClient {
    /// Create a new client for the given API root
    pub fn new(api_key: impl Into<String>, base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::InvalidEndpoint(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidEndpoint(base_url.to_string()));
        }

        Ok(Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            base_url,
        })
    }

    /// URL of the validate operation for an organization
    pub fn validate_url(&self, organization: &str) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidEndpoint(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["organizations", organization, "compose", "validate"]);
        Ok(url)
    }
}

// The API key stays out of debug output
impl std::fmt::Debug for ComposeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComposeClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ComposeValidator for ComposeClient {
    async fn validate_compose(
        &self,
        organization: &str,
        request: &ValidationRequest,
    ) -> Result<ValidationResponse, ClientError> {
        let url = self.validate_url(organization)?;
        debug!("POST {}", url);

        let response = self.client.post(url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(header::ACCEPT, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Validation API error ({})", status);
            return Err(ClientError::RemoteRejection {
                status_code: status.as_u16(),
                body,
            });
        }

        response.json::<ValidationResponse>().await
            .map_err(|e| ClientError::Transport(format!("Failed to parse validation response: {}", e)))
    }
}
