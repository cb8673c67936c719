//! REST client for the game backend
//!
//! Implements [`RawApiPort`] with `reqwest`. Paths are joined onto the
//! configured API base; bearer tokens are attached per call.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;

use tictac_player_ports::outbound::{ApiError, RawApiPort};
use tictac_player_ports::ClientConfig;

#[derive(Clone)]
pub struct ApiAdapter {
    client: Client,
    config: ClientConfig,
}

impl ApiAdapter {
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Falling back to default HTTP client: {}", e);
                Client::new()
            });

        Self {
            client,
            config: config.clone(),
        }
    }

    async fn execute(request: RequestBuilder, bearer: Option<&str>) -> Result<Value, ApiError> {
        let request = match bearer {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
        Self::read_json(response).await
    }

    async fn read_json(response: Response) -> Result<Value, ApiError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), %body, "Backend rejected request");
            return Err(ApiError::HttpError {
                status: status.as_u16(),
                body,
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| ApiError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl RawApiPort for ApiAdapter {
    async fn get_json(&self, path: &str, bearer: Option<&str>) -> Result<Value, ApiError> {
        Self::execute(self.client.get(self.config.api_url(path)), bearer).await
    }

    async fn post_json(
        &self,
        path: &str,
        body: &Value,
        bearer: Option<&str>,
    ) -> Result<Value, ApiError> {
        let request = self.client.post(self.config.api_url(path)).json(body);
        Self::execute(request, bearer).await
    }

    async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> Result<Value, ApiError> {
        let request = self.client.post(self.config.api_url(path)).form(fields);
        Self::execute(request, None).await
    }
}
