//! Typed API wrapper for application services.
//!
//! The composition root stores an object-safe `Arc<dyn RawApiPort>` so that
//! services never depend on adapter types. `Api` wraps it and does the
//! serde_json conversions on both sides.

use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

use tictac_player_ports::outbound::{ApiError, RawApiPort};

#[derive(Clone)]
pub struct Api {
    raw: Arc<dyn RawApiPort>,
}

impl Api {
    pub fn new(raw: Arc<dyn RawApiPort>) -> Self {
        Self { raw }
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        bearer: Option<&str>,
    ) -> Result<T, ApiError> {
        let value = self.raw.get_json(path, bearer).await?;
        serde_json::from_value(value).map_err(|e| ApiError::ParseError(e.to_string()))
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + Send + Sync>(
        &self,
        path: &str,
        body: &B,
        bearer: Option<&str>,
    ) -> Result<T, ApiError> {
        let body_value =
            serde_json::to_value(body).map_err(|e| ApiError::SerializeError(e.to_string()))?;
        let value = self.raw.post_json(path, &body_value, bearer).await?;
        serde_json::from_value(value).map_err(|e| ApiError::ParseError(e.to_string()))
    }

    /// POST where only success matters; the response body is ignored.
    pub async fn post_no_response<B: Serialize + Send + Sync>(
        &self,
        path: &str,
        body: &B,
        bearer: Option<&str>,
    ) -> Result<(), ApiError> {
        let body_value =
            serde_json::to_value(body).map_err(|e| ApiError::SerializeError(e.to_string()))?;
        self.raw.post_json(path, &body_value, bearer).await?;
        Ok(())
    }

    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        fields: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let value = self.raw.post_form(path, fields).await?;
        serde_json::from_value(value).map_err(|e| ApiError::ParseError(e.to_string()))
    }
}
