//! Raw API Port - Object-safe HTTP boundary
//!
//! A typed port would be generic over request/response types, which makes it
//! not object-safe. The composition root needs an abstraction that can be
//! stored behind `Arc<dyn ...>`.
//!
//! `RawApiPort` is the object-safe boundary implemented by adapters. The
//! application layer provides a typed wrapper on top (`Api`).

use serde_json::Value;

use super::ApiError;

/// JSON-in/JSON-out access to the backend.
///
/// `bearer` carries the session token for authenticated endpoints. A
/// success response with an empty body is returned as `Value::Null`.
#[async_trait::async_trait]
pub trait RawApiPort: Send + Sync {
    async fn get_json(&self, path: &str, bearer: Option<&str>) -> Result<Value, ApiError>;

    async fn post_json(
        &self,
        path: &str,
        body: &Value,
        bearer: Option<&str>,
    ) -> Result<Value, ApiError>;

    /// POST an `application/x-www-form-urlencoded` body.
    async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> Result<Value, ApiError>;
}
