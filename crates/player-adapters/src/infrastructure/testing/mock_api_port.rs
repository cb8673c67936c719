//! Scripted [`RawApiPort`] that records every call.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use tictac_player_ports::outbound::{ApiError, RawApiPort};

use super::lock;

/// One call as seen by the port.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
    pub form: Vec<(String, String)>,
    pub bearer: Option<String>,
}

#[derive(Default)]
struct State {
    responses: HashMap<(&'static str, String), Result<Value, ApiError>>,
    calls: Vec<RecordedCall>,
}

/// Responses are keyed by method and path; unscripted calls fail with
/// `ApiError::RequestFailed`. Clones share state.
#[derive(Clone, Default)]
pub struct MockApiPort {
    state: Arc<Mutex<State>>,
}

impl MockApiPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every `method path` call with `result`.
    pub fn respond(&self, method: &'static str, path: &str, result: Result<Value, ApiError>) {
        lock(&self.state)
            .responses
            .insert((method, path.to_string()), result);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.state).calls.clone()
    }

    fn record(&self, call: RecordedCall) -> Result<Value, ApiError> {
        let mut state = lock(&self.state);
        let key = (call.method, call.path.clone());
        let result = state.responses.get(&key).cloned().unwrap_or_else(|| {
            Err(ApiError::RequestFailed(format!(
                "no response scripted for {} {}",
                call.method, call.path
            )))
        });
        state.calls.push(call);
        result
    }
}

#[async_trait]
impl RawApiPort for MockApiPort {
    async fn get_json(&self, path: &str, bearer: Option<&str>) -> Result<Value, ApiError> {
        self.record(RecordedCall {
            method: "GET",
            path: path.to_string(),
            body: None,
            form: Vec::new(),
            bearer: bearer.map(str::to_string),
        })
    }

    async fn post_json(
        &self,
        path: &str,
        body: &Value,
        bearer: Option<&str>,
    ) -> Result<Value, ApiError> {
        self.record(RecordedCall {
            method: "POST",
            path: path.to_string(),
            body: Some(body.clone()),
            form: Vec::new(),
            bearer: bearer.map(str::to_string),
        })
    }

    async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> Result<Value, ApiError> {
        self.record(RecordedCall {
            method: "POST",
            path: path.to_string(),
            body: None,
            form: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            bearer: None,
        })
    }
}
