//! Login and registration

use std::ops::RangeInclusive;

use tictac_player_ports::outbound::ApiError;
use tictac_protocol::{Credentials, ErrorBody, TokenResponse};

use super::Session;
use crate::application::{Api, ServiceError};

pub const USERNAME_LENGTH: RangeInclusive<usize> = 3..=32;
pub const PASSWORD_LENGTH: RangeInclusive<usize> = 6..=64;

/// Check credential lengths before anything goes over the wire.
pub fn validate_credentials(username: &str, password: &str) -> Result<(), ServiceError> {
    let username_len = username.chars().count();
    if !USERNAME_LENGTH.contains(&username_len) {
        return Err(ServiceError::InvalidInput(format!(
            "Username must be {} to {} characters",
            USERNAME_LENGTH.start(),
            USERNAME_LENGTH.end()
        )));
    }
    let password_len = password.chars().count();
    if !PASSWORD_LENGTH.contains(&password_len) {
        return Err(ServiceError::InvalidInput(format!(
            "Password must be {} to {} characters",
            PASSWORD_LENGTH.start(),
            PASSWORD_LENGTH.end()
        )));
    }
    Ok(())
}

#[derive(Clone)]
pub struct AuthService {
    api: Api,
}

impl AuthService {
    pub fn new(api: Api) -> Self {
        Self { api }
    }

    /// Exchange credentials for a session (form-encoded `/auth/login`).
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, ServiceError> {
        validate_credentials(username, password)?;

        let response: TokenResponse = self
            .api
            .post_form(
                "/auth/login",
                &[("username", username), ("password", password)],
            )
            .await
            .map_err(|e| {
                tracing::warn!(%username, error = %e, "Login failed");
                match e {
                    ApiError::HttpError { .. } => {
                        ServiceError::LoginFailed("Invalid credentials".to_string())
                    }
                    other => ServiceError::LoginFailed(other.to_string()),
                }
            })?;

        tracing::info!(%username, "Logged in");
        Ok(Session::new(response.access_token, username))
    }

    /// Create the account, then log straight in with the same credentials.
    pub async fn register(&self, username: &str, password: &str) -> Result<Session, ServiceError> {
        validate_credentials(username, password)?;

        let body = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.api
            .post_no_response("/auth/register", &body, None)
            .await
            .map_err(|e| {
                tracing::warn!(%username, error = %e, "Registration failed");
                ServiceError::RegistrationFailed(registration_detail(&e))
            })?;

        tracing::info!(%username, "Registered");
        self.login(username, password).await
    }
}

fn registration_detail(error: &ApiError) -> Option<String> {
    if let ApiError::RequestFailed(reason) = error {
        return Some(reason.clone());
    }
    error
        .body()
        .and_then(|body| serde_json::from_str::<ErrorBody>(body).ok())
        .and_then(|b| b.first_message().map(str::to_string))
}
