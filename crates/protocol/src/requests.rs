//! REST request bodies
//!
//! Bodies for the `/auth` and `/game` endpoints. Login is sent form-encoded,
//! every other body is JSON.

use serde::{Deserialize, Serialize};

/// Username/password pair for `/auth/register` (JSON) and `/auth/login`
/// (form-encoded).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Body for `POST /game/create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRoomRequest {
    pub nickname: String,
}

/// Body for `POST /game/join`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRoomRequest {
    pub room_id: String,
    pub nickname: String,
}
