//! Request and response bodies of the NebulaArt API

use serde::{Deserialize, Serialize};

use crate::models::User;

/// Body returned by the login and register endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The authenticated user
    pub user: User,

    /// Bearer token for subsequent requests
    pub token: String,
}

impl AuthResponse {
    /// The user with the session token attached, ready to become `currentUser`.
    pub fn into_session_user(self) -> User {
        let mut user = self.user;
        user.token = Some(self.token);
        user
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Registration form data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub is_artist: bool,
}

impl RegisterRequest {
    /// Whether every required field carries a non-blank value
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.email.trim().is_empty()
            && !self.password.is_empty()
    }
}

/// Body of the health endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}
