//! Remote data source: the NebulaArt REST API

mod types;

use async_trait::async_trait;
use reqwest::Client;
use std::sync::{Arc, Mutex};

use crate::config::ClientOptions;
use crate::error::Error;
use crate::fetch::{Fetch, FetchBuilder};
use crate::models::{Artist, Artwork, Curation, User};

pub use types::*;

/// Everything the store needs from a backend.
///
/// The HTTP client implements it, and so does the bundled mock catalog.
#[async_trait]
pub trait ArtSource: Send + Sync {
    /// One page of the artwork feed
    async fn fetch_artworks(&self, offset: usize, limit: usize) -> Result<Vec<Artwork>, Error>;

    async fn fetch_artists(&self) -> Result<Vec<Artist>, Error>;

    async fn fetch_curations(&self) -> Result<Vec<Curation>, Error>;

    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, Error>;

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, Error>;

    /// Invalidate the session server-side. Best effort.
    async fn logout(&self) -> Result<(), Error>;

    /// Attach or drop the bearer token used for subsequent requests
    fn set_token(&self, token: Option<String>);
}

/// Client for the NebulaArt API
#[derive(Clone)]
pub struct ApiClient {
    /// The API base URL
    url: String,

    /// HTTP client used for requests
    client: Client,

    /// Bearer token of the signed-in user
    token: Arc<Mutex<Option<String>>>,

    /// Client options
    options: ClientOptions,
}

impl ApiClient {
    /// Create a new API client from options
    pub fn new(options: ClientOptions) -> Self {
        Self::with_client(Client::new(), options)
    }

    /// Create a new API client sharing an existing HTTP client
    pub fn with_client(client: Client, options: ClientOptions) -> Self {
        Self {
            url: options.base_url.clone(),
            client,
            token: Arc::new(Mutex::new(None)),
            options,
        }
    }

    /// The base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.url
    }

    /// The bearer token currently attached, if any
    pub fn token(&self) -> Option<String> {
        self.token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.url, path)
    }

    fn get(&self, path: &str) -> FetchBuilder<'_> {
        let token = self.token();
        Fetch::get(&self.client, &self.endpoint(path))
            .timeout(self.options.request_timeout)
            .maybe_bearer_auth(token.as_deref())
    }

    fn post(&self, path: &str) -> FetchBuilder<'_> {
        let token = self.token();
        Fetch::post(&self.client, &self.endpoint(path))
            .timeout(self.options.request_timeout)
            .maybe_bearer_auth(token.as_deref())
    }

    /// Ping the health endpoint
    pub async fn health_check(&self) -> Result<HealthStatus, Error> {
        self.get("/health").execute::<HealthStatus>().await
    }

    /// Fetch the signed-in user's profile
    pub async fn get_profile(&self) -> Result<User, Error> {
        if self.token().is_none() {
            return Err(Error::auth("Not logged in"));
        }
        self.get("/users/profile").execute::<User>().await
    }
}

#[async_trait]
impl ArtSource for ApiClient {
    async fn fetch_artworks(&self, offset: usize, limit: usize) -> Result<Vec<Artwork>, Error> {
        self.get("/api/artworks")
            .query("offset", offset)
            .query("limit", limit)
            .execute_list::<Artwork>()
            .await
    }

    async fn fetch_artists(&self) -> Result<Vec<Artist>, Error> {
        self.get("/api/artists").execute_list::<Artist>().await
    }

    async fn fetch_curations(&self) -> Result<Vec<Curation>, Error> {
        self.get("/api/curations").execute_list::<Curation>().await
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, Error> {
        let body = LoginRequest { email, password };

        let result = self
            .post("/auth/login")
            .json(&body)?
            .execute::<AuthResponse>()
            .await?;

        self.set_token(Some(result.token.clone()));
        tracing::debug!(user_id = %result.user.id, "signed in");
        Ok(result)
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, Error> {
        if !request.is_complete() {
            return Err(Error::auth("Name, email and password are required"));
        }

        let result = self
            .post("/auth/register")
            .json(request)?
            .execute::<AuthResponse>()
            .await?;

        self.set_token(Some(result.token.clone()));
        tracing::debug!(user_id = %result.user.id, "registered");
        Ok(result)
    }

    async fn logout(&self) -> Result<(), Error> {
        if self.token().is_none() {
            return Err(Error::auth("Not logged in"));
        }

        let result = self.post("/auth/logout").execute_raw().await;

        // The local session ends whatever the server says.
        self.set_token(None);
        result.map(|_| ())
    }

    fn set_token(&self, token: Option<String>) {
        let mut current = self
            .token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *current = token;
    }
}
