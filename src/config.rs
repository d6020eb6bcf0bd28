//! Configuration options for the NebulaArt client

use std::env;
use std::time::Duration;
use url::Url;

use crate::error::Error;

/// Base URL used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "https://nebulaart-api.onrender.com";

/// Storage key holding the persisted state blob
pub const DEFAULT_STORAGE_KEY: &str = "@nebula_art:app_state";

/// Configuration options for the NebulaArt client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The API base URL, without a trailing slash
    pub base_url: String,

    /// Timeout applied to every single HTTP request
    pub request_timeout: Option<Duration>,

    /// Upper bound for the whole parallel initial load
    pub load_timeout: Duration,

    /// Number of artworks requested per feed page
    pub page_size: usize,

    /// Maximum number of retained notifications
    pub notification_cap: usize,

    /// The key the persisted state is stored under
    pub storage_key: String,

    /// Whether comments are part of the persisted blob
    pub persist_comments: bool,

    /// Whether notifications are part of the persisted blob
    pub persist_notifications: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Some(Duration::from_secs(10)),
            load_timeout: Duration::from_secs(15),
            page_size: 20,
            notification_cap: 100,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            persist_comments: true,
            persist_notifications: true,
        }
    }
}

impl ClientOptions {
    /// Build options from `NEBULA_*` environment variables, falling back to defaults.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        let mut options = Self::default();

        if let Ok(url) = env::var("NEBULA_API_URL") {
            options = options.with_base_url(&url)?;
        }

        if let Ok(secs) = env::var("NEBULA_REQUEST_TIMEOUT_SECS") {
            let secs = secs.parse::<u64>().map_err(|e| {
                Error::config(format!("NEBULA_REQUEST_TIMEOUT_SECS is not a number: {}", e))
            })?;
            options.request_timeout = Some(Duration::from_secs(secs));
        }

        if let Ok(size) = env::var("NEBULA_PAGE_SIZE") {
            let size = size
                .parse::<usize>()
                .map_err(|e| Error::config(format!("NEBULA_PAGE_SIZE is not a number: {}", e)))?;
            options = options.with_page_size(size);
        }

        Ok(options)
    }

    /// Set the API base URL. The URL must parse; a trailing slash is dropped.
    pub fn with_base_url(mut self, value: &str) -> Result<Self, Error> {
        Url::parse(value)?;
        self.base_url = value.trim_end_matches('/').to_string();
        Ok(self)
    }

    /// Set the per-request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the bound for the initial load
    pub fn with_load_timeout(mut self, value: Duration) -> Self {
        self.load_timeout = value;
        self
    }

    /// Set the feed page size. Zero is bumped to one.
    pub fn with_page_size(mut self, value: usize) -> Self {
        self.page_size = value.max(1);
        self
    }

    /// Set the notification retention cap
    pub fn with_notification_cap(mut self, value: usize) -> Self {
        self.notification_cap = value;
        self
    }

    /// Set the storage key
    pub fn with_storage_key(mut self, value: &str) -> Self {
        self.storage_key = value.to_string();
        self
    }

    /// Set whether comments are persisted
    pub fn with_persist_comments(mut self, value: bool) -> Self {
        self.persist_comments = value;
        self
    }

    /// Set whether notifications are persisted
    pub fn with_persist_notifications(mut self, value: bool) -> Self {
        self.persist_notifications = value;
        self
    }
}
