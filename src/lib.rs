//! NebulaArt client core
//!
//! The state container of the NebulaArt art-sharing app: feed, artists,
//! curations, boards, comments, notifications and the signed-in user,
//! together with the remote API client, persistence and feed ranking.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use nebula_art::prelude::*;
//!
//! let mut store = Store::offline(ClientOptions::default(), Arc::new(MemoryStore::new()));
//!
//! tokio_test::block_on(async {
//!     store.load_mock_data().await;
//!     store.toggle_like("artwork1").await;
//! });
//!
//! assert!(store.state().artwork("artwork1").unwrap().is_liked);
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod fetch;
pub mod mock;
pub mod models;
pub mod persistence;
pub mod recommend;
pub mod store;

pub use api::{ApiClient, ArtSource};
pub use store::{AppState, Store};

/// A convenience module for common imports
pub mod prelude {
    pub use crate::api::{ApiClient, ArtSource, RegisterRequest};
    pub use crate::config::ClientOptions;
    pub use crate::error::Error;
    pub use crate::mock::{MockCatalog, MockSource};
    pub use crate::models::*;
    pub use crate::persistence::{FileStore, KeyValueStore, MemoryStore, PersistedState};
    pub use crate::recommend::{sort_by_recommendation, UserPreferences};
    pub use crate::store::{AppState, Store, Tab};
}
