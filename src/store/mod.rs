//! Application state and the store that drives it.
//!
//! [`AppState`] holds the data and its synchronous reducers. [`Store`] owns
//! an `AppState` together with a remote [`ArtSource`] and a
//! [`KeyValueStore`], and persists the state after every mutation.

mod boards;
mod interactions;
mod social;
mod state;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::api::{ApiClient, ArtSource, RegisterRequest};
use crate::config::ClientOptions;
use crate::error::Error;
use crate::mock::MockSource;
use crate::models::{ArtistProfile, CurationDraft, NewNotification, User, UserArtwork};
use crate::persistence::{KeyValueStore, PersistedState};

pub use state::{AppState, Tab, MAX_NOTIFICATIONS};
pub(crate) use state::new_id;

/// The app's single state container.
pub struct Store {
    state: AppState,
    source: Arc<dyn ArtSource>,
    storage: Arc<dyn KeyValueStore>,
    options: ClientOptions,
}

impl Store {
    pub fn new(
        source: Arc<dyn ArtSource>,
        storage: Arc<dyn KeyValueStore>,
        options: ClientOptions,
    ) -> Self {
        Self {
            state: AppState::with_notification_cap(options.notification_cap),
            source,
            storage,
            options,
        }
    }

    /// Store backed by the remote API
    pub fn with_api(options: ClientOptions, storage: Arc<dyn KeyValueStore>) -> Self {
        let client = ApiClient::new(options.clone());
        Self::new(Arc::new(client), storage, options)
    }

    /// Store backed by the bundled catalog
    pub fn offline(options: ClientOptions, storage: Arc<dyn KeyValueStore>) -> Self {
        Self::new(Arc::new(MockSource::bundled()), storage, options)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Apply a reducer, then persist.
    pub async fn update<R>(&mut self, f: impl FnOnce(&mut AppState) -> R) -> R {
        let result = f(&mut self.state);
        self.save_to_storage().await;
        result
    }

    pub async fn toggle_like(&mut self, artwork_id: &str) -> Option<bool> {
        self.update(|s| s.toggle_like(artwork_id)).await
    }

    pub async fn toggle_bookmark(&mut self, artwork_id: &str) -> bool {
        self.update(|s| s.toggle_bookmark(artwork_id)).await
    }

    pub async fn toggle_follow(&mut self, artist_id: &str) -> bool {
        self.update(|s| s.toggle_follow(artist_id)).await
    }

    pub async fn create_board(&mut self, name: &str) -> Option<String> {
        self.update(|s| s.create_board(name)).await
    }

    pub async fn delete_board(&mut self, board_id: &str) -> bool {
        self.update(|s| s.delete_board(board_id)).await
    }

    pub async fn add_artwork_to_board(&mut self, board_id: &str, artwork_id: &str) -> bool {
        self.update(|s| s.add_artwork_to_board(board_id, artwork_id))
            .await
    }

    pub async fn remove_artwork_from_board(&mut self, board_id: &str, artwork_id: &str) -> bool {
        self.update(|s| s.remove_artwork_from_board(board_id, artwork_id))
            .await
    }

    pub async fn add_comment(&mut self, artwork_id: &str, text: &str) -> Option<String> {
        self.update(|s| s.add_comment(artwork_id, text)).await
    }

    pub async fn toggle_comment_like(&mut self, artwork_id: &str, comment_id: &str) -> Option<bool> {
        self.update(|s| s.toggle_comment_like(artwork_id, comment_id))
            .await
    }

    pub async fn add_notification(&mut self, data: NewNotification) -> String {
        self.update(|s| s.add_notification(data)).await
    }

    pub async fn mark_notification_as_read(&mut self, notification_id: &str) -> bool {
        self.update(|s| s.mark_notification_as_read(notification_id))
            .await
    }

    pub async fn mark_all_notifications_as_read(&mut self) {
        self.update(AppState::mark_all_notifications_as_read).await
    }

    pub async fn clear_all_notifications(&mut self) {
        self.update(AppState::clear_all_notifications).await
    }

    pub async fn toggle_dark_mode(&mut self) {
        self.update(AppState::toggle_dark_mode).await
    }

    pub async fn set_current_user(&mut self, user: Option<User>) {
        self.source
            .set_token(user.as_ref().and_then(|u| u.token.clone()));
        self.update(|s| s.set_current_user(user)).await
    }

    pub async fn become_artist(&mut self, profile: ArtistProfile) -> bool {
        self.update(|s| s.become_artist(profile)).await
    }

    pub async fn add_user_artwork(&mut self, artwork: UserArtwork) -> bool {
        self.update(|s| s.add_user_artwork(artwork)).await
    }

    pub async fn create_curation(&mut self, draft: CurationDraft) -> Option<String> {
        self.update(|s| s.create_curation(draft)).await
    }

    pub async fn toggle_curation_like(&mut self, curation_id: &str) -> Option<bool> {
        self.update(|s| s.toggle_curation_like(curation_id))
            .await
    }

    /// Seed the state from the bundled catalog and persist it.
    pub async fn load_mock_data(&mut self) {
        self.update(AppState::load_mock_data).await
    }

    /// Sign in. On success the user and token become the session.
    pub async fn login(&mut self, email: &str, password: &str) -> bool {
        match self.source.login(email, password).await {
            Ok(response) => {
                self.start_session(response.into_session_user()).await;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, network = e.is_network(), "login failed");
                false
            }
        }
    }

    /// Create an account and sign in with it.
    pub async fn register(&mut self, request: &RegisterRequest) -> bool {
        match self.source.register(request).await {
            Ok(response) => {
                self.start_session(response.into_session_user()).await;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, network = e.is_network(), "registration failed");
                false
            }
        }
    }

    async fn start_session(&mut self, user: User) {
        tracing::info!(user_id = %user.id, "session started");
        self.source.set_token(user.token.clone());
        self.state.set_current_user(Some(user));
        self.save_to_storage().await;
    }

    /// End the session locally, whatever the server answers.
    pub async fn logout(&mut self) {
        if self.state.current_user.is_some() {
            if let Err(e) = self.source.logout().await {
                tracing::debug!(error = %e, "remote logout failed");
            }
        }
        self.source.set_token(None);
        self.state.clear_session();
        self.save_to_storage().await;
    }

    /// Fetch the first feed page, the artists and the curations in parallel.
    ///
    /// Each fetch is bounded by `load_timeout` on its own. A failing or timed
    /// out fetch leaves its list empty without touching the others.
    pub async fn load_initial_data(&mut self) {
        self.state.set_loading(true);

        let source = Arc::clone(&self.source);
        let page_size = self.options.page_size;
        let limit = self.options.load_timeout;

        let (artworks, artists, curations) = tokio::join!(
            bounded(limit, source.fetch_artworks(0, page_size)),
            bounded(limit, source.fetch_artists()),
            bounded(limit, source.fetch_curations()),
        );
        let artworks = or_empty(artworks, "artworks");
        let artists = or_empty(artists, "artists");
        let curations = or_empty(curations, "curations");

        tracing::info!(
            artworks = artworks.len(),
            artists = artists.len(),
            curations = curations.len(),
            "initial data loaded"
        );

        self.state.set_artworks(artworks);
        self.state.set_artists(artists);
        self.state.set_curations(curations);
        self.state.set_loading(false);
        self.save_to_storage().await;
    }

    /// Append the next feed page. Returns how many artworks arrived.
    pub async fn load_more_artworks(&mut self) -> usize {
        let offset = self.state.artworks.len();
        match self
            .source
            .fetch_artworks(offset, self.options.page_size)
            .await
        {
            Ok(page) => {
                let count = page.len();
                tracing::debug!(offset, count, "loaded more artworks");
                self.state.append_artworks(page);
                self.save_to_storage().await;
                count
            }
            Err(e) => {
                tracing::warn!(error = %e, offset, "failed to load more artworks");
                0
            }
        }
    }

    /// Persist the session slice. Failures are logged, never returned.
    pub async fn save_to_storage(&self) -> bool {
        let snapshot = PersistedState::capture(&self.state, &self.options);
        match snapshot
            .save(self.storage.as_ref(), &self.options.storage_key)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "failed to save state");
                false
            }
        }
    }

    /// Restore the session slice. Returns whether a snapshot was applied.
    ///
    /// A corrupt blob resets the persisted slice to its defaults. A storage
    /// backend that cannot be read leaves the in-memory state untouched.
    pub async fn load_from_storage(&mut self) -> bool {
        match PersistedState::load(self.storage.as_ref(), &self.options.storage_key).await {
            Ok(Some(snapshot)) => {
                snapshot.restore_into(&mut self.state);
                let token = self.state.current_user().and_then(|u| u.token.clone());
                self.source.set_token(token);
                tracing::debug!("restored persisted state");
                true
            }
            Ok(None) => false,
            Err(Error::Json(e)) => {
                tracing::warn!(error = %e, "discarding corrupt persisted state");
                PersistedState::default().restore_into(&mut self.state);
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "storage unavailable, keeping in-memory state");
                false
            }
        }
    }

    /// Restore persisted state, then load the remote data.
    pub async fn bootstrap(&mut self) {
        self.load_from_storage().await;
        self.load_initial_data().await;
    }
}

async fn bounded<T>(
    limit: Duration,
    fetch: impl Future<Output = Result<Vec<T>, Error>>,
) -> Result<Vec<T>, Error> {
    tokio::time::timeout(limit, fetch)
        .await
        .unwrap_or(Err(Error::Timeout(limit)))
}

fn or_empty<T>(result: Result<Vec<T>, Error>, what: &str) -> Vec<T> {
    result.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to fetch {}", what);
        Vec::new()
    })
}
