use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::ClientOptions;
use crate::error::Error;
use crate::models::{Board, Comment, Notification, User};
use crate::store::AppState;

use super::KeyValueStore;

/// The slice of [`AppState`] that survives a restart.
///
/// Every field is optional on the way in, so blobs written by older builds
/// still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersistedState {
    pub current_user: Option<User>,
    pub following_list: Vec<String>,
    pub saved_artworks: Vec<String>,
    pub boards: Vec<Board>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<HashMap<String, Vec<Comment>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications: Option<Vec<Notification>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_dark_mode: Option<bool>,
}

impl PersistedState {
    /// Take the persisted slice out of `state`
    pub fn capture(state: &AppState, options: &ClientOptions) -> Self {
        Self {
            current_user: state.current_user.clone(),
            following_list: state.following_list.clone(),
            saved_artworks: state.saved_artworks.clone(),
            boards: state.boards.clone(),
            comments: options.persist_comments.then(|| state.comments.clone()),
            notifications: options
                .persist_notifications
                .then(|| state.notifications.clone()),
            is_dark_mode: Some(state.is_dark_mode),
        }
    }

    /// Overwrite the persisted slice of `state`. Absent optional sections
    /// leave the current values alone. Loaded artworks and artists get their
    /// viewer flags from the restored sets.
    pub fn restore_into(self, state: &mut AppState) {
        state.current_user = self.current_user;
        state.following_list = self.following_list;
        state.saved_artworks = self.saved_artworks;
        state.boards = self.boards;

        if let Some(comments) = self.comments {
            state.comments = comments;
        }
        if let Some(notifications) = self.notifications {
            state.replace_notifications(notifications);
        }
        if let Some(dark) = self.is_dark_mode {
            state.is_dark_mode = dark;
        }

        if let Some(user) = state.current_user.clone() {
            state.set_current_user(Some(user));
        }
        state.reconcile_viewer_flags();
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the snapshot under `key`
    pub async fn save(&self, store: &dyn KeyValueStore, key: &str) -> Result<(), Error> {
        store.set(key, &self.to_json()?).await
    }

    /// Read the snapshot under `key`. `Ok(None)` when nothing was ever saved.
    pub async fn load(store: &dyn KeyValueStore, key: &str) -> Result<Option<Self>, Error> {
        match store.get(key).await? {
            Some(json) => Self::from_json(&json).map(Some),
            None => Ok(None),
        }
    }
}
