use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::mock::MockCatalog;
use crate::models::{
    Artist, ArtistProfile, Artwork, Board, Comment, Curation, Notification, Story, User,
    UserArtwork,
};

/// Retention cap for the notification list
pub const MAX_NOTIFICATIONS: usize = 100;

const STORY_GRADIENTS: [[&str; 2]; 3] = [
    ["#667eea", "#764ba2"],
    ["#f093fb", "#f5576c"],
    ["#4facfe", "#00f2fe"],
];

/// Bottom navigation tabs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Home,
    Curation,
    Artist,
    Profile,
}

/// All session data of the app.
///
/// Every mutator is a synchronous reducer over the current state. None of
/// them fail: unknown ids, blank input or a missing signed-in user turn the
/// call into a no-op, reported through the return value where useful.
#[derive(Debug, Clone)]
pub struct AppState {
    pub(crate) current_user: Option<User>,
    pub(crate) current_tab: Tab,
    pub(crate) stories: Vec<Story>,
    pub(crate) artworks: Vec<Artwork>,
    pub(crate) artists: Vec<Artist>,
    pub(crate) curations: Vec<Curation>,
    pub(crate) boards: Vec<Board>,
    /// Comments keyed by artwork id
    pub(crate) comments: HashMap<String, Vec<Comment>>,
    /// Newest first
    pub(crate) notifications: Vec<Notification>,
    /// Follow set: ids of artists the viewer follows
    pub(crate) following_list: Vec<String>,
    /// Ids of bookmarked artworks
    pub(crate) saved_artworks: Vec<String>,
    /// User directory backing the two-sided follow relationship
    pub(crate) all_users: Vec<User>,
    pub(crate) is_create_menu_open: bool,
    pub(crate) selected_filter: String,
    pub(crate) is_dark_mode: bool,
    pub(crate) is_loading: bool,
    pub(crate) notification_cap: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            current_user: None,
            current_tab: Tab::Home,
            stories: Vec::new(),
            artworks: Vec::new(),
            artists: Vec::new(),
            curations: Vec::new(),
            boards: Vec::new(),
            comments: HashMap::new(),
            notifications: Vec::new(),
            following_list: Vec::new(),
            saved_artworks: Vec::new(),
            all_users: Vec::new(),
            is_create_menu_open: false,
            selected_filter: "For you".to_string(),
            is_dark_mode: false,
            is_loading: false,
            notification_cap: MAX_NOTIFICATIONS,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty state retaining at most `cap` notifications
    pub fn with_notification_cap(cap: usize) -> Self {
        Self {
            notification_cap: cap,
            ..Self::default()
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn current_tab(&self) -> Tab {
        self.current_tab
    }

    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    pub fn artworks(&self) -> &[Artwork] {
        &self.artworks
    }

    pub fn artwork(&self, artwork_id: &str) -> Option<&Artwork> {
        self.artworks.iter().find(|a| a.id == artwork_id)
    }

    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    pub fn artist(&self, artist_id: &str) -> Option<&Artist> {
        self.artists.iter().find(|a| a.id == artist_id)
    }

    pub fn curations(&self) -> &[Curation] {
        &self.curations
    }

    pub fn all_users(&self) -> &[User] {
        &self.all_users
    }

    pub fn following_list(&self) -> &[String] {
        &self.following_list
    }

    pub fn saved_artwork_ids(&self) -> &[String] {
        &self.saved_artworks
    }

    /// Loaded artworks the viewer bookmarked, in feed order
    pub fn saved_artworks(&self) -> Vec<&Artwork> {
        self.artworks
            .iter()
            .filter(|a| self.saved_artworks.contains(&a.id))
            .collect()
    }

    pub fn selected_filter(&self) -> &str {
        &self.selected_filter
    }

    pub fn is_create_menu_open(&self) -> bool {
        self.is_create_menu_open
    }

    pub fn is_dark_mode(&self) -> bool {
        self.is_dark_mode
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn notification_cap(&self) -> usize {
        self.notification_cap
    }

    pub fn set_current_tab(&mut self, tab: Tab) {
        self.current_tab = tab;
    }

    pub fn toggle_create_menu(&mut self) {
        self.is_create_menu_open = !self.is_create_menu_open;
    }

    pub fn set_selected_filter(&mut self, filter: impl Into<String>) {
        self.selected_filter = filter.into();
    }

    pub fn toggle_dark_mode(&mut self) {
        self.is_dark_mode = !self.is_dark_mode;
    }

    pub(crate) fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    /// Replace the session user. `None` signs out.
    pub fn set_current_user(&mut self, user: Option<User>) {
        if let Some(user) = &user {
            self.upsert_directory_user(user);
        }
        self.current_user = user;
    }

    /// Forget the session user. Boards, lists and flags stay.
    pub fn clear_session(&mut self) {
        self.current_user = None;
    }

    /// Turn the signed-in user into an artist with the given public profile.
    pub fn become_artist(&mut self, profile: ArtistProfile) -> bool {
        let Some(user) = self.current_user.as_mut() else {
            return false;
        };

        user.name = profile.name;
        user.bio = Some(profile.bio);
        user.tags = profile.tags;
        user.is_artist = true;
        user.avatar
            .get_or_insert_with(|| "https://via.placeholder.com/120".to_string());
        user.cover.get_or_insert_with(|| {
            "https://via.placeholder.com/400x200/8b5cf6/ffffff?text=Art+Cover".to_string()
        });

        let snapshot = user.clone();
        self.upsert_directory_user(&snapshot);
        true
    }

    /// Record a creation uploaded by the signed-in user.
    pub fn add_user_artwork(&mut self, artwork: UserArtwork) -> bool {
        let Some(user) = self.current_user.as_mut() else {
            return false;
        };
        user.user_artworks.push(artwork);
        user.artworks += 1;
        true
    }

    /// Replace the feed, reconciling viewer flags with the saved set.
    pub fn set_artworks(&mut self, artworks: Vec<Artwork>) {
        self.artworks = artworks;
        self.reconcile_bookmarks();
    }

    /// Append a page to the feed.
    pub fn append_artworks(&mut self, artworks: Vec<Artwork>) {
        self.artworks.extend(artworks);
        self.reconcile_bookmarks();
    }

    /// Replace the artist list and re-derive the story row from it.
    pub fn set_artists(&mut self, artists: Vec<Artist>) {
        self.artists = artists;
        self.reconcile_follows();
        self.stories = derive_stories(&self.artists);
    }

    pub fn set_curations(&mut self, curations: Vec<Curation>) {
        self.curations = curations;
    }

    /// Replace the user directory used for two-sided follows.
    pub fn set_directory(&mut self, users: Vec<User>) {
        self.all_users = users;
        if let Some(user) = self.current_user.clone() {
            self.upsert_directory_user(&user);
        }
    }

    /// Seed everything from the bundled catalog.
    ///
    /// The catalog's demo user only takes over when nobody is signed in. A
    /// signed-in user keeps their session, follow set and saved set, and the
    /// catalog's viewer flags are ignored in favour of those sets.
    pub fn load_mock_data(&mut self) {
        let catalog = MockCatalog::bundled();
        let mut artworks = catalog.artworks;
        let mut artists = catalog.artists;

        if self.current_user.is_none() {
            self.following_list = catalog.user.following_list.clone();
            self.current_user = Some(catalog.user);
        } else {
            for artwork in &mut artworks {
                artwork.is_bookmarked = false;
            }
            for artist in &mut artists {
                artist.is_following = false;
            }
        }

        self.set_directory(catalog.users);
        self.sync_directory_followers();
        self.set_artworks(artworks);
        self.set_artists(artists);
        self.set_curations(catalog.curations);
    }

    /// Make every viewer flag mirror the saved set and the follow set.
    pub(crate) fn reconcile_viewer_flags(&mut self) {
        for artwork in &mut self.artworks {
            artwork.is_bookmarked = self.saved_artworks.contains(&artwork.id);
        }
        for artist in &mut self.artists {
            artist.is_following = self.following_list.contains(&artist.id);
        }
    }

    /// Align the viewer's presence in each directory follower list with the
    /// follow set.
    fn sync_directory_followers(&mut self) {
        let Some(viewer_id) = self.current_user.as_ref().map(|u| u.id.clone()) else {
            return;
        };
        for entry in &mut self.all_users {
            if entry.id != viewer_id {
                let followed = self.following_list.contains(&entry.id);
                set_membership(&mut entry.followers_list, &viewer_id, followed);
            }
        }
    }

    fn upsert_directory_user(&mut self, user: &User) {
        match self.all_users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => *existing = user.clone(),
            None => self.all_users.push(user.clone()),
        }
    }

    /// Artworks flagged by the server join the saved set, saved ids flag
    /// their artworks.
    fn reconcile_bookmarks(&mut self) {
        for artwork in &mut self.artworks {
            if self.saved_artworks.contains(&artwork.id) {
                artwork.is_bookmarked = true;
            } else if artwork.is_bookmarked {
                self.saved_artworks.push(artwork.id.clone());
            }
        }
    }

    fn reconcile_follows(&mut self) {
        for artist in &mut self.artists {
            if self.following_list.contains(&artist.id) {
                artist.is_following = true;
            } else if artist.is_following {
                self.following_list.push(artist.id.clone());
            }
        }
    }
}

/// The story row shows the first three artists.
fn derive_stories(artists: &[Artist]) -> Vec<Story> {
    artists
        .iter()
        .take(3)
        .enumerate()
        .map(|(i, artist)| Story {
            id: format!("story-{}", artist.id),
            user: artist.summary(),
            has_update: artist.has_story_update.unwrap_or(false),
            gradient: STORY_GRADIENTS[i % STORY_GRADIENTS.len()]
                .iter()
                .map(|c| c.to_string())
                .collect(),
        })
        .collect()
}

/// Make `id`'s membership in `list` equal to `present`. Returns whether the
/// list changed.
pub(crate) fn set_membership(list: &mut Vec<String>, id: &str, present: bool) -> bool {
    let position = list.iter().position(|x| x == id);
    match (position, present) {
        (None, true) => {
            list.push(id.to_string());
            true
        }
        (Some(index), false) => {
            list.remove(index);
            true
        }
        _ => false,
    }
}

/// Fresh identifier with a readable prefix
pub(crate) fn new_id(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4())
}

pub(crate) fn now() -> chrono::DateTime<Utc> {
    Utc::now()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRef;

    fn artist(id: &str, followers: u32, following: bool) -> Artist {
        Artist {
            id: id.to_string(),
            name: format!("Artist {}", id),
            stats: crate::models::ArtistStats {
                followers,
                ..Default::default()
            },
            is_following: following,
            ..Default::default()
        }
    }

    #[test]
    fn stories_come_from_the_first_three_artists() {
        let mut state = AppState::new();
        state.set_artists(vec![
            artist("a1", 1, false),
            artist("a2", 1, false),
            artist("a3", 1, false),
            artist("a4", 1, false),
        ]);

        let ids: Vec<_> = state.stories().iter().map(|s| s.user.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "a2", "a3"]);
    }

    #[test]
    fn restored_follow_set_flags_fetched_artists() {
        let mut state = AppState::new();
        state.following_list = vec!["a2".to_string()];
        state.set_artists(vec![artist("a1", 5, true), artist("a2", 5, false)]);

        assert!(state.artist("a2").unwrap().is_following);
        assert!(state.following_list().contains(&"a1".to_string()));
    }

    #[test]
    fn saved_set_flags_fetched_artworks() {
        let mut state = AppState::new();
        state.saved_artworks = vec!["w2".to_string()];
        state.set_artworks(vec![
            Artwork {
                id: "w1".to_string(),
                ..Default::default()
            },
            Artwork {
                id: "w2".to_string(),
                artist: UserRef::default(),
                ..Default::default()
            },
        ]);

        assert!(!state.artwork("w1").unwrap().is_bookmarked);
        assert!(state.artwork("w2").unwrap().is_bookmarked);
        assert_eq!(state.saved_artworks().len(), 1);
    }

    #[test]
    fn becoming_an_artist_requires_a_user() {
        let mut state = AppState::new();
        let profile = ArtistProfile {
            name: "Ink".to_string(),
            bio: "Brushes".to_string(),
            tags: vec!["ink".to_string()],
        };
        assert!(!state.become_artist(profile.clone()));

        state.set_current_user(Some(User {
            id: "u1".to_string(),
            ..Default::default()
        }));
        assert!(state.become_artist(profile));

        let user = state.current_user().unwrap();
        assert!(user.is_artist);
        assert_eq!(user.name, "Ink");
        assert!(user.avatar.is_some());
        assert!(state.all_users().iter().any(|u| u.id == "u1" && u.is_artist));
    }

    #[test]
    fn uploading_increments_the_artwork_counter() {
        let mut state = AppState::new();
        state.set_current_user(Some(User {
            id: "u1".to_string(),
            artworks: 2,
            ..Default::default()
        }));

        state.add_user_artwork(UserArtwork {
            id: "ua1".to_string(),
            title: "Dawn".to_string(),
            description: String::new(),
            image: "dawn.jpg".to_string(),
            created_at: now(),
        });

        let user = state.current_user().unwrap();
        assert_eq!(user.artworks, 3);
        assert_eq!(user.user_artworks.len(), 1);
    }

    #[test]
    fn ui_flags_toggle() {
        let mut state = AppState::new();
        state.toggle_create_menu();
        state.toggle_dark_mode();
        state.set_current_tab(Tab::Profile);
        state.set_selected_filter("Ink");

        assert!(state.is_create_menu_open());
        assert!(state.is_dark_mode());
        assert_eq!(state.current_tab(), Tab::Profile);
        assert_eq!(state.selected_filter(), "Ink");
    }

    #[test]
    fn mock_data_keeps_a_signed_in_session() {
        let mut state = AppState::new();
        state.set_current_user(Some(User {
            id: "user1".to_string(),
            name: "Restored".to_string(),
            ..Default::default()
        }));
        state.following_list = vec!["artist2".to_string()];
        state.saved_artworks = vec!["artwork3".to_string()];

        state.load_mock_data();

        assert_eq!(state.current_user().unwrap().name, "Restored");
        assert_eq!(state.following_list(), &["artist2".to_string()]);
        assert!(!state.artist("artist1").unwrap().is_following);
        assert!(state.artist("artist2").unwrap().is_following);
        assert!(state.artwork("artwork3").unwrap().is_bookmarked);

        let artist1 = state.all_users().iter().find(|u| u.id == "artist1").unwrap();
        assert!(!artist1.followers_list.contains(&"user1".to_string()));
        let artist2 = state.all_users().iter().find(|u| u.id == "artist2").unwrap();
        assert!(artist2.followers_list.contains(&"user1".to_string()));
    }

    #[test]
    fn viewer_flags_follow_the_sets() {
        let mut state = AppState::new();
        state.set_artists(vec![artist("a1", 1, true), artist("a2", 1, false)]);
        state.set_artworks(vec![Artwork {
            id: "w1".to_string(),
            is_bookmarked: true,
            ..Default::default()
        }]);

        state.following_list = vec!["a2".to_string()];
        state.saved_artworks.clear();
        state.reconcile_viewer_flags();

        assert!(!state.artist("a1").unwrap().is_following);
        assert!(state.artist("a2").unwrap().is_following);
        assert!(!state.artwork("w1").unwrap().is_bookmarked);
    }

    #[test]
    fn mock_data_seeds_a_consistent_session() {
        let mut state = AppState::new();
        state.load_mock_data();

        assert!(state.current_user().is_some());
        assert!(!state.artworks().is_empty());
        assert_eq!(state.stories().len(), state.artists().len().min(3));
        for id in state.following_list() {
            if let Some(artist) = state.artist(id) {
                assert!(artist.is_following);
            }
        }
    }
}
