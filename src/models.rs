//! Domain types shared by the store, the API client and persistence.
//!
//! Everything is serialized in camelCase, which is what the API speaks and
//! what the persisted blob contains.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Minimal reference to a person: enough to render an avatar and a name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserRef {
    pub id: String,
    pub name: String,
    pub avatar: String,
}

/// The signed-in user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    /// Public handle
    pub username: String,
    pub email: String,
    pub is_artist: bool,
    pub followers: u32,
    pub following: u32,
    pub artworks: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub tags: Vec<String>,
    /// Ids of users following this user
    pub followers_list: Vec<String>,
    /// Ids of users this user follows
    pub following_list: Vec<String>,
    pub user_artworks: Vec<UserArtwork>,
    /// Session token handed out by the API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl User {
    /// The reference other entities embed when they point at this user.
    pub fn summary(&self) -> UserRef {
        UserRef {
            id: self.id.clone(),
            name: self.name.clone(),
            avatar: self.avatar.clone().unwrap_or_default(),
        }
    }
}

/// A creation uploaded by the signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserArtwork {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
}

/// Profile details submitted when a user becomes an artist.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtistProfile {
    pub name: String,
    pub bio: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtistStats {
    pub artworks: u32,
    pub followers: u32,
    pub likes: u32,
    pub curations: u32,
}

/// Public projection of an artist, relative to the viewer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub avatar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub bio: String,
    pub tags: Vec<String>,
    pub stats: ArtistStats,
    pub is_following: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_story_update: Option<bool>,
}

impl Artist {
    pub fn summary(&self) -> UserRef {
        UserRef {
            id: self.id.clone(),
            name: self.name.clone(),
            avatar: self.avatar.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtworkStats {
    pub likes: u32,
    pub comments: u32,
}

/// A single piece in the feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Artwork {
    pub id: String,
    pub title: String,
    pub image: String,
    pub artist: UserRef,
    /// Placeholder gradient shown while the image loads
    pub gradient: Vec<String>,
    pub stats: ArtworkStats,
    pub is_liked: bool,
    pub is_bookmarked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// An editorial exhibition grouping several artworks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Curation {
    pub id: String,
    pub title: String,
    pub description: String,
    pub curator: UserRef,
    /// Artwork ids, in exhibition order
    pub artworks: Vec<String>,
    pub cover_image: String,
    pub views: u32,
    pub likes: u32,
    pub is_liked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// What the curation editor hands to the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurationDraft {
    pub title: String,
    pub description: String,
    pub artwork_ids: Vec<String>,
}

/// A user-owned folder of artworks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: String,
    pub name: String,
    pub user_id: String,
    #[serde(default)]
    pub artwork_ids: Vec<String>,
    /// Image of the first artwork added, cleared when the board empties
    #[serde(default)]
    pub cover_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    #[serde(default)]
    pub user_avatar: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub is_liked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Follow,
    Like,
    Comment,
    Share,
    Curation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub from_user_id: String,
    pub from_user_name: String,
    #[serde(default)]
    pub from_user_avatar: String,
    pub target_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub is_read: bool,
}

/// Partial notification data; the store fills in id, timestamp and read state.
#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    pub kind: NotificationKind,
    pub from: UserRef,
    pub target_id: String,
    pub target_title: Option<String>,
    pub message: Option<String>,
}

impl NewNotification {
    pub fn new(kind: NotificationKind, target_id: impl Into<String>) -> Self {
        Self {
            kind,
            from: UserRef::default(),
            target_id: target_id.into(),
            target_title: None,
            message: None,
        }
    }

    pub fn from_user(mut self, from: UserRef) -> Self {
        self.from = from;
        self
    }

    pub fn target_title(mut self, title: impl Into<String>) -> Self {
        self.target_title = Some(title.into());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Story bubble at the top of the feed. UI only, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub id: String,
    pub user: UserRef,
    pub has_update: bool,
    pub gradient: Vec<String>,
}
