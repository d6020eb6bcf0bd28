//! Feed ranking.
//!
//! A pure scoring function over an artwork and the viewer's preferences.
//! Ranking is a stable sort on that score, so equal scores keep feed order
//! and the same inputs always produce the same feed.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::models::Artwork;
use crate::store::AppState;

const LIKE_WEIGHT: f64 = 0.3;
const COMMENT_WEIGHT: f64 = 0.2;
const RECENCY_WINDOW_DAYS: f64 = 30.0;
const RECENCY_WEIGHT: f64 = 0.1;
const LIKED_ARTIST_BONUS: f64 = 50.0;
const INTERACTION_WEIGHT: f64 = 0.4;

/// What the scorer knows about the viewer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPreferences {
    /// Artist ids the viewer likes
    pub liked_artists: Vec<String>,
    pub viewed_categories: Vec<String>,
    /// Per-artwork interaction weight
    pub interaction_score: HashMap<String, f64>,
}

impl UserPreferences {
    /// Derive preferences from the viewer's activity.
    ///
    /// Followed artists count as liked. Each like, bookmark and own comment
    /// on an artwork adds to its interaction weight.
    pub fn from_state(state: &AppState) -> Self {
        let mut interaction_score: HashMap<String, f64> = HashMap::new();
        let viewer = state.current_user().map(|u| u.id.as_str());

        for artwork in state.artworks() {
            let mut weight = 0.0;
            if artwork.is_liked {
                weight += 10.0;
            }
            if artwork.is_bookmarked {
                weight += 20.0;
            }
            if let Some(viewer) = viewer {
                let own = state
                    .comments_for(&artwork.id)
                    .iter()
                    .filter(|c| c.user_id == viewer)
                    .count();
                weight += 5.0 * own as f64;
            }
            if weight > 0.0 {
                interaction_score.insert(artwork.id.clone(), weight);
            }
        }

        Self {
            liked_artists: state.following_list().to_vec(),
            viewed_categories: Vec::new(),
            interaction_score,
        }
    }
}

/// Score an artwork against the current clock.
pub fn score(artwork: &Artwork, prefs: &UserPreferences) -> f64 {
    score_at(artwork, prefs, Utc::now())
}

/// Score an artwork as of `now`.
pub fn score_at(artwork: &Artwork, prefs: &UserPreferences, now: DateTime<Utc>) -> f64 {
    let mut score = artwork.stats.likes as f64 * LIKE_WEIGHT
        + artwork.stats.comments as f64 * COMMENT_WEIGHT;

    // Undated artworks get no recency bonus. Future dates count as today.
    if let Some(created_at) = artwork.created_at {
        let days = ((now - created_at).num_seconds() as f64 / 86_400.0).max(0.0);
        score += (RECENCY_WINDOW_DAYS - days).max(0.0) * RECENCY_WEIGHT;
    }

    if prefs.liked_artists.iter().any(|id| *id == artwork.artist.id) {
        score += LIKED_ARTIST_BONUS;
    }

    if let Some(weight) = prefs.interaction_score.get(&artwork.id) {
        score += weight * INTERACTION_WEIGHT;
    }

    score
}

/// Rank artworks by descending score. Ties keep their input order.
pub fn sort_by_recommendation(artworks: &[Artwork], prefs: &UserPreferences) -> Vec<Artwork> {
    sort_by_recommendation_at(artworks, prefs, Utc::now())
}

pub fn sort_by_recommendation_at(
    artworks: &[Artwork],
    prefs: &UserPreferences,
    now: DateTime<Utc>,
) -> Vec<Artwork> {
    let mut scored: Vec<(f64, &Artwork)> = artworks
        .iter()
        .map(|artwork| (score_at(artwork, prefs, now), artwork))
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.into_iter().map(|(_, artwork)| artwork.clone()).collect()
}

/// Keep artworks whose title mentions one of `categories`, ignoring case.
/// No categories keeps everything.
pub fn filter_by_category(artworks: &[Artwork], categories: &[String]) -> Vec<Artwork> {
    if categories.is_empty() {
        return artworks.to_vec();
    }

    let needles: Vec<String> = categories.iter().map(|c| c.to_lowercase()).collect();
    artworks
        .iter()
        .filter(|artwork| {
            let title = artwork.title.to_lowercase();
            needles.iter().any(|needle| title.contains(needle.as_str()))
        })
        .cloned()
        .collect()
}

/// Display aspect ratio for masonry layouts, in `[0.7, 1.3)`.
///
/// An explicit `aspect_ratio` wins. Otherwise the ratio is derived from the
/// artwork id, so a card keeps its shape across renders.
pub fn display_aspect_ratio(artwork: &Artwork) -> f64 {
    if let Some(ratio) = artwork.aspect_ratio {
        return ratio;
    }

    // FNV-1a
    let hash = artwork
        .id
        .bytes()
        .fold(0xcbf2_9ce4_8422_2325_u64, |hash, byte| {
            (hash ^ byte as u64).wrapping_mul(0x0100_0000_01b3)
        });
    0.7 + (hash % 600) as f64 / 1000.0
}
