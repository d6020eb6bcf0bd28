//! Likes, bookmarks, follows and curations.

use crate::models::{Curation, CurationDraft};

use super::state::{new_id, now, set_membership, AppState};

impl AppState {
    /// Flip the viewer's like on an artwork and move its counter with it.
    ///
    /// Returns the new like state, or `None` for an unknown artwork.
    pub fn toggle_like(&mut self, artwork_id: &str) -> Option<bool> {
        let artwork = self.artworks.iter_mut().find(|a| a.id == artwork_id)?;

        artwork.is_liked = !artwork.is_liked;
        artwork.stats.likes = if artwork.is_liked {
            artwork.stats.likes.saturating_add(1)
        } else {
            artwork.stats.likes.saturating_sub(1)
        };
        Some(artwork.is_liked)
    }

    /// Flip the bookmark on an artwork and keep the saved set in step.
    ///
    /// An artwork that is not loaded only toggles its saved-set membership,
    /// so saved ids restored from storage can still be removed.
    pub fn toggle_bookmark(&mut self, artwork_id: &str) -> bool {
        let bookmarked = match self.artworks.iter_mut().find(|a| a.id == artwork_id) {
            Some(artwork) => {
                artwork.is_bookmarked = !artwork.is_bookmarked;
                artwork.is_bookmarked
            }
            None => !self.saved_artworks.iter().any(|id| id == artwork_id),
        };

        set_membership(&mut self.saved_artworks, artwork_id, bookmarked);
        bookmarked
    }

    /// Follow or unfollow an artist.
    ///
    /// Updates the artist card, the follow set, the viewer's own following
    /// list and counter, and the followed user's follower list in the
    /// directory. Follower counts saturate at zero.
    pub fn toggle_follow(&mut self, artist_id: &str) -> bool {
        let following = match self.artists.iter().find(|a| a.id == artist_id) {
            Some(artist) => !artist.is_following,
            None => !self.following_list.iter().any(|id| id == artist_id),
        };

        if let Some(artist) = self.artists.iter_mut().find(|a| a.id == artist_id) {
            artist.is_following = following;
            artist.stats.followers = if following {
                artist.stats.followers.saturating_add(1)
            } else {
                artist.stats.followers.saturating_sub(1)
            };
        }

        set_membership(&mut self.following_list, artist_id, following);

        let viewer = self.current_user.as_mut().map(|user| {
            if set_membership(&mut user.following_list, artist_id, following) {
                user.following = adjust(user.following, following);
            }
            (user.id.clone(), user.following)
        });

        if let Some((viewer_id, viewer_following)) = viewer {
            for entry in &mut self.all_users {
                if entry.id == viewer_id {
                    set_membership(&mut entry.following_list, artist_id, following);
                    entry.following = viewer_following;
                } else if entry.id == artist_id
                    && set_membership(&mut entry.followers_list, &viewer_id, following)
                {
                    entry.followers = adjust(entry.followers, following);
                }
            }
        }

        following
    }

    /// Whether the viewer follows `artist_id`
    pub fn is_user_following(&self, artist_id: &str) -> bool {
        self.following_list.iter().any(|id| id == artist_id)
    }

    /// Flip the viewer's like on a curation.
    pub fn toggle_curation_like(&mut self, curation_id: &str) -> Option<bool> {
        let curation = self.curations.iter_mut().find(|c| c.id == curation_id)?;

        curation.is_liked = !curation.is_liked;
        curation.likes = adjust(curation.likes, curation.is_liked);
        Some(curation.is_liked)
    }

    /// Publish a curation by the signed-in user. The cover is the first
    /// selected artwork's image.
    pub fn create_curation(&mut self, draft: CurationDraft) -> Option<String> {
        let curator = self.current_user.as_ref()?.summary();
        let title = draft.title.trim();
        if title.is_empty() {
            return None;
        }

        let cover_image = draft
            .artwork_ids
            .first()
            .and_then(|id| self.artwork(id))
            .map(|a| a.image.clone())
            .unwrap_or_default();

        let curation = Curation {
            id: new_id("curation"),
            title: title.to_string(),
            description: draft.description.trim().to_string(),
            curator,
            artworks: draft.artwork_ids,
            cover_image,
            views: 0,
            likes: 0,
            is_liked: false,
            created_at: Some(now()),
        };

        let id = curation.id.clone();
        self.curations.insert(0, curation);
        Some(id)
    }
}

fn adjust(count: u32, up: bool) -> u32 {
    if up {
        count.saturating_add(1)
    } else {
        count.saturating_sub(1)
    }
}
