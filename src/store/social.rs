//! Comments and notifications.

use crate::models::{Comment, NewNotification, Notification, NotificationKind};

use super::state::{new_id, now, AppState};

impl AppState {
    /// Comments on an artwork, oldest first
    pub fn comments_for(&self, artwork_id: &str) -> &[Comment] {
        self.comments
            .get(artwork_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Comment on a loaded artwork as the signed-in user.
    ///
    /// The artwork's comment counter moves with the insertion. The artwork's
    /// owner is notified unless they wrote the comment themselves.
    pub fn add_comment(&mut self, artwork_id: &str, text: &str) -> Option<String> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let author = self.current_user.as_ref()?.summary();
        let artwork = self.artworks.iter_mut().find(|a| a.id == artwork_id)?;

        artwork.stats.comments = artwork.stats.comments.saturating_add(1);
        let owner_id = artwork.artist.id.clone();
        let title = artwork.title.clone();

        let comment = Comment {
            id: new_id("comment"),
            user_id: author.id.clone(),
            user_name: author.name.clone(),
            user_avatar: author.avatar.clone(),
            text: text.to_string(),
            timestamp: now(),
            likes: 0,
            is_liked: false,
        };
        let id = comment.id.clone();
        self.comments
            .entry(artwork_id.to_string())
            .or_default()
            .push(comment);

        if owner_id != author.id {
            let message = format!("{} commented on your artwork", author.name);
            self.add_notification(
                NewNotification::new(NotificationKind::Comment, artwork_id)
                    .from_user(author)
                    .target_title(title)
                    .message(message),
            );
        }

        Some(id)
    }

    /// Flip the viewer's like on a comment.
    pub fn toggle_comment_like(&mut self, artwork_id: &str, comment_id: &str) -> Option<bool> {
        let comment = self
            .comments
            .get_mut(artwork_id)?
            .iter_mut()
            .find(|c| c.id == comment_id)?;

        comment.is_liked = !comment.is_liked;
        comment.likes = if comment.is_liked {
            comment.likes.saturating_add(1)
        } else {
            comment.likes.saturating_sub(1)
        };
        Some(comment.is_liked)
    }

    /// Notifications, newest first
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn unread_notification_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.is_read).count()
    }

    /// Prepend a fresh unread notification and evict the oldest beyond the cap.
    pub fn add_notification(&mut self, data: NewNotification) -> String {
        let notification = Notification {
            id: new_id("notification"),
            kind: data.kind,
            from_user_id: data.from.id,
            from_user_name: data.from.name,
            from_user_avatar: data.from.avatar,
            target_id: data.target_id,
            target_title: data.target_title,
            message: data.message,
            timestamp: now(),
            is_read: false,
        };
        let id = notification.id.clone();

        self.notifications.insert(0, notification);
        self.notifications.truncate(self.notification_cap);
        id
    }

    pub fn mark_notification_as_read(&mut self, notification_id: &str) -> bool {
        match self
            .notifications
            .iter_mut()
            .find(|n| n.id == notification_id && !n.is_read)
        {
            Some(notification) => {
                notification.is_read = true;
                true
            }
            None => false,
        }
    }

    pub fn mark_all_notifications_as_read(&mut self) {
        for notification in &mut self.notifications {
            notification.is_read = true;
        }
    }

    pub fn clear_all_notifications(&mut self) {
        self.notifications.clear();
    }

    /// Restore a persisted list: newest first, within the cap.
    pub(crate) fn replace_notifications(&mut self, mut notifications: Vec<Notification>) {
        notifications.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        notifications.truncate(self.notification_cap);
        self.notifications = notifications;
    }
}
