//! Boards: named collections of artworks owned by the signed-in user.

use crate::models::{Artwork, Board};

use super::state::{new_id, now, AppState};

impl AppState {
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn board(&self, board_id: &str) -> Option<&Board> {
        self.boards.iter().find(|b| b.id == board_id)
    }

    /// Boards owned by the signed-in user
    pub fn my_boards(&self) -> Vec<&Board> {
        match &self.current_user {
            Some(user) => self.boards.iter().filter(|b| b.user_id == user.id).collect(),
            None => Vec::new(),
        }
    }

    /// Create an empty board. Needs a signed-in user and a non-blank name.
    pub fn create_board(&mut self, name: &str) -> Option<String> {
        let user_id = self.current_user.as_ref()?.id.clone();
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let board = Board {
            id: new_id("board"),
            name: name.to_string(),
            user_id,
            artwork_ids: Vec::new(),
            cover_image: None,
            created_at: now(),
        };
        let id = board.id.clone();
        self.boards.push(board);
        Some(id)
    }

    /// Delete a board owned by the signed-in user.
    pub fn delete_board(&mut self, board_id: &str) -> bool {
        let Some(user_id) = self.current_user.as_ref().map(|u| u.id.as_str()) else {
            return false;
        };
        let before = self.boards.len();
        self.boards
            .retain(|b| !(b.id == board_id && b.user_id == user_id));
        self.boards.len() != before
    }

    /// Add an artwork to a board unless it is already there. A board without
    /// a cover takes the artwork's image.
    pub fn add_artwork_to_board(&mut self, board_id: &str, artwork_id: &str) -> bool {
        let image = self.artwork(artwork_id).map(|a| a.image.clone());
        let Some(board) = self.boards.iter_mut().find(|b| b.id == board_id) else {
            return false;
        };
        if board.artwork_ids.iter().any(|id| id == artwork_id) {
            return false;
        }

        board.artwork_ids.push(artwork_id.to_string());
        if board.cover_image.is_none() {
            board.cover_image = image;
        }
        true
    }

    /// Remove an artwork from a board. An emptied board loses its cover. A
    /// cover that belonged to the removed artwork, or that no longer matches
    /// any loaded artwork on the board, moves to the first remaining one.
    pub fn remove_artwork_from_board(&mut self, board_id: &str, artwork_id: &str) -> bool {
        let removed_image = self.artwork(artwork_id).map(|a| a.image.clone());
        let Some(index) = self.boards.iter().position(|b| b.id == board_id) else {
            return false;
        };
        let Some(position) = self.boards[index]
            .artwork_ids
            .iter()
            .position(|id| id == artwork_id)
        else {
            return false;
        };

        self.boards[index].artwork_ids.remove(position);

        let board = &self.boards[index];
        let remaining_images: Vec<String> = board
            .artwork_ids
            .iter()
            .filter_map(|id| self.artwork(id))
            .map(|a| a.image.clone())
            .collect();

        let cover = match (&board.cover_image, &removed_image) {
            _ if board.artwork_ids.is_empty() => None,
            (None, _) => None,
            (Some(cover), Some(removed)) if cover != removed => Some(cover.clone()),
            // Removed artwork is not loaded, so only a stale cover can be detected
            (Some(cover), None)
                if remaining_images.is_empty() || remaining_images.contains(cover) =>
            {
                Some(cover.clone())
            }
            _ => remaining_images.first().cloned(),
        };
        self.boards[index].cover_image = cover;
        true
    }

    /// Loaded artworks on a board, in board order
    pub fn artworks_on_board(&self, board_id: &str) -> Vec<&Artwork> {
        self.board(board_id)
            .map(|board| {
                board
                    .artwork_ids
                    .iter()
                    .filter_map(|id| self.artwork(id))
                    .collect()
            })
            .unwrap_or_default()
    }
}
