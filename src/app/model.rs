//! The `App` model: the transport controller plus the playlist cursor.

use crate::audio::PlaybackBridge;
use crate::playlist::Playlist;

use super::controller::TransportController;
use super::state::PlayerState;

pub struct App<B> {
    pub controller: TransportController<B>,
    /// Playlist row under the cursor. Independent of the current track.
    pub cursor: usize,
    /// Whether the cursor jumps to the current track after a track change.
    pub follow_playback: bool,
}

impl<B: PlaybackBridge> App<B> {
    pub fn new(controller: TransportController<B>, follow_playback: bool) -> Self {
        let cursor = controller.state().current_index;
        Self {
            controller,
            cursor,
            follow_playback,
        }
    }

    pub fn state(&self) -> &PlayerState {
        self.controller.state()
    }

    pub fn playlist(&self) -> &Playlist {
        self.controller.playlist()
    }

    /// Move the cursor down, wrapping to the top.
    pub fn cursor_down(&mut self) {
        self.follow_playback = false;
        self.cursor = self.playlist().next(self.cursor);
    }

    /// Move the cursor up, wrapping to the bottom.
    pub fn cursor_up(&mut self) {
        self.follow_playback = false;
        self.cursor = self.playlist().previous(self.cursor);
    }

    /// Play the row under the cursor, even if it is already current.
    pub fn play_cursor(&mut self) {
        self.follow_playback = true;
        self.controller.load_track(self.cursor);
    }

    /// A click on playlist row `index`.
    pub fn activate_row(&mut self, index: usize) {
        if index < self.playlist().len() {
            self.cursor = index;
            self.play_cursor();
        }
    }

    /// Put the cursor back on the current track when following playback.
    pub fn sync_cursor(&mut self) {
        let current = self.state().current_index;
        if self.follow_playback && self.cursor != current {
            self.cursor = current;
        }
    }
}
