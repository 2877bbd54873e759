//! MPD change notifications

use crate::model::{ListKind, PlaybackError};
use crate::mpd::MpdEvent;

use super::AppController;

impl AppController {
    pub fn handle_mpd_event(&mut self, event: MpdEvent) {
        tracing::debug!(?event, "MPD event");
        match event {
            MpdEvent::Player => self.refresh_status(),
            MpdEvent::Queue => {
                self.refresh_queue();
                self.refresh_status();
            }
            MpdEvent::Library => self.refresh_library(),
            MpdEvent::Disconnected(reason) => {
                self.watcher = None;
                self.model.player.disconnect();
                self.model
                    .ui
                    .borrow_mut()
                    .set_error(format!("Disconnected from MPD: {reason}"));
            }
        }
    }

    pub(super) fn refresh_status(&mut self) {
        let result = self
            .model
            .player
            .call(|mpd| Ok((mpd.status()?, mpd.current_song()?)));
        match result {
            Ok((status, song)) => {
                self.model.songlists.borrow_mut().set_current_song(song);
                self.model.ui.borrow_mut().status = status;
            }
            Err(e) => self.connection_error("status", e),
        }
    }

    pub(super) fn refresh_queue(&mut self) {
        match self.model.player.call(|mpd| mpd.queue()) {
            Ok(songs) => {
                tracing::debug!(songs = songs.len(), "Queue loaded");
                self.model.songlists.borrow_mut().replace(ListKind::Queue, songs);
            }
            Err(e) => self.connection_error("queue", e),
        }
    }

    pub(super) fn refresh_library(&mut self) {
        match self.model.player.call(|mpd| mpd.library()) {
            Ok(songs) => {
                tracing::debug!(songs = songs.len(), "Library loaded");
                self.model.songlists.borrow_mut().replace(ListKind::Library, songs);
            }
            Err(e) => self.connection_error("library", e),
        }
    }

    /// A failed refresh on a broken connection drops it so that the
    /// reconnect timer takes over.
    fn connection_error(&mut self, what: &str, error: PlaybackError) {
        tracing::warn!(what, error = %error, "MPD refresh failed");
        if matches!(
            error,
            PlaybackError::Io(_) | PlaybackError::Protocol(_)
        ) {
            self.model.player.disconnect();
            if let Some(watcher) = self.watcher.take() {
                watcher.abort();
            }
        }
        if !matches!(error, PlaybackError::NotConnected) {
            self.model
                .ui
                .borrow_mut()
                .set_error(format!("Cannot load {what}: {error}"));
        }
    }
}
