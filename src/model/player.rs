//! Playback service boundary
//!
//! Commands talk to the playback daemon through [`Player`], a shared handle
//! that is empty while disconnected. Each call is a single synchronous
//! request.

use std::cell::RefCell;
use std::rc::Rc;

use super::song::{Song, SongId};

#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    #[error("not connected to MPD")]
    NotConnected,

    /// The server refused the request; its message is kept verbatim
    #[error("{0}")]
    Rejected(String),

    #[error("connection to MPD lost: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected response from MPD: {0}")]
    Protocol(String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlayState {
    Play,
    Pause,
    #[default]
    Stop,
}

/// Snapshot of the daemon's player state
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlayerStatus {
    pub state: PlayState,
    /// `None` when the daemon has no mixer
    pub volume: Option<u8>,
    pub song_id: Option<SongId>,
    pub elapsed: Option<f64>,
    pub duration: Option<f64>,
    pub repeat: bool,
    pub random: bool,
    pub single: bool,
    pub consume: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SeekTarget {
    Absolute(u32),
    Relative(i64),
}

pub trait PlaybackService {
    /// Start playback at a queue position, or resume from the current one.
    fn play(&mut self, position: Option<usize>) -> Result<(), PlaybackError>;
    fn play_id(&mut self, id: SongId) -> Result<(), PlaybackError>;
    /// Append a song to the queue, returning its new queue id.
    fn add_id(&mut self, uri: &str) -> Result<SongId, PlaybackError>;
    /// Insert a song at a queue position, returning its new queue id.
    fn insert_id(&mut self, uri: &str, position: usize) -> Result<SongId, PlaybackError>;
    fn delete_id(&mut self, id: SongId) -> Result<(), PlaybackError>;
    fn pause(&mut self, paused: bool) -> Result<(), PlaybackError>;
    fn stop(&mut self) -> Result<(), PlaybackError>;
    fn next(&mut self) -> Result<(), PlaybackError>;
    fn previous(&mut self) -> Result<(), PlaybackError>;
    fn set_volume(&mut self, volume: u8) -> Result<(), PlaybackError>;
    fn seek(&mut self, target: SeekTarget) -> Result<(), PlaybackError>;
    fn status(&mut self) -> Result<PlayerStatus, PlaybackError>;
    fn current_song(&mut self) -> Result<Option<Song>, PlaybackError>;
    fn queue(&mut self) -> Result<Vec<Song>, PlaybackError>;
    fn library(&mut self) -> Result<Vec<Song>, PlaybackError>;
}

/// Add every song in `uris` to the queue, appended or starting at
/// `position`. On failure the songs added so far are deleted again before
/// the error is returned, so the queue is left as it was.
pub fn add_all(
    service: &mut dyn PlaybackService,
    uris: &[impl AsRef<str>],
    position: Option<usize>,
) -> Result<Vec<SongId>, PlaybackError> {
    let mut added = Vec::with_capacity(uris.len());
    for (i, uri) in uris.iter().enumerate() {
        let result = match position {
            Some(pos) => service.insert_id(uri.as_ref(), pos + i),
            None => service.add_id(uri.as_ref()),
        };
        match result {
            Ok(id) => added.push(id),
            Err(e) => {
                for id in added {
                    if let Err(undo) = service.delete_id(id) {
                        tracing::warn!(id, error = %undo, "Cannot roll back queued song");
                    }
                }
                return Err(e);
            }
        }
    }
    Ok(added)
}

/// Delete queued songs by id. If one of the deletions fails, the songs
/// already deleted are put back at their old positions.
pub fn delete_all(service: &mut dyn PlaybackService, songs: &[Song]) -> Result<(), PlaybackError> {
    let mut targets = Vec::with_capacity(songs.len());
    for song in songs {
        match (song.id, song.position, song.file()) {
            (Some(id), Some(position), Some(file)) => targets.push((id, position, file)),
            _ => return Err(PlaybackError::Rejected("Song is not in the queue".to_string())),
        }
    }
    targets.sort_by_key(|(_, position, _)| *position);

    for (done, (id, _, _)) in targets.iter().enumerate() {
        if let Err(e) = service.delete_id(*id) {
            for (_, position, file) in &targets[..done] {
                if let Err(undo) = service.insert_id(file, *position) {
                    tracing::warn!(file = %file, error = %undo, "Cannot restore deleted song");
                }
            }
            return Err(e);
        }
    }
    Ok(())
}

/// Shared, possibly disconnected, handle to the playback service.
#[derive(Clone, Default)]
pub struct Player {
    service: Rc<RefCell<Option<Box<dyn PlaybackService>>>>,
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect(&self, service: Box<dyn PlaybackService>) {
        *self.service.borrow_mut() = Some(service);
    }

    pub fn disconnect(&self) {
        *self.service.borrow_mut() = None;
    }

    pub fn is_connected(&self) -> bool {
        self.service.borrow().is_some()
    }

    /// Run one request against the service.
    pub fn call<T>(
        &self,
        request: impl FnOnce(&mut dyn PlaybackService) -> Result<T, PlaybackError>,
    ) -> Result<T, PlaybackError> {
        let mut slot = self.service.borrow_mut();
        let service = slot.as_deref_mut().ok_or(PlaybackError::NotConnected)?;
        request(service)
    }
}
