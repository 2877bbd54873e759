//! `play [cursor|selection]`
//!
//! Without an argument playback starts (or resumes) wherever the daemon
//! is. With `cursor` the song under the cursor is played: directly by id
//! when browsing the queue, otherwise after appending it to the queue.
//! `selection` does the same with the selected songs, starting with the
//! first of them.

use std::cell::RefCell;
use std::rc::Rc;

use crate::input::command::{Command, CommandError};
use crate::input::lexer::{Token, TokenClass};
use crate::model::{add_all, Player, Song, SonglistView};

pub struct Play {
    songlists: Rc<RefCell<SonglistView>>,
    player: Player,
    songs: Vec<Song>,
}

impl Play {
    pub fn new(songlists: Rc<RefCell<SonglistView>>, player: Player) -> Self {
        Self {
            songlists,
            player,
            songs: Vec::new(),
        }
    }

    fn play_songs(&self, songs: &[Song]) -> Result<(), CommandError> {
        if self.songlists.borrow().is_queue() {
            let id = songs.first().and_then(|s| s.id).ok_or_else(|| {
                CommandError::Failed("Cannot play: song is not in the queue".to_string())
            })?;
            return self
                .player
                .call(|mpd| mpd.play_id(id))
                .map_err(|e| CommandError::playback("play", e));
        }

        let files = songs
            .iter()
            .map(|s| s.file())
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| CommandError::Failed("Cannot play: song has no file".to_string()))?;
        self.player
            .call(|mpd| {
                let ids = add_all(mpd, &files, None)?;
                match ids.first() {
                    Some(&id) => mpd.play_id(id),
                    None => Ok(()),
                }
            })
            .map_err(|e| CommandError::playback("play", e))
    }
}

impl Command for Play {
    fn reset(&mut self) {
        self.songs.clear();
    }

    fn execute(&mut self, token: &Token) -> Result<(), CommandError> {
        match token.class {
            TokenClass::Identifier => match token.as_str() {
                word @ ("cursor" | "selection") => {
                    let view = self.songlists.borrow();
                    self.songs = match word {
                        "cursor" => view.cursor_song().cloned().into_iter().collect(),
                        _ => view.active().selected_songs(),
                    };
                    if self.songs.is_empty() {
                        return Err(CommandError::Failed(
                            "Cannot play: no song under cursor".to_string(),
                        ));
                    }
                    Ok(())
                }
                _ => Ok(()),
            },
            TokenClass::End => match std::mem::take(&mut self.songs) {
                songs if !songs.is_empty() => self.play_songs(&songs),
                _ => self
                    .player
                    .call(|mpd| mpd.play(None))
                    .map_err(|e| CommandError::playback("play", e)),
            },
            _ => Err(CommandError::unexpected(token, "END")),
        }
    }
}
