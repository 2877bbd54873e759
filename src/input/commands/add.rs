//! `add [uri...]`: append songs to the queue
//!
//! Without arguments the selected songs, or the song under the cursor, are
//! added. Either every song makes it into the queue or none does.

use std::cell::RefCell;
use std::rc::Rc;

use crate::input::command::{Command, CommandError};
use crate::input::lexer::{Token, TokenClass};
use crate::model::{add_all, Player, SonglistView, UiState};

pub struct Add {
    songlists: Rc<RefCell<SonglistView>>,
    ui: Rc<RefCell<UiState>>,
    player: Player,
    uris: Vec<String>,
}

impl Add {
    pub fn new(
        songlists: Rc<RefCell<SonglistView>>,
        ui: Rc<RefCell<UiState>>,
        player: Player,
    ) -> Self {
        Self {
            songlists,
            ui,
            player,
            uris: Vec::new(),
        }
    }
}

impl Command for Add {
    fn reset(&mut self) {
        self.uris.clear();
    }

    fn execute(&mut self, token: &Token) -> Result<(), CommandError> {
        match token.class {
            TokenClass::Identifier | TokenClass::QuotedString => {
                self.uris.push(token.as_str().to_string());
                Ok(())
            }
            TokenClass::End => {
                let mut uris = std::mem::take(&mut self.uris);
                if uris.is_empty() {
                    let view = self.songlists.borrow();
                    uris = view
                        .active()
                        .selected_songs()
                        .iter()
                        .filter_map(|s| s.file().map(str::to_string))
                        .collect();
                    if uris.is_empty() {
                        return Err(CommandError::Failed(
                            "Cannot add: no song under cursor".to_string(),
                        ));
                    }
                }
                self.player
                    .call(|mpd| add_all(mpd, &uris, None))
                    .map_err(|e| CommandError::playback("add", e))?;

                let message = match uris.as_slice() {
                    [uri] => format!("Added {uri} to queue"),
                    _ => format!("Added {} songs to queue", uris.len()),
                };
                self.ui.borrow_mut().set_info(message);
                Ok(())
            }
            _ => Err(CommandError::unexpected(token, "a song URI")),
        }
    }
}
