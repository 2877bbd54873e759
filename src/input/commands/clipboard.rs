//! `cut`, `yank` and `paste <after|before>`: move songs through the
//! clipboard
//!
//! All three act on the selection, or on the song under the cursor when
//! nothing is selected. Cutting from and pasting into the queue goes
//! through MPD; other user lists are edited in place. The library is never
//! edited.

use std::cell::RefCell;
use std::rc::Rc;

use crate::input::command::{expect_end, Command, CommandError};
use crate::input::lexer::{Token, TokenClass};
use crate::model::{add_all, delete_all, ListKind, Player, SonglistView, UiState};

fn songs_message(verb: &str, count: usize) -> String {
    match count {
        1 => format!("1 song {verb}"),
        n => format!("{n} songs {verb}"),
    }
}

pub struct Cut {
    songlists: Rc<RefCell<SonglistView>>,
    ui: Rc<RefCell<UiState>>,
    player: Player,
}

impl Cut {
    pub fn new(
        songlists: Rc<RefCell<SonglistView>>,
        ui: Rc<RefCell<UiState>>,
        player: Player,
    ) -> Self {
        Self {
            songlists,
            ui,
            player,
        }
    }
}

impl Command for Cut {
    fn reset(&mut self) {}

    fn execute(&mut self, token: &Token) -> Result<(), CommandError> {
        expect_end(token)?;
        let mut view = self.songlists.borrow_mut();
        let list = view.active();
        let rows = list.target_rows();
        if rows.is_empty() {
            return Err(CommandError::Failed("Cannot cut: no song under cursor".to_string()));
        }
        match list.kind {
            ListKind::Library => {
                return Err(CommandError::Failed("Cannot cut from the library".to_string()));
            }
            ListKind::Queue => {
                let songs = list.selected_songs();
                self.player
                    .call(|mpd| delete_all(mpd, &songs))
                    .map_err(|e| CommandError::playback("cut", e))?;
            }
            ListKind::Custom | ListKind::Search => {}
        }

        let removed = view.active_mut().remove_rows(&rows);
        let message = songs_message("cut", removed.len());
        view.set_clipboard(removed);
        self.ui.borrow_mut().set_info(message);
        Ok(())
    }
}

pub struct Yank {
    songlists: Rc<RefCell<SonglistView>>,
    ui: Rc<RefCell<UiState>>,
}

impl Yank {
    pub fn new(songlists: Rc<RefCell<SonglistView>>, ui: Rc<RefCell<UiState>>) -> Self {
        Self { songlists, ui }
    }
}

impl Command for Yank {
    fn reset(&mut self) {}

    fn execute(&mut self, token: &Token) -> Result<(), CommandError> {
        expect_end(token)?;
        let mut view = self.songlists.borrow_mut();
        let songs = view.active().selected_songs();
        if songs.is_empty() {
            return Err(CommandError::Failed("Cannot yank: no song under cursor".to_string()));
        }
        let message = songs_message("yanked", songs.len());
        view.set_clipboard(songs);
        view.active_mut().clear_selection();
        self.ui.borrow_mut().set_info(message);
        Ok(())
    }
}

pub struct Paste {
    songlists: Rc<RefCell<SonglistView>>,
    ui: Rc<RefCell<UiState>>,
    player: Player,
    after: Option<bool>,
}

impl Paste {
    pub fn new(
        songlists: Rc<RefCell<SonglistView>>,
        ui: Rc<RefCell<UiState>>,
        player: Player,
    ) -> Self {
        Self {
            songlists,
            ui,
            player,
            after: None,
        }
    }
}

impl Command for Paste {
    fn reset(&mut self) {
        self.after = None;
    }

    fn execute(&mut self, token: &Token) -> Result<(), CommandError> {
        match token.class {
            TokenClass::Identifier if self.after.is_none() => {
                self.after = Some(match token.as_str() {
                    "after" => true,
                    "before" => false,
                    _ => return Err(CommandError::unexpected(token, "after or before")),
                });
                Ok(())
            }
            TokenClass::End => {
                let after = self.after.take().unwrap_or(true);
                let mut view = self.songlists.borrow_mut();
                let songs = view.clipboard().to_vec();
                if songs.is_empty() {
                    return Err(CommandError::Failed("Nothing to paste".to_string()));
                }
                let list = view.active();
                let position = match (list.is_empty(), after) {
                    (true, _) => 0,
                    (false, true) => list.cursor() + 1,
                    (false, false) => list.cursor(),
                };
                match list.kind {
                    ListKind::Library => {
                        return Err(CommandError::Failed(
                            "Cannot paste into the library".to_string(),
                        ));
                    }
                    ListKind::Queue => {
                        let files: Vec<&str> = songs.iter().filter_map(|s| s.file()).collect();
                        self.player
                            .call(|mpd| add_all(mpd, &files, Some(position)))
                            .map_err(|e| CommandError::playback("paste", e))?;
                    }
                    ListKind::Custom | ListKind::Search => {
                        view.active_mut().insert(position, songs.clone());
                    }
                }
                self.ui
                    .borrow_mut()
                    .set_info(songs_message("pasted", songs.len()));
                Ok(())
            }
            _ => Err(CommandError::unexpected(token, "END")),
        }
    }
}
