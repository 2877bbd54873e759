//! `print <tag...>`: show tags of the song under the cursor

use std::cell::RefCell;
use std::rc::Rc;

use crate::input::command::{Command, CommandError};
use crate::input::lexer::{Token, TokenClass};
use crate::model::{SonglistView, UiState};

pub struct Print {
    songlists: Rc<RefCell<SonglistView>>,
    ui: Rc<RefCell<UiState>>,
    tags: Vec<String>,
}

impl Print {
    pub fn new(songlists: Rc<RefCell<SonglistView>>, ui: Rc<RefCell<UiState>>) -> Self {
        Self {
            songlists,
            ui,
            tags: Vec::new(),
        }
    }
}

impl Command for Print {
    fn reset(&mut self) {
        self.tags.clear();
    }

    fn execute(&mut self, token: &Token) -> Result<(), CommandError> {
        match token.class {
            TokenClass::Identifier | TokenClass::QuotedString => {
                self.tags.push(token.as_str().to_lowercase());
                Ok(())
            }
            TokenClass::End => {
                if self.tags.is_empty() {
                    return Err(CommandError::unexpected(token, "a tag name"));
                }
                let view = self.songlists.borrow();
                let song = view.cursor_song().ok_or_else(|| {
                    CommandError::Failed("Cannot print: no song under cursor".to_string())
                })?;
                let text = self
                    .tags
                    .iter()
                    .map(|tag| format!("{tag}: {}", song.tag(tag).unwrap_or("<unknown>")))
                    .collect::<Vec<_>>()
                    .join(", ");
                self.ui.borrow_mut().set_info(text);
                Ok(())
            }
            _ => Err(CommandError::unexpected(token, "a tag name")),
        }
    }
}
