//! `isolate <tag>...`: open a list of the songs that share the given tags
//! with the song under the cursor
//!
//! Songs are taken from the library when it has been loaded and sorted by
//! the `sort` option.

use std::cell::RefCell;
use std::rc::Rc;

use crate::input::command::{Command, CommandError};
use crate::input::lexer::{Token, TokenClass};
use crate::model::{ListKind, Options, SonglistView};

pub struct Isolate {
    songlists: Rc<RefCell<SonglistView>>,
    options: Rc<RefCell<Options>>,
    tags: Vec<String>,
}

impl Isolate {
    pub fn new(songlists: Rc<RefCell<SonglistView>>, options: Rc<RefCell<Options>>) -> Self {
        Self {
            songlists,
            options,
            tags: Vec::new(),
        }
    }
}

impl Command for Isolate {
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
                let tags = std::mem::take(&mut self.tags);
                if tags.is_empty() {
                    return Err(CommandError::unexpected(token, "a tag name"));
                }
                let sort = self.options.borrow().list_value("sort")?;

                let mut view = self.songlists.borrow_mut();
                let song = view.cursor_song().cloned().ok_or_else(|| {
                    CommandError::Failed("Cannot isolate: no song under cursor".to_string())
                })?;
                let source = match view.list(ListKind::Library) {
                    Some(library) if !library.is_empty() => library,
                    _ => view.active(),
                };
                let mut isolated = source.isolate(&song, &tags);
                if isolated.is_empty() {
                    return Err(CommandError::Failed(format!(
                        "No songs match {}",
                        isolated.name
                    )));
                }
                isolated.sort_by_tags(&sort);
                view.push(isolated);
                Ok(())
            }
            _ => Err(CommandError::unexpected(token, "a tag name")),
        }
    }
}
