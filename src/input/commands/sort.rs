//! `sort [tag...]`: sort the displayed list
//!
//! Without arguments the tags in the `sort` option are used. The queue is
//! ordered by MPD and is never sorted locally.

use std::cell::RefCell;
use std::rc::Rc;

use crate::input::command::{Command, CommandError};
use crate::input::lexer::{Token, TokenClass};
use crate::model::{Options, SonglistView};

pub struct Sort {
    songlists: Rc<RefCell<SonglistView>>,
    options: Rc<RefCell<Options>>,
    tags: Vec<String>,
}

impl Sort {
    pub fn new(songlists: Rc<RefCell<SonglistView>>, options: Rc<RefCell<Options>>) -> Self {
        Self {
            songlists,
            options,
            tags: Vec::new(),
        }
    }
}

impl Command for Sort {
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
                let tags = if self.tags.is_empty() {
                    self.options.borrow().list_value("sort")?
                } else {
                    std::mem::take(&mut self.tags)
                };
                let mut view = self.songlists.borrow_mut();
                if view.is_queue() {
                    return Err(CommandError::Failed("Cannot sort the queue".to_string()));
                }
                view.active_mut().sort_by_tags(&tags);
                Ok(())
            }
            _ => Err(CommandError::unexpected(token, "a tag name")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Dispatcher;
    use crate::model::{album_song, ListKind, OptionValue};

    fn setup() -> (Dispatcher, Rc<RefCell<SonglistView>>, Rc<RefCell<Options>>) {
        let lists = Rc::new(RefCell::new(SonglistView::new()));
        let options = Rc::new(RefCell::new(Options::with_defaults()));
        lists.borrow_mut().replace(
            ListKind::Library,
            vec![
                album_song("B", "1"),
                album_song("A", "2"),
                album_song("A", "1"),
            ],
        );
        let mut d = Dispatcher::new();
        d.register(
            "sort",
            Box::new(Sort::new(Rc::clone(&lists), Rc::clone(&options))),
        )
        .unwrap();
        (d, lists, options)
    }

    fn titles(lists: &Rc<RefCell<SonglistView>>) -> Vec<String> {
        lists
            .borrow()
            .active()
            .songs()
            .iter()
            .filter_map(|s| s.file().map(str::to_string))
            .collect()
    }

    #[test]
    fn refuses_the_queue() {
        let (mut d, _, _) = setup();
        let err = d.dispatch("sort album").unwrap_err();
        assert_eq!(err.to_string(), "Cannot sort the queue");
    }

    #[test]
    fn explicit_tags() {
        let (mut d, lists, _) = setup();
        lists.borrow_mut().cycle(true);
        d.dispatch("sort album title").unwrap();
        assert_eq!(titles(&lists), vec!["A/1.flac", "A/2.flac", "B/1.flac"]);
    }

    #[test]
    fn falls_back_to_sort_option() {
        let (mut d, lists, options) = setup();
        options
            .borrow_mut()
            .set("sort", OptionValue::Str("title,album".into()))
            .unwrap();
        lists.borrow_mut().cycle(true);
        d.dispatch("sort").unwrap();
        assert_eq!(titles(&lists), vec!["A/1.flac", "B/1.flac", "A/2.flac"]);
    }
}
