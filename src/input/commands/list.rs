//! `list <next|previous|N|duplicate|remove>`: switch between songlists,
//! copy the displayed one or close it

use std::cell::RefCell;
use std::rc::Rc;

use crate::input::command::{Command, CommandError};
use crate::input::lexer::{Token, TokenClass};
use crate::model::SonglistView;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Target {
    Next,
    Previous,
    /// 1-based list number
    Number(i64),
    Duplicate,
    Remove,
}

const TARGETS: &str = "next, previous, duplicate, remove or a number";

pub struct List {
    songlists: Rc<RefCell<SonglistView>>,
    target: Option<Target>,
}

impl List {
    pub fn new(songlists: Rc<RefCell<SonglistView>>) -> Self {
        Self {
            songlists,
            target: None,
        }
    }
}

impl Command for List {
    fn reset(&mut self) {
        self.target = None;
    }

    fn execute(&mut self, token: &Token) -> Result<(), CommandError> {
        match token.class {
            TokenClass::Identifier if self.target.is_none() => {
                self.target = Some(match (token.as_str(), token.to_int()) {
                    ("next", _) => Target::Next,
                    ("previous" | "prev", _) => Target::Previous,
                    ("duplicate", _) => Target::Duplicate,
                    ("remove", _) => Target::Remove,
                    (_, Some(n)) if !token.is_relative() => Target::Number(n),
                    _ => return Err(CommandError::unexpected(token, TARGETS)),
                });
                Ok(())
            }
            TokenClass::End => {
                let target = self
                    .target
                    .take()
                    .ok_or_else(|| CommandError::unexpected(token, TARGETS))?;
                let mut view = self.songlists.borrow_mut();
                match target {
                    Target::Next => view.cycle(true),
                    Target::Previous => view.cycle(false),
                    Target::Number(n) => {
                        let selected = usize::try_from(n - 1).is_ok_and(|i| view.select(i));
                        if !selected {
                            return Err(CommandError::Failed(format!("No such list: {n}")));
                        }
                    }
                    Target::Duplicate => view.duplicate_active(),
                    Target::Remove => {
                        if !view.remove_active() {
                            return Err(CommandError::Failed(
                                "Cannot remove the queue or the library".to_string(),
                            ));
                        }
                    }
                }
                Ok(())
            }
            _ => Err(CommandError::unexpected(token, "END")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Dispatcher;

    #[test]
    fn cycles_and_selects() {
        let lists = Rc::new(RefCell::new(SonglistView::new()));
        let mut d = Dispatcher::new();
        d.register("list", Box::new(List::new(Rc::clone(&lists))))
            .unwrap();

        d.dispatch("list next").unwrap();
        assert_eq!(lists.borrow().active_index(), 1);
        d.dispatch("list next").unwrap();
        assert_eq!(lists.borrow().active_index(), 0);
        d.dispatch("list previous").unwrap();
        assert_eq!(lists.borrow().active_index(), 1);
        d.dispatch("list 1").unwrap();
        assert_eq!(lists.borrow().active_index(), 0);

        let err = d.dispatch("list 9").unwrap_err();
        assert_eq!(err.to_string(), "No such list: 9");
        assert!(d.dispatch("list 0").is_err());
        assert!(d.dispatch("list").is_err());
        assert_eq!(lists.borrow().active_index(), 0);
    }

    #[test]
    fn duplicates_and_removes() {
        let lists = Rc::new(RefCell::new(SonglistView::new()));
        let mut d = Dispatcher::new();
        d.register("list", Box::new(List::new(Rc::clone(&lists))))
            .unwrap();

        let err = d.dispatch("list remove").unwrap_err();
        assert_eq!(err.to_string(), "Cannot remove the queue or the library");

        d.dispatch("list 2").unwrap();
        d.dispatch("list duplicate").unwrap();
        assert_eq!(lists.borrow().len(), 3);
        assert_eq!(lists.borrow().active().name, "Library (copy)");

        d.dispatch("list remove").unwrap();
        assert_eq!(lists.borrow().len(), 2);
        assert_eq!(lists.borrow().active_index(), 1);

        let err = d.dispatch("list sideways").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown input 'sideways', expected next, previous, duplicate, remove or a number"
        );
    }
}
