//! `select <visual|toggle|nearby tag...>`: change the selection
//!
//! `visual` starts or ends a range that follows the cursor, `toggle` flips
//! the song under the cursor and moves down, and `nearby` selects the run of
//! songs around the cursor sharing the given tags.

use std::cell::RefCell;
use std::rc::Rc;

use crate::input::command::{Command, CommandError};
use crate::input::lexer::{Token, TokenClass};
use crate::model::SonglistView;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Action {
    Visual,
    Toggle,
    Nearby(Vec<String>),
}

pub struct Select {
    songlists: Rc<RefCell<SonglistView>>,
    action: Option<Action>,
}

impl Select {
    pub fn new(songlists: Rc<RefCell<SonglistView>>) -> Self {
        Self {
            songlists,
            action: None,
        }
    }
}

impl Command for Select {
    fn reset(&mut self) {
        self.action = None;
    }

    fn execute(&mut self, token: &Token) -> Result<(), CommandError> {
        match (&mut self.action, token.class) {
            (None, TokenClass::Identifier) => {
                self.action = Some(match token.as_str() {
                    "visual" => Action::Visual,
                    "toggle" => Action::Toggle,
                    "nearby" => Action::Nearby(Vec::new()),
                    _ => return Err(CommandError::unexpected(token, "visual, toggle or nearby")),
                });
                Ok(())
            }
            (Some(Action::Nearby(tags)), TokenClass::Identifier | TokenClass::QuotedString) => {
                tags.push(token.as_str().to_lowercase());
                Ok(())
            }
            (_, TokenClass::End) => {
                let action = self
                    .action
                    .take()
                    .ok_or_else(|| CommandError::unexpected(token, "visual, toggle or nearby"))?;
                let mut view = self.songlists.borrow_mut();
                let list = view.active_mut();
                match action {
                    Action::Visual => list.toggle_visual(),
                    Action::Toggle => {
                        list.toggle_selected(list.cursor());
                        list.move_cursor(1);
                    }
                    Action::Nearby(tags) if tags.is_empty() => {
                        return Err(CommandError::unexpected(token, "a tag name"));
                    }
                    Action::Nearby(tags) => list.select_nearby(&tags),
                }
                Ok(())
            }
            _ => Err(CommandError::unexpected(token, "END")),
        }
    }
}
