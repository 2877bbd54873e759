//! `inputmode <normal|input|search>`

use std::cell::RefCell;
use std::rc::Rc;

use crate::input::command::{Command, CommandError};
use crate::input::lexer::{Token, TokenClass};
use crate::model::{InputMode as Mode, UiState};

pub struct InputMode {
    ui: Rc<RefCell<UiState>>,
    mode: Option<Mode>,
}

impl InputMode {
    pub fn new(ui: Rc<RefCell<UiState>>) -> Self {
        Self { ui, mode: None }
    }
}

impl Command for InputMode {
    fn reset(&mut self) {
        self.mode = None;
    }

    fn execute(&mut self, token: &Token) -> Result<(), CommandError> {
        match token.class {
            TokenClass::Identifier if self.mode.is_none() => {
                self.mode = Some(match token.as_str() {
                    "normal" => Mode::Normal,
                    "input" => Mode::Input,
                    "search" => Mode::Search,
                    _ => return Err(CommandError::unexpected(token, "normal, input or search")),
                });
                Ok(())
            }
            TokenClass::End => {
                let mode = self
                    .mode
                    .take()
                    .ok_or_else(|| CommandError::unexpected(token, "normal, input or search"))?;
                self.ui.borrow_mut().set_mode(mode);
                Ok(())
            }
            _ => Err(CommandError::unexpected(token, "END")),
        }
    }
}
