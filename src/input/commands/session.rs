//! `redraw` and `quit`

use std::cell::RefCell;
use std::rc::Rc;

use crate::input::command::{expect_end, Command, CommandError};
use crate::input::lexer::Token;
use crate::model::UiState;

pub struct Redraw {
    ui: Rc<RefCell<UiState>>,
}

impl Redraw {
    pub fn new(ui: Rc<RefCell<UiState>>) -> Self {
        Self { ui }
    }
}

impl Command for Redraw {
    fn reset(&mut self) {}

    fn execute(&mut self, token: &Token) -> Result<(), CommandError> {
        expect_end(token)?;
        self.ui.borrow_mut().redraw = true;
        Ok(())
    }
}

pub struct Quit {
    ui: Rc<RefCell<UiState>>,
}

impl Quit {
    pub fn new(ui: Rc<RefCell<UiState>>) -> Self {
        Self { ui }
    }
}

impl Command for Quit {
    fn reset(&mut self) {}

    fn execute(&mut self, token: &Token) -> Result<(), CommandError> {
        expect_end(token)?;
        tracing::info!("Quit requested");
        self.ui.borrow_mut().should_quit = true;
        Ok(())
    }
}
