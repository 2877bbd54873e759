//! `style <name> [foreground [background]] [attribute...]`

use std::cell::RefCell;
use std::rc::Rc;

use ratatui::style::{Color, Modifier, Style as TextStyle};

use crate::input::command::{Command, CommandError};
use crate::input::lexer::{Token, TokenClass};
use crate::model::{parse_attribute, parse_color, Stylesheet};

pub struct Style {
    styles: Rc<RefCell<Stylesheet>>,
    name: Option<String>,
    colors: Vec<Color>,
    modifiers: Modifier,
}

impl Style {
    pub fn new(styles: Rc<RefCell<Stylesheet>>) -> Self {
        Self {
            styles,
            name: None,
            colors: Vec::new(),
            modifiers: Modifier::empty(),
        }
    }

    fn add_word(&mut self, word: &str) -> Result<(), CommandError> {
        if let Some(modifier) = parse_attribute(word) {
            self.modifiers |= modifier;
            return Ok(());
        }
        let Some(color) = parse_color(word) else {
            return Err(CommandError::Argument(format!(
                "Unknown color or attribute '{word}'"
            )));
        };
        if self.colors.len() == 2 {
            return Err(CommandError::Argument(format!(
                "Too many colors for style '{}'",
                self.name.as_deref().unwrap_or_default()
            )));
        }
        self.colors.push(color);
        Ok(())
    }
}

impl Command for Style {
    fn reset(&mut self) {
        self.name = None;
        self.colors.clear();
        self.modifiers = Modifier::empty();
    }

    fn execute(&mut self, token: &Token) -> Result<(), CommandError> {
        match token.class {
            TokenClass::Identifier if self.name.is_none() => {
                self.name = Some(token.as_str().to_lowercase());
                Ok(())
            }
            TokenClass::Identifier | TokenClass::Number => self.add_word(token.as_str()),
            TokenClass::End => {
                let Some(name) = self.name.take() else {
                    return Err(CommandError::unexpected(token, "a style name"));
                };
                let mut style = TextStyle::default().add_modifier(self.modifiers);
                if let Some(fg) = self.colors.first() {
                    style = style.fg(*fg);
                }
                if let Some(bg) = self.colors.get(1) {
                    style = style.bg(*bg);
                }
                self.styles.borrow_mut().set(&name, style);
                Ok(())
            }
            _ => Err(CommandError::unexpected(token, "a color or attribute")),
        }
    }
}
