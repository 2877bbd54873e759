//! `set`: change options
//!
//! ```text
//! set center            boolean on
//! set nocenter          boolean off
//! set center!           boolean toggle
//! set columns=a,b,c     string value
//! set topbar="a b"      string value given as a separate quoted token
//! ```
//!
//! Several assignments may share a line. All are checked against the store
//! while parsing and only applied once the whole line is valid.

use std::cell::RefCell;
use std::rc::Rc;

use crate::input::command::{Command, CommandError};
use crate::input::lexer::{Token, TokenClass};
use crate::model::{OptionError, OptionKind, OptionValue, Options};

pub struct Set {
    options: Rc<RefCell<Options>>,
    assignments: Vec<(String, OptionValue)>,
    /// Option named by a trailing `name=` whose value is the next token
    awaiting_value: Option<(String, OptionKind)>,
}

impl Set {
    pub fn new(options: Rc<RefCell<Options>>) -> Self {
        Self {
            options,
            assignments: Vec::new(),
            awaiting_value: None,
        }
    }

    fn value_for(name: &str, kind: OptionKind, text: &str) -> Result<OptionValue, CommandError> {
        match kind {
            OptionKind::Str => Ok(OptionValue::Str(text.to_string())),
            OptionKind::Bool => match text.to_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Ok(OptionValue::Bool(true)),
                "false" | "no" | "off" | "0" => Ok(OptionValue::Bool(false)),
                _ => Err(CommandError::Argument(format!(
                    "Invalid value '{text}' for boolean option '{name}'"
                ))),
            },
        }
    }

    /// Value the option will have once the pending assignments are applied.
    fn effective_bool(&self, name: &str) -> Result<bool, OptionError> {
        let pending = self
            .assignments
            .iter()
            .rev()
            .find(|(n, _)| n.eq_ignore_ascii_case(name));
        match pending {
            Some((_, OptionValue::Bool(b))) => Ok(*b),
            _ => self.options.borrow().bool_value(name),
        }
    }

    fn parse_word(&mut self, word: &str) -> Result<(), CommandError> {
        if let Some((name, value)) = word.split_once('=') {
            let kind = self.options.borrow().kind(name)?;
            if value.is_empty() {
                self.awaiting_value = Some((name.to_string(), kind));
            } else {
                let value = Self::value_for(name, kind, value)?;
                self.assignments.push((name.to_string(), value));
            }
            return Ok(());
        }

        if let Some(name) = word.strip_suffix('!') {
            let toggled = !self.effective_bool(name)?;
            self.assignments.push((name.to_string(), OptionValue::Bool(toggled)));
            return Ok(());
        }

        let options = self.options.borrow();
        let (name, value) = match word.strip_prefix("no") {
            Some(name) if !options.is_registered(word) && options.is_registered(name) => {
                (name, false)
            }
            _ => (word, true),
        };
        match options.kind(name)? {
            OptionKind::Bool => {
                drop(options);
                self.assignments.push((name.to_string(), OptionValue::Bool(value)));
                Ok(())
            }
            OptionKind::Str => Err(OptionError::WrongKind {
                name: name.to_string(),
                expected: OptionKind::Str,
            }
            .into()),
        }
    }
}

impl Command for Set {
    fn reset(&mut self) {
        self.assignments.clear();
        self.awaiting_value = None;
    }

    fn execute(&mut self, token: &Token) -> Result<(), CommandError> {
        if let Some((name, kind)) = self.awaiting_value.take() {
            let text = match token.class {
                TokenClass::End => "",
                TokenClass::Unknown => return Err(CommandError::unexpected(token, "a value")),
                _ => token.as_str(),
            };
            let value = Self::value_for(&name, kind, text)?;
            self.assignments.push((name, value));
            if !token.is_end() {
                return Ok(());
            }
        }

        match token.class {
            TokenClass::Identifier | TokenClass::Number => self.parse_word(token.as_str()),
            TokenClass::End => {
                if self.assignments.is_empty() {
                    return Err(CommandError::unexpected(token, "an option"));
                }
                let mut options = self.options.borrow_mut();
                for (name, value) in self.assignments.drain(..) {
                    options.set(&name, value)?;
                }
                Ok(())
            }
            _ => Err(CommandError::unexpected(token, "an option")),
        }
    }
}
