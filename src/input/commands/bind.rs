//! `bind <keys> <command...>` and `unbind <keys>`

use std::cell::RefCell;
use std::rc::Rc;

use crate::input::bindings::BindingTable;
use crate::input::command::{Command, CommandError};
use crate::input::keys::{format_sequence, parse_sequence, Key};
use crate::input::lexer::{Token, TokenClass};

fn parse_keys(token: &Token) -> Result<Vec<Key>, CommandError> {
    match token.class {
        TokenClass::Identifier | TokenClass::Number | TokenClass::QuotedString => {
            parse_sequence(token.as_str()).map_err(|e| CommandError::Argument(e.to_string()))
        }
        _ => Err(CommandError::unexpected(token, "a key sequence")),
    }
}

pub struct Bind {
    bindings: Rc<RefCell<BindingTable>>,
    keys: Option<Vec<Key>>,
    words: Vec<String>,
}

impl Bind {
    pub fn new(bindings: Rc<RefCell<BindingTable>>) -> Self {
        Self {
            bindings,
            keys: None,
            words: Vec::new(),
        }
    }
}

impl Command for Bind {
    fn reset(&mut self) {
        self.keys = None;
        self.words.clear();
    }

    fn execute(&mut self, token: &Token) -> Result<(), CommandError> {
        if self.keys.is_none() {
            self.keys = Some(parse_keys(token)?);
            return Ok(());
        }
        match token.class {
            TokenClass::End => {
                if self.words.is_empty() {
                    return Err(CommandError::unexpected(token, "a command"));
                }
                let keys = self.keys.take().unwrap_or_default();
                self.bindings.borrow_mut().bind(keys, self.words.join(" "));
                Ok(())
            }
            TokenClass::Unknown => Err(CommandError::unexpected(token, "a command")),
            _ => {
                self.words.push(token.to_source());
                Ok(())
            }
        }
    }
}

pub struct Unbind {
    bindings: Rc<RefCell<BindingTable>>,
    keys: Option<Vec<Key>>,
}

impl Unbind {
    pub fn new(bindings: Rc<RefCell<BindingTable>>) -> Self {
        Self {
            bindings,
            keys: None,
        }
    }
}

impl Command for Unbind {
    fn reset(&mut self) {
        self.keys = None;
    }

    fn execute(&mut self, token: &Token) -> Result<(), CommandError> {
        let Some(keys) = &self.keys else {
            self.keys = Some(parse_keys(token)?);
            return Ok(());
        };
        if !token.is_end() {
            return Err(CommandError::unexpected(token, "END"));
        }
        match self.bindings.borrow_mut().unbind(keys) {
            Some(_) => Ok(()),
            None => Err(CommandError::Failed(format!(
                "No binding for '{}'",
                format_sequence(keys)
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Dispatcher;

    fn setup() -> (Dispatcher, Rc<RefCell<BindingTable>>) {
        let bindings = Rc::new(RefCell::new(BindingTable::new()));
        let mut dispatcher = Dispatcher::new();
        dispatcher
            .register("bind", Box::new(Bind::new(Rc::clone(&bindings))))
            .unwrap();
        dispatcher
            .register("unbind", Box::new(Unbind::new(Rc::clone(&bindings))))
            .unwrap();
        (dispatcher, bindings)
    }

    #[test]
    fn binds_the_rest_of_the_line() {
        let (mut d, bindings) = setup();
        d.dispatch("bind gg cursor home").unwrap();
        d.dispatch("bind <C-s> sort").unwrap();
        let table = bindings.borrow();
        assert_eq!(table.get(&parse_sequence("gg").unwrap()), Some("cursor home"));
        assert_eq!(table.get(&parse_sequence("<C-s>").unwrap()), Some("sort"));
    }

    #[test]
    fn quoted_arguments_stay_quoted() {
        let (mut d, bindings) = setup();
        d.dispatch(r#"bind x set topbar="a b""#).unwrap();
        assert_eq!(
            bindings.borrow().get(&parse_sequence("x").unwrap()),
            Some(r#"set topbar= "a b""#)
        );
    }

    #[test]
    fn missing_parts_are_errors() {
        let (mut d, bindings) = setup();
        let err = d.dispatch("bind").unwrap_err();
        assert_eq!(err.to_string(), "Unexpected END, expected a key sequence");
        let err = d.dispatch("bind x").unwrap_err();
        assert_eq!(err.to_string(), "Unexpected END, expected a command");
        assert!(bindings.borrow().is_empty());
    }

    #[test]
    fn unbind_removes_or_complains() {
        let (mut d, bindings) = setup();
        d.dispatch("bind gc cursor current").unwrap();
        d.dispatch("unbind gc").unwrap();
        assert!(bindings.borrow().is_empty());
        let err = d.dispatch("unbind gc").unwrap_err();
        assert_eq!(err.to_string(), "No binding for 'gc'");
        assert!(d.dispatch("unbind gc extra").is_err());
    }
}
