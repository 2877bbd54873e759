//! Command registry and line dispatch
//!
//! The dispatcher owns one pooled instance per command name. Dispatching a
//! line looks up the instance named by the first token, resets it, and feeds
//! it the remaining tokens until it errors or has consumed `End`.
//!
//! The registry is not thread safe and is not meant to be: all dispatch
//! happens on the thread that owns the UI. The command instances hold
//! `Rc` handles, so the compiler keeps a `Dispatcher` on that thread.

use std::collections::HashMap;

use super::command::{Command, CommandError};
use super::lexer::{tokenize, TokenClass};

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("command not found: {0}")]
    NotFound(String),

    #[error("Expected a command name, got '{0}'")]
    NotACommand(String),

    #[error(transparent)]
    Command(#[from] CommandError),
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("command '{0}' is registered twice")]
    Duplicate(String),
}

#[derive(Default)]
pub struct Dispatcher {
    commands: HashMap<&'static str, Box<dyn Command>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        name: &'static str,
        command: Box<dyn Command>,
    ) -> Result<(), RegistryError> {
        if self.commands.contains_key(name) {
            return Err(RegistryError::Duplicate(name.to_string()));
        }
        self.commands.insert(name, command);
        Ok(())
    }

    #[cfg(test)]
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Registered command names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.commands.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Tokenize and run one command line. A blank line is a no-op.
    pub fn dispatch(&mut self, line: &str) -> Result<(), DispatchError> {
        let mut tokens = tokenize(line);
        let Some(first) = tokens.next() else {
            return Ok(());
        };

        match first.class {
            TokenClass::End => return Ok(()),
            TokenClass::Identifier => {}
            _ => return Err(DispatchError::NotACommand(first.to_string())),
        }

        let command = self
            .commands
            .get_mut(first.as_str())
            .ok_or_else(|| DispatchError::NotFound(first.to_string()))?;

        tracing::debug!(line, "Dispatching command");
        command.reset();
        for token in tokens {
            if let Err(e) = command.execute(&token) {
                tracing::debug!(command = first.as_str(), error = %e, "Command failed");
                return Err(e.into());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::input::lexer::Token;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every call made to it; fails on the token `fail`.
    #[derive(Default)]
    pub(crate) struct Recorder {
        pub log: Rc<RefCell<Vec<String>>>,
    }

    impl Command for Recorder {
        fn reset(&mut self) {
            self.log.borrow_mut().push("reset".to_string());
        }

        fn execute(&mut self, token: &Token) -> Result<(), CommandError> {
            self.log.borrow_mut().push(token.to_string());
            if token.as_str() == "fail" {
                return Err(CommandError::Argument("recorder failed".to_string()));
            }
            Ok(())
        }
    }

    fn dispatcher_with_recorder() -> (Dispatcher, Rc<RefCell<Vec<String>>>) {
        let recorder = Recorder::default();
        let log = Rc::clone(&recorder.log);
        let mut dispatcher = Dispatcher::new();
        dispatcher.register("record", Box::new(recorder)).unwrap();
        (dispatcher, log)
    }

    #[test]
    fn feeds_every_token_including_end() {
        let (mut dispatcher, log) = dispatcher_with_recorder();
        dispatcher.dispatch("record a \"b c\"").unwrap();
        assert_eq!(*log.borrow(), vec!["reset", "a", "b c", "END"]);
    }

    #[test]
    fn unknown_command_touches_nothing() {
        let (mut dispatcher, log) = dispatcher_with_recorder();
        let err = dispatcher.dispatch("frobnicate foo").unwrap_err();
        assert!(matches!(err, DispatchError::NotFound(ref name) if name == "frobnicate"));
        assert_eq!(err.to_string(), "command not found: frobnicate");
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn names_are_case_sensitive() {
        let (mut dispatcher, log) = dispatcher_with_recorder();
        assert!(dispatcher.dispatch("Record").is_err());
        assert!(dispatcher.dispatch("rec").is_err());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn error_aborts_remaining_tokens() {
        let (mut dispatcher, log) = dispatcher_with_recorder();
        let err = dispatcher.dispatch("record a fail b c").unwrap_err();
        assert_eq!(err.to_string(), "recorder failed");
        assert_eq!(*log.borrow(), vec!["reset", "a", "fail"]);
    }

    #[test]
    fn each_line_resets_first() {
        let (mut dispatcher, log) = dispatcher_with_recorder();
        dispatcher.dispatch("record x").unwrap();
        dispatcher.dispatch("record").unwrap();
        assert_eq!(*log.borrow(), vec!["reset", "x", "END", "reset", "END"]);
    }

    #[test]
    fn blank_lines_are_no_ops() {
        let (mut dispatcher, log) = dispatcher_with_recorder();
        dispatcher.dispatch("").unwrap();
        dispatcher.dispatch("   ").unwrap();
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn first_token_must_be_an_identifier() {
        let (mut dispatcher, _) = dispatcher_with_recorder();
        let err = dispatcher.dispatch("\"record\" a").unwrap_err();
        assert!(matches!(err, DispatchError::NotACommand(_)));
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let (mut dispatcher, _) = dispatcher_with_recorder();
        let err = dispatcher.register("record", Box::new(Recorder::default())).unwrap_err();
        assert!(matches!(err, RegistryError::Duplicate(ref name) if name == "record"));
        assert_eq!(dispatcher.names(), vec!["record"]);
    }
}
