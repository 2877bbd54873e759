//! The incremental command protocol

use crate::model::{OptionError, PlaybackError};

use super::lexer::Token;

/// A reusable command, driven one token at a time by the dispatcher.
///
/// Instances are built once at startup and live in the registry for the
/// whole session. Before each invocation the dispatcher calls [`reset`];
/// after that [`execute`] receives every token of the line, ending with the
/// `End` token. Implementations must defer side effects on shared state until
/// they receive `End`, so that an error anywhere in the argument list leaves
/// everything untouched.
///
/// [`reset`]: Command::reset
/// [`execute`]: Command::execute
pub trait Command {
    /// Clear per-invocation state. Must not touch shared collaborators.
    fn reset(&mut self);

    /// Consume one token. Returning an error aborts the line.
    fn execute(&mut self, token: &Token) -> Result<(), CommandError>;
}

/// Errors a command reports back to the user. Messages are rendered as-is.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// The token stream does not fit the command's grammar
    #[error("{0}")]
    Argument(String),

    /// Valid syntax that cannot be carried out
    #[error("{0}")]
    Failed(String),

    #[error(transparent)]
    Option(#[from] OptionError),

    /// Request rejected by the playback service, message kept verbatim
    #[error(transparent)]
    Playback(PlaybackError),
}

impl CommandError {
    /// Standard complaint about a token the command cannot use here.
    pub fn unexpected(token: &Token, expected: &str) -> Self {
        if token.is_end() {
            Self::Argument(format!("Unexpected END, expected {expected}"))
        } else {
            Self::Argument(format!("Unknown input '{token}', expected {expected}"))
        }
    }

    /// Wrap a playback failure. An unavailable service gets a message naming
    /// the action; anything the service said is passed through unchanged.
    pub fn playback(action: &str, err: PlaybackError) -> Self {
        match err {
            PlaybackError::NotConnected => Self::Failed(format!("Cannot {action}: {err}")),
            other => Self::Playback(other),
        }
    }
}

/// Shorthand for commands that take no arguments at all.
pub fn expect_end(token: &Token) -> Result<(), CommandError> {
    if token.is_end() {
        Ok(())
    } else {
        Err(CommandError::unexpected(token, "END"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::lexer::TokenClass;

    #[test]
    fn unexpected_token_messages() {
        let end = Token::end();
        let word = Token::new(TokenClass::Identifier, "bogus");
        assert_eq!(
            CommandError::unexpected(&end, "a key sequence").to_string(),
            "Unexpected END, expected a key sequence"
        );
        assert_eq!(
            CommandError::unexpected(&word, "END").to_string(),
            "Unknown input 'bogus', expected END"
        );
    }

    #[test]
    fn playback_errors_keep_service_messages() {
        let offline = CommandError::playback("play", PlaybackError::NotConnected);
        assert_eq!(offline.to_string(), "Cannot play: not connected to MPD");

        let rejected = CommandError::playback(
            "play",
            PlaybackError::Rejected("No such song".to_string()),
        );
        assert_eq!(rejected.to_string(), "No such song");
    }

    #[test]
    fn expect_end_accepts_only_end() {
        assert!(expect_end(&Token::end()).is_ok());
        assert!(expect_end(&Token::new(TokenClass::Identifier, "x")).is_err());
    }
}
