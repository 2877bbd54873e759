//! `seek <seconds|+seconds|-seconds>`

use crate::input::command::{Command, CommandError};
use crate::input::lexer::{Token, TokenClass};
use crate::model::{Player, SeekTarget};

pub struct Seek {
    player: Player,
    target: Option<SeekTarget>,
}

impl Seek {
    pub fn new(player: Player) -> Self {
        Self {
            player,
            target: None,
        }
    }
}

impl Command for Seek {
    fn reset(&mut self) {
        self.target = None;
    }

    fn execute(&mut self, token: &Token) -> Result<(), CommandError> {
        match token.class {
            TokenClass::End => {
                let Some(target) = self.target.take() else {
                    return Err(CommandError::unexpected(token, "a position in seconds"));
                };
                self.player
                    .call(|mpd| mpd.seek(target))
                    .map_err(|e| CommandError::playback("seek", e))
            }
            TokenClass::Identifier if self.target.is_none() => {
                let target = match token.to_int() {
                    Some(n) if token.is_relative() => SeekTarget::Relative(n),
                    Some(n) => SeekTarget::Absolute(u32::try_from(n).map_err(|_| {
                        CommandError::Argument(format!("Position out of range: {n}"))
                    })?),
                    None => return Err(CommandError::unexpected(token, "a position in seconds")),
                };
                self.target = Some(target);
                Ok(())
            }
            _ => Err(CommandError::unexpected(token, "END")),
        }
    }
}
