//! `volume <N|+N|-N|mute>`

use crate::input::command::{Command, CommandError};
use crate::input::lexer::{Token, TokenClass};
use crate::model::Player;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Change {
    Absolute(i64),
    Relative(i64),
    ToggleMute,
}

pub struct Volume {
    player: Player,
    change: Option<Change>,
    /// Volume before the last mute. Kept across invocations so that a second
    /// `volume mute` restores it.
    unmute_to: Option<u8>,
}

impl Volume {
    pub fn new(player: Player) -> Self {
        Self {
            player,
            change: None,
            unmute_to: None,
        }
    }

    fn apply(&mut self, change: Change) -> Result<(), CommandError> {
        let status = self
            .player
            .call(|mpd| mpd.status())
            .map_err(|e| CommandError::playback("set volume", e))?;
        let Some(current) = status.volume else {
            return Err(CommandError::Failed(
                "Cannot set volume: MPD has no mixer".to_string(),
            ));
        };

        let target = match change {
            Change::Absolute(n) => n.clamp(0, 100) as u8,
            Change::Relative(n) => (i64::from(current) + n).clamp(0, 100) as u8,
            Change::ToggleMute if current > 0 => 0,
            Change::ToggleMute => self.unmute_to.ok_or_else(|| {
                CommandError::Failed("Cannot unmute: no previous volume".to_string())
            })?,
        };

        self.player
            .call(|mpd| mpd.set_volume(target))
            .map_err(|e| CommandError::playback("set volume", e))?;

        if change == Change::ToggleMute {
            self.unmute_to = (current > 0).then_some(current);
        }
        Ok(())
    }
}

impl Command for Volume {
    fn reset(&mut self) {
        self.change = None;
    }

    fn execute(&mut self, token: &Token) -> Result<(), CommandError> {
        match token.class {
            TokenClass::End => match self.change.take() {
                Some(change) => self.apply(change),
                None => Err(CommandError::unexpected(token, "a volume")),
            },
            TokenClass::Identifier if self.change.is_none() => {
                let change = if token.as_str() == "mute" {
                    Change::ToggleMute
                } else {
                    match token.to_int() {
                        Some(n) if token.is_relative() => Change::Relative(n),
                        Some(n) => Change::Absolute(n),
                        None => return Err(CommandError::unexpected(token, "a volume")),
                    }
                };
                self.change = Some(change);
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
    use crate::model::testing::FakeService;

    fn setup() -> (Dispatcher, std::rc::Rc<std::cell::RefCell<Vec<String>>>) {
        let (player, calls) = FakeService::connected(1);
        let mut dispatcher = Dispatcher::new();
        dispatcher
            .register("volume", Box::new(Volume::new(player)))
            .unwrap();
        (dispatcher, calls)
    }

    #[test]
    fn absolute_and_relative() {
        let (mut d, calls) = setup();
        d.dispatch("volume +2").unwrap();
        d.dispatch("volume -10").unwrap();
        d.dispatch("volume 150").unwrap();
        assert_eq!(*calls.borrow(), vec!["setvol 52", "setvol 42", "setvol 100"]);
    }

    #[test]
    fn mute_remembers_previous_volume() {
        let (mut d, calls) = setup();
        d.dispatch("volume mute").unwrap();
        d.dispatch("volume mute").unwrap();
        assert_eq!(*calls.borrow(), vec!["setvol 0", "setvol 50"]);
    }

    #[test]
    fn unmute_without_memory_fails() {
        let (mut d, _) = setup();
        d.dispatch("volume 0").unwrap();
        let err = d.dispatch("volume mute").unwrap_err();
        assert_eq!(err.to_string(), "Cannot unmute: no previous volume");
    }

    #[test]
    fn bad_arguments() {
        let (mut d, calls) = setup();
        let err = d.dispatch("volume").unwrap_err();
        assert_eq!(err.to_string(), "Unexpected END, expected a volume");
        let err = d.dispatch("volume loud").unwrap_err();
        assert_eq!(err.to_string(), "Unknown input 'loud', expected a volume");
        assert!(d.dispatch("volume 1 2").is_err());
        assert!(calls.borrow().is_empty());
    }
}
