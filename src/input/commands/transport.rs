//! Argument-less playback controls: `pause`, `stop`, `next`, `previous`

use crate::input::command::{expect_end, Command, CommandError};
use crate::input::lexer::Token;
use crate::model::{PlayState, Player};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transport {
    /// Toggle between playing and paused
    Pause,
    Stop,
    Next,
    Previous,
}

impl Transport {
    fn verb(self) -> &'static str {
        match self {
            Transport::Pause => "pause",
            Transport::Stop => "stop",
            Transport::Next => "switch to next song",
            Transport::Previous => "switch to previous song",
        }
    }
}

pub struct TransportCommand {
    player: Player,
    action: Transport,
}

impl TransportCommand {
    pub fn new(player: Player, action: Transport) -> Self {
        Self { player, action }
    }
}

impl Command for TransportCommand {
    fn reset(&mut self) {}

    fn execute(&mut self, token: &Token) -> Result<(), CommandError> {
        expect_end(token)?;
        let action = self.action;
        self.player
            .call(|mpd| match action {
                Transport::Pause => {
                    let status = mpd.status()?;
                    mpd.pause(status.state == PlayState::Play)
                }
                Transport::Stop => mpd.stop(),
                Transport::Next => mpd.next(),
                Transport::Previous => mpd.previous(),
            })
            .map_err(|e| CommandError::playback(action.verb(), e))
    }
}
