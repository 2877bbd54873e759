//! UI state shared between commands, the controller and the view

use super::player::PlayerStatus;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing a command line
    Input,
    /// Typing a search term
    Search,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Message {
    Info(String),
    Error(String),
}

#[derive(Debug, Default)]
pub struct UiState {
    pub mode: InputMode,
    /// Text being edited in input and search modes
    pub input: String,
    pub message: Option<Message>,
    /// Keys typed so far of an incomplete binding
    pub pending_keys: String,
    pub status: PlayerStatus,
    pub should_quit: bool,
    pub redraw: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_mode(&mut self, mode: InputMode) {
        if self.mode != mode {
            tracing::debug!(?mode, "Input mode changed");
        }
        self.mode = mode;
        self.input.clear();
    }

    pub fn set_info(&mut self, text: impl Into<String>) {
        self.message = Some(Message::Info(text.into()));
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.message = Some(Message::Error(text.into()));
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }
}
