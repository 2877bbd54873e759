//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `options`: Typed options store
//! - `song`: Song and tag model
//! - `songlist`: Songlists and the collection shown on screen
//! - `style`: Named styles and color parsing
//! - `player`: Playback service boundary and the shared player handle
//! - `ui`: Input mode, messages and flags for the view

mod options;
mod player;
mod song;
mod songlist;
mod style;
mod ui;

use std::cell::RefCell;
use std::rc::Rc;

use crate::input::BindingTable;

pub use options::{OptionError, OptionKind, OptionValue, Options};
pub use player::{
    add_all, delete_all, PlayState, PlaybackError, PlaybackService, Player, PlayerStatus, SeekTarget,
};
pub use song::{format_time, Song, SongId};
pub use songlist::{ListKind, Songlist, SonglistView};
pub use style::{parse_attribute, parse_color, Stylesheet};
pub use ui::{InputMode, Message, UiState};

#[cfg(test)]
pub(crate) use player::testing;
#[cfg(test)]
pub(crate) use songlist::tests::album_song;

/// Handles to everything commands and the view share.
///
/// Cloning is cheap and yields handles to the same state. The handles are
/// `Rc`, so the model and every command holding a piece of it stay on the
/// thread that created them.
#[derive(Clone, Default)]
pub struct AppModel {
    pub options: Rc<RefCell<Options>>,
    pub styles: Rc<RefCell<Stylesheet>>,
    pub bindings: Rc<RefCell<BindingTable>>,
    pub songlists: Rc<RefCell<SonglistView>>,
    pub ui: Rc<RefCell<UiState>>,
    pub player: Player,
}

impl AppModel {
    pub fn new() -> Self {
        Self {
            options: Rc::new(RefCell::new(Options::with_defaults())),
            ..Self::default()
        }
    }
}
