//! `cursor <motion>`: move the cursor of the displayed list
//!
//! Motions: `up`, `down`, `pgup`, `pgdn`, `home`, `end`, `current`,
//! `random`, `+N`/`-N` (relative), `N` (1-based row), and
//! `nextOf <tag>` / `prevOf <tag>` to jump between groups of songs sharing
//! a tag value.

use std::cell::RefCell;
use std::rc::Rc;

use rand::Rng;

use crate::input::command::{Command, CommandError};
use crate::input::lexer::{Token, TokenClass};
use crate::model::SonglistView;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Motion {
    By(i64),
    To(usize),
    PageUp,
    PageDown,
    Home,
    End,
    Current,
    Random,
    NextOf(String),
    PrevOf(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum State {
    Empty,
    AwaitingTag { forward: bool },
    Ready(Motion),
}

pub struct Cursor {
    songlists: Rc<RefCell<SonglistView>>,
    state: State,
}

impl Cursor {
    pub fn new(songlists: Rc<RefCell<SonglistView>>) -> Self {
        Self {
            songlists,
            state: State::Empty,
        }
    }

    fn parse_motion(token: &Token) -> Result<State, CommandError> {
        let motion = match token.as_str() {
            "up" => Motion::By(-1),
            "down" => Motion::By(1),
            "pgup" => Motion::PageUp,
            "pgdn" => Motion::PageDown,
            "home" => Motion::Home,
            "end" => Motion::End,
            "current" => Motion::Current,
            "random" => Motion::Random,
            "nextOf" => return Ok(State::AwaitingTag { forward: true }),
            "prevOf" => return Ok(State::AwaitingTag { forward: false }),
            _ => match token.to_int() {
                Some(n) if token.is_relative() => Motion::By(n),
                Some(n) if n > 0 => Motion::To(n as usize - 1),
                _ => return Err(CommandError::unexpected(token, "a cursor motion")),
            },
        };
        Ok(State::Ready(motion))
    }

    fn apply(&self, motion: Motion) -> Result<(), CommandError> {
        let mut view = self.songlists.borrow_mut();
        let page = view.page_size() as i64;
        let current = view.current_song_index();
        let list = view.active_mut();
        match motion {
            Motion::By(n) => list.move_cursor(n),
            Motion::To(index) => list.set_cursor(index),
            Motion::PageUp => list.move_cursor(-page),
            Motion::PageDown => list.move_cursor(page),
            Motion::Home => list.set_cursor(0),
            Motion::End => list.set_cursor(list.len().saturating_sub(1)),
            Motion::Current => {
                let index = current.ok_or_else(|| {
                    CommandError::Failed(
                        "Cannot move cursor: current song is not in this list".to_string(),
                    )
                })?;
                list.set_cursor(index);
            }
            Motion::Random => {
                if !list.is_empty() {
                    let index = rand::thread_rng().gen_range(0..list.len());
                    list.set_cursor(index);
                }
            }
            Motion::NextOf(tag) => {
                let index = list.next_of(&tag);
                list.set_cursor(index);
            }
            Motion::PrevOf(tag) => {
                let index = list.prev_of(&tag);
                list.set_cursor(index);
            }
        }
        Ok(())
    }
}

impl Command for Cursor {
    fn reset(&mut self) {
        self.state = State::Empty;
    }

    fn execute(&mut self, token: &Token) -> Result<(), CommandError> {
        let state = std::mem::replace(&mut self.state, State::Empty);
        match (state, token.class) {
            (State::Empty, TokenClass::End) => Err(CommandError::unexpected(token, "a cursor motion")),
            (State::AwaitingTag { .. }, TokenClass::End) => {
                Err(CommandError::unexpected(token, "a tag name"))
            }
            (State::Ready(motion), TokenClass::End) => self.apply(motion),
            (State::Empty, TokenClass::Identifier) => {
                self.state = Self::parse_motion(token)?;
                Ok(())
            }
            (State::AwaitingTag { forward }, TokenClass::Identifier | TokenClass::QuotedString) => {
                let tag = token.as_str().to_lowercase();
                self.state = State::Ready(if forward {
                    Motion::NextOf(tag)
                } else {
                    Motion::PrevOf(tag)
                });
                Ok(())
            }
            (State::AwaitingTag { .. }, _) => Err(CommandError::unexpected(token, "a tag name")),
            (State::Empty, _) => Err(CommandError::unexpected(token, "a cursor motion")),
            (State::Ready(_), _) => Err(CommandError::unexpected(token, "END")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Dispatcher;
    use crate::model::{album_song, ListKind, Song};

    fn setup() -> (Dispatcher, Rc<RefCell<SonglistView>>) {
        let songlists = Rc::new(RefCell::new(SonglistView::new()));
        songlists.borrow_mut().replace(
            ListKind::Queue,
            vec![
                album_song("A", "1"),
                album_song("A", "2"),
                album_song("B", "1"),
                album_song("B", "2"),
                album_song("C", "1"),
            ],
        );
        let mut dispatcher = Dispatcher::new();
        dispatcher
            .register("cursor", Box::new(Cursor::new(Rc::clone(&songlists))))
            .unwrap();
        (dispatcher, songlists)
    }

    fn cursor(songlists: &Rc<RefCell<SonglistView>>) -> usize {
        songlists.borrow().active().cursor()
    }

    #[test]
    fn basic_motions() {
        let (mut d, lists) = setup();
        d.dispatch("cursor down").unwrap();
        assert_eq!(cursor(&lists), 1);
        d.dispatch("cursor end").unwrap();
        assert_eq!(cursor(&lists), 4);
        d.dispatch("cursor -2").unwrap();
        assert_eq!(cursor(&lists), 2);
        d.dispatch("cursor home").unwrap();
        assert_eq!(cursor(&lists), 0);
        d.dispatch("cursor up").unwrap();
        assert_eq!(cursor(&lists), 0);
        d.dispatch("cursor 4").unwrap();
        assert_eq!(cursor(&lists), 3);
    }

    #[test]
    fn pages_use_viewport_height() {
        let (mut d, lists) = setup();
        lists.borrow_mut().update_viewport(2, false);
        d.dispatch("cursor pgdn").unwrap();
        assert_eq!(cursor(&lists), 2);
        d.dispatch("cursor pgup").unwrap();
        assert_eq!(cursor(&lists), 0);
    }

    #[test]
    fn group_jumps() {
        let (mut d, lists) = setup();
        d.dispatch("cursor nextOf album").unwrap();
        assert_eq!(cursor(&lists), 2);
        d.dispatch("cursor nextOf album").unwrap();
        assert_eq!(cursor(&lists), 4);
        d.dispatch("cursor prevOf album").unwrap();
        assert_eq!(cursor(&lists), 2);
    }

    #[test]
    fn current_song() {
        let (mut d, lists) = setup();
        let err = d.dispatch("cursor current").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot move cursor: current song is not in this list"
        );
        let playing: Song = album_song("B", "2");
        lists.borrow_mut().set_current_song(Some(playing));
        d.dispatch("cursor current").unwrap();
        assert_eq!(cursor(&lists), 3);
    }

    #[test]
    fn random_stays_in_bounds() {
        let (mut d, lists) = setup();
        for _ in 0..20 {
            d.dispatch("cursor random").unwrap();
            assert!(cursor(&lists) < 5);
        }
    }

    #[test]
    fn incomplete_or_excess_arguments() {
        let (mut d, lists) = setup();
        let err = d.dispatch("cursor nextOf").unwrap_err();
        assert_eq!(err.to_string(), "Unexpected END, expected a tag name");
        let err = d.dispatch("cursor").unwrap_err();
        assert_eq!(err.to_string(), "Unexpected END, expected a cursor motion");
        let err = d.dispatch("cursor down down").unwrap_err();
        assert_eq!(err.to_string(), "Unknown input 'down', expected END");
        assert!(d.dispatch("cursor sideways").is_err());
        assert_eq!(cursor(&lists), 0);
    }
}
