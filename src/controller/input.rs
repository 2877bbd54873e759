//! Key event handling

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::input::{format_sequence, Key, Resolution};
use crate::model::InputMode;

use super::AppController;

impl AppController {
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        let mode = self.model.ui.borrow().mode;
        match mode {
            InputMode::Normal => self.normal_key(key),
            InputMode::Input => self.input_key(key),
            InputMode::Search => self.search_key(key),
        }
    }

    /// Dispatch a binding whose sequence timed out.
    pub fn expire_keys(&mut self, now: Instant) {
        let expired = self.resolver.expire(now);
        self.update_pending_keys();
        if let Some(line) = expired {
            self.run_line(&line);
        }
    }

    pub(super) fn update_pending_keys(&mut self) {
        self.model.ui.borrow_mut().pending_keys = format_sequence(self.resolver.pending());
    }

    fn normal_key(&mut self, key: KeyEvent) {
        self.model.ui.borrow_mut().clear_message();

        if key.code == KeyCode::Esc && self.resolver.deadline().is_some() {
            self.resolver.cancel();
            self.update_pending_keys();
            return;
        }

        self.press_key(Key::from(key), Instant::now());
    }

    /// Resolve a bound key at `now`. A sequence that timed out before this
    /// key runs first.
    pub(super) fn press_key(&mut self, key: Key, now: Instant) {
        let resolutions = self.resolver.press(key, now);
        self.update_pending_keys();
        for resolution in resolutions {
            match resolution {
                Resolution::Dispatch(line) => self.run_line(&line),
                Resolution::Pending | Resolution::Unbound => {}
            }
        }
    }

    /// Line editing shared by the input and search modes. Returns the
    /// finished line on Enter.
    fn edit_line(&mut self, key: KeyEvent) -> Option<EditResult> {
        let mut ui = self.model.ui.borrow_mut();
        match key.code {
            KeyCode::Enter => Some(EditResult::Submit(std::mem::take(&mut ui.input))),
            KeyCode::Esc => Some(EditResult::Cancel),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(EditResult::Cancel)
            }
            KeyCode::Backspace if ui.input.is_empty() => Some(EditResult::Cancel),
            KeyCode::Backspace => {
                ui.input.pop();
                Some(EditResult::Changed)
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                ui.input.clear();
                Some(EditResult::Changed)
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                ui.input.push(c);
                Some(EditResult::Changed)
            }
            _ => None,
        }
    }

    fn input_key(&mut self, key: KeyEvent) {
        match self.edit_line(key) {
            Some(EditResult::Submit(line)) => {
                self.model.ui.borrow_mut().set_mode(InputMode::Normal);
                self.run_line(&line);
            }
            Some(EditResult::Cancel) => self.model.ui.borrow_mut().set_mode(InputMode::Normal),
            Some(EditResult::Changed) | None => {}
        }
    }

    fn search_key(&mut self, key: KeyEvent) {
        match self.edit_line(key) {
            Some(EditResult::Submit(_)) => {
                self.model.songlists.borrow_mut().commit_search();
                self.model.ui.borrow_mut().set_mode(InputMode::Normal);
            }
            Some(EditResult::Cancel) => {
                self.model.songlists.borrow_mut().cancel_search();
                self.model.ui.borrow_mut().set_mode(InputMode::Normal);
            }
            Some(EditResult::Changed) => {
                let term = self.model.ui.borrow().input.clone();
                self.model.songlists.borrow_mut().show_search(&term);
            }
            None => {}
        }
    }
}

enum EditResult {
    Submit(String),
    Cancel,
    Changed,
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::sync::mpsc;

    use super::*;
    use crate::input::commands::register_all;
    use crate::input::{load_defaults, Dispatcher};
    use crate::model::{album_song, AppModel, ListKind, Message};
    use crate::mpd::ServerConfig;

    fn controller() -> AppController {
        let model = AppModel::new();
        let mut dispatcher = Dispatcher::new();
        register_all(&mut dispatcher, &model).unwrap();
        load_defaults(&mut dispatcher).unwrap();
        model.songlists.borrow_mut().replace(
            ListKind::Queue,
            vec![album_song("A", "1"), album_song("A", "2"), album_song("B", "1")],
        );
        model.songlists.borrow_mut().replace(
            ListKind::Library,
            vec![album_song("A", "1"), album_song("B", "1")],
        );
        let (tx, _rx) = mpsc::unbounded_channel();
        let server = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            password: None,
        };
        AppController::new(model, dispatcher, Duration::from_millis(100), server, tx)
    }

    fn press(c: &mut AppController, code: KeyCode) {
        c.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(c: &mut AppController, text: &str) {
        for ch in text.chars() {
            press(c, KeyCode::Char(ch));
        }
    }

    fn cursor(c: &AppController) -> usize {
        c.model.songlists.borrow().active().cursor()
    }

    #[test]
    fn bound_keys_run_commands() {
        let mut c = controller();
        press(&mut c, KeyCode::Char('j'));
        press(&mut c, KeyCode::Down);
        assert_eq!(cursor(&c), 2);
        press(&mut c, KeyCode::Char('k'));
        assert_eq!(cursor(&c), 1);
    }

    #[test]
    fn ambiguous_prefix_waits_for_more_keys() {
        let mut c = controller();
        press(&mut c, KeyCode::Char('G'));
        assert_eq!(cursor(&c), 2);

        press(&mut c, KeyCode::Char('g'));
        assert_eq!(c.model.ui.borrow().pending_keys, "g");
        press(&mut c, KeyCode::Char('g'));
        assert_eq!(cursor(&c), 0);
        assert_eq!(c.model.ui.borrow().pending_keys, "");
    }

    #[test]
    fn escape_cancels_pending_sequence() {
        let mut c = controller();
        press(&mut c, KeyCode::Char('g'));
        press(&mut c, KeyCode::Esc);
        assert_eq!(c.model.ui.borrow().pending_keys, "");
        c.expire_keys(Instant::now() + Duration::from_secs(5));
        assert_eq!(cursor(&c), 0);
    }

    #[test]
    fn key_after_the_timeout_runs_the_shorter_binding_first() {
        let mut c = controller();
        c.run_line("bind g cursor down");
        let now = Instant::now();
        c.press_key(Key::char('g'), now);
        assert_eq!(cursor(&c), 0);

        // No tick in between: the late key itself has to flush the old `g`.
        c.press_key(Key::char('g'), now + Duration::from_secs(3));
        assert_eq!(cursor(&c), 1);
        assert_eq!(c.model.ui.borrow().pending_keys, "g");

        c.press_key(Key::char('g'), now + Duration::from_millis(3050));
        assert_eq!(cursor(&c), 0);
    }

    #[test]
    fn command_line_mode() {
        let mut c = controller();
        press(&mut c, KeyCode::Char(':'));
        assert_eq!(c.model.ui.borrow().mode, InputMode::Input);
        type_text(&mut c, "set center");
        press(&mut c, KeyCode::Enter);

        assert_eq!(c.model.ui.borrow().mode, InputMode::Normal);
        assert_eq!(c.model.options.borrow().bool_value("center"), Ok(true));
    }

    #[test]
    fn failed_commands_show_an_error() {
        let mut c = controller();
        press(&mut c, KeyCode::Char(':'));
        type_text(&mut c, "bogus");
        press(&mut c, KeyCode::Enter);
        assert_eq!(
            c.model.ui.borrow().message,
            Some(Message::Error("command not found: bogus".to_string()))
        );

        press(&mut c, KeyCode::Char('j'));
        assert_eq!(c.model.ui.borrow().message, None);
    }

    #[test]
    fn search_mode_filters_and_commits() {
        let mut c = controller();
        press(&mut c, KeyCode::Char('/'));
        type_text(&mut c, "b/");
        assert_eq!(c.model.songlists.borrow().active().len(), 1);
        press(&mut c, KeyCode::Enter);

        assert_eq!(c.model.ui.borrow().mode, InputMode::Normal);
        let lists = c.model.songlists.borrow();
        assert_eq!(lists.len(), 3);
        assert_eq!(lists.active().kind, ListKind::Search);
    }

    #[test]
    fn escape_leaves_search_without_a_list() {
        let mut c = controller();
        press(&mut c, KeyCode::Char('/'));
        type_text(&mut c, "a");
        press(&mut c, KeyCode::Esc);
        assert_eq!(c.model.songlists.borrow().len(), 2);
        assert!(c.model.songlists.borrow().is_queue());
    }
}
