//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by screen region:
//!
//! - `utils`: Shared utility functions (truncation, column widths)
//! - `topbar`: The templated status area at the top
//! - `songlist`: The active song list
//! - `multibar`: Prompts and messages on the bottom line

mod multibar;
mod songlist;
mod topbar;
mod utils;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{AppModel, Message, OptionError, Options};

use topbar::TopbarContext;

pub struct AppView;

/// The options that shape the screen.
struct ScreenOptions {
    topbar: String,
    columns: Vec<String>,
    center: bool,
}

impl ScreenOptions {
    fn from_options(options: &Options) -> Result<Self, OptionError> {
        Ok(Self {
            topbar: options.string_value("topbar")?.to_string(),
            columns: options.list_value("columns")?,
            center: options.bool_value("center")?,
        })
    }
}

impl AppView {
    /// Draw the whole screen. Rendering also records the viewport height so
    /// that paging and centering follow the terminal size.
    pub fn render(frame: &mut Frame, model: &AppModel) {
        let screen = ScreenOptions::from_options(&model.options.borrow());
        let ScreenOptions {
            topbar: template,
            columns,
            center,
        } = match screen {
            Ok(screen) => screen,
            Err(e) => {
                // Draw the bare list and keep the problem on screen
                let text = e.to_string();
                let mut ui = model.ui.borrow_mut();
                if ui.message != Some(Message::Error(text.clone())) {
                    tracing::error!(error = %e, "Cannot read display options");
                    ui.set_error(text);
                }
                ScreenOptions {
                    topbar: String::new(),
                    columns: Vec::new(),
                    center: false,
                }
            }
        };
        let rows = topbar::parse_template(&template);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(rows.len() as u16), // Top bar
                Constraint::Min(0),                    // Song list
                Constraint::Length(1),                 // Multibar
            ])
            .split(frame.area());

        model
            .songlists
            .borrow_mut()
            .update_viewport(songlist::list_height(chunks[1]), center);

        let styles = model.styles.borrow();
        let ui = model.ui.borrow();
        let lists = model.songlists.borrow();

        let context = TopbarContext {
            status: &ui.status,
            song: lists.current_song(),
            songlists: &lists,
        };
        topbar::render_topbar(frame, chunks[0], &rows, &context, &styles);

        songlist::render_songlist(
            frame,
            chunks[1],
            lists.active(),
            &columns,
            lists.current_song_index(),
            &styles,
        );

        let visual = lists.active().in_visual_mode();
        multibar::render_multibar(frame, chunks[2], &ui, visual, &styles);
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::input::commands::register_all;
    use crate::input::{load_defaults, Dispatcher};
    use crate::model::{album_song, ListKind};

    #[test]
    fn default_screen_renders() {
        let model = AppModel::new();
        let mut dispatcher = Dispatcher::new();
        register_all(&mut dispatcher, &model).unwrap();
        load_defaults(&mut dispatcher).unwrap();
        let songs = (1..=30).map(|n| album_song("A", &n.to_string())).collect();
        model.songlists.borrow_mut().replace(ListKind::Queue, songs);

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|f| AppView::render(f, &model)).unwrap();

        let lists = model.songlists.borrow();
        assert!(lists.page_size() > 1);
        assert!(lists.page_size() < 20);
        assert_eq!(model.ui.borrow().message, None);
    }

    #[test]
    fn missing_display_option_is_reported() {
        let model = AppModel::new();
        *model.options.borrow_mut() = Options::new();

        let mut terminal = Terminal::new(TestBackend::new(40, 5)).unwrap();
        terminal.draw(|f| AppView::render(f, &model)).unwrap();

        assert_eq!(
            model.ui.borrow().message,
            Some(Message::Error("No such option: topbar".to_string()))
        );
        let buffer = terminal.backend().buffer();
        let bottom: String = (0..buffer.area.width)
            .map(|x| buffer[(x, 4)].symbol().to_string())
            .collect();
        assert!(bottom.starts_with("No such option: topbar"));
    }
}
