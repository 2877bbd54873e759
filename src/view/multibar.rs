//! Bottom line: command and search prompts, messages and pending keys

use ratatui::{
    layout::{Alignment, Position, Rect},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use crate::model::{InputMode, Message, Stylesheet, UiState};

/// `visual` tells whether the displayed list is selecting a range.
pub fn render_multibar(
    frame: &mut Frame,
    area: Rect,
    ui: &UiState,
    visual: bool,
    styles: &Stylesheet,
) {
    let prompt = match ui.mode {
        InputMode::Input => Some((':', "commandtext")),
        InputMode::Search => Some(('/', "searchtext")),
        InputMode::Normal => None,
    };

    if let Some((prefix, style)) = prompt {
        let text = format!("{prefix}{}", ui.input);
        let x = area.x + (text.chars().count() as u16).min(area.width.saturating_sub(1));
        frame.render_widget(Paragraph::new(Line::styled(text, styles.get(style))), area);
        frame.set_cursor_position(Position::new(x, area.y));
        return;
    }

    let message = match &ui.message {
        Some(Message::Info(text)) => Line::styled(text.clone(), styles.get("readout")),
        Some(Message::Error(text)) => Line::styled(text.clone(), styles.get("errortext")),
        None if visual => Line::styled("-- VISUAL --", styles.get("visualtext")),
        None => Line::default(),
    };
    frame.render_widget(Paragraph::new(message).style(styles.get("standard")), area);

    if !ui.pending_keys.is_empty() {
        let width = (ui.pending_keys.chars().count() as u16).min(area.width);
        let right = Rect::new(area.right() - width, area.y, width, 1);
        let pending = Paragraph::new(Line::styled(ui.pending_keys.clone(), styles.get("readout")))
            .alignment(Alignment::Right);
        frame.render_widget(pending, right);
    }
}
