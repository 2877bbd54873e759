//! Top bar rendering
//!
//! The `topbar` option is a template. `;` separates rows and `|` separates
//! the pieces of a row; pieces share the row width, the first aligned left,
//! the last right and the rest centered. `$name`, `${name}` and
//! `${name|param}` expand to variables. A backslash makes the next
//! character literal.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::model::{format_time, PlayState, PlayerStatus, Song, SonglistView, Stylesheet};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fragment {
    Text(String),
    Var { name: String, param: Option<String> },
}

pub type Piece = Vec<Fragment>;
pub type Row = Vec<Piece>;

/// Parse a topbar template into rows of pieces. Trailing empty rows are
/// dropped.
pub fn parse_template(template: &str) -> Vec<Row> {
    let mut rows: Vec<Row> = Vec::new();
    let mut row: Row = Vec::new();
    let mut piece: Piece = Vec::new();
    let mut text = String::new();
    let mut chars = template.chars().peekable();

    let flush_text = |text: &mut String, piece: &mut Piece| {
        if !text.is_empty() {
            piece.push(Fragment::Text(std::mem::take(text)));
        }
    };

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    text.push(escaped);
                }
            }
            '$' => {
                let var = if chars.next_if_eq(&'{').is_some() {
                    let mut inner = String::new();
                    for c in chars.by_ref() {
                        if c == '}' {
                            break;
                        }
                        inner.push(c);
                    }
                    let (name, param) = match inner.split_once('|') {
                        Some((name, param)) => (name.to_string(), Some(param.to_string())),
                        None => (inner, None),
                    };
                    Fragment::Var { name, param }
                } else {
                    let mut name = String::new();
                    while let Some(c) = chars.next_if(|c| c.is_ascii_alphanumeric()) {
                        name.push(c);
                    }
                    Fragment::Var { name, param: None }
                };
                flush_text(&mut text, &mut piece);
                piece.push(var);
            }
            '|' => {
                flush_text(&mut text, &mut piece);
                row.push(std::mem::take(&mut piece));
            }
            ';' => {
                flush_text(&mut text, &mut piece);
                row.push(std::mem::take(&mut piece));
                rows.push(std::mem::take(&mut row));
            }
            c => text.push(c),
        }
    }
    flush_text(&mut text, &mut piece);
    row.push(piece);
    rows.push(row);

    while rows
        .last()
        .is_some_and(|row| row.iter().all(|piece| piece.is_empty()))
    {
        rows.pop();
    }
    rows
}

/// Everything a topbar variable can refer to.
pub struct TopbarContext<'a> {
    pub status: &'a PlayerStatus,
    pub song: Option<&'a Song>,
    pub songlists: &'a SonglistView,
}

impl TopbarContext<'_> {
    /// Expanded text of a variable and the style it is drawn with.
    pub fn expand(&self, name: &str, param: Option<&str>) -> (String, String) {
        let styled = |text: String, style: &str| (text, style.to_string());
        match (name, param) {
            ("shortname", _) => styled("pms-rs".to_string(), "shortname"),
            ("version", _) => styled(env!("CARGO_PKG_VERSION").to_string(), "version"),
            ("tag", Some(tag)) => match self.song.map(|s| s.tag(tag)) {
                Some(Some(value)) => styled(value.to_string(), tag),
                Some(None) => styled("<unknown>".to_string(), "tagmissing"),
                None => styled("<none>".to_string(), "tagmissing"),
            },
            ("volume", _) => match self.status.volume {
                Some(0) => styled("Mute".to_string(), "mute"),
                Some(v) => styled(format!("Vol {v}%"), "volume"),
                None => styled("Vol --".to_string(), "volume"),
            },
            ("mode", _) => {
                let switch = |on: bool, c: char| if on { c } else { '-' };
                let text: String = [
                    switch(self.status.repeat, 'r'),
                    switch(self.status.random, 'z'),
                    switch(self.status.single, 's'),
                    switch(self.status.consume, 'c'),
                ]
                .into_iter()
                .collect();
                styled(text, "switches")
            }
            ("elapsed", _) => styled(
                format_time(self.status.elapsed.map(|e| e as u32)),
                "elapsedtime",
            ),
            ("time", _) => styled(
                format_time(self.status.duration.map(|d| d as u32)),
                "time",
            ),
            ("state", _) => {
                let text = match self.status.state {
                    PlayState::Play => "|>",
                    PlayState::Pause => "||",
                    PlayState::Stop => "[]",
                };
                styled(text.to_string(), "state")
            }
            ("list", Some("index")) => {
                styled((self.songlists.active_index() + 1).to_string(), "listindex")
            }
            ("list", Some("total")) => styled(self.songlists.len().to_string(), "listtotal"),
            ("list", Some("title")) => styled(self.songlists.active().name.clone(), "listtitle"),
            _ => styled(String::new(), "topbar"),
        }
    }

    fn piece_line(&self, piece: &Piece, styles: &Stylesheet) -> Line<'static> {
        let base = styles.get("topbar");
        let spans: Vec<Span<'static>> = piece
            .iter()
            .map(|fragment| match fragment {
                Fragment::Text(text) => Span::styled(text.clone(), base),
                Fragment::Var { name, param } => {
                    let (text, style) = self.expand(name, param.as_deref());
                    Span::styled(text, base.patch(styles.get(&style)))
                }
            })
            .collect();
        Line::from(spans)
    }
}

pub fn render_topbar(
    frame: &mut Frame,
    area: Rect,
    rows: &[Row],
    context: &TopbarContext,
    styles: &Stylesheet,
) {
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(rows.iter().map(|_| Constraint::Length(1)))
        .split(area);

    for (row, row_area) in rows.iter().zip(row_areas.iter()) {
        let count = row.len().max(1) as u32;
        let piece_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(row.iter().map(|_| Constraint::Ratio(1, count)))
            .split(*row_area);

        for (i, (piece, piece_area)) in row.iter().zip(piece_areas.iter()).enumerate() {
            let alignment = if i == 0 {
                Alignment::Left
            } else if i + 1 == row.len() {
                Alignment::Right
            } else {
                Alignment::Center
            };
            let paragraph = Paragraph::new(context.piece_line(piece, styles))
                .alignment(alignment)
                .style(styles.get("topbar"));
            frame.render_widget(paragraph, *piece_area);
        }
    }
}
