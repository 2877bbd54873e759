//! Song list rendering

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

use crate::model::{Song, Songlist, Stylesheet};

use super::utils::{calculate_column_widths, truncate_string};

/// Header line with the column names.
fn header_line(columns: &[String], widths: &[usize], styles: &Stylesheet) -> Line<'static> {
    let text = columns
        .iter()
        .zip(widths)
        .map(|(column, width)| truncate_string(column, *width))
        .collect::<Vec<_>>()
        .join(" ");
    Line::styled(text, styles.get("header"))
}

/// One song as a line of tag cells. A row style such as the cursor replaces
/// the per-tag styles.
fn song_line(
    song: &Song,
    columns: &[String],
    widths: &[usize],
    row_style: Option<Style>,
    styles: &Stylesheet,
) -> Line<'static> {
    let tagged: Vec<String> = columns.iter().filter(|c| *c != "time").cloned().collect();
    if !song.has_one_of_tags(&tagged) {
        let width = widths.iter().sum::<usize>() + widths.len().saturating_sub(1);
        let style = row_style.unwrap_or_else(|| styles.get("alltagsmissing"));
        return Line::styled(truncate_string(song.file().unwrap_or(""), width), style);
    }

    let mut spans = Vec::with_capacity(columns.len() * 2);
    for (i, (column, width)) in columns.iter().zip(widths).enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let (text, tag_style) = match song.tag(column) {
            Some(value) => (value, styles.get(column)),
            None => ("", styles.get("tagmissing")),
        };
        spans.push(Span::styled(
            truncate_string(text, *width),
            row_style.unwrap_or(tag_style),
        ));
    }

    Line::from(spans).style(row_style.unwrap_or_else(|| styles.get("standard")))
}

/// Render the visible window of `list` with a header row.
///
/// `current` is the index of the playing song, if it is in this list.
pub fn render_songlist(
    frame: &mut Frame,
    area: Rect,
    list: &Songlist,
    columns: &[String],
    current: Option<usize>,
    styles: &Stylesheet,
) {
    let widths = calculate_column_widths(columns, area.width as usize);
    let height = list_height(area);

    let mut items = vec![ListItem::new(header_line(columns, &widths, styles))];
    items.extend(
        list.songs()
            .iter()
            .enumerate()
            .skip(list.offset())
            .take(height)
            .map(|(i, song)| {
                let row_style = if i == list.cursor() {
                    Some(styles.get("cursor"))
                } else if list.is_selected(i) {
                    Some(styles.get("selection"))
                } else if Some(i) == current {
                    Some(styles.get("currentsong"))
                } else {
                    None
                };
                ListItem::new(song_line(song, columns, &widths, row_style, styles))
            }),
    );

    frame.render_widget(List::new(items).style(styles.get("standard")), area);
}

/// Rows available for songs once the header is drawn.
pub fn list_height(area: Rect) -> usize {
    (area.height as usize).saturating_sub(1)
}
