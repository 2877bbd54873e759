//! Utility functions for rendering UI components

/// Pad or cut `s` to exactly `max_width` characters, marking a cut with
/// `...`.
pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.chars().count() > max_width {
        if max_width <= 3 {
            return s.chars().take(max_width).collect();
        }
        let truncated: String = s.chars().take(max_width - 3).collect();
        format!("{truncated}...")
    } else {
        format!("{s:<max_width$}")
    }
}

/// Fixed width for tags whose values have a predictable length
fn fixed_width(tag: &str) -> Option<usize> {
    match tag {
        "track" | "disc" => Some(5),
        "year" => Some(4),
        "time" => Some(7),
        _ => None,
    }
}

/// Calculate column widths for a song listing.
///
/// Columns are separated by one space. Short tags get a fixed width and the
/// rest share what is left evenly, the first ones taking the remainder.
pub fn calculate_column_widths(columns: &[String], content_width: usize) -> Vec<usize> {
    if columns.is_empty() {
        return Vec::new();
    }
    let separators = columns.len() - 1;
    let fixed: usize = columns.iter().filter_map(|c| fixed_width(c)).sum();
    let flexible = columns.iter().filter(|c| fixed_width(c).is_none()).count();
    let remaining = content_width.saturating_sub(fixed + separators);

    let mut extra = if flexible > 0 { remaining % flexible } else { 0 };
    columns
        .iter()
        .map(|c| match fixed_width(c) {
            Some(width) => width,
            None => {
                let bonus = usize::from(extra > 0);
                extra = extra.saturating_sub(1);
                remaining / flexible + bonus
            }
        })
        .collect()
}
