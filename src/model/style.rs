//! Named styles used by the view

use std::collections::HashMap;

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Default)]
pub struct Stylesheet {
    styles: HashMap<String, Style>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, style: Style) {
        self.styles.insert(name.to_string(), style);
    }

    /// Style by name; unknown names render with the terminal default.
    pub fn get(&self, name: &str) -> Style {
        self.styles.get(name).copied().unwrap_or_default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }
}

/// Parse a color name, `colorN` palette index or `#rrggbb` value.
pub fn parse_color(name: &str) -> Option<Color> {
    let lower = name.to_lowercase();
    let color = match lower.as_str() {
        "default" => Color::Reset,
        "black" => Color::Black,
        "maroon" | "darkred" => Color::Red,
        "red" => Color::LightRed,
        "darkgreen" => Color::Green,
        "green" => Color::LightGreen,
        "olive" | "darkyellow" => Color::Yellow,
        "yellow" => Color::LightYellow,
        "navy" | "darkblue" => Color::Blue,
        "blue" => Color::LightBlue,
        "purple" | "darkmagenta" => Color::Magenta,
        "magenta" | "fuchsia" => Color::LightMagenta,
        "teal" | "darkcyan" => Color::Cyan,
        "cyan" | "aqua" => Color::LightCyan,
        "silver" | "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "white" => Color::White,
        _ => return parse_numeric_color(&lower),
    };
    Some(color)
}

fn parse_numeric_color(name: &str) -> Option<Color> {
    if let Some(index) = name.strip_prefix("color") {
        return index.parse::<u8>().ok().map(Color::Indexed);
    }
    let hex = name.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

pub fn parse_attribute(name: &str) -> Option<Modifier> {
    let modifier = match name.to_lowercase().as_str() {
        "bold" => Modifier::BOLD,
        "dim" => Modifier::DIM,
        "italic" => Modifier::ITALIC,
        "underline" => Modifier::UNDERLINED,
        "blink" => Modifier::SLOW_BLINK,
        "reverse" => Modifier::REVERSED,
        "strikethrough" => Modifier::CROSSED_OUT,
        _ => return None,
    };
    Some(modifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_names_and_values() {
        assert_eq!(parse_color("teal"), Some(Color::Cyan));
        assert_eq!(parse_color("DarkMagenta"), Some(Color::Magenta));
        assert_eq!(parse_color("default"), Some(Color::Reset));
        assert_eq!(parse_color("color208"), Some(Color::Indexed(208)));
        assert_eq!(parse_color("#ff8000"), Some(Color::Rgb(255, 128, 0)));
        assert_eq!(parse_color("#ff80"), None);
        assert_eq!(parse_color("color300"), None);
        assert_eq!(parse_color("bold"), None);
    }

    #[test]
    fn attributes() {
        assert_eq!(parse_attribute("bold"), Some(Modifier::BOLD));
        assert_eq!(parse_attribute("Underline"), Some(Modifier::UNDERLINED));
        assert_eq!(parse_attribute("teal"), None);
    }

    #[test]
    fn unknown_styles_are_default() {
        let mut sheet = Stylesheet::new();
        assert_eq!(sheet.get("cursor"), Style::default());
        sheet.set("cursor", Style::default().fg(Color::Black).bg(Color::White));
        assert_eq!(sheet.get("cursor").bg, Some(Color::White));
        assert!(sheet.contains("cursor"));
    }
}
