//! Key symbols and key sequence notation
//!
//! Bindings are written as a run of characters (`gg`) and bracketed names
//! (`<Up>`, `<C-c>`, `<F3>`). A `<` that does not open a valid name stands
//! for itself.

use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Key {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        let mut modifiers = modifiers & (KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT);
        // Shift is already part of the character itself.
        if matches!(code, KeyCode::Char(_)) {
            modifiers.remove(KeyModifiers::SHIFT);
        }
        let code = match code {
            KeyCode::Char(c) if modifiers.contains(KeyModifiers::CONTROL) => {
                KeyCode::Char(c.to_ascii_lowercase())
            }
            other => other,
        };
        Self { code, modifiers }
    }

    pub fn char(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::NONE)
    }
}

impl From<KeyEvent> for Key {
    fn from(event: KeyEvent) -> Self {
        Key::new(event.code, event.modifiers)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyParseError {
    #[error("Empty key sequence")]
    Empty,
}

const NAMED_KEYS: &[(&str, KeyCode)] = &[
    ("up", KeyCode::Up),
    ("down", KeyCode::Down),
    ("left", KeyCode::Left),
    ("right", KeyCode::Right),
    ("pgup", KeyCode::PageUp),
    ("pageup", KeyCode::PageUp),
    ("pgdn", KeyCode::PageDown),
    ("pagedown", KeyCode::PageDown),
    ("home", KeyCode::Home),
    ("end", KeyCode::End),
    ("enter", KeyCode::Enter),
    ("return", KeyCode::Enter),
    ("cr", KeyCode::Enter),
    ("space", KeyCode::Char(' ')),
    ("tab", KeyCode::Tab),
    ("backtab", KeyCode::BackTab),
    ("esc", KeyCode::Esc),
    ("escape", KeyCode::Esc),
    ("backspace", KeyCode::Backspace),
    ("bs", KeyCode::Backspace),
    ("delete", KeyCode::Delete),
    ("del", KeyCode::Delete),
    ("insert", KeyCode::Insert),
    ("ins", KeyCode::Insert),
    ("lt", KeyCode::Char('<')),
    ("gt", KeyCode::Char('>')),
];

fn parse_named(inner: &str) -> Option<Key> {
    let mut modifiers = KeyModifiers::NONE;
    let mut rest = inner;
    loop {
        let mut chars = rest.chars();
        let (Some(m), Some('-')) = (chars.next(), chars.next()) else {
            break;
        };
        if chars.as_str().is_empty() {
            break;
        }
        match m.to_ascii_uppercase() {
            'C' => modifiers |= KeyModifiers::CONTROL,
            'A' | 'M' => modifiers |= KeyModifiers::ALT,
            'S' => modifiers |= KeyModifiers::SHIFT,
            _ => return None,
        }
        rest = chars.as_str();
    }

    let mut chars = rest.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if modifiers.is_empty() {
            return None;
        }
        return Some(Key::new(KeyCode::Char(c), modifiers));
    }

    let lower = rest.to_lowercase();
    let code = NAMED_KEYS
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, code)| *code)
        .or_else(|| {
            let n: u8 = lower.strip_prefix('f')?.parse().ok()?;
            (1..=12).contains(&n).then_some(KeyCode::F(n))
        })?;
    Some(Key::new(code, modifiers))
}

/// Parse key sequence notation into keys.
pub fn parse_sequence(text: &str) -> Result<Vec<Key>, KeyParseError> {
    let mut keys = Vec::new();
    let mut rest = text;
    while let Some(c) = rest.chars().next() {
        if c == '<' {
            if let Some(close) = rest.find('>') {
                if let Some(key) = parse_named(&rest[1..close]) {
                    keys.push(key);
                    rest = &rest[close + 1..];
                    continue;
                }
            }
        }
        keys.push(Key::char(c));
        rest = &rest[c.len_utf8()..];
    }
    if keys.is_empty() {
        return Err(KeyParseError::Empty);
    }
    Ok(keys)
}

fn code_name(code: KeyCode) -> Option<String> {
    if let KeyCode::F(n) = code {
        return Some(format!("F{n}"));
    }
    let name = match code {
        KeyCode::Up => "Up",
        KeyCode::Down => "Down",
        KeyCode::Left => "Left",
        KeyCode::Right => "Right",
        KeyCode::PageUp => "PgUp",
        KeyCode::PageDown => "PgDn",
        KeyCode::Home => "Home",
        KeyCode::End => "End",
        KeyCode::Enter => "Enter",
        KeyCode::Char(' ') => "Space",
        KeyCode::Char('<') => "lt",
        KeyCode::Tab => "Tab",
        KeyCode::BackTab => "BackTab",
        KeyCode::Esc => "Esc",
        KeyCode::Backspace => "Backspace",
        KeyCode::Delete => "Delete",
        KeyCode::Insert => "Insert",
        KeyCode::Char(_) => return None,
        _ => "?",
    };
    Some(name.to_string())
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let named = code_name(self.code);
        if self.modifiers.is_empty() {
            if let (None, KeyCode::Char(c)) = (&named, self.code) {
                return write!(f, "{c}");
            }
        }

        write!(f, "<")?;
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            write!(f, "C-")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            write!(f, "A-")?;
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            write!(f, "S-")?;
        }
        match (named, self.code) {
            (Some(name), _) => write!(f, "{name}>"),
            (None, KeyCode::Char(c)) => write!(f, "{c}>"),
            (None, _) => write!(f, "?>"),
        }
    }
}

/// Render a key sequence back into notation.
pub fn format_sequence(keys: &[Key]) -> String {
    keys.iter().map(Key::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctrl(c: char) -> Key {
        Key::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn plain_characters() {
        assert_eq!(parse_sequence("gg").unwrap(), vec![Key::char('g'), Key::char('g')]);
        assert_eq!(parse_sequence("+").unwrap(), vec![Key::char('+')]);
        assert_eq!(parse_sequence("G").unwrap(), vec![Key::char('G')]);
    }

    #[test]
    fn named_keys_are_case_insensitive() {
        assert_eq!(
            parse_sequence("<Up>").unwrap(),
            vec![Key::new(KeyCode::Up, KeyModifiers::NONE)]
        );
        assert_eq!(parse_sequence("<left>").unwrap(), parse_sequence("<Left>").unwrap());
        assert_eq!(
            parse_sequence("<PgDn>").unwrap(),
            vec![Key::new(KeyCode::PageDown, KeyModifiers::NONE)]
        );
        assert_eq!(
            parse_sequence("<F3>").unwrap(),
            vec![Key::new(KeyCode::F(3), KeyModifiers::NONE)]
        );
        assert_eq!(parse_sequence("<Space>").unwrap(), vec![Key::char(' ')]);
    }

    #[test]
    fn modifiers() {
        assert_eq!(parse_sequence("<C-c>").unwrap(), vec![ctrl('c')]);
        assert_eq!(parse_sequence("<C-C>").unwrap(), vec![ctrl('c')]);
        assert_eq!(
            parse_sequence("<A-Up>").unwrap(),
            vec![Key::new(KeyCode::Up, KeyModifiers::ALT)]
        );
    }

    #[test]
    fn stray_angle_brackets_are_literal() {
        assert_eq!(
            parse_sequence("<x").unwrap(),
            vec![Key::char('<'), Key::char('x')]
        );
        assert_eq!(
            parse_sequence("<bogus>").unwrap().len(),
            "<bogus>".chars().count()
        );
        assert_eq!(parse_sequence("<lt>").unwrap(), vec![Key::char('<')]);
    }

    #[test]
    fn mixed_sequence() {
        assert_eq!(
            parse_sequence("g<Up>x").unwrap(),
            vec![
                Key::char('g'),
                Key::new(KeyCode::Up, KeyModifiers::NONE),
                Key::char('x')
            ]
        );
    }

    #[test]
    fn empty_sequence_is_an_error() {
        assert_eq!(parse_sequence(""), Err(KeyParseError::Empty));
    }

    #[test]
    fn events_lose_shift_on_characters() {
        let event = KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT);
        assert_eq!(Key::from(event), Key::char('G'));
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(Key::from(event), ctrl('c'));
    }

    #[test]
    fn display_round_trips() {
        for text in ["gg", "<C-c>", "<Up>", "<F3>", "<Space>", "a<PgDn>", "<lt>"] {
            let keys = parse_sequence(text).unwrap();
            assert_eq!(format_sequence(&keys), text);
        }
    }
}
