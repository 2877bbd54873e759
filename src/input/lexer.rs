//! Lexer for command lines
//!
//! Turns a line of text into a lazy stream of classified tokens. The lexer
//! never fails: anything it cannot make sense of becomes an `Unknown` token,
//! and the stream always ends with exactly one `End` token.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

/// Classification of a token
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenClass {
    /// Bare run of non-whitespace, non-quote characters
    Identifier,
    /// Content of a terminated `"..."` or `'...'` run, quotes stripped
    QuotedString,
    /// Reserved. Digit runs are lexed as `Identifier`; commands use
    /// [`Token::to_int`] to interpret them.
    Number,
    /// End of input, always the last token of a stream
    End,
    /// Unterminated quote or a character no rule accepts
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub class: TokenClass,
    runes: String,
}

impl Token {
    pub fn new(class: TokenClass, runes: impl Into<String>) -> Self {
        Self {
            class,
            runes: runes.into(),
        }
    }

    pub fn end() -> Self {
        Self::new(TokenClass::End, "")
    }

    pub fn as_str(&self) -> &str {
        &self.runes
    }

    pub fn is_end(&self) -> bool {
        self.class == TokenClass::End
    }

    /// Word-like tokens: identifiers and numbers.
    pub fn is_word(&self) -> bool {
        matches!(self.class, TokenClass::Identifier | TokenClass::Number)
    }

    /// Interpret the token as a signed integer. A leading `+` is accepted so
    /// that relative arguments (`volume +2`) parse.
    pub fn to_int(&self) -> Option<i64> {
        if !self.is_word() {
            return None;
        }
        let text = self.runes.strip_prefix('+').unwrap_or(&self.runes);
        text.parse().ok()
    }

    /// True when the argument was written with an explicit sign.
    pub fn is_relative(&self) -> bool {
        self.runes.starts_with('+') || self.runes.starts_with('-')
    }

    /// Render the token back into command-line syntax, re-quoting strings
    /// so that the result tokenizes to the same token again.
    pub fn to_source(&self) -> String {
        match self.class {
            TokenClass::QuotedString => {
                let mut out = String::with_capacity(self.runes.len() + 2);
                out.push('"');
                for c in self.runes.chars() {
                    if c == '"' || c == '\\' {
                        out.push('\\');
                    }
                    out.push(c);
                }
                out.push('"');
                out
            }
            TokenClass::End => String::new(),
            _ => self.runes.clone(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.class {
            TokenClass::End => write!(f, "END"),
            _ => write!(f, "{}", self.runes),
        }
    }
}

/// Lazy token stream over one line of input.
#[derive(Clone)]
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    finished: bool,
}

/// Tokenize a line. Nothing is scanned until the first token is requested.
pub fn tokenize(line: &str) -> Lexer<'_> {
    Lexer {
        chars: line.chars().peekable(),
        finished: false,
    }
}

fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

fn is_stray(c: char) -> bool {
    c.is_control() && !c.is_whitespace()
}

impl Lexer<'_> {
    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|c| c.is_whitespace()).is_some() {}
    }

    fn quoted(&mut self, quote: char) -> Token {
        let mut runes = String::new();
        while let Some(c) = self.chars.next() {
            match c {
                '\\' => match self.chars.next() {
                    Some(escaped) => runes.push(escaped),
                    None => runes.push('\\'),
                },
                c if c == quote => return Token::new(TokenClass::QuotedString, runes),
                c => runes.push(c),
            }
        }
        Token::new(TokenClass::Unknown, runes)
    }

    fn identifier(&mut self) -> Token {
        let mut runes = String::new();
        while let Some(c) = self
            .chars
            .next_if(|&c| !c.is_whitespace() && !is_quote(c) && !is_stray(c))
        {
            runes.push(c);
        }
        Token::new(TokenClass::Identifier, runes)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        self.skip_whitespace();

        let token = match self.chars.peek().copied() {
            None => {
                self.finished = true;
                Token::end()
            }
            Some(c) if is_quote(c) => {
                self.chars.next();
                self.quoted(c)
            }
            Some(c) if is_stray(c) => {
                self.chars.next();
                Token::new(TokenClass::Unknown, c.to_string())
            }
            Some(_) => self.identifier(),
        };
        Some(token)
    }
}
