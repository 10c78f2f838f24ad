use std::sync::LazyLock;

use regex::Regex;

use crate::models::{Token, TokenKind};

// alternation order matters: words, then numbers, then whitespace, then anything else
static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z]+(?:'[A-Za-z]+)?|[0-9]+(?:[-:/.][0-9]+)*|\s+|[^\sA-Za-z0-9]+")
        .expect("valid token regex")
});

/// Splits text into raw token strings. Every input character lands in exactly one piece.
pub fn split(text: &str) -> Vec<&str> {
    TOKEN_REGEX.find_iter(text).map(|m| m.as_str()).collect()
}

pub fn classify(piece: &str) -> TokenKind {
    let mut chars = piece.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => TokenKind::Word,
        Some(c) if c.is_ascii_digit() => TokenKind::Number,
        Some(c) if c.is_whitespace() => TokenKind::Whitespace,
        _ => TokenKind::Punctuation,
    }
}

/// Tokenizes `text`, numbering words and numbers from `first_position` on.
pub fn tokenize_from(text: &str, first_position: usize) -> Vec<Token> {
    let mut next_position = first_position;
    split(text)
        .into_iter()
        .map(|piece| {
            let kind = classify(piece);
            let position = match kind {
                TokenKind::Word | TokenKind::Number => {
                    let p = next_position;
                    next_position += 1;
                    Some(p)
                }
                _ => None,
            };
            Token {
                text: piece.to_string(),
                kind,
                position,
            }
        })
        .collect()
}

pub fn tokenize(text: &str) -> Vec<Token> {
    tokenize_from(text, 0)
}

/// The word-stream: word and number token texts in reading order.
pub fn word_stream(tokens: &[Token]) -> Vec<String> {
    tokens
        .iter()
        .filter(|t| t.is_streamed())
        .map(|t| t.text.clone())
        .collect()
}
