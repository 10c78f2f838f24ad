//! Prints the article with everything but the poem blacked out.

use std::collections::BTreeSet;

use crossterm::style::Stylize;
use crossterm::terminal as term;

use crate::models::Token;

pub const DEFAULT_HIDE_CHAR: char = '█';

#[derive(Debug, Clone)]
pub struct RenderStyle {
    pub hide_char: char,
    /// wrap column, `None` leaves paragraphs on one line
    pub width: Option<usize>,
    /// paint hidden words black-on-black instead of replacing them
    pub ansi: bool,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            hide_char: DEFAULT_HIDE_CHAR,
            width: None,
            ansi: false,
        }
    }
}

pub fn terminal_width() -> Option<usize> {
    term::size().ok().map(|(w, _)| (w as usize).max(20))
}

fn render_token(token: &Token, keep: &BTreeSet<usize>, style: &RenderStyle) -> String {
    match token.position {
        Some(p) if !keep.contains(&p) => {
            if style.ansi {
                token.text.as_str().black().on_black().to_string()
            } else {
                style
                    .hide_char
                    .to_string()
                    .repeat(token.text.chars().count())
            }
        }
        _ => token.text.clone(),
    }
}

/// Renders tokenized paragraphs, hiding every word or number not in `keep`.
/// Whitespace and punctuation pass through so the article keeps its shape.
pub fn blackout(paragraphs: &[Vec<Token>], keep: &BTreeSet<usize>, style: &RenderStyle) -> String {
    paragraphs
        .iter()
        .map(|tokens| {
            let line: String = tokens
                .iter()
                .map(|t| render_token(t, keep, style))
                .collect();
            match style.width {
                Some(width) => textwrap::fill(&line, width),
                None => line,
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
