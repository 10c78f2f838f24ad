//! Turns raw article text into the paragraphs and headline the engine reads.

use std::collections::HashSet;
use std::fs;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::{BlackoutError, Result};
use crate::generator::tokenizer;
use crate::models::{Token, TokenKind};
use crate::utils::strings;

pub const MAX_PARAGRAPHS: usize = 30;
pub const MIN_PARAGRAPH_CHARS: usize = 35;

#[derive(Debug, Clone, Default)]
pub struct Article {
    /// identity used for seeding, usually a URL or a file path
    pub location: String,
    pub headline: HashSet<String>,
    pub paragraphs: Vec<String>,
}

/// Lowercase word tokens of a headline.
pub fn headline_words(text: &str) -> HashSet<String> {
    tokenizer::tokenize(&strings::clean_typography_symbols(text))
        .into_iter()
        .filter(|t| t.kind == TokenKind::Word)
        .map(|t| t.text.to_lowercase())
        .collect()
}

/// Groups lines into blocks separated by blank lines.
fn blocks(text: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line.trim());
        }
    }
    if !current.is_empty() {
        blocks.push(current.join("\n"));
    }
    blocks
}

fn is_heading(block: &str) -> bool {
    block.starts_with('#')
}

fn keeps_paragraph(text: &str) -> bool {
    text.chars().count() >= MIN_PARAGRAPH_CHARS
        && !strings::is_byline(text)
        && !strings::is_timestamp_strip(text)
}

impl Article {
    /// Splits `text` on blank lines. A leading `# ` block is taken as the headline unless
    /// `headline` is given; other headings, bylines, timestamps and short blocks are skipped.
    pub fn parse(location: impl Into<String>, text: &str, headline: Option<&str>) -> Self {
        let text = strings::clean_typography_symbols(text);
        let mut article = Article {
            location: location.into(),
            headline: headline.map(headline_words).unwrap_or_default(),
            paragraphs: Vec::new(),
        };

        let mut seen_content = false;
        for block in blocks(&text) {
            let block = block.as_str();
            if is_heading(block) {
                if !seen_content && headline.is_none() && article.headline.is_empty() {
                    article.headline = headline_words(block.trim_start_matches('#'));
                }
                continue;
            }
            seen_content = true;

            let paragraph = strings::squash_whitespace(block);
            if !keeps_paragraph(&paragraph) {
                debug!(chars = paragraph.len(), "paragraph skipped");
                continue;
            }
            article.paragraphs.push(paragraph);
            if article.paragraphs.len() >= MAX_PARAGRAPHS {
                break;
            }
        }

        debug!(
            paragraphs = article.paragraphs.len(),
            headline_words = article.headline.len(),
            "article scoped"
        );
        article
    }

    pub fn from_path(path: &Path, headline: Option<&str>) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| BlackoutError::ArticleRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(path.display().to_string(), &text, headline))
    }

    pub fn from_reader(
        mut reader: impl Read,
        location: impl Into<String>,
        headline: Option<&str>,
    ) -> Result<Self> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(BlackoutError::StdinRead)?;
        Ok(Self::parse(location, &text, headline))
    }

    /// Tokens per paragraph, with word-stream positions counted across the whole article.
    pub fn tokens(&self) -> Vec<Vec<Token>> {
        let mut next = 0;
        self.paragraphs
            .iter()
            .map(|p| {
                let tokens = tokenizer::tokenize_from(p, next);
                next += tokens.iter().filter(|t| t.is_streamed()).count();
                tokens
            })
            .collect()
    }

    pub fn word_stream(&self) -> Vec<String> {
        self.tokens()
            .iter()
            .flat_map(|p| tokenizer::word_stream(p))
            .collect()
    }
}
