//! Cheap lexical signals for a single token string.
//!
//! The part-of-speech guess here is a handful of suffix and word-list rules, not a tagger.
//! It is wrong often enough that callers only use it to nudge scores.

use super::lexicon;
use super::tokenizer;
use crate::models::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosTag {
    Num,
    Punct,
    Conj,
    Prep,
    Det,
    Aux,
    Wh,
    Func,
    Verb,
    Noun,
    Adj,
    Adv,
    Propn,
    Content,
}

const VERB_SUFFIXES: &[&str] = &["ing", "ed"];
const NOUN_SUFFIXES: &[&str] = &["tion", "ment", "ness", "ity", "ship", "ism", "ance", "ence"];
const ADJ_SUFFIXES: &[&str] = &["ous", "ful", "less", "able", "ible", "al", "ive", "ic"];
const POETIC_SUFFIXES: &[&str] = &["ing", "ed", "tion", "ment", "ness", "ity", "ous", "ive", "al"];

fn has_suffix(word: &str, suffixes: &[&str]) -> bool {
    suffixes.iter().any(|s| word.ends_with(s))
}

fn is_full_match(token: &str, kind: TokenKind) -> bool {
    let pieces = tokenizer::split(token);
    pieces.len() == 1 && pieces[0].len() == token.len() && tokenizer::classify(token) == kind
}

pub fn is_word(token: &str) -> bool {
    is_full_match(token, TokenKind::Word)
}

pub fn is_number_like(token: &str) -> bool {
    is_full_match(token, TokenKind::Number)
}

pub fn is_whitespace(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_whitespace)
}

pub fn is_punctuation(token: &str) -> bool {
    is_full_match(token, TokenKind::Punctuation)
}

/// First letter uppercase, second lowercase: "Storm" yes, "US" and "I" no.
pub fn is_capitalized(token: &str) -> bool {
    let mut chars = token.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(a), Some(b)) if a.is_ascii_uppercase() && b.is_ascii_lowercase()
    )
}

pub fn is_likely_junk(token: &str) -> bool {
    let word = token.to_lowercase();
    word.chars().count() <= 1 || lexicon::is_news_junk(&word)
}

pub fn is_stopword(token: &str) -> bool {
    lexicon::is_stopword(&token.to_lowercase())
}

pub fn is_title_word(token: &str) -> bool {
    lexicon::is_title_word(&token.to_lowercase())
}

pub fn pseudo_part_of_speech(token: &str, first_in_window: bool) -> PosTag {
    if is_number_like(token) {
        return PosTag::Num;
    }
    if !is_word(token) {
        return PosTag::Punct;
    }

    let word = token.to_lowercase();

    if lexicon::is_stopword(&word) {
        return if lexicon::is_conjunction(&word) {
            PosTag::Conj
        } else if lexicon::is_preposition(&word) {
            PosTag::Prep
        } else if lexicon::is_determiner(&word) {
            PosTag::Det
        } else if lexicon::is_auxiliary(&word) {
            PosTag::Aux
        } else if lexicon::is_wh_word(&word) {
            PosTag::Wh
        } else {
            PosTag::Func
        };
    }

    if has_suffix(&word, VERB_SUFFIXES) {
        PosTag::Verb
    } else if has_suffix(&word, NOUN_SUFFIXES) {
        PosTag::Noun
    } else if has_suffix(&word, ADJ_SUFFIXES) {
        PosTag::Adj
    } else if word.ends_with("ly") {
        PosTag::Adv
    } else if is_capitalized(token) && !first_in_window {
        PosTag::Propn
    } else {
        PosTag::Content
    }
}

/// Base lexical score of a token before any window context.
pub fn content_weight(token: &str) -> f64 {
    if !is_word(token) {
        return -0.3;
    }
    if is_likely_junk(token) {
        return -2.0;
    }
    let word = token.to_lowercase();
    if lexicon::is_stopword(&word) {
        return -0.2;
    }

    let mut weight = 1.0;
    let len = token.chars().count();
    if len >= 6 {
        weight += 0.4;
    }
    if len >= 9 {
        weight += 0.2;
    }
    if has_suffix(&word, POETIC_SUFFIXES) {
        weight += 0.2;
    }
    weight
}
