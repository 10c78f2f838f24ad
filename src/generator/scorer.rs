//! Scores a contiguous run of the word-stream as a candidate poem line.
//!
//! All weights are hand-tuned; they only mean something relative to each other.

use std::collections::HashSet;

use super::classifier::{self, PosTag};
use super::lexicon;

pub const MAX_WINDOW_LEN: usize = 7;

const TRANSITION_WEIGHT: f64 = 0.8;
const JUNK_PENALTY: f64 = 1.5;
const REPEAT_PENALTY: f64 = 1.0;
const NUMBER_PENALTY: f64 = 1.6;
const NUMBER_PAIR_PENALTY: f64 = 1.0;
const TITLE_PENALTY: f64 = 1.2;
const BYLINE_PENALTY: f64 = 0.8;
const BYLINE_JUNK_PENALTY: f64 = 1.0;
const HEADLINE_OVERLAP_PENALTY: f64 = 0.55;
const PROPER_RUN_PENALTY: f64 = 2.4;
const CAPS_PENALTY: f64 = 1.1;
const SCAFFOLD_PENALTY: f64 = 1.1;
const EVOCATIVE_BONUS: f64 = 0.8;
const WEAK_OPENER_PENALTY: f64 = 0.4;
const WEAK_CLOSER_PENALTY: f64 = 0.5;

/// Local grammatical plausibility of one tag following another.
pub fn transition_bonus(prev: PosTag, next: PosTag) -> f64 {
    use PosTag::{Adj, Adv, Aux, Conj, Det, Noun, Prep, Propn, Verb, Wh};
    match (prev, next) {
        (Det, Noun) => 1.2,
        (Det, Adj) => 0.9,
        (Adj, Noun) => 1.1,
        (Adj, Adj) => 0.2,
        (Noun, Verb) => 0.8,
        (Propn, Verb) => 0.6,
        (Verb, Det) => 0.7,
        (Verb, Prep) => 0.6,
        (Verb, Adv) => 0.3,
        (Prep, Det) => 0.7,
        (Prep, Noun) => 0.5,
        (Prep, Propn) => 0.2,
        (Conj, Det) => 0.3,
        (Conj, Noun) => 0.3,
        (Conj, Propn) => 0.1,
        (Aux, Verb) => 1.0,
        (Aux, Adj) => 0.5,
        (Aux, Noun) => 0.1,
        (Wh, Aux) => 0.7,
        (Wh, Verb) => 0.4,
        (Wh, Propn) => -0.3,
        _ => 0.0,
    }
}

/// Longest run of consecutive capitalized non-stopwords.
pub fn proper_noun_run<S: AsRef<str>>(tokens: &[S]) -> usize {
    let mut longest = 0;
    let mut run = 0;
    for token in tokens {
        let token = token.as_ref();
        if classifier::is_word(token)
            && classifier::is_capitalized(token)
            && !classifier::is_stopword(token)
        {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    longest
}

pub fn numeric_penalty<S: AsRef<str>>(tokens: &[S]) -> f64 {
    let numbers = tokens
        .iter()
        .filter(|t| classifier::is_number_like(t.as_ref()))
        .count();
    // vote tallies and dates that split into two numbers, "6 3"
    let pairs = tokens
        .windows(2)
        .filter(|pair| {
            classifier::is_number_like(pair[0].as_ref()) && classifier::is_number_like(pair[1].as_ref())
        })
        .count();
    numbers as f64 * NUMBER_PENALTY + pairs as f64 * NUMBER_PAIR_PENALTY
}

pub fn title_and_byline_penalty<S: AsRef<str>>(tokens: &[S]) -> f64 {
    let mut penalty = 0.0;
    for token in tokens.iter().map(AsRef::as_ref).filter(|t| classifier::is_word(t)) {
        let word = token.to_lowercase();
        if lexicon::is_title_word(&word) {
            penalty += TITLE_PENALTY;
        }
        if word == "by" {
            penalty += BYLINE_PENALTY;
        }
        if lexicon::is_news_junk(&word) {
            penalty += BYLINE_JUNK_PENALTY;
        }
    }
    penalty
}

pub fn headline_overlap_penalty<S: AsRef<str>>(tokens: &[S], headline: &HashSet<String>) -> f64 {
    if headline.is_empty() {
        return 0.0;
    }
    let overlap = tokens
        .iter()
        .map(AsRef::as_ref)
        .filter(|t| classifier::is_word(t) && headline.contains(&t.to_lowercase()))
        .count();
    overlap as f64 * HEADLINE_OVERLAP_PENALTY
}

/// Scores `len` words of `words` starting at `start`. Callers discard anything `<= 0`.
pub fn score_window<S: AsRef<str>>(
    words: &[S],
    start: usize,
    len: usize,
    headline: &HashSet<String>,
) -> f64 {
    let end = (start + len).min(words.len());
    if start >= end {
        return f64::NEG_INFINITY;
    }
    let slice = &words[start..end];
    let len = slice.len();

    let mut score = 0.0;
    let mut stop_count = 0usize;
    let mut junk_count = 0usize;
    let mut caps_count = 0usize;
    let mut repeated = 0.0;
    let mut transitions = 0.0;
    let mut seen = HashSet::new();
    let mut prev_tag = None;

    for (i, token) in slice.iter().map(AsRef::as_ref).enumerate() {
        if classifier::is_word(token) {
            let word = token.to_lowercase();
            if lexicon::is_stopword(&word) {
                stop_count += 1;
            }
            if classifier::is_likely_junk(token) {
                junk_count += 1;
            }
            if classifier::is_capitalized(token) {
                caps_count += 1;
            }
            if !seen.insert(word) {
                repeated += REPEAT_PENALTY;
            }
        }

        score += classifier::content_weight(token);

        let tag = classifier::pseudo_part_of_speech(token, i == 0);
        if let Some(prev) = prev_tag {
            transitions += transition_bonus(prev, tag);
        }
        prev_tag = Some(tag);
    }

    score += transitions * TRANSITION_WEIGHT;

    // shape
    if (2..=6).contains(&len) {
        score += 1.1;
    }
    if len == 1 {
        score -= 1.0;
    }
    if len >= 8 {
        score -= 1.2;
    }

    // a little glue reads as grammar, a lot reads as filler
    score += stop_count.min(2) as f64 * 0.7;
    score -= stop_count.saturating_sub(3) as f64 * 0.8;

    score -= junk_count as f64 * JUNK_PENALTY;
    score -= repeated;
    score -= numeric_penalty(slice);
    score -= title_and_byline_penalty(slice);
    score -= headline_overlap_penalty(slice, headline);

    let run = proper_noun_run(slice);
    if run >= 2 {
        score -= (run - 1) as f64 * PROPER_RUN_PENALTY;
    }
    if caps_count >= 3 {
        score -= (caps_count - 2) as f64 * CAPS_PENALTY;
    }

    let scaffold_hits = slice
        .iter()
        .filter(|t| lexicon::is_scaffolding(&t.as_ref().to_lowercase()))
        .count();
    if scaffold_hits >= 3 {
        score -= (scaffold_hits - 2) as f64 * SCAFFOLD_PENALTY;
    }

    let evocative = slice
        .iter()
        .map(AsRef::as_ref)
        .filter(|t| classifier::is_word(t) && lexicon::is_evocative(t))
        .count();
    score += evocative as f64 * EVOCATIVE_BONUS;

    let first = slice[0].as_ref().to_lowercase();
    if lexicon::is_weak_opener(&first) {
        score -= WEAK_OPENER_PENALTY;
    }
    let last = slice[len - 1].as_ref().to_lowercase();
    if lexicon::is_stopword(&last) && last != "not" && last != "no" {
        score -= WEAK_CLOSER_PENALTY;
    }

    score
}
