use std::collections::{BTreeSet, HashSet};

use rand::prelude::IndexedRandom;
use rand::Rng;
use tracing::debug;

use super::candidates::CandidateBuilder;
use super::classifier;
use crate::models::{Candidate, Mode, Window};

const TOP_CANDIDATES: usize = 5;
const RANK_DECAY: f64 = 0.15;
const MIN_WEIGHT: f64 = 0.01;
const RANDOMISH_JITTER: f64 = 0.45;
const RANDOMISH_NEIGHBOR_SKIP: f64 = 0.7;
const RANDOMISH_MIN_KEPT: usize = 6;
const TOP_UP_LIMIT: usize = 8;

/// Positions (and lines, when window based) chosen by one run.
#[derive(Debug, Default)]
pub struct Picked {
    pub keep: BTreeSet<usize>,
    pub windows: Vec<Window>,
}

pub fn keep_target(words_target: usize) -> usize {
    words_target.max(8)
}

/// Weighted draw among the first few candidates, favouring higher ranks.
pub fn pick_weighted<'c>(candidates: &'c [Candidate], rng: &mut impl Rng) -> Option<&'c Candidate> {
    let top = &candidates[..candidates.len().min(TOP_CANDIDATES)];
    let ranked: Vec<(usize, &Candidate)> = top.iter().enumerate().collect();
    ranked
        .choose_weighted(rng, |(rank, c)| {
            (c.score - *rank as f64 * RANK_DECAY).max(MIN_WEIGHT)
        })
        .ok()
        .map(|(_, c)| *c)
        .or_else(|| top.first())
}

pub fn smart_local(
    words: &[String],
    headline: &HashSet<String>,
    words_target: usize,
    rng: &mut impl Rng,
) -> Picked {
    let candidates =
        CandidateBuilder::new(words, headline, words_target, Mode::SmartLocal).build(rng);

    let mut picked = Picked::default();
    if let Some(chosen) = pick_weighted(&candidates, rng) {
        debug!(score = chosen.score, lines = chosen.windows.len(), "candidate chosen");
        picked.windows = chosen.windows.clone();
        picked.keep = chosen.windows.iter().flat_map(Window::positions).collect();
    }

    if picked.keep.is_empty() {
        debug!("no candidate survived, keeping first content words");
        picked.keep = first_content_words(words, keep_target(words_target));
    }
    picked
}

/// Walks the stream from the front keeping anything that is not a number, junk or a title.
pub fn first_content_words(words: &[String], target: usize) -> BTreeSet<usize> {
    let mut keep = BTreeSet::new();
    let last = words.len().saturating_sub(1);
    for (i, token) in words.iter().enumerate() {
        if keep.len() >= target {
            break;
        }
        if classifier::is_number_like(token)
            || classifier::is_likely_junk(token)
            || classifier::is_title_word(token)
        {
            continue;
        }
        // a stopword may sit inside the poem but not open or close the stream
        if !classifier::is_stopword(token) || (i > 0 && i < last) {
            keep.insert(i);
        }
    }
    keep
}

fn token_weight(token: &str) -> f64 {
    if classifier::is_word(token) {
        let word = token.to_lowercase();
        let mut s = if classifier::is_stopword(&word) { 0.4 } else { 1.5 };
        s += token.chars().count().min(10) as f64 * 0.08;
        if classifier::is_capitalized(token) {
            s -= 0.4;
        }
        if classifier::is_title_word(&word) {
            s -= 1.3;
        }
        if super::lexicon::is_news_junk(&word) {
            s -= 1.5;
        }
        s
    } else if classifier::is_number_like(token) {
        -1.8
    } else {
        0.0
    }
}

/// Per-token sampling that ignores windows entirely.
pub fn randomish(words: &[String], words_target: usize, rng: &mut impl Rng) -> Picked {
    let target = keep_target(words_target);

    let mut scored: Vec<(usize, f64)> = words
        .iter()
        .enumerate()
        .filter(|(_, token)| !classifier::is_likely_junk(token))
        .map(|(i, token)| {
            let jitter = rng.random_range(-RANDOMISH_JITTER..RANDOMISH_JITTER);
            (i, token_weight(token) + jitter)
        })
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut keep = BTreeSet::new();
    for (i, _) in scored {
        if keep.len() >= target {
            break;
        }
        let next_to_kept = keep.range(i.saturating_sub(1)..=i + 1).next().is_some();
        if next_to_kept && rng.random_bool(RANDOMISH_NEIGHBOR_SKIP) {
            continue;
        }
        keep.insert(i);
    }

    if keep.len() < RANDOMISH_MIN_KEPT {
        let limit = target.min(TOP_UP_LIMIT);
        for (i, token) in words.iter().enumerate() {
            if keep.len() >= limit {
                break;
            }
            if !classifier::is_stopword(token) && !classifier::is_likely_junk(token) {
                keep.insert(i);
            }
        }
    }

    Picked {
        keep,
        windows: Vec::new(),
    }
}
