use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace};

use super::classifier;
use super::lexicon;
use super::scorer::{self, MAX_WINDOW_LEN};
use crate::models::{Candidate, Mode, Window};

const POOL_SIZE: usize = 200;
const MAX_ATTEMPTS: usize = 60;
const MIN_POEM_WORDS: usize = 6;
const MAX_CANDIDATES: usize = 20;
const JITTER: f64 = 0.3;
const SMART_MIN_WINDOW_SCORE: f64 = 1.4;
const RELAXED_DISCOUNT: f64 = 0.8;
const RELAXED_MAX_WINDOWS: usize = 3;

pub struct CandidateBuilder<'a> {
    words: &'a [String],
    headline: &'a HashSet<String>,
    target: usize,
    mode: Mode,
}

impl<'a> CandidateBuilder<'a> {
    pub fn new(words: &'a [String], headline: &'a HashSet<String>, target: usize, mode: Mode) -> Self {
        Self {
            words,
            headline,
            target,
            mode,
        }
    }

    fn word_budget(&self) -> usize {
        self.target.max(8)
    }

    /// Every positively scored window of length 2 up to the line cap, best first.
    pub fn scored_windows(&self, rng: &mut impl Rng) -> Vec<Window> {
        let max_len = self.target.max(4).min(MAX_WINDOW_LEN);
        let mut windows = Vec::new();

        for start in 0..self.words.len() {
            for len in 2..=max_len {
                if start + len > self.words.len() {
                    break;
                }
                let base = scorer::score_window(self.words, start, len, self.headline);
                if base <= 0.0 {
                    continue;
                }
                let jittered = base + rng.random_range(-JITTER..JITTER);
                if jittered > 0.0 {
                    windows.push(Window::new(start, len, jittered));
                }
            }
        }

        windows.sort_by(|a, b| b.score.total_cmp(&a.score));
        windows
    }

    /// The deduplicated best-of-N poem candidates, highest score first.
    pub fn build(&self, rng: &mut impl Rng) -> Vec<Candidate> {
        let mut pool = self.scored_windows(rng);
        pool.truncate(POOL_SIZE);
        if pool.is_empty() {
            debug!("no window scored above zero");
            return Vec::new();
        }

        let attempts = MAX_ATTEMPTS.min(20 + pool.len() / 5);
        debug!(pool = pool.len(), attempts, "assembling poem candidates");

        let mut candidates = Vec::new();
        for _ in 0..attempts {
            pool.shuffle(rng);
            if let Some(candidate) = self.assemble(&pool) {
                trace!(score = candidate.score, words = candidate.word_count, "candidate");
                candidates.push(candidate);
            }
        }

        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
        let mut seen = HashSet::new();
        candidates.retain(|c| seen.insert(c.signature()));
        candidates.truncate(MAX_CANDIDATES);

        debug!(candidates = candidates.len(), "candidates kept");
        candidates
    }

    fn assemble(&self, shuffled: &[Window]) -> Option<Candidate> {
        let mut chosen: Vec<Window> = Vec::new();
        let mut budget = self.word_budget() as isize;
        let mut local_score = 0.0;

        for w in shuffled {
            if budget <= 0 {
                break;
            }
            if !fits(&chosen, w) {
                continue;
            }
            if !chosen.is_empty() && w.len as isize > budget + 2 {
                continue;
            }
            if self.mode == Mode::SmartLocal && w.score < SMART_MIN_WINDOW_SCORE && chosen.len() >= 2 {
                continue;
            }
            chosen.push(*w);
            budget -= w.len as isize;
            local_score += w.score;
        }

        if chosen.len() < 2 {
            local_score += relaxed_fill(&mut chosen, budget, shuffled);
        }

        chosen.sort_by_key(|w| w.start);
        let word_count: usize = chosen.iter().map(|w| w.len).sum();
        if word_count < MIN_POEM_WORDS {
            return None;
        }

        let score = local_score + self.poem_adjustment(&chosen);
        Some(Candidate {
            windows: chosen,
            score,
            word_count,
        })
    }

    /// Poem-level bonuses and penalties over all selected words.
    fn poem_adjustment(&self, chosen: &[Window]) -> f64 {
        let mut score = 0.0;
        score += chosen.len().min(4) as f64 * 0.8;
        score -= chosen.len().saturating_sub(5) as f64 * 0.7;

        let selected: Vec<&str> = chosen
            .iter()
            .flat_map(|w| w.positions())
            .map(|i| self.words[i].as_str())
            .collect();

        let run = scorer::proper_noun_run(&selected);
        if run >= 2 {
            score -= (run - 1) as f64 * 3.0;
        }

        let mut numbers = 0usize;
        let mut titles = 0usize;
        let mut junk = 0usize;
        let mut evocative = 0usize;
        for token in &selected {
            if classifier::is_number_like(token) {
                numbers += 1;
            }
            if !classifier::is_word(token) {
                continue;
            }
            let word = token.to_lowercase();
            if lexicon::is_title_word(&word) {
                titles += 1;
            }
            if lexicon::is_news_junk(&word) {
                junk += 1;
            }
            if !lexicon::is_stopword(&word) && token.chars().count() >= 5 {
                evocative += 1;
            }
        }

        score -= numbers as f64 * 1.6;
        score -= titles as f64 * 1.6;
        score -= junk as f64 * 1.8;
        score += evocative.min(8) as f64 * 0.3;
        score
    }
}

/// Second pass for a sparse attempt: any spaced window goes in, at a discount, up to a few lines.
fn relaxed_fill(chosen: &mut Vec<Window>, mut budget: isize, shuffled: &[Window]) -> f64 {
    let mut added = 0.0;
    for w in shuffled {
        if budget <= 0 || chosen.len() >= RELAXED_MAX_WINDOWS {
            break;
        }
        if !fits(chosen, w) {
            continue;
        }
        chosen.push(*w);
        budget -= w.len as isize;
        added += w.score * RELAXED_DISCOUNT;
    }
    added
}

// overlapping and touching windows would read as one run-on line
fn fits(chosen: &[Window], w: &Window) -> bool {
    chosen.iter().all(|c| !c.overlaps(w) && !c.too_close(w))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::rng::SeededRng;
    use proptest::prelude::*;

    fn stream(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    const ARTICLE: &str = "The defiant crowd waited in the quiet square while a cold storm \
        gathered over the broken glass towers and the river carried dust toward the sea \
        as lights flickered in empty windows and somewhere a ghost of music drifted alone";

    const EPS: f64 = 1e-9;

    // short lowercase filler: no penalties and no long-word bonus in the poem score
    fn filler(n: usize) -> Vec<String> {
        vec!["calm".to_string(); n]
    }

    fn spans(candidate: &Candidate) -> String {
        candidate.signature()
    }

    #[test]
    fn low_scoring_third_line_is_skipped_in_smart_mode() {
        let words = filler(20);
        let headline = HashSet::new();
        let pool = vec![
            Window::new(0, 3, 2.0),
            Window::new(4, 3, 1.0),
            Window::new(8, 3, 1.0),
        ];

        let smart = CandidateBuilder::new(&words, &headline, 8, Mode::SmartLocal);
        let candidate = smart.assemble(&pool).unwrap();
        assert_eq!(spans(&candidate), "0-2|4-6");
        // 2.0 + 1.0 window scores, two lines at 0.8
        assert!((candidate.score - 4.6).abs() < EPS);

        let loose = CandidateBuilder::new(&words, &headline, 8, Mode::RandomIsh);
        let candidate = loose.assemble(&pool).unwrap();
        assert_eq!(spans(&candidate), "0-2|4-6|8-10");
        assert!((candidate.score - 6.4).abs() < EPS);
    }

    #[test]
    fn window_overshooting_the_budget_is_skipped() {
        let words = filler(30);
        let headline = HashSet::new();
        let builder = CandidateBuilder::new(&words, &headline, 8, Mode::SmartLocal);
        // after 6 words the budget is 2, so a 5-word line overshoots by more than 2
        let pool = vec![
            Window::new(0, 6, 2.0),
            Window::new(8, 5, 2.0),
            Window::new(15, 2, 2.0),
        ];
        let candidate = builder.assemble(&pool).unwrap();
        assert_eq!(spans(&candidate), "0-5|15-16");
        assert_eq!(candidate.word_count, 8);
        assert!((candidate.score - 5.6).abs() < EPS);
    }

    #[test]
    fn sparse_attempt_is_topped_up_at_a_discount() {
        let words = filler(30);
        let headline = HashSet::new();
        let builder = CandidateBuilder::new(&words, &headline, 8, Mode::SmartLocal);
        // the greedy pass keeps only the 7-word line; the 5-word one overshoots
        let pool = vec![Window::new(0, 7, 3.0), Window::new(9, 5, 2.0)];
        let candidate = builder.assemble(&pool).unwrap();
        assert_eq!(spans(&candidate), "0-6|9-13");
        // 3.0 + 2.0 * 0.8 + 2 * 0.8
        assert!((candidate.score - 6.2).abs() < EPS);
    }

    #[test]
    fn relaxed_fill_stops_at_three_lines() {
        let pool: Vec<Window> = (0..6).map(|i| Window::new(i * 4, 2, 1.0)).collect();
        let mut chosen = vec![pool[0]];
        let added = relaxed_fill(&mut chosen, 100, &pool);
        assert_eq!(chosen.len(), RELAXED_MAX_WINDOWS);
        assert_eq!(chosen[1].start, 4);
        assert_eq!(chosen[2].start, 8);
        assert!((added - 1.6).abs() < EPS);
    }

    #[test]
    fn relaxed_fill_stops_when_budget_runs_out() {
        let pool = vec![Window::new(0, 3, 1.0), Window::new(5, 3, 1.0)];
        let mut chosen = Vec::new();
        relaxed_fill(&mut chosen, 3, &pool);
        assert_eq!(chosen.len(), 1);
    }

    #[test]
    fn too_few_words_is_no_candidate() {
        let words = filler(20);
        let headline = HashSet::new();
        let builder = CandidateBuilder::new(&words, &headline, 8, Mode::SmartLocal);
        let pool = vec![Window::new(0, 2, 2.0), Window::new(4, 2, 2.0)];
        assert!(builder.assemble(&pool).is_none());
    }

    #[test]
    fn line_count_bonus_caps_at_four_and_long_poems_pay() {
        let words = filler(30);
        let headline = HashSet::new();
        let builder = CandidateBuilder::new(&words, &headline, 18, Mode::SmartLocal);
        let lines = |n: usize| -> Vec<Window> { (0..n).map(|i| Window::new(i * 3, 1, 0.0)).collect() };

        assert!((builder.poem_adjustment(&lines(2)) - 1.6).abs() < EPS);
        assert!((builder.poem_adjustment(&lines(4)) - 3.2).abs() < EPS);
        assert!((builder.poem_adjustment(&lines(5)) - 3.2).abs() < EPS);
        assert!((builder.poem_adjustment(&lines(6)) - 2.5).abs() < EPS);
        assert!((builder.poem_adjustment(&lines(7)) - 1.8).abs() < EPS);
    }

    #[test]
    fn names_run_across_lines() {
        let words = stream("Jane Smith and Bob Jones");
        let headline = HashSet::new();
        let builder = CandidateBuilder::new(&words, &headline, 8, Mode::SmartLocal);
        let chosen = [Window::new(0, 2, 0.0), Window::new(3, 2, 0.0)];
        // 2 lines +1.6, a 4-name run -9.0, "Smith" and "Jones" +0.6
        assert!((builder.poem_adjustment(&chosen) + 6.8).abs() < EPS);
    }

    #[test]
    fn numbers_titles_and_junk_cost_the_poem() {
        let words = stream("calm 45 senator updated calm");
        let headline = HashSet::new();
        let builder = CandidateBuilder::new(&words, &headline, 8, Mode::SmartLocal);
        let chosen = [Window::new(0, 5, 0.0)];
        // 0.8 - 1.6 - 1.6 - 1.8, plus 0.3 each for "senator" and "updated"
        assert!((builder.poem_adjustment(&chosen) + 3.6).abs() < EPS);
    }

    #[test]
    fn long_word_bonus_caps_at_eight() {
        let words = vec!["storm".to_string(); 10];
        let headline = HashSet::new();
        let builder = CandidateBuilder::new(&words, &headline, 18, Mode::SmartLocal);
        let ten = [Window::new(0, 10, 0.0)];
        let eight = [Window::new(0, 8, 0.0)];
        assert!((builder.poem_adjustment(&ten) - 3.2).abs() < EPS);
        assert!((builder.poem_adjustment(&eight) - 3.2).abs() < EPS);
    }

    #[test]
    fn pool_contains_only_positive_windows() {
        let words = stream(ARTICLE);
        let headline = HashSet::new();
        let builder = CandidateBuilder::new(&words, &headline, 18, Mode::SmartLocal);
        let windows = builder.scored_windows(&mut SeededRng::new(7));
        assert!(!windows.is_empty());
        assert!(windows.iter().all(|w| w.score > 0.0));
        assert!(windows.iter().all(|w| (2..=MAX_WINDOW_LEN).contains(&w.len)));
        assert!(windows.windows(2).all(|p| p[0].score >= p[1].score));
    }

    #[test]
    fn window_length_tracks_small_targets() {
        let words = stream(ARTICLE);
        let headline = HashSet::new();
        let builder = CandidateBuilder::new(&words, &headline, 2, Mode::SmartLocal);
        let windows = builder.scored_windows(&mut SeededRng::new(7));
        assert!(windows.iter().all(|w| w.len <= 4));
    }

    #[test]
    fn candidates_meet_minimum_size_and_are_unique() {
        let words = stream(ARTICLE);
        let headline = HashSet::new();
        let builder = CandidateBuilder::new(&words, &headline, 18, Mode::SmartLocal);
        let candidates = builder.build(&mut SeededRng::new(11));
        assert!(!candidates.is_empty());
        assert!(candidates.len() <= MAX_CANDIDATES);

        let mut signatures = HashSet::new();
        for c in &candidates {
            assert!(c.word_count >= MIN_POEM_WORDS);
            assert_eq!(c.word_count, c.windows.iter().map(|w| w.len).sum::<usize>());
            assert!(signatures.insert(c.signature()));
        }
        assert!(candidates.windows(2).all(|p| p[0].score >= p[1].score));
    }

    #[test]
    fn scaffolding_only_text_yields_nothing() {
        let words = stream("Updated 5 minutes ago Share Full Article Listen Follow 12 3 4");
        let headline = HashSet::new();
        let builder = CandidateBuilder::new(&words, &headline, 18, Mode::SmartLocal);
        assert!(builder.build(&mut SeededRng::new(3)).is_empty());
    }

    proptest! {
        #[test]
        fn windows_in_a_candidate_never_touch(seed in any::<u32>(), target in 1usize..30) {
            let words = stream(ARTICLE);
            let headline = HashSet::new();
            let builder = CandidateBuilder::new(&words, &headline, target, Mode::SmartLocal);
            for candidate in builder.build(&mut SeededRng::new(seed)) {
                for (i, a) in candidate.windows.iter().enumerate() {
                    for b in &candidate.windows[i + 1..] {
                        prop_assert!(!a.overlaps(b));
                        prop_assert!(!a.too_close(b));
                        prop_assert!(a.start < b.start);
                    }
                }
            }
        }
    }
}
