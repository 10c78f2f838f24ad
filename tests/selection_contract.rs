use std::collections::{BTreeSet, HashSet};

use blackout::generator::candidates::CandidateBuilder;
use blackout::generator::rng::SeededRng;
use blackout::generator::scorer;
use blackout::{Article, Mode, Outcome, PoemGenerator, Selection, Settings};
use proptest::prelude::*;

const ARTICLE: &str = "# Harbor City Braces For Storm\n\n\
    By Ann Lee\n\n\
    The defiant crowd waited in the quiet square while a cold storm gathered over the \
    broken glass towers of the old harbor district.\n\n\
    Nobody spoke of the shadow on the water, and the river carried the dust away toward \
    the sea as the lights went dark one by one.\n\n\
    Governor Maria Alvarez said the 6-3 vote on Tuesday would fund new sea walls, \
    according to a statement released by her office.\n\n\
    Still the fishermen mended their nets in silence, waiting for mercy from a sky that \
    had refused them all winter, their hands rough as steel.";

fn article() -> Article {
    Article::parse("https://news.example.com/harbor", ARTICLE, None)
}

fn settings(mode: Mode, reroll_seed: u64) -> Settings {
    Settings {
        mode,
        reroll_seed,
        ..Settings::default()
    }
}

fn run(settings: Settings) -> Selection {
    let article = article();
    PoemGenerator::new(settings)
        .with_headline(article.headline.clone())
        .generate(&article.location, &article.word_stream())
        .selection()
        .cloned()
        .expect("article is long enough for a poem")
}

fn stream(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

#[test]
fn same_inputs_same_poem() {
    let a = run(settings(Mode::SmartLocal, 1));
    let b = run(settings(Mode::SmartLocal, 1));
    assert_eq!(a, b);
}

#[test]
fn reroll_changes_seed_and_eventually_the_poem() {
    let first = run(settings(Mode::SmartLocal, 1));
    let rerolls: Vec<Selection> = (2..=10).map(|r| run(settings(Mode::SmartLocal, r))).collect();
    assert!(rerolls.iter().all(|s| s.seed != first.seed));
    assert!(rerolls.iter().any(|s| s.poem != first.poem));
}

#[test]
fn smart_local_windows_are_spaced_and_positive() {
    for reroll in 1..=10 {
        let selection = run(settings(Mode::SmartLocal, reroll));
        assert!(!selection.windows.is_empty());
        for (i, a) in selection.windows.iter().enumerate() {
            assert!(a.score > 0.0);
            for b in &selection.windows[i + 1..] {
                assert!(!a.overlaps(b));
                assert!(b.start > a.end + 1, "windows {a:?} and {b:?} touch");
            }
        }
        let lines: Vec<&str> = selection.poem.lines().collect();
        assert_eq!(lines.len(), selection.windows.len());
    }
}

#[test]
fn headline_words_reach_the_scorer() {
    let article = article();
    assert!(article.headline.contains("storm"));
    let words = stream("the quiet storm");
    let with = scorer::score_window(&words, 0, 3, &article.headline);
    let without = scorer::score_window(&words, 0, 3, &HashSet::new());
    assert!(with < without);
}

// "The defiant senator said nothing and walked into the quiet storm", target 6
#[test]
fn evocative_span_outscores_senator_said() {
    let words = stream("The defiant senator said nothing and walked into the quiet storm");
    let headline = HashSet::new();
    let max_len = 6;

    let mut best_clean = f64::NEG_INFINITY;
    let mut best_senator = f64::NEG_INFINITY;
    for start in 0..words.len() {
        for len in 2..=max_len {
            if start + len > words.len() {
                break;
            }
            let score = scorer::score_window(&words, start, len, &headline);
            let end = start + len - 1;
            if start <= 2 && end >= 3 {
                best_senator = best_senator.max(score);
            } else if start > 3 {
                best_clean = best_clean.max(score);
            }
        }
    }
    assert!(best_clean > best_senator, "{best_clean} <= {best_senator}");
}

#[test]
fn names_and_tallies_are_penalized() {
    let words = stream("Jane Smith announced the 45-3 vote Tuesday");
    let headline = HashSet::new();

    let named = scorer::score_window(&words, 0, 2, &headline);
    let unnamed = scorer::score_window(&stream("Jane smith"), 0, 2, &headline);
    assert!(named < unnamed - 2.0);

    let builder = CandidateBuilder::new(&words, &headline, 6, Mode::SmartLocal);
    let pool = builder.scored_windows(&mut SeededRng::new(1));
    assert!(pool.iter().all(|w| w.score > 0.0));
    // "the 45-3" never makes it into the pool
    assert!(!pool.iter().any(|w| w.start == 3 && w.len == 2));
}

#[test]
fn randomish_is_repeatable_and_differs_from_smart_local() {
    let a = run(settings(Mode::RandomIsh, 1));
    let b = run(settings(Mode::RandomIsh, 1));
    assert_eq!(a.keep_positions, b.keep_positions);
    assert!(a.windows.is_empty());

    let differs = (1..=10).any(|r| {
        run(settings(Mode::RandomIsh, r)).keep_positions
            != run(settings(Mode::SmartLocal, r)).keep_positions
    });
    assert!(differs);
}

#[test]
fn short_streams_never_get_a_poem() {
    let words = stream("The quiet storm gathered over broken glass");
    let outcome = PoemGenerator::new(Settings::default()).generate("loc", &words);
    assert_eq!(outcome, Outcome::Insufficient { words: 7 });
}

#[test]
fn nothing_scorable_falls_back_to_content_words() {
    let words = stream("Updated 5 minutes ago Share Full Article Listen Follow 12 3 4");
    let outcome = PoemGenerator::new(Settings::default()).generate("loc", &words);
    let selection = outcome.selection().expect("ten words is enough to try");
    assert!(selection.windows.is_empty());
    assert_eq!(selection.keep_positions, BTreeSet::from([3]));
    assert_eq!(selection.poem, "ago");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn kept_positions_are_valid_stream_indices(
        reroll in 0u64..10_000,
        target in 1usize..40,
        randomish in any::<bool>(),
    ) {
        let mode = if randomish { Mode::RandomIsh } else { Mode::SmartLocal };
        let article = article();
        let words = article.word_stream();
        let settings = Settings { poem_words_target: target, ..settings(mode, reroll) };
        let outcome = PoemGenerator::new(settings)
            .with_headline(article.headline.clone())
            .generate(&article.location, &words);
        let selection = outcome.selection().unwrap();
        prop_assert!(!selection.keep_positions.is_empty());
        prop_assert!(selection.keep_positions.iter().all(|&i| i < words.len()));
        if !selection.windows.is_empty() {
            let covered: usize = selection.windows.iter().map(|w| w.len).sum();
            prop_assert_eq!(covered, selection.keep_positions.len());
        }
    }
}
