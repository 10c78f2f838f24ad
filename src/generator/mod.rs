//! The selection engine: word-stream in, kept positions and poem text out.

pub mod candidates;
pub mod classifier;
pub mod lexicon;
pub mod poem;
pub mod rng;
pub mod scorer;
pub mod selector;
pub mod tokenizer;

use std::collections::HashSet;

use tracing::{debug, info_span};

use crate::models::{Mode, Outcome, Selection, Settings};
use rng::{SeedMaterial, SeededRng};

/// Streams shorter than this are not worth blacking out.
pub const MIN_STREAM_WORDS: usize = 10;

pub struct PoemGenerator {
    settings: Settings,
    headline: HashSet<String>,
}

impl PoemGenerator {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            headline: HashSet::new(),
        }
    }

    /// Lowercase headline words; windows repeating them are penalized.
    pub fn with_headline(mut self, headline: HashSet<String>) -> Self {
        self.headline = headline;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn seed_for(&self, location: &str, words: &[String]) -> SeededRng {
        SeededRng::from_material(&SeedMaterial {
            location,
            words_target: self.settings.poem_words_target,
            mode: self.settings.mode.as_str(),
            reroll_seed: self.settings.reroll_seed,
            fingerprint: SeedMaterial::fingerprint_of(words),
        })
    }

    /// Runs one full selection. The result depends only on the inputs and the settings.
    pub fn generate(&self, location: &str, words: &[String]) -> Outcome {
        let span = info_span!("generate", mode = %self.settings.mode, words = words.len());
        let _enter = span.enter();

        if words.len() < MIN_STREAM_WORDS {
            debug!("word-stream too short for a poem");
            return Outcome::Insufficient { words: words.len() };
        }

        let mut rng = self.seed_for(location, words);
        let seed = rng.seed();
        let target = self.settings.poem_words_target;

        let picked = match self.settings.mode {
            Mode::SmartLocal => selector::smart_local(words, &self.headline, target, &mut rng),
            Mode::RandomIsh => selector::randomish(words, target, &mut rng),
        };

        let poem = poem::assemble(words, &picked.keep, &picked.windows);
        debug!(seed, kept = picked.keep.len(), lines = poem.lines().count(), "poem assembled");

        Outcome::Poem(Selection {
            seed,
            mode: self.settings.mode,
            keep_positions: picked.keep,
            windows: picked.windows,
            poem,
        })
    }
}
