//! The last applied state for one article, kept in an explicit object instead of globals.

use tracing::{debug, info};

use crate::generator::PoemGenerator;
use crate::models::{Mode, Outcome, Settings};
use crate::source::Article;

#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    pub settings: Settings,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SyncResult {
    Disabled,
    Applied(Outcome),
}

pub struct Session {
    article: Article,
    words: Vec<String>,
    settings: Settings,
    last: Option<Applied>,
}

impl Session {
    pub fn new(article: Article, settings: Settings) -> Self {
        let words = article.word_stream();
        Self {
            article,
            words,
            settings,
            last: None,
        }
    }

    pub fn article(&self) -> &Article {
        &self.article
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn last(&self) -> Option<&Applied> {
        self.last.as_ref()
    }

    /// Recomputes from scratch, replacing whatever was applied before.
    pub fn sync(&mut self) -> SyncResult {
        self.last = None;
        if !self.settings.enabled {
            debug!("blackout disabled, cleared");
            return SyncResult::Disabled;
        }

        let generator =
            PoemGenerator::new(self.settings.clone()).with_headline(self.article.headline.clone());
        let outcome = generator.generate(&self.article.location, &self.words);

        self.last = Some(Applied {
            settings: self.settings.clone(),
            outcome: outcome.clone(),
        });
        SyncResult::Applied(outcome)
    }

    /// Same article, new seed.
    pub fn reroll(&mut self) -> SyncResult {
        self.settings.reroll_seed = self.settings.reroll_seed.wrapping_add(1);
        info!(reroll_seed = self.settings.reroll_seed, "reroll");
        self.sync()
    }

    pub fn set_mode(&mut self, mode: Mode) -> SyncResult {
        self.settings.mode = mode;
        self.sync()
    }

    /// Zero is treated as unset and falls back to the default target.
    pub fn set_words_target(&mut self, target: usize) -> SyncResult {
        self.settings.poem_words_target = if target == 0 {
            Settings::default().poem_words_target
        } else {
            target
        };
        self.sync()
    }

    pub fn set_enabled(&mut self, enabled: bool) -> SyncResult {
        self.settings.enabled = enabled;
        self.sync()
    }
}
