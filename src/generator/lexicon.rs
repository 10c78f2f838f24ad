//! Fixed word lists consulted by the classifier and scorers.
//!
//! All lookups expect an already lowercased word.

use std::sync::LazyLock;

use regex::Regex;

pub fn is_stopword(word: &str) -> bool {
    matches!(
        word,
        "a" | "an" | "the" | "and" | "or" | "but" | "if" | "then" | "than" | "so"
            | "because" | "as" | "at" | "by" | "for" | "from" | "in" | "into" | "of" | "on"
            | "onto" | "to" | "up" | "down" | "over" | "under" | "with" | "without" | "within"
            | "out" | "about" | "after" | "before" | "between" | "during" | "through"
            | "against" | "among" | "is" | "are" | "was" | "were" | "be" | "been" | "being"
            | "it" | "its" | "it's" | "this" | "that" | "these" | "those" | "i" | "you" | "he"
            | "she" | "they" | "we" | "me" | "him" | "her" | "them" | "us" | "my" | "your"
            | "our" | "their" | "who" | "whom" | "which" | "what" | "when" | "where" | "why"
            | "how" | "not" | "no" | "nor" | "very" | "just" | "also" | "can" | "could"
            | "may" | "might" | "will" | "would" | "shall" | "should" | "do" | "does" | "did"
            | "done" | "have" | "has" | "had"
    )
}

/// Page furniture that leaks into article text: timestamps, share buttons, live-blog labels.
pub fn is_news_junk(word: &str) -> bool {
    matches!(
        word,
        "updated" | "minutes" | "minute" | "hours" | "hour" | "show" | "more" | "live"
            | "latest" | "pinned" | "subscribe" | "gift" | "article" | "listen" | "follow"
            | "share" | "full" | "highlights" | "approval"
    )
}

pub fn is_title_word(word: &str) -> bool {
    matches!(
        word,
        "president" | "chief" | "justice" | "judge" | "senator" | "governor" | "secretary"
            | "minister" | "mr" | "mrs" | "ms" | "dr" | "professor"
    )
}

pub fn is_scaffolding(word: &str) -> bool {
    matches!(
        word,
        "president" | "justice" | "court" | "congress" | "approval" | "wrote" | "joined" | "said"
    )
}

/// Connectives a line should not open on.
pub fn is_weak_opener(word: &str) -> bool {
    matches!(
        word,
        "and" | "or" | "but" | "so" | "for" | "to" | "of" | "in" | "on" | "at" | "with" | "from"
    )
}

pub fn is_conjunction(word: &str) -> bool {
    matches!(word, "and" | "or" | "but")
}

pub fn is_preposition(word: &str) -> bool {
    matches!(
        word,
        "in" | "on" | "at" | "by" | "for" | "from" | "with" | "without" | "of" | "to" | "into"
            | "over" | "under" | "between" | "through"
    )
}

pub fn is_determiner(word: &str) -> bool {
    matches!(word, "the" | "a" | "an" | "this" | "that" | "these" | "those")
}

pub fn is_auxiliary(word: &str) -> bool {
    matches!(
        word,
        "is" | "are" | "was" | "were" | "be" | "been" | "being" | "do" | "does" | "did" | "have"
            | "has" | "had" | "will" | "would" | "can" | "could" | "should" | "may" | "might"
    )
}

pub fn is_wh_word(word: &str) -> bool {
    matches!(word, "who" | "which" | "what" | "when" | "where" | "why" | "how")
}

// substring match on purpose: "network" and "shadows" both count
static EVOCATIVE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        "(?i)(defiant|ashamed|authority|ruling|shadow|strikes|work|around|fall|fear|quiet|burn|storm|glass|blood|ghost|dark|light|alone|broken|refuse|wait|hunger|mercy|steel|dust)",
    )
    .expect("valid evocative regex")
});

pub fn is_evocative(word: &str) -> bool {
    EVOCATIVE_REGEX.is_match(word)
}
