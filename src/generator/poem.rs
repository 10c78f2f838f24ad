use std::collections::BTreeSet;

use crate::models::Window;

/// One line per window, in stream order. Windows reaching past the stream are skipped.
pub fn from_windows<S: AsRef<str>>(words: &[S], windows: &[Window]) -> String {
    let mut ordered: Vec<&Window> = windows.iter().collect();
    ordered.sort_by_key(|w| w.start);
    ordered
        .into_iter()
        .filter_map(|w| words.get(w.start..=w.end))
        .map(|line| {
            line.iter()
                .map(AsRef::as_ref)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// How many of the `remaining` words go on the next line.
pub fn line_take(remaining: usize) -> usize {
    match remaining {
        0..=3 => remaining,
        5 => 5,
        n if n >= 7 => {
            if n % 2 == 0 {
                4
            } else {
                3
            }
        }
        _ => 4,
    }
}

/// Groups loose kept words into lines of uneven length.
pub fn from_positions<S: AsRef<str>>(words: &[S], keep: &BTreeSet<usize>) -> String {
    let kept: Vec<&str> = keep
        .iter()
        .filter_map(|&i| words.get(i))
        .map(AsRef::as_ref)
        .collect();

    let mut lines = Vec::new();
    let mut i = 0;
    while i < kept.len() {
        let take = line_take(kept.len() - i);
        lines.push(kept[i..i + take].join(" "));
        i += take;
    }
    lines.join("\n")
}

pub fn assemble<S: AsRef<str>>(words: &[S], keep: &BTreeSet<usize>, windows: &[Window]) -> String {
    if windows.is_empty() {
        from_positions(words, keep)
    } else {
        from_windows(words, windows)
    }
}
