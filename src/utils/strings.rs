/// Maps typographic punctuation onto the plain ASCII forms the tokenizer understands.
pub fn clean_typography_symbols(text: &str) -> String {
    let mut output = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '“' | '”' | '„' => output.push('"'),
            '’' | '‘' | '᾽' | 'ʼ' => output.push('\''),

            '—' | '–' | '‐' => output.push('-'),

            '\u{00A0}' | '\u{2007}' | '\u{202F}' => output.push(' '),

            '…' => output.push_str("..."),
            '«' => output.push_str("<<"),
            '»' => output.push_str(">>"),

            _ => output.push(c),
        }
    }
    output
}

/// Collapses runs of whitespace, including newlines, into single spaces.
pub fn squash_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// "By Jane Smith" style credit lines.
pub fn is_byline(text: &str) -> bool {
    let mut words = text.split_whitespace();
    let first = words.next().map(str::to_lowercase);
    let second_upper = words
        .next()
        .and_then(|w| w.chars().next())
        .is_some_and(|c| c.is_ascii_uppercase());
    first.as_deref() == Some("by") && second_upper && text.starts_with(['B', 'b'])
}

/// "Updated 5 minutes ago" style timestamp strips.
pub fn is_timestamp_strip(text: &str) -> bool {
    let low = text.to_lowercase();
    low.contains("updated ")
        && (low.contains("minutes ago") || low.contains("hour ago") || low.contains("hours ago"))
}
