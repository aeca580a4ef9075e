//! Message text normalization.
//!
//! Inbound WhatsApp text is noisy: shouted punctuation, chat abbreviations,
//! mixed case. The classifier's pattern tables assume lowercase normalized
//! text, so every message passes through [`normalize`] exactly once before
//! any scoring happens.

/// Chat abbreviations expanded before classification. Whole-word only, so
/// "q" inside "aqui" is left alone. Applied in order.
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("vc", "você"),
    ("q", "que"),
    ("tb", "também"),
    ("pq", "porque"),
];

/// Normalize raw message text for pattern matching.
///
/// Lowercases, collapses repeated punctuation (runs of `!` or `?` become a
/// single character, runs of three or more `.` become an ellipsis), expands
/// common chat abbreviations as whole words, and trims surrounding
/// whitespace. Total: every input, including the empty string, produces a
/// valid output.
pub fn normalize(raw: &str) -> String {
    let text = collapse_punctuation(&raw.to_lowercase());
    let text = expand_abbreviations(&text);
    text.trim().to_string()
}

fn collapse_punctuation(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if matches!(c, '!' | '?' | '.') {
            let mut run = 1usize;
            while chars.peek() == Some(&c) {
                chars.next();
                run += 1;
            }
            match c {
                '!' | '?' => out.push(c),
                _ if run >= 3 => out.push_str("..."),
                _ => {
                    for _ in 0..run {
                        out.push('.');
                    }
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn expand_abbreviations(text: &str) -> String {
    let mut result = text.to_string();
    for (abbr, full) in ABBREVIATIONS {
        result = replace_whole_word(&result, abbr, full);
    }
    result
}

/// Replace `word` with `replacement` wherever it appears bounded by
/// non-alphanumeric characters (or the ends of the string).
fn replace_whole_word(text: &str, word: &str, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    while let Some(offset) = text[cursor..].find(word) {
        let start = cursor + offset;
        let end = start + word.len();
        let before_ok = text[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = text[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        out.push_str(&text[cursor..start]);
        if before_ok && after_ok {
            out.push_str(replacement);
        } else {
            out.push_str(&text[start..end]);
        }
        cursor = end;
    }
    out.push_str(&text[cursor..]);
    out
}
