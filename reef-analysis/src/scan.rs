//! Small text-scanning helpers shared by the line-pattern passes.

pub(crate) fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|ch| ch.is_alphanumeric() || ch == '_')
}

/// Longest identifier prefix of `text`, which may be empty.
pub(crate) fn leading_identifier(text: &str) -> &str {
    let end = text
        .char_indices()
        .find(|(index, ch)| {
            if *index == 0 {
                !(ch.is_alphabetic() || *ch == '_')
            } else {
                !(ch.is_alphanumeric() || *ch == '_')
            }
        })
        .map(|(index, _)| index)
        .unwrap_or(text.len());
    &text[..end]
}

/// Index of the `)` closing the `(` at byte offset `open`, or `None` when
/// the parenthesis never closes.
pub(crate) fn matching_paren(text: &str, open: usize) -> Option<usize> {
    debug_assert_eq!(text.as_bytes().get(open), Some(&b'('));
    let mut depth = 0usize;
    for (index, ch) in text[open..].char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + index);
                }
            }
            _ => {}
        }
    }
    None
}

/// Word-level containment check: `word` must appear delimited by
/// non-identifier characters. Note this still matches inside string
/// literals; the block parser pins that behavior deliberately.
pub(crate) fn contains_word(line: &str, word: &str) -> bool {
    line.split(|ch: char| !(ch.is_alphanumeric() || ch == '_'))
        .any(|piece| piece == word)
}
