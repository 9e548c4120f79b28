//! Splitting raw input lines into word tokens.

/// Characters that separate tokens. The bell character counts as whitespace.
const DELIMITERS: &[char] = &[' ', '\t', '\r', '\n', '\x07'];

/// Split a raw input line into word tokens.
///
/// Runs of delimiter characters collapse, so no empty tokens are produced,
/// and an empty or all-whitespace line yields an empty vector. There is no
/// quoting or escaping: a quote character is an ordinary token character.
pub fn split_into_tokens(line: &str) -> Vec<String> {
    line.split(DELIMITERS)
        .filter(|word| !word.is_empty())
        .map(str::to_owned)
        .collect()
}
