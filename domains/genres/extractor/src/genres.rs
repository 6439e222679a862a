use std::{collections::BTreeSet, sync::LazyLock};

use regex::Regex;

use crate::vocabulary::Vocabulary;

/// Longest run of tokens considered as one genre candidate.
pub const MAX_NGRAM_TOKENS: usize = 4;

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9 ]+").expect("valid regex"));

/// Finds every vocabulary label mentioned in `text`.
///
/// The scan runs left to right. At each position the longest n-gram (up to
/// [`MAX_NGRAM_TOKENS`] tokens) found in the vocabulary wins and the scan
/// continues after it, so matches never overlap: "jazz fusion" yields
/// `jazz fusion` and not also `jazz`.
pub fn extract_genres_from_text(
    vocabulary: &Vocabulary, text: &str,
) -> BTreeSet<String> {
    let lowered = text.to_lowercase().replace('-', " ");
    let cleaned = NON_ALPHANUMERIC.replace_all(&lowered, "");
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();

    let mut genres = BTreeSet::new();
    let mut i = 0;
    while i < tokens.len() {
        let longest = (1..=MAX_NGRAM_TOKENS.min(tokens.len() - i))
            .rev()
            .map(|n| (n, tokens[i..i + n].join(" ")))
            .find(|(_, candidate)| vocabulary.contains(candidate));

        match longest {
            Some((n, genre)) => {
                genres.insert(genre);
                i += n;
            }
            None => i += 1,
        }
    }
    genres
}
