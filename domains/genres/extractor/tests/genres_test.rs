use std::collections::BTreeSet;

use genre_extractor::{Vocabulary, extract_genres_from_text};
use proptest::prelude::*;

fn test_vocabulary() -> Vocabulary {
    Vocabulary::new([
        "elektro",
        "house",
        "tech house",
        "techno",
        "jazz",
        "jazz fusion",
        "disco",
        "deep house",
    ])
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_extract_genres_from_hash_separated_tags() {
    let result = extract_genres_from_text(
        &test_vocabulary(),
        "2025 # Elektro # Resident # Show # Tech House # Techno",
    );
    assert_eq!(result, set(&["elektro", "tech house", "techno"]));
}

#[test]
fn test_extract_genres_prefers_longest_match() {
    let result = extract_genres_from_text(
        &test_vocabulary(),
        "This band pays jazz fusion",
    );
    assert_eq!(result, set(&["jazz fusion"]));
}

#[test]
fn test_extract_genres_single_token_at_end() {
    let result =
        extract_genres_from_text(&test_vocabulary(), "This band pays jazz");
    assert_eq!(result, set(&["jazz"]));
}

#[test]
fn test_extract_genres_single_token_in_middle() {
    let result = extract_genres_from_text(
        &test_vocabulary(),
        "This band pays jazz and is cool",
    );
    assert_eq!(result, set(&["jazz"]));
}

#[test]
fn test_extract_genres_skips_unknown_prefix_tokens() {
    let result = extract_genres_from_text(
        &test_vocabulary(),
        "2025 # Deep House # Disco # Diva Energy # Elektro # Queer Icon # \
         Resident # Special # Tech House",
    );
    assert_eq!(
        result,
        set(&["deep house", "disco", "elektro", "tech house"])
    );
}

#[test]
fn test_extract_genres_treats_hyphen_as_space() {
    let result =
        extract_genres_from_text(&test_vocabulary(), "Night of Deep-House!");
    assert_eq!(result, set(&["deep house"]));
}

#[test]
fn test_extract_genres_empty_text() {
    assert!(extract_genres_from_text(&test_vocabulary(), "").is_empty());
    assert!(
        extract_genres_from_text(&Vocabulary::default(), "jazz").is_empty()
    );
}

#[test]
fn test_vocabulary_normalizes_labels() {
    let vocabulary = Vocabulary::new(["Drum-and-Bass", "  Techno ", ""]);

    assert_eq!(vocabulary.len(), 2);
    assert!(vocabulary.contains("drum and bass"));
    assert!(vocabulary.contains("techno"));
}

#[test]
fn test_vocabulary_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("genres.txt");
    std::fs::write(&path, "deep-house\njazz\n\nindie-rock\n").unwrap();

    let vocabulary = Vocabulary::load(&path).unwrap();

    assert_eq!(vocabulary.len(), 3);
    assert!(vocabulary.contains("indie rock"));
}

#[test]
fn test_vocabulary_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Vocabulary::load(dir.path().join("missing.txt")).is_err());
}

const WORDS: &[&str] = &[
    "elektro", "house", "tech", "techno", "jazz", "fusion", "disco", "deep",
    "and", "band", "resident", "#", "2025",
];

fn word_list() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(WORDS), 0..24)
}

/// Every token at most once, so a word can only belong to one match.
fn distinct_words() -> impl Strategy<Value = Vec<&'static str>> {
    let tokens = vec![
        "elektro", "house", "tech", "techno", "jazz", "fusion", "disco",
        "deep", "resident", "show", "live",
    ];
    let len = tokens.len();
    prop::sample::subsequence(tokens, 0..=len).prop_shuffle()
}

proptest! {
    #[test]
    fn prop_matches_are_subset_of_vocabulary(words in word_list()) {
        let vocabulary = test_vocabulary();
        let result = extract_genres_from_text(&vocabulary, &words.join(" "));
        for genre in &result {
            prop_assert!(vocabulary.contains(genre));
        }
    }

    #[test]
    fn prop_repeating_text_does_not_change_result(words in word_list()) {
        let vocabulary = test_vocabulary();
        let text = words.join(" ");
        let once = extract_genres_from_text(&vocabulary, &text);
        let twice = extract_genres_from_text(
            &vocabulary,
            &format!("{text} resident {text}"),
        );
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_matches_do_not_overlap(words in distinct_words()) {
        let vocabulary = test_vocabulary();
        let text = words.join(" ");
        let result = extract_genres_from_text(&vocabulary, &text);

        let padded = format!(" {text} ");
        let mut claimed = BTreeSet::new();
        for genre in &result {
            let needle = format!(" {genre} ");
            prop_assert!(padded.contains(&needle));
            for token in genre.split(' ') {
                prop_assert!(
                    claimed.insert(token),
                    "{token:?} claimed twice in {result:?} from {text:?}"
                );
            }
        }
        prop_assert!(claimed.len() <= words.len());
    }
}
