use std::sync::LazyLock;

use regex::Regex;

// Separators are matched anywhere, including inside words ("and" in
// "Brandon"). Mis-splits of that kind are a known limitation.
static ARTIST_SEPARATORS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:,|»|:|!|&|and|feat\.|feat|ft|with|vs\.|vs|versus|presenting|presents|performed by|performed|performed live by|performed live|live by|live|live at|live from|live in|live on|live performance|live recording|live version|live vocals|\([^)]+\)|\[[^\]]+\]|\{[^}]+\}|<.+>)",
    )
    .expect("valid regex")
});

/// Splits an event title into lowercase artist names, in title order.
///
/// Every separator token and every bracketed span (`(...)`, `[...]`,
/// `{...}`, `<...>`) is treated as a comma.
pub fn extract_artists_from_title(title: &str) -> Vec<String> {
    let replaced = ARTIST_SEPARATORS.replace_all(title, ",");
    replaced
        .to_lowercase()
        .split(',')
        .map(str::trim)
        .filter(|artist| !artist.is_empty())
        .map(str::to_string)
        .collect()
}
