use std::{collections::HashSet, fs, io, path::Path};

use tracing::info;

/// The curated set of genre labels recognised by text extraction.
///
/// Labels are normalised on the way in (`-` becomes a space, lowercase,
/// trimmed) so they compare equal to the n-grams built from cleaned text.
#[derive(Clone, Debug, Default)]
pub struct Vocabulary {
    labels: HashSet<String>,
}

impl Vocabulary {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let labels = labels
            .into_iter()
            .map(|label| normalize_label(label.as_ref()))
            .filter(|label| !label.is_empty())
            .collect();
        Self { labels }
    }

    /// Reads one label per line.
    pub fn load(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let vocabulary = Self::new(contents.lines());
        info!(
            "Loaded {} genre labels from {}",
            vocabulary.len(),
            path.display()
        );
        Ok(vocabulary)
    }

    pub fn contains(&self, label: &str) -> bool { self.labels.contains(label) }

    pub fn len(&self) -> usize { self.labels.len() }

    pub fn is_empty(&self) -> bool { self.labels.is_empty() }
}

fn normalize_label(label: &str) -> String {
    label.replace('-', " ").trim().to_lowercase()
}
