//! Text mining for genre enrichment: matching genre labels in free text
//! and splitting noisy event titles into artist names. Nothing in here
//! does I/O apart from [`Vocabulary::load`].

mod artists;
mod genres;
mod vocabulary;

pub use artists::extract_artists_from_title;
pub use genres::{MAX_NGRAM_TOKENS, extract_genres_from_text};
pub use vocabulary::Vocabulary;
