use enrichment_errors::{Authority, ResolveError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthorityError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("missing credentials: {0}")]
    MissingCredentials(&'static str),
}

impl AuthorityError {
    pub fn into_resolve_error(self, authority: Authority) -> ResolveError {
        ResolveError::external(authority, self.to_string())
    }
}
