use std::fmt;

use common_errors::AppError;
use thiserror::Error;

/// External authority an error originated from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Authority {
    Geocoder,
    MusicMetadata,
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Geocoder => write!(f, "geocoding authority"),
            Self::MusicMetadata => write!(f, "music metadata authority"),
        }
    }
}

/// Errors that cross the resolver boundary.
///
/// Cache and store misses never show up here; they only move the lookup to
/// the next tier. The type is `Clone` because failed authority calls are
/// kept in the negative cache and handed back verbatim on a repeat lookup.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("Validation error: {message}")]
    Validation { message: String },
    #[error("{authority} request failed: {message}")]
    ExternalService {
        authority: Authority,
        message: String,
    },
    #[error("Ambiguous result for {query}: candidates in {candidates:?}")]
    Ambiguous {
        query: String,
        candidates: Vec<String>,
    },
    #[error("No relevant result found for {query}")]
    Unresolved { query: String },
    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl ResolveError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn external(authority: Authority, message: impl Into<String>) -> Self {
        Self::ExternalService {
            authority,
            message: message.into(),
        }
    }

    pub fn unresolved(query: impl Into<String>) -> Self {
        Self::Unresolved {
            query: query.into(),
        }
    }

    pub fn storage(message: impl fmt::Display) -> Self {
        Self::Storage {
            message: message.to_string(),
        }
    }
}

pub type ResolveResult<T> = Result<T, ResolveError>;

impl From<ResolveError> for AppError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::Validation { message } => {
                AppError::bad_request("VALIDATION_FAILED", &message)
            }
            ResolveError::Ambiguous { query, candidates } => {
                AppError::unprocessable_entity_with_details(
                    "AMBIGUOUS_RESULT",
                    &format!("Ambiguous result for {query}"),
                    &candidates.join(", "),
                )
            }
            ResolveError::Unresolved { query } => {
                AppError::unprocessable_entity(
                    "UNRESOLVED",
                    &format!("No relevant result found for {query}"),
                )
            }
            ResolveError::ExternalService { authority, message } => {
                AppError::bad_gateway(
                    "AUTHORITY_FAILED",
                    &format!("{authority} request failed: {message}"),
                )
            }
            ResolveError::Storage { message } => {
                AppError::internal_server_error(&format!(
                    "Storage error: {message}"
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use common_errors::StatusCode;

    use super::*;

    #[test]
    fn test_ambiguous_maps_to_unprocessable_entity() {
        let err = ResolveError::Ambiguous {
            query: "springfield".into(),
            candidates: vec!["United States".into(), "Canada".into()],
        };
        let app_err: AppError = err.into();

        assert_eq!(app_err.code(), "AMBIGUOUS_RESULT");
        assert_eq!(
            app_err.status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_external_failure_maps_to_bad_gateway() {
        let err = ResolveError::external(Authority::Geocoder, "status 503");
        assert_eq!(
            err.to_string(),
            "geocoding authority request failed: status 503"
        );

        let app_err: AppError = err.into();
        assert_eq!(app_err.status_code(), StatusCode::BAD_GATEWAY);
    }
}
