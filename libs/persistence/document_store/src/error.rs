use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Document not found")]
    NotFound,
    #[error("Store call timed out after {0:?}")]
    Timeout(Duration),
    #[error("Database error: {0}")]
    Database(#[from] tokio_postgres::Error),
    #[error("Database pool error: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),
    #[error("Connection error: {0}")]
    Connection(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool { matches!(self, Self::NotFound) }
}

pub type StoreResult<T> = Result<T, StoreError>;
