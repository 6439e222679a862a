use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use tokio_postgres::NoTls;
use tracing::{info, instrument};

use crate::error::{StoreError, StoreResult};

#[derive(Debug, Clone, serde::Deserialize)]
pub struct PostgresDbConfig {
    pub uri: String,
    #[serde(default = "max_conn_default")]
    pub max_conn: usize,
}

impl PostgresDbConfig {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            max_conn: max_conn_default(),
        }
    }
}

fn max_conn_default() -> usize { 16 }

/// Builds the connection pool and checks that one connection can be made.
#[instrument(skip_all)]
pub async fn connect_postgres_db(config: &PostgresDbConfig) -> StoreResult<Pool> {
    let pg_config = config
        .uri
        .parse::<tokio_postgres::Config>()
        .map_err(|e| StoreError::Connection(e.to_string()))?;

    let mgr_config = ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    };
    let mgr = Manager::from_config(pg_config, NoTls, mgr_config);

    let pool = Pool::builder(mgr)
        .max_size(config.max_conn)
        .build()
        .map_err(|e| StoreError::Connection(e.to_string()))?;

    // Fail at startup rather than on the first enrichment request.
    let _client = pool.get().await?;
    info!(
        "PostgreSQL pool initialized with max {} connections",
        config.max_conn
    );

    Ok(pool)
}
