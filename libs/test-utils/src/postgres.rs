use std::time::Duration;

use anyhow::{Context, Result};
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use testcontainers_modules::{
    postgres::Postgres,
    testcontainers::{ContainerAsync, runners::AsyncRunner},
};
use tokio::time::sleep;
use tokio_postgres::NoTls;
use tracing::debug;

/// Throwaway PostgreSQL instance for store tests. Needs a Docker daemon.
pub struct TestPostgresContainer {
    pub pool: Pool,
    pub connection_string: String,
    // Keep the container alive for the lifetime of this struct
    _container: ContainerAsync<Postgres>,
}

impl TestPostgresContainer {
    pub async fn new() -> Result<Self> {
        let container = Postgres::default()
            .start()
            .await
            .context("Failed to start PostgreSQL container")?;

        let host = container.get_host().await?;
        let port = container.get_host_port_ipv4(5432).await?;
        let connection_string =
            format!("postgresql://postgres:postgres@{host}:{port}/postgres");

        let pool = Self::create_pool(&connection_string).await?;

        Ok(Self {
            pool,
            connection_string,
            _container: container,
        })
    }

    async fn create_pool(connection_string: &str) -> Result<Pool> {
        let pg_config = connection_string.parse::<tokio_postgres::Config>()?;
        let mgr_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };
        let mgr = Manager::from_config(pg_config, NoTls, mgr_config);
        let pool = Pool::builder(mgr).max_size(4).build()?;

        let mut attempts = 0;
        loop {
            match pool.get().await {
                Ok(_) => break,
                Err(e) if attempts < 10 => {
                    attempts += 1;
                    debug!("PostgreSQL not ready yet ({e}), retrying");
                    sleep(Duration::from_millis(250 * attempts)).await;
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(pool)
    }
}
