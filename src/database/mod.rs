use sqlx::postgres::{PgPool, PgPoolOptions};
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;

pub type DatabasePool = Arc<PgPool>;

/// How a database URL will be reached, judged from the URL alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionSecurity {
    /// `sslmode=require`, `verify-ca` or `verify-full`
    Tls,
    /// `sslmode=prefer`: TLS if the server offers it
    Opportunistic,
    Local,
    /// Remote host without an sslmode
    Plaintext,
}

fn host(database_url: &str) -> &str {
    let rest = database_url
        .split_once("://")
        .map_or(database_url, |(_, rest)| rest);
    let authority = rest.split(['/', '?']).next().unwrap_or_default();
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    if let Some(bracketed) = host_port.strip_prefix('[') {
        return bracketed.split(']').next().unwrap_or_default();
    }
    host_port.split(':').next().unwrap_or_default()
}

pub fn connection_security(database_url: &str) -> ConnectionSecurity {
    let url = database_url.to_lowercase();
    if ["sslmode=require", "sslmode=verify-ca", "sslmode=verify-full"]
        .iter()
        .any(|mode| url.contains(mode))
    {
        return ConnectionSecurity::Tls;
    }
    if url.contains("sslmode=prefer") {
        return ConnectionSecurity::Opportunistic;
    }
    match host(&url) {
        "" | "localhost" | "127.0.0.1" | "::1" => ConnectionSecurity::Local,
        _ => ConnectionSecurity::Plaintext,
    }
}

pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    match connection_security(database_url) {
        ConnectionSecurity::Tls => tracing::info!("Wallet database connection uses TLS"),
        ConnectionSecurity::Opportunistic => {
            tracing::info!("Wallet database connection uses TLS when the server offers it")
        }
        ConnectionSecurity::Local => tracing::debug!("Wallet database is local"),
        ConnectionSecurity::Plaintext => tracing::warn!(
            "Wallet database is remote and has no sslmode; add sslmode=require to DATABASE_URL"
        ),
    }

    let pool = PgPoolOptions::new()
        .max_connections(max_connections.max(1))
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Connect with the configured pool size and apply migrations.
pub async fn new_pool(config: &Config) -> anyhow::Result<DatabasePool> {
    let pool = create_pool(&config.database_url, config.database_max_connections).await?;
    run_migrations(&pool).await?;
    Ok(Arc::new(pool))
}

/// Apply the embedded migrations in `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}
