use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::database::DatabasePool;
use crate::errors::WalletError;
use crate::models::{NewWallet, Wallet, WalletId};

/// Wallet business operations. Handlers only ever talk to this trait.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WalletService: Send + Sync {
    async fn create_wallet(&self, wallet: NewWallet) -> Result<Wallet, WalletError>;

    /// All wallets in insertion order.
    async fn get_wallets(&self) -> Result<Vec<Wallet>, WalletError>;

    async fn find_by_id(&self, id: WalletId) -> Result<Wallet, WalletError>;

    async fn update_wallet(&self, id: WalletId, wallet: NewWallet) -> Result<Wallet, WalletError>;

    async fn delete_wallet(&self, id: WalletId) -> Result<(), WalletError>;

    /// Case-insensitive substring match on the name, in insertion order.
    async fn find_by_name(&self, fragment: &str) -> Result<Vec<Wallet>, WalletError>;
}

type WalletRow = (i64, String, DateTime<Utc>);

fn from_row((id, name, creation_date): WalletRow) -> Wallet {
    Wallet {
        id,
        name,
        creation_date,
    }
}

/// Escape LIKE metacharacters so user input is matched literally.
fn like_pattern(fragment: &str) -> String {
    let escaped = fragment
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// PostgreSQL-backed wallet service.
#[derive(Clone)]
pub struct PgWalletService {
    db_pool: DatabasePool,
}

impl PgWalletService {
    pub fn new(db_pool: DatabasePool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl WalletService for PgWalletService {
    async fn create_wallet(&self, wallet: NewWallet) -> Result<Wallet, WalletError> {
        let row = sqlx::query_as::<_, WalletRow>(
            r#"
            INSERT INTO wallets (name, creation_date)
            VALUES ($1, $2)
            RETURNING id, name, creation_date
            "#,
        )
        .bind(wallet.name())
        .bind(Utc::now())
        .fetch_one(&*self.db_pool)
        .await?;

        let created = from_row(row);
        tracing::info!("Wallet {} created", created.id);
        Ok(created)
    }

    async fn get_wallets(&self) -> Result<Vec<Wallet>, WalletError> {
        let rows = sqlx::query_as::<_, WalletRow>(
            "SELECT id, name, creation_date FROM wallets ORDER BY id",
        )
        .fetch_all(&*self.db_pool)
        .await?;

        Ok(rows.into_iter().map(from_row).collect())
    }

    async fn find_by_id(&self, id: WalletId) -> Result<Wallet, WalletError> {
        sqlx::query_as::<_, WalletRow>(
            "SELECT id, name, creation_date FROM wallets WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&*self.db_pool)
        .await?
        .map(from_row)
        .ok_or(WalletError::NotFound { id })
    }

    async fn update_wallet(&self, id: WalletId, wallet: NewWallet) -> Result<Wallet, WalletError> {
        let updated = sqlx::query_as::<_, WalletRow>(
            r#"
            UPDATE wallets
            SET name = $2
            WHERE id = $1
            RETURNING id, name, creation_date
            "#,
        )
        .bind(id)
        .bind(wallet.name())
        .fetch_optional(&*self.db_pool)
        .await?
        .map(from_row)
        .ok_or(WalletError::NotFound { id })?;

        tracing::info!("Wallet {} renamed", id);
        Ok(updated)
    }

    async fn delete_wallet(&self, id: WalletId) -> Result<(), WalletError> {
        let result = sqlx::query("DELETE FROM wallets WHERE id = $1")
            .bind(id)
            .execute(&*self.db_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(WalletError::NotFound { id });
        }

        tracing::info!("Wallet {} deleted", id);
        Ok(())
    }

    async fn find_by_name(&self, fragment: &str) -> Result<Vec<Wallet>, WalletError> {
        let rows = sqlx::query_as::<_, WalletRow>(
            r#"
            SELECT id, name, creation_date
            FROM wallets
            WHERE LOWER(name) LIKE LOWER($1) ESCAPE '\'
            ORDER BY id
            "#,
        )
        .bind(like_pattern(fragment))
        .fetch_all(&*self.db_pool)
        .await?;

        Ok(rows.into_iter().map(from_row).collect())
    }
}
