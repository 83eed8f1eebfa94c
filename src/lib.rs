// Library root - exports for the binary and tests

pub mod config;
pub mod database;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;
pub mod validation;

pub use config::Config;
pub use errors::WalletError;

use axum::{
    routing::get,
    Router,
};
use services::{InMemoryWalletService, ModelWalletMapper, PgWalletService, WalletMapper, WalletService};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Clone)]
pub struct AppState {
    pub wallet_service: Arc<dyn WalletService>,
    pub wallet_mapper: Arc<dyn WalletMapper>,
}

impl AppState {
    pub fn new(
        wallet_service: Arc<dyn WalletService>,
        wallet_mapper: Arc<dyn WalletMapper>,
    ) -> Self {
        Self {
            wallet_service,
            wallet_mapper,
        }
    }

    /// State backed by the in-memory service and the default mapper.
    pub fn in_memory(service: InMemoryWalletService) -> Self {
        Self::new(Arc::new(service), Arc::new(ModelWalletMapper))
    }

    /// State backed by PostgreSQL.
    pub fn postgres(db_pool: database::DatabasePool) -> Self {
        Self::new(
            Arc::new(PgWalletService::new(db_pool)),
            Arc::new(ModelWalletMapper),
        )
    }
}

/// Wallet routes plus health check, with tracing and CORS layers.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/wallet",
            get(handlers::list_wallets).post(handlers::create_wallet),
        )
        .route("/api/wallet/search", get(handlers::search_wallets))
        .route(
            "/api/wallet/:id",
            get(handlers::get_wallet)
                .patch(handlers::update_wallet)
                .delete(handlers::delete_wallet),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
