use clap::Parser;
use tokio::signal;
use tracing::{error, info};

use wallet_api::config::{Config, LogFormat, StorageKind};
use wallet_api::services::InMemoryWalletService;
use wallet_api::{database, router, AppState};

/// Wallet API server
#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
    /// Port to listen on (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Wallet storage backend (overrides WALLET_STORAGE)
    #[arg(long, value_enum)]
    storage: Option<StorageKind>,
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "wallet_api=debug,tower_http=debug".into());

    match format {
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(storage) = cli.storage {
        config.storage = storage;
    }

    init_tracing(config.log_format);
    info!("Starting Wallet API server...");

    let app_state = match config.storage {
        StorageKind::Postgres => {
            let db_pool = database::new_pool(&config).await?;
            info!("Database connection pool created");
            AppState::postgres(db_pool)
        }
        StorageKind::Memory => {
            info!("Using in-memory wallet storage; data is lost on shutdown");
            AppState::in_memory(InMemoryWalletService::new())
        }
    };

    let app = router(app_state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    // Graceful shutdown
    tokio::select! {
        result = axum::serve(listener, app) => {
            if let Err(e) = result {
                error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutting down gracefully...");
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
