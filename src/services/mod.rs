pub mod memory;
pub mod wallet_mapper;
pub mod wallet_service;

pub use memory::InMemoryWalletService;
pub use wallet_mapper::{ModelWalletMapper, WalletMapper};
pub use wallet_service::{PgWalletService, WalletService};
