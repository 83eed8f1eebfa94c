//! Wallet entity, request and view types.

pub mod ids;
pub mod wallet;

pub use ids::WalletId;
pub use wallet::{CreateWalletRequest, NewWallet, SearchWalletsQuery, Wallet, WalletView};
