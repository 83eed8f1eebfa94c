use crate::models::{Wallet, WalletView};

/// Converts domain wallets into their wire form.
pub trait WalletMapper: Send + Sync {
    fn to_view(&self, wallet: &Wallet) -> WalletView;

    fn to_views(&self, wallets: &[Wallet]) -> Vec<WalletView> {
        wallets.iter().map(|w| self.to_view(w)).collect()
    }
}

/// Field-by-field mapping.
#[derive(Clone, Copy, Debug, Default)]
pub struct ModelWalletMapper;

impl WalletMapper for ModelWalletMapper {
    fn to_view(&self, wallet: &Wallet) -> WalletView {
        WalletView {
            id: wallet.id,
            name: wallet.name.clone(),
            creation_date: wallet.creation_date,
        }
    }
}
