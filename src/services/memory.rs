use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::errors::WalletError;
use crate::models::{NewWallet, Wallet, WalletId};
use crate::services::WalletService;

struct Store {
    wallets: Vec<Wallet>,
    // None once the id space is used up
    next_id: Option<WalletId>,
}

/// Wallet service holding everything in process memory. Ids start at 1.
#[derive(Clone)]
pub struct InMemoryWalletService {
    store: Arc<RwLock<Store>>,
}

impl Default for InMemoryWalletService {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryWalletService {
    pub fn new() -> Self {
        Self::with_wallets(Vec::new())
    }

    /// Start from existing wallets, kept in the given order. New ids continue after the highest one.
    pub fn with_wallets(wallets: Vec<Wallet>) -> Self {
        let next_id = wallets.iter().map(|w| w.id).max().unwrap_or(0).checked_add(1);
        Self {
            store: Arc::new(RwLock::new(Store { wallets, next_id })),
        }
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.wallets.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl WalletService for InMemoryWalletService {
    async fn create_wallet(&self, wallet: NewWallet) -> Result<Wallet, WalletError> {
        let mut store = self.store.write().await;
        let id = store
            .next_id
            .ok_or_else(|| WalletError::Database("wallet id sequence exhausted".to_string()))?;
        let created = Wallet {
            id,
            name: wallet.into_name(),
            creation_date: Utc::now(),
        };
        store.next_id = id.checked_add(1);
        store.wallets.push(created.clone());

        tracing::info!("Wallet {} created", created.id);
        Ok(created)
    }

    async fn get_wallets(&self) -> Result<Vec<Wallet>, WalletError> {
        Ok(self.store.read().await.wallets.clone())
    }

    async fn find_by_id(&self, id: WalletId) -> Result<Wallet, WalletError> {
        self.store
            .read()
            .await
            .wallets
            .iter()
            .find(|w| w.id == id)
            .cloned()
            .ok_or(WalletError::NotFound { id })
    }

    async fn update_wallet(&self, id: WalletId, wallet: NewWallet) -> Result<Wallet, WalletError> {
        let mut store = self.store.write().await;
        let existing = store
            .wallets
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(WalletError::NotFound { id })?;
        existing.name = wallet.into_name();

        tracing::info!("Wallet {} renamed", id);
        Ok(existing.clone())
    }

    async fn delete_wallet(&self, id: WalletId) -> Result<(), WalletError> {
        let mut store = self.store.write().await;
        let position = store
            .wallets
            .iter()
            .position(|w| w.id == id)
            .ok_or(WalletError::NotFound { id })?;
        store.wallets.remove(position);

        tracing::info!("Wallet {} deleted", id);
        Ok(())
    }

    async fn find_by_name(&self, fragment: &str) -> Result<Vec<Wallet>, WalletError> {
        let needle = fragment.to_lowercase();
        Ok(self
            .store
            .read()
            .await
            .wallets
            .iter()
            .filter(|w| w.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateWalletRequest;

    fn new_wallet(name: &str) -> NewWallet {
        CreateWalletRequest::new(name).validate().unwrap()
    }

    #[test]
    fn assigns_sequential_ids_and_keeps_insertion_order() {
        tokio_test::block_on(async {
            let service = InMemoryWalletService::new();
            service.create_wallet(new_wallet("Groceries")).await.unwrap();
            service.create_wallet(new_wallet("Rent")).await.unwrap();
            service.create_wallet(new_wallet("Travel")).await.unwrap();

            let wallets = service.get_wallets().await.unwrap();
            let summary: Vec<(WalletId, &str)> =
                wallets.iter().map(|w| (w.id, w.name.as_str())).collect();
            assert_eq!(summary, vec![(1, "Groceries"), (2, "Rent"), (3, "Travel")]);
        });
    }

    #[test]
    fn ids_continue_after_seeded_wallets() {
        tokio_test::block_on(async {
            let seeded = Wallet {
                id: 41,
                name: "Seeded".to_string(),
                creation_date: Utc::now(),
            };
            let service = InMemoryWalletService::with_wallets(vec![seeded]);
            let created = service.create_wallet(new_wallet("Next")).await.unwrap();
            assert_eq!(created.id, 42);
        });
    }

    #[test]
    fn id_sequence_exhaustion_is_an_error_not_a_panic() {
        tokio_test::block_on(async {
            let seeded = Wallet {
                id: WalletId::MAX - 1,
                name: "Almost full".to_string(),
                creation_date: Utc::now(),
            };
            let service = InMemoryWalletService::with_wallets(vec![seeded]);

            let last = service.create_wallet(new_wallet("Last")).await.unwrap();
            assert_eq!(last.id, WalletId::MAX);

            assert!(matches!(
                service.create_wallet(new_wallet("Overflow")).await,
                Err(WalletError::Database(_))
            ));
            assert_eq!(service.len().await, 2);
        });
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_get_unique_sequential_ids() {
        let service = InMemoryWalletService::new();

        let handles: Vec<_> = (0..200)
            .map(|i| {
                let service = service.clone();
                tokio::spawn(async move {
                    service
                        .create_wallet(new_wallet(&format!("Wallet {}", i)))
                        .await
                        .unwrap()
                        .id
                })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();

        assert_eq!(ids, (1..=200).collect::<Vec<WalletId>>());
        assert_eq!(service.len().await, 200);
    }

    #[test]
    fn rename_keeps_creation_date() {
        tokio_test::block_on(async {
            let service = InMemoryWalletService::new();
            let created = service.create_wallet(new_wallet("Old")).await.unwrap();
            let renamed = service
                .update_wallet(created.id, new_wallet("New"))
                .await
                .unwrap();
            assert_eq!(renamed.name, "New");
            assert_eq!(renamed.creation_date, created.creation_date);
        });
    }

    #[test]
    fn unknown_ids_are_not_found() {
        tokio_test::block_on(async {
            let service = InMemoryWalletService::new();
            assert!(matches!(
                service.find_by_id(9).await,
                Err(WalletError::NotFound { id: 9 })
            ));
            assert!(matches!(
                service.update_wallet(9, new_wallet("x")).await,
                Err(WalletError::NotFound { id: 9 })
            ));
            assert!(matches!(
                service.delete_wallet(9).await,
                Err(WalletError::NotFound { id: 9 })
            ));
        });
    }

    #[test]
    fn delete_removes_only_the_target() {
        tokio_test::block_on(async {
            let service = InMemoryWalletService::new();
            let first = service.create_wallet(new_wallet("First")).await.unwrap();
            service.create_wallet(new_wallet("Second")).await.unwrap();

            service.delete_wallet(first.id).await.unwrap();

            let names: Vec<String> = service
                .get_wallets()
                .await
                .unwrap()
                .into_iter()
                .map(|w| w.name)
                .collect();
            assert_eq!(names, vec!["Second".to_string()]);
        });
    }

    #[test]
    fn find_by_name_is_case_insensitive() {
        tokio_test::block_on(async {
            let service = InMemoryWalletService::new();
            service.create_wallet(new_wallet("Home Budget")).await.unwrap();
            service.create_wallet(new_wallet("Car")).await.unwrap();
            service.create_wallet(new_wallet("holiday HOME")).await.unwrap();

            let found = service.find_by_name("home").await.unwrap();
            let ids: Vec<WalletId> = found.iter().map(|w| w.id).collect();
            assert_eq!(ids, vec![1, 3]);
        });
    }
}
