use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::WalletId;

/// Domain wallet as stored by a [`crate::services::WalletService`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Wallet {
    pub id: WalletId,
    pub name: String,
    pub creation_date: DateTime<Utc>,
}

/// Wire representation of a wallet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletView {
    pub id: WalletId,
    pub name: String,
    #[serde(with = "crate::utils::timestamp")]
    pub creation_date: DateTime<Utc>,
}

/// Body of `POST /api/wallet` and `PATCH /api/wallet/:id`.
///
/// `name` stays optional on the wire so that `null` and a missing field reach
/// validation instead of failing deserialization.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateWalletRequest {
    #[serde(default)]
    pub name: Option<String>,
}

impl CreateWalletRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()) }
    }
}

/// A creation request that passed validation. Only `CreateWalletRequest::validate` builds one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewWallet {
    name: String,
}

impl NewWallet {
    pub(crate) fn from_validated(name: String) -> Self {
        Self { name }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn into_name(self) -> String {
        self.name
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchWalletsQuery {
    pub name: String,
}
