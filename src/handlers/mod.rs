pub mod wallets;

pub use wallets::{
    create_wallet,
    delete_wallet,
    get_wallet,
    list_wallets,
    search_wallets,
    update_wallet,
    EMPTY_LIST_OF_WALLETS_HEADER_MSG,
    LIST_OF_WALLETS_HEADER_MSG,
    MESSAGE_HEADER,
};
