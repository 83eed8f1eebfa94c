//! Entity ID aliases. Wallet ids are database-assigned sequence numbers.

pub type WalletId = i64;

/// Parse a path segment into a wallet id or return an error message. Use at API boundaries.
pub fn parse_wallet_id(id: &str) -> Result<WalletId, String> {
    match id.trim().parse::<WalletId>() {
        Ok(value) if value > 0 => Ok(value),
        Ok(value) => Err(format!("Invalid wallet id: {}", value)),
        Err(e) => Err(format!("Invalid wallet id: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_positive_ids() {
        assert_eq!(parse_wallet_id("42"), Ok(42));
    }

    #[test]
    fn rejects_zero_negative_and_garbage() {
        assert!(parse_wallet_id("0").is_err());
        assert!(parse_wallet_id("-3").is_err());
        assert!(parse_wallet_id("abc").is_err());
    }
}
