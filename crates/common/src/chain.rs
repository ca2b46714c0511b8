//! Simulated blockchain interactions.
//!
//! FarmBazaar does not talk to any chain. Wallet "connections" and smart
//! contract settlements are represented by random identifiers that only
//! look like their on-chain counterparts.

use rand::{thread_rng, RngCore};

/// Size of an EVM-style account address, in bytes.
pub const ADDRESS_LENGTH: usize = 20;

/// Size of a transaction hash, in bytes.
pub const TRANSACTION_HASH_LENGTH: usize = 32;

fn random_hex<const N: usize>() -> String {
    let mut buf = [0u8; N];
    thread_rng().fill_bytes(&mut buf);

    format!("0x{}", hex::encode(buf))
}

/// Generate a random `0x`-prefixed wallet address.
pub fn mock_wallet_address() -> String {
    random_hex::<ADDRESS_LENGTH>()
}

/// Generate a random `0x`-prefixed transaction hash.
pub fn mock_transaction_hash() -> String {
    random_hex::<TRANSACTION_HASH_LENGTH>()
}

#[cfg(test)]
mod tests {
    use super::{mock_transaction_hash, mock_wallet_address};

    fn is_hex(val: &str) -> bool {
        val.chars().all(|c| c.is_ascii_hexdigit())
    }

    #[test]
    fn wallet_address() {
        let address = mock_wallet_address();

        assert_eq!(address.len(), 42);
        assert!(address.starts_with("0x"));
        assert!(is_hex(&address[2..]));
    }

    #[test]
    fn transaction_hash() {
        let hash = mock_transaction_hash();

        assert_eq!(hash.len(), 66);
        assert!(is_hex(&hash[2..]));
        assert_ne!(hash, mock_transaction_hash());
    }
}
