// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Block fingerprints: SHA-256 over a length-prefixed encoding of the block
//! header, rendered as lowercase hex.

use sha2::{Digest, Sha256};

use crate::models::Transaction;

/// `previous_hash` of the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";

pub fn fingerprint(index: u64, timestamp: i64, data: &Transaction, previous_hash: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(index.to_le_bytes());
    hasher.update(timestamp.to_le_bytes());
    write_transaction(&mut hasher, data);
    write_field(&mut hasher, previous_hash.as_bytes());
    hex::encode(hasher.finalize())
}

fn write_transaction(hasher: &mut Sha256, tx: &Transaction) {
    write_field(hasher, tx.id.as_bytes());
    hasher.update(tx.timestamp.to_le_bytes());
    write_field(hasher, tx.r#type.as_str().as_bytes());
    write_field(hasher, tx.category.as_str().as_bytes());
    // Decimal's string form keeps its scale, so "5" and "5.00" hash differently
    // but a stored value always reproduces its own hash.
    write_field(hasher, tx.amount.to_string().as_bytes());
    write_field(hasher, tx.description.as_bytes());
    match &tx.receiver {
        Some(r) => {
            hasher.update([1u8]);
            write_field(hasher, r.as_bytes());
        }
        None => hasher.update([0u8]),
    }
}

// Length prefix keeps ("ab", "c") and ("a", "bc") apart.
fn write_field(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update((bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, TransactionType};
    use rust_decimal::Decimal;

    fn sample() -> Transaction {
        Transaction {
            id: "tx-1".into(),
            timestamp: 1_700_000_000_000,
            r#type: TransactionType::Expense,
            category: Category::Food,
            amount: Decimal::new(12050, 2),
            description: "Lunch".into(),
            receiver: None,
        }
    }

    #[test]
    fn same_inputs_same_fingerprint() {
        let tx = sample();
        let a = fingerprint(3, 42, &tx, GENESIS_PREVIOUS_HASH);
        let b = fingerprint(3, 42, &tx, GENESIS_PREVIOUS_HASH);
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn every_field_feeds_the_fingerprint() {
        let tx = sample();
        let base = fingerprint(3, 42, &tx, GENESIS_PREVIOUS_HASH);

        assert_ne!(base, fingerprint(4, 42, &tx, GENESIS_PREVIOUS_HASH));
        assert_ne!(base, fingerprint(3, 43, &tx, GENESIS_PREVIOUS_HASH));
        assert_ne!(base, fingerprint(3, 42, &tx, &"1".repeat(64)));

        let mut changed = tx.clone();
        changed.amount = Decimal::new(12051, 2);
        assert_ne!(base, fingerprint(3, 42, &changed, GENESIS_PREVIOUS_HASH));

        let mut changed = tx.clone();
        changed.description = "Dinner".into();
        assert_ne!(base, fingerprint(3, 42, &changed, GENESIS_PREVIOUS_HASH));

        let mut changed = tx.clone();
        changed.category = Category::Shopping;
        assert_ne!(base, fingerprint(3, 42, &changed, GENESIS_PREVIOUS_HASH));

        let mut changed = tx.clone();
        changed.r#type = TransactionType::Income;
        assert_ne!(base, fingerprint(3, 42, &changed, GENESIS_PREVIOUS_HASH));

        let mut changed = tx;
        changed.receiver = Some(String::new());
        assert_ne!(base, fingerprint(3, 42, &changed, GENESIS_PREVIOUS_HASH));
    }

    #[test]
    fn field_boundaries_are_unambiguous() {
        let mut a = sample();
        a.id = "ab".into();
        a.description = "c".into();
        let mut b = sample();
        b.id = "a".into();
        b.description = "bc".into();
        assert_ne!(
            fingerprint(1, 1, &a, GENESIS_PREVIOUS_HASH),
            fingerprint(1, 1, &b, GENESIS_PREVIOUS_HASH)
        );
    }
}
