// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{LedgerError, Result};
use crate::hashlink::{GENESIS_PREVIOUS_HASH, fingerprint};
use crate::models::{Block, Category, Transaction, TransactionType};

pub const GENESIS_DESCRIPTION: &str = "Genesis block";

/// Append-only, hash-linked sequence of blocks.
///
/// Blocks only enter through [`Ledger::genesis`] and [`Ledger::append`]; there
/// is no way to edit or remove one afterwards.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Ledger {
    blocks: Vec<Block>,
}

impl Ledger {
    /// Rebuilds a ledger from blocks produced elsewhere (e.g. an export).
    /// Nothing is checked here; call [`Ledger::verify`] afterwards.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Writes block #0. The payload is an `Income` carrying the opening
    /// balance, which may be zero.
    pub fn genesis(&mut self, account_id: &str, opening_balance: Decimal) -> Result<Block> {
        if !self.blocks.is_empty() {
            return Err(LedgerError::InvalidPhase(
                "Ledger already has a genesis block".into(),
            ));
        }
        let now = Utc::now().timestamp_millis();
        let data = Transaction {
            id: format!("genesis-{}", account_id),
            timestamp: now,
            r#type: TransactionType::Income,
            category: Category::Other,
            amount: opening_balance,
            description: GENESIS_DESCRIPTION.to_string(),
            receiver: None,
        };
        let hash = fingerprint(0, now, &data, GENESIS_PREVIOUS_HASH);
        let block = Block {
            index: 0,
            timestamp: now,
            data,
            previous_hash: GENESIS_PREVIOUS_HASH.to_string(),
            hash,
        };
        self.blocks.push(block.clone());
        debug!(account = account_id, hash = %block.hash, "genesis block written");
        Ok(block)
    }

    pub fn append(&mut self, data: Transaction) -> Result<Block> {
        let prev = self.latest()?;
        let index = prev.index + 1;
        // Clamp so a clock step backwards cannot reorder the chain.
        let timestamp = Utc::now().timestamp_millis().max(prev.timestamp);
        let previous_hash = prev.hash.clone();
        let hash = fingerprint(index, timestamp, &data, &previous_hash);
        let block = Block {
            index,
            timestamp,
            data,
            previous_hash,
            hash,
        };
        self.blocks.push(block.clone());
        debug!(index, hash = %block.hash, "block appended");
        Ok(block)
    }

    pub fn latest(&self) -> Result<&Block> {
        self.blocks.last().ok_or(LedgerError::EmptyLedger)
    }

    pub fn verify(&self) -> bool {
        self.verify_report().is_ok()
    }

    /// Walks the whole chain and reports the first block that fails either
    /// its own hash or the link to its predecessor.
    pub fn verify_report(&self) -> Result<()> {
        let mut prev: Option<&Block> = None;
        for (pos, block) in self.blocks.iter().enumerate() {
            let expected_prev = prev.map_or(GENESIS_PREVIOUS_HASH, |p| p.hash.as_str());
            let recomputed =
                fingerprint(block.index, block.timestamp, &block.data, &block.previous_hash);
            let ok = block.index == pos as u64
                && block.previous_hash == expected_prev
                && recomputed == block.hash;
            if !ok {
                warn!(index = pos, "chain integrity check failed");
                return Err(LedgerError::ChainIntegrity { index: pos as u64 });
            }
            prev = Some(block);
        }
        Ok(())
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// User transactions, genesis excluded, oldest first.
    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.blocks.iter().skip(1).map(|b| &b.data)
    }

    /// Sum of every signed amount on the chain, genesis included.
    /// Signed sum of every block, genesis included; `None` if it leaves the
    /// `Decimal` range.
    pub fn net_amount(&self) -> Option<Decimal> {
        self.blocks
            .iter()
            .try_fold(Decimal::ZERO, |acc, b| acc.checked_add(b.data.signed_amount()))
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(kind: TransactionType, amount: i64) -> Transaction {
        Transaction {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now().timestamp_millis(),
            r#type: kind,
            category: Category::Other,
            amount: Decimal::new(amount, 0),
            description: "test".into(),
            receiver: None,
        }
    }

    fn seeded() -> Ledger {
        let mut ledger = Ledger::default();
        ledger.genesis("9876543210", Decimal::ZERO).unwrap();
        ledger.append(tx(TransactionType::Income, 1000)).unwrap();
        ledger.append(tx(TransactionType::Expense, 200)).unwrap();
        ledger
    }

    #[test]
    fn latest_on_empty_ledger_fails() {
        let ledger = Ledger::default();
        assert_eq!(ledger.latest().unwrap_err(), LedgerError::EmptyLedger);
        let mut ledger = ledger;
        assert_eq!(
            ledger.append(tx(TransactionType::Income, 1)).unwrap_err(),
            LedgerError::EmptyLedger
        );
        assert!(ledger.is_empty());
    }

    #[test]
    fn genesis_only_once() {
        let mut ledger = Ledger::default();
        let g = ledger.genesis("9876543210", Decimal::new(100, 0)).unwrap();
        assert_eq!(g.index, 0);
        assert_eq!(g.previous_hash, GENESIS_PREVIOUS_HASH);
        assert!(ledger.genesis("9876543210", Decimal::ZERO).is_err());
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn indices_are_contiguous_and_linked() {
        let ledger = seeded();
        let blocks = ledger.blocks();
        for pair in blocks.windows(2) {
            assert_eq!(pair[1].index, pair[0].index + 1);
            assert_eq!(pair[1].previous_hash, pair[0].hash);
            assert!(pair[1].timestamp >= pair[0].timestamp);
        }
        assert!(ledger.verify());
        assert_eq!(ledger.net_amount(), Some(Decimal::new(800, 0)));
        assert_eq!(ledger.transactions().count(), 2);
    }

    #[test]
    fn tampered_data_is_detected() {
        let mut ledger = seeded();
        ledger.blocks[1].data.amount = Decimal::new(5000, 0);
        assert!(!ledger.verify());
        assert_eq!(
            ledger.verify_report().unwrap_err(),
            LedgerError::ChainIntegrity { index: 1 }
        );
    }

    #[test]
    fn rehashed_block_breaks_the_next_link() {
        let mut ledger = seeded();
        let b = &mut ledger.blocks[1];
        b.data.amount = Decimal::new(5000, 0);
        b.hash = fingerprint(b.index, b.timestamp, &b.data, &b.previous_hash);
        assert_eq!(
            ledger.verify_report().unwrap_err(),
            LedgerError::ChainIntegrity { index: 2 }
        );
    }

    #[test]
    fn tampered_hash_is_detected() {
        let mut ledger = seeded();
        ledger.blocks[2].hash = "f".repeat(64);
        assert!(!ledger.verify());
    }
}
