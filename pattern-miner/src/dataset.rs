use artifact_parser::{DataEntry, TokensMapEntry};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use visualizer_core::MiningError;

/// Transactions and token dictionary, cross-checked against each other.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    transactions: Vec<BTreeSet<i64>>,
    tokens: BTreeMap<i64, String>,
}

impl Dataset {
    /// Each data entry becomes one transaction whose id is its position.
    pub fn new(entries: &[DataEntry], tokens_map: &[TokensMapEntry]) -> Result<Self, MiningError> {
        let mut tokens = BTreeMap::new();
        let mut seen_tokens = HashSet::new();
        for entry in tokens_map {
            if !seen_tokens.insert(entry.token.as_str()) {
                return Err(MiningError::DuplicateToken {
                    token: entry.token.clone(),
                });
            }
            if tokens.insert(entry.id, entry.token.clone()).is_some() {
                return Err(MiningError::DuplicateTokenId { id: entry.id });
            }
        }

        let transactions = entries
            .iter()
            .map(|entry| {
                entry
                    .tokens
                    .iter()
                    .map(|&id| {
                        if tokens.contains_key(&id) {
                            Ok(id)
                        } else {
                            Err(MiningError::UnknownToken { id })
                        }
                    })
                    .collect::<Result<BTreeSet<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            transactions,
            tokens,
        })
    }

    pub fn num_transactions(&self) -> usize {
        self.transactions.len()
    }

    pub fn transaction_ids(&self) -> BTreeSet<i64> {
        (0..self.transactions.len() as i64).collect()
    }

    /// Token ids in ascending order.
    pub fn token_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.tokens.keys().copied()
    }

    /// Ids of the transactions containing `token_id`.
    pub fn tid_set(&self, token_id: i64) -> BTreeSet<i64> {
        self.transactions
            .iter()
            .enumerate()
            .filter(|(_, items)| items.contains(&token_id))
            .map(|(tid, _)| tid as i64)
            .collect()
    }

    pub fn decode(&self, token_id: i64) -> Option<&str> {
        self.tokens.get(&token_id).map(String::as_str)
    }
}
