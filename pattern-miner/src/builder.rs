//! Eclat and dEclat itemset trees.
//!
//! Both algorithms grow the tree level by level from single tokens. Two
//! siblings always share every token but their last, so joining them yields
//! the itemset of the first extended by the last token of the second.
//!
//! Eclat tracks, per itemset, the transactions that contain it. dEclat tracks
//! the difference from the parent instead: the transactions that contain the
//! parent but not the itemset.

use crate::dataset::Dataset;
use artifact_parser::TreeNode;
use std::collections::BTreeSet;
use tracing::debug;
use visualizer_core::TreeVariant;

#[derive(Debug, Clone)]
struct Candidate {
    tokens_ids: Vec<i64>,
    support: usize,
    id_set: BTreeSet<i64>,
}

fn root_candidate(dataset: &Dataset, variant: TreeVariant) -> Candidate {
    let id_set = match variant {
        TreeVariant::Eclat => dataset.transaction_ids(),
        TreeVariant::Declat => BTreeSet::new(),
    };
    Candidate {
        tokens_ids: Vec::new(),
        support: dataset.num_transactions(),
        id_set,
    }
}

fn single_token(dataset: &Dataset, token_id: i64, variant: TreeVariant) -> Candidate {
    let tids = dataset.tid_set(token_id);
    let (support, id_set) = match variant {
        TreeVariant::Eclat => (tids.len(), tids),
        TreeVariant::Declat => {
            let diffset: BTreeSet<i64> = dataset.transaction_ids().difference(&tids).copied().collect();
            (dataset.num_transactions() - diffset.len(), diffset)
        }
    };
    Candidate {
        tokens_ids: vec![token_id],
        support,
        id_set,
    }
}

fn join(node: &Candidate, other: &Candidate, variant: TreeVariant) -> Candidate {
    let mut tokens_ids = node.tokens_ids.clone();
    tokens_ids.extend(other.tokens_ids.last().copied());

    let (support, id_set) = match variant {
        TreeVariant::Eclat => {
            let tids: BTreeSet<i64> = node.id_set.intersection(&other.id_set).copied().collect();
            (tids.len(), tids)
        }
        TreeVariant::Declat => {
            let diffset: BTreeSet<i64> = other.id_set.difference(&node.id_set).copied().collect();
            (node.support.saturating_sub(diffset.len()), diffset)
        }
    };

    Candidate {
        tokens_ids,
        support,
        id_set,
    }
}

fn into_node(candidate: Candidate, dataset: &Dataset, children: Vec<TreeNode>) -> TreeNode {
    let tokens = candidate
        .tokens_ids
        .iter()
        .filter_map(|&id| dataset.decode(id).map(str::to_string))
        .collect();

    TreeNode {
        tokens_ids: candidate.tokens_ids,
        tokens,
        support: candidate.support as f64,
        id_set: candidate.id_set.into_iter().collect(),
        children,
    }
}

fn expand(
    siblings: Vec<Candidate>,
    dataset: &Dataset,
    min_support: usize,
    variant: TreeVariant,
) -> Vec<TreeNode> {
    let joined: Vec<Vec<Candidate>> = siblings
        .iter()
        .enumerate()
        .map(|(i, node)| {
            siblings[i + 1..]
                .iter()
                .map(|other| join(node, other, variant))
                .filter(|candidate| candidate.support > min_support)
                .collect()
        })
        .collect();

    siblings
        .into_iter()
        .zip(joined)
        .map(|(candidate, next_level)| {
            let children = expand(next_level, dataset, min_support, variant);
            into_node(candidate, dataset, children)
        })
        .collect()
}

/// Mines the itemset tree of `dataset`. A node is kept only when its support
/// is strictly greater than `min_support`.
pub fn mine(dataset: &Dataset, min_support: usize, variant: TreeVariant) -> TreeNode {
    let first_level: Vec<Candidate> = dataset
        .token_ids()
        .map(|id| single_token(dataset, id, variant))
        .filter(|candidate| candidate.support > min_support)
        .collect();
    debug!(
        "{} first level keeps {} frequent tokens",
        variant,
        first_level.len()
    );

    let children = expand(first_level, dataset, min_support, variant);
    into_node(root_candidate(dataset, variant), dataset, children)
}
