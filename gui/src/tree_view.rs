use artifact_parser::TreeNode;
use std::collections::HashSet;
use std::fmt::Display;

/// Shown in place of an empty list, e.g. the tokens of the root node.
pub const EMPTY_SET: &str = "Φ";

pub fn join_or_empty<T: Display>(items: &[T]) -> String {
    if items.is_empty() {
        EMPTY_SET.to_string()
    } else {
        items
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// The text lines of one node card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeCard {
    pub title: String,
    pub support: String,
    pub id_set_len: String,
    pub tokens_ids: String,
    pub id_set: String,
}

impl NodeCard {
    pub fn new(node: &TreeNode, id_set_label: &str) -> Self {
        Self {
            title: join_or_empty(&node.tokens),
            support: format!("Support: {}", node.support),
            id_set_len: format!("{id_set_label} len: {}", node.id_set.len()),
            tokens_ids: format!("Tokens ids: {}", join_or_empty(&node.tokens_ids)),
            id_set: format!("{id_set_label}: {}", join_or_empty(&node.id_set)),
        }
    }
}

/// Which nodes of a tree are expanded. Nodes are addressed by the child
/// indices leading to them from the root; the root itself is `[]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeViewState {
    expanded: HashSet<Vec<usize>>,
}

impl Default for TreeViewState {
    fn default() -> Self {
        Self {
            expanded: HashSet::from([Vec::new()]),
        }
    }
}

impl TreeViewState {
    pub fn is_expanded(&self, path: &[usize]) -> bool {
        self.expanded.contains(path)
    }

    pub fn toggle(&mut self, path: Vec<usize>) {
        if !self.expanded.remove(&path) {
            self.expanded.insert(path);
        }
    }

    /// Nodes to draw, depth first, with their paths.
    pub fn visible_nodes<'a>(&self, root: &'a TreeNode) -> Vec<(Vec<usize>, &'a TreeNode)> {
        let mut out = Vec::new();
        self.collect(root, Vec::new(), &mut out);
        out
    }

    fn collect<'a>(
        &self,
        node: &'a TreeNode,
        path: Vec<usize>,
        out: &mut Vec<(Vec<usize>, &'a TreeNode)>,
    ) {
        let expanded = self.is_expanded(&path);
        out.push((path.clone(), node));
        if expanded {
            for (index, child) in node.children.iter().enumerate() {
                let mut child_path = path.clone();
                child_path.push(index);
                self.collect(child, child_path, out);
            }
        }
    }
}
