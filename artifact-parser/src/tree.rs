use crate::json::{integer_array, serialize_number, string_array, ArrayProblem};
use crate::ArtifactParser;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use visualizer_core::{ArtifactError, ArtifactKind, TreeVariant};

/// A node of a mined itemset tree.
///
/// `tokens` is expected to be parallel to `tokens_ids` but the two lengths are
/// not cross-checked. What `id_set` holds depends on the tree variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
    pub tokens_ids: Vec<i64>,
    pub tokens: Vec<String>,
    #[serde(serialize_with = "serialize_number")]
    pub support: f64,
    pub id_set: Vec<i64>,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Number of levels below and including this node.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(TreeNode::depth).max().unwrap_or(0)
    }

    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::node_count).sum::<usize>()
    }

    /// Follows child indices from this node.
    pub fn descendant(&self, path: &[usize]) -> Option<&TreeNode> {
        path.iter()
            .try_fold(self, |node, &index| node.children.get(index))
    }
}

/// A whole tree file: the support threshold it was mined with and its root.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeFile {
    #[serde(serialize_with = "serialize_number")]
    pub min_support: f64,
    #[serde(skip)]
    pub variant: TreeVariant,
    #[serde(rename = "tree")]
    pub root: TreeNode,
}

impl TreeFile {
    pub fn id_set_label(&self) -> &'static str {
        self.variant.id_set_label()
    }
}

fn array_error(kind: ArtifactKind, field: &str, problem: ArrayProblem) -> ArtifactError {
    ArtifactError::schema(kind, problem.describe(field))
}

/// Validates one node and, recursively, all of its children.
pub fn parse_tree_node(value: &Value, variant: TreeVariant) -> Result<TreeNode, ArtifactError> {
    let kind = ArtifactKind::Tree(variant);
    let object = value
        .as_object()
        .ok_or(ArtifactError::NotAnObject { artifact: kind })?;

    let tokens_ids = integer_array(object.get("tokens_ids"))
        .map_err(|problem| array_error(kind, "tokens_ids", problem))?;

    let tokens = string_array(object.get("tokens"))
        .map_err(|problem| array_error(kind, "tokens", problem))?;

    let support = object
        .get("support")
        .and_then(Value::as_f64)
        .ok_or_else(|| ArtifactError::schema(kind, "support is not a number"))?;

    let id_set = integer_array(object.get("id_set"))
        .map_err(|problem| array_error(kind, "id_set", problem))?;

    let children = object
        .get("children")
        .and_then(Value::as_array)
        .ok_or_else(|| ArtifactError::schema(kind, "children is not an array"))?
        .iter()
        .map(|child| parse_tree_node(child, variant))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TreeNode {
        tokens_ids,
        tokens,
        support,
        id_set,
        children,
    })
}

pub fn parse_tree_file(value: &Value, variant: TreeVariant) -> Result<TreeFile, ArtifactError> {
    let kind = ArtifactKind::Tree(variant);

    let min_support = value
        .get("min_support")
        .and_then(Value::as_f64)
        .ok_or_else(|| ArtifactError::schema(kind, "min_support missing or is not a number"))?;

    let root = parse_tree_node(value.get("tree").unwrap_or(&Value::Null), variant)?;

    debug!(
        "Parsed {} tree with {} nodes over {} levels",
        variant,
        root.node_count(),
        root.depth()
    );

    Ok(TreeFile {
        min_support,
        variant,
        root,
    })
}

/// Tree parser bound to one variant, chosen by whoever owns the tree slot.
#[derive(Debug, Clone, Copy)]
pub struct TreeParser {
    variant: TreeVariant,
}

impl TreeParser {
    pub fn new(variant: TreeVariant) -> Self {
        Self { variant }
    }

    pub fn variant(&self) -> TreeVariant {
        self.variant
    }
}

impl ArtifactParser for TreeParser {
    type Model = TreeFile;

    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Tree(self.variant)
    }

    fn parse_value(&self, value: &Value) -> Result<TreeFile, ArtifactError> {
        parse_tree_file(value, self.variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn leaf(ids: &[i64], support: i64) -> Value {
        json!({
            "tokens_ids": ids,
            "tokens": ids.iter().map(|id| format!("t{id}")).collect::<Vec<_>>(),
            "support": support,
            "id_set": [1, 2],
            "children": [],
        })
    }

    #[test]
    fn test_parses_nested_nodes() {
        let mut root = leaf(&[], 10);
        let mut child = leaf(&[4], 6);
        child["children"] = json!([leaf(&[4, 9], 3)]);
        root["children"] = json!([child, leaf(&[5], 4)]);

        let tree = parse_tree_file(&json!({"min_support": 2, "tree": root}), TreeVariant::Eclat)
            .unwrap();

        assert_eq!(tree.min_support, 2.0);
        assert_eq!(tree.root.depth(), 3);
        assert_eq!(tree.root.node_count(), 4);
        assert_eq!(tree.root.children[0].children[0].tokens_ids, vec![4, 9]);
        assert_eq!(tree.root.children[0].children[0].tokens, vec!["t4", "t9"]);
        assert_eq!(tree.id_set_label(), "Transaction ids");
    }

    #[test]
    fn test_min_support_checked_first() {
        let err = parse_tree_file(&json!({"tree": "garbage"}), TreeVariant::Declat).unwrap_err();
        assert_eq!(
            err,
            ArtifactError::schema(
                ArtifactKind::Tree(TreeVariant::Declat),
                "min_support missing or is not a number"
            )
        );
    }

    #[test]
    fn test_missing_tree_is_invalid() {
        let err = parse_tree_file(&json!({"min_support": 1}), TreeVariant::Declat).unwrap_err();
        assert_eq!(
            err,
            ArtifactError::NotAnObject {
                artifact: ArtifactKind::Tree(TreeVariant::Declat)
            }
        );
    }

    #[test]
    fn test_field_errors() {
        let cases = [
            ("tokens_ids", json!([1, "x"]), "tokens_ids contains non-numbers"),
            ("tokens", json!(["a", 1]), "tokens contains non-strings"),
            ("tokens", json!("a"), "tokens is not an array"),
            ("support", json!("3"), "support is not a number"),
            ("id_set", json!(null), "id_set is not an array"),
            ("children", json!({}), "children is not an array"),
        ];

        for (field, bad, reason) in cases {
            let mut node = leaf(&[1], 3);
            node[field] = bad;
            let err = parse_tree_node(&node, TreeVariant::Eclat).unwrap_err();
            assert_eq!(
                err,
                ArtifactError::schema(ArtifactKind::Tree(TreeVariant::Eclat), reason),
                "field {field}"
            );
        }
    }

    #[test]
    fn test_bad_grandchild_fails_whole_tree() {
        let mut bad = leaf(&[1, 2], 2);
        bad["support"] = json!(null);
        let mut child = leaf(&[1], 3);
        child["children"] = json!([bad]);
        let mut root = leaf(&[], 5);
        root["children"] = json!([child]);

        assert!(parse_tree_node(&root, TreeVariant::Eclat).is_err());
    }

    #[test]
    fn test_mismatched_token_lengths_are_tolerated() {
        let mut node = leaf(&[1, 2], 3);
        node["tokens"] = json!(["only-one"]);
        let parsed = parse_tree_node(&node, TreeVariant::Declat).unwrap();
        assert_eq!(parsed.tokens.len(), 1);
        assert_eq!(parsed.tokens_ids.len(), 2);
    }

    #[test]
    fn test_serializes_source_layout() {
        let file = TreeFile {
            min_support: 2.0,
            variant: TreeVariant::Declat,
            root: TreeNode {
                tokens_ids: vec![],
                tokens: vec![],
                support: 4.0,
                id_set: vec![],
                children: vec![],
            },
        };
        let value = serde_json::to_value(&file).unwrap();
        assert_eq!(
            value,
            json!({
                "min_support": 2,
                "tree": {"tokens_ids": [], "tokens": [], "support": 4, "id_set": [], "children": []}
            })
        );
    }

    #[test]
    fn test_descendant_lookup() {
        let mut root = leaf(&[], 10);
        root["children"] = json!([leaf(&[1], 5), leaf(&[2], 4)]);
        let tree = parse_tree_node(&root, TreeVariant::Eclat).unwrap();
        assert_eq!(tree.descendant(&[]).unwrap().support, 10.0);
        assert_eq!(tree.descendant(&[1]).unwrap().tokens_ids, vec![2]);
        assert!(tree.descendant(&[2]).is_none());
    }
}
