use crate::json::{integer_array, keyed_entries, lookup};
use crate::ArtifactParser;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;
use visualizer_core::{ArtifactError, ArtifactKind};

/// One scraped post: its title and the ids of its stemmed tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataEntry {
    pub title: String,
    pub tokens: Vec<i64>,
}

fn schema(reason: impl Into<String>) -> ArtifactError {
    ArtifactError::schema(ArtifactKind::Data, reason)
}

/// Builds the entry list from the column-oriented `data.json` layout, where
/// `title` and `tokens` are keyed by the same row index.
pub fn parse_data_entries(value: &Value) -> Result<Vec<DataEntry>, ArtifactError> {
    let object = value.as_object().ok_or(ArtifactError::NotAnObject {
        artifact: ArtifactKind::Data,
    })?;

    let titles = object
        .get("title")
        .and_then(keyed_entries)
        .ok_or_else(|| schema("title is missing or is not an object"))?;
    let tokens = object.get("tokens");

    let entries = titles
        .into_iter()
        .map(|(index, title)| {
            let title = title
                .as_str()
                .ok_or_else(|| schema(format!("title {index} is not a string")))?;
            let row_tokens = integer_array(lookup(tokens, &index))
                .map_err(|problem| schema(format!("{} at row {index}", problem.describe("tokens"))))?;
            Ok(DataEntry {
                title: title.to_string(),
                tokens: row_tokens,
            })
        })
        .collect::<Result<Vec<_>, ArtifactError>>()?;

    debug!("Parsed {} data entries", entries.len());
    Ok(entries)
}

/// Writes entries back in the column-oriented layout, keyed by position.
pub fn data_entries_to_json(entries: &[DataEntry]) -> Value {
    let mut titles = Map::new();
    let mut tokens = Map::new();
    for (index, entry) in entries.iter().enumerate() {
        titles.insert(index.to_string(), Value::from(entry.title.clone()));
        tokens.insert(index.to_string(), Value::from(entry.tokens.clone()));
    }

    let mut root = Map::new();
    root.insert("title".to_string(), Value::Object(titles));
    root.insert("tokens".to_string(), Value::Object(tokens));
    Value::Object(root)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DataParser;

impl ArtifactParser for DataParser {
    type Model = Vec<DataEntry>;

    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Data
    }

    fn parse_value(&self, value: &Value) -> Result<Vec<DataEntry>, ArtifactError> {
        parse_data_entries(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_column_layout() {
        let entries = parse_data_entries(&json!({
            "title": {"0": "Rust 2024 is out", "1": "Ask: borrow checker"},
            "tokens": {"0": [0, 1, 2], "1": [3, 4]},
        }))
        .unwrap();

        assert_eq!(
            entries,
            vec![
                DataEntry { title: "Rust 2024 is out".to_string(), tokens: vec![0, 1, 2] },
                DataEntry { title: "Ask: borrow checker".to_string(), tokens: vec![3, 4] },
            ]
        );
    }

    #[test]
    fn test_rows_follow_numeric_index_order() {
        let entries = parse_data_entries(&json!({
            "title": {"10": "ten", "2": "two", "0": "zero"},
            "tokens": {"0": [0], "2": [2], "10": [10]},
        }))
        .unwrap();

        let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["zero", "two", "ten"]);
        assert_eq!(entries[2].tokens, vec![10]);
    }

    #[test]
    fn test_array_layout_is_accepted() {
        let entries = parse_data_entries(&json!({
            "title": ["a", "b"],
            "tokens": [[1], []],
        }))
        .unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[1].tokens.is_empty());
    }

    #[test]
    fn test_one_bad_row_rejects_everything() {
        let err = parse_data_entries(&json!({
            "title": {"0": "fine", "1": "broken"},
            "tokens": {"0": [1], "1": [1, "two"]},
        }))
        .unwrap_err();
        assert_eq!(err, schema("tokens contains non-numbers at row 1"));

        let err = parse_data_entries(&json!({
            "title": {"0": 42},
            "tokens": {"0": [1]},
        }))
        .unwrap_err();
        assert_eq!(err, schema("title 0 is not a string"));
    }

    #[test]
    fn test_missing_tokens_row() {
        let err = parse_data_entries(&json!({
            "title": {"0": "a", "1": "b"},
            "tokens": {"0": [1]},
        }))
        .unwrap_err();
        assert_eq!(err, schema("tokens is not an array at row 1"));
    }

    #[test]
    fn test_title_must_be_a_container() {
        let err = parse_data_entries(&json!({"title": "nope", "tokens": {}})).unwrap_err();
        assert_eq!(err, schema("title is missing or is not an object"));
        let err = parse_data_entries(&json!(null)).unwrap_err();
        assert_eq!(err, ArtifactError::NotAnObject { artifact: ArtifactKind::Data });
    }

    #[test]
    fn test_empty_title_map_gives_empty_list() {
        let entries = parse_data_entries(&json!({"title": {}, "tokens": {}})).unwrap();
        assert!(entries.is_empty());
    }
}
