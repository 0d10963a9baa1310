use crate::json::enumeration_order;
use crate::ArtifactParser;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;
use visualizer_core::{ArtifactError, ArtifactKind};

/// Maps a token id back to the stemmed token it was assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokensMapEntry {
    pub id: i64,
    pub token: String,
}

fn schema(reason: impl Into<String>) -> ArtifactError {
    ArtifactError::schema(ArtifactKind::TokensMap, reason)
}

pub fn parse_tokens_map(value: &Value) -> Result<Vec<TokensMapEntry>, ArtifactError> {
    let object = value.as_object().ok_or(ArtifactError::NotAnObject {
        artifact: ArtifactKind::TokensMap,
    })?;

    let tokens = object
        .get("token")
        .and_then(Value::as_object)
        .ok_or_else(|| schema("token is missing or is not an object"))?;

    let entries = enumeration_order(tokens)
        .into_iter()
        .map(|(key, token)| {
            let id = key
                .trim()
                .parse::<i64>()
                .map_err(|_| schema(format!("id {key:?} is not a number")))?;
            let token = token
                .as_str()
                .ok_or_else(|| schema(format!("token for id {id} is not a string")))?;
            Ok(TokensMapEntry {
                id,
                token: token.to_string(),
            })
        })
        .collect::<Result<Vec<_>, ArtifactError>>()?;

    debug!("Parsed {} token map entries", entries.len());
    Ok(entries)
}

/// Writes entries in the `{"token": {id: token}}` file layout.
pub fn tokens_map_to_json(entries: &[TokensMapEntry]) -> Value {
    let tokens: Map<String, Value> = entries
        .iter()
        .map(|entry| (entry.id.to_string(), Value::from(entry.token.clone())))
        .collect();

    let mut root = Map::new();
    root.insert("token".to_string(), Value::Object(tokens));
    Value::Object(root)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TokensMapParser;

impl ArtifactParser for TokensMapParser {
    type Model = Vec<TokensMapEntry>;

    fn kind(&self) -> ArtifactKind {
        ArtifactKind::TokensMap
    }

    fn parse_value(&self, value: &Value) -> Result<Vec<TokensMapEntry>, ArtifactError> {
        parse_tokens_map(value)
    }
}
