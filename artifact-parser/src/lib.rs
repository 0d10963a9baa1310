//! Typed models for the artifacts of a mining run, and the validators that
//! build them from untrusted JSON.
//!
//! Every parser is fail-fast: the first problem found aborts the parse with a
//! descriptive [`ArtifactError`] and no partial model is produced.

pub mod data;
pub mod json;
pub mod metadata;
pub mod tokens_map;
pub mod tree;

pub use data::*;
pub use metadata::*;
pub use tokens_map::*;
pub use tree::*;

use serde::Deserialize;
use serde_json::Value;
use visualizer_core::{ArtifactError, ArtifactKind};

/// A validator for one artifact kind.
pub trait ArtifactParser {
    type Model: Send + 'static;

    fn kind(&self) -> ArtifactKind;

    fn parse_value(&self, value: &Value) -> Result<Self::Model, ArtifactError>;

    /// Trees may nest arbitrarily deep, so the JSON reader runs without
    /// serde_json's default nesting limit.
    fn parse(&self, text: &str) -> Result<Self::Model, ArtifactError> {
        let syntax = |e: serde_json::Error| ArtifactError::syntax(self.kind(), &e);

        let mut deserializer = serde_json::Deserializer::from_str(text);
        deserializer.disable_recursion_limit();
        let value = Value::deserialize(&mut deserializer).map_err(syntax)?;
        deserializer.end().map_err(syntax)?;

        self.parse_value(&value)
    }
}
