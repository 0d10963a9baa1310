//! Small helpers over `serde_json::Value` shared by the parsers.

use serde::Serializer;
use serde_json::{Map, Value};

/// Why an array field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayProblem {
    NotAnArray,
    NonNumber,
    NonInteger,
    NonString,
}

impl ArrayProblem {
    pub fn describe(&self, field: &str) -> String {
        match self {
            ArrayProblem::NotAnArray => format!("{field} is not an array"),
            ArrayProblem::NonNumber => format!("{field} contains non-numbers"),
            ArrayProblem::NonInteger => format!("{field} contains non-integers"),
            ArrayProblem::NonString => format!("{field} contains non-strings"),
        }
    }
}

/// Reads a JSON number as an integer. Floats are accepted only when they have
/// no fractional part.
/// Why a JSON number could not be read as an `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegerProblem {
    NotANumber,
    Fractional,
    OutOfRange,
}

/// Reads an integer, accepting whole floats such as `3.0`.
pub fn checked_integer(value: &Value) -> Result<i64, IntegerProblem> {
    if let Some(n) = value.as_i64() {
        return Ok(n);
    }
    let f = value.as_f64().ok_or(IntegerProblem::NotANumber)?;
    if f.fract() != 0.0 {
        return Err(IntegerProblem::Fractional);
    }
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    if f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Ok(f as i64)
    } else {
        Err(IntegerProblem::OutOfRange)
    }
}

pub fn integer(value: &Value) -> Option<i64> {
    checked_integer(value).ok()
}

pub fn integer_array(value: Option<&Value>) -> Result<Vec<i64>, ArrayProblem> {
    let items = value.and_then(Value::as_array).ok_or(ArrayProblem::NotAnArray)?;
    // Non-numbers are reported before non-integers, whatever their position.
    if items.iter().any(|item| !item.is_number()) {
        return Err(ArrayProblem::NonNumber);
    }
    items
        .iter()
        .map(|item| integer(item).ok_or(ArrayProblem::NonInteger))
        .collect()
}

pub fn string_array(value: Option<&Value>) -> Result<Vec<String>, ArrayProblem> {
    let items = value.and_then(Value::as_array).ok_or(ArrayProblem::NotAnArray)?;
    items
        .iter()
        .map(|item| item.as_str().map(str::to_string).ok_or(ArrayProblem::NonString))
        .collect()
}

/// True for keys a JavaScript engine treats as array indices.
fn is_index_key(key: &str) -> Option<u32> {
    if key.is_empty() || (key.len() > 1 && key.starts_with('0')) {
        return None;
    }
    if !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse::<u32>().ok().filter(|n| *n != u32::MAX)
}

/// Object entries in property enumeration order: index-like keys first in
/// ascending numeric order, then every other key in insertion order.
pub fn enumeration_order(map: &Map<String, Value>) -> Vec<(&str, &Value)> {
    let mut indexed: Vec<(u32, &str, &Value)> = Vec::new();
    let mut named: Vec<(&str, &Value)> = Vec::new();

    for (key, value) in map {
        match is_index_key(key) {
            Some(index) => indexed.push((index, key.as_str(), value)),
            None => named.push((key.as_str(), value)),
        }
    }

    indexed.sort_by_key(|(index, _, _)| *index);
    indexed
        .into_iter()
        .map(|(_, key, value)| (key, value))
        .chain(named)
        .collect()
}

/// Entries of an object, or of an array keyed by position.
pub fn keyed_entries(value: &Value) -> Option<Vec<(String, &Value)>> {
    match value {
        Value::Object(map) => Some(
            enumeration_order(map)
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect(),
        ),
        Value::Array(items) => Some(
            items
                .iter()
                .enumerate()
                .map(|(index, value)| (index.to_string(), value))
                .collect(),
        ),
        _ => None,
    }
}

/// Looks `key` up in an object, or in an array when `key` is a position.
pub fn lookup<'a>(container: Option<&'a Value>, key: &str) -> Option<&'a Value> {
    match container? {
        Value::Object(map) => map.get(key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

/// Serializes whole numbers without a fractional part so written files look
/// like the ones the mining scripts produce.
pub fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}
