// Copyright 2015-2024 Swim Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The JSON value abstraction.
//!
//! The rest of the crate inspects and constructs JSON exclusively through
//! this module. The concrete DOM is [`serde_json::Value`] (with key order
//! preserved), which also supplies the wire format: [`parse_str`] wraps the
//! `serde_json` parser and [`print`]/[`print_indented`] its serializer.

#[cfg(test)]
mod tests;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// The JSON document type consumed and produced by every coder in this crate.
pub type Json = serde_json::Value;

/// The kind of a JSON value, for inspection and error reporting.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum JsonKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl Display for JsonKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonKind::Null => write!(f, "Null"),
            JsonKind::Bool => write!(f, "Bool"),
            JsonKind::Number => write!(f, "Number"),
            JsonKind::String => write!(f, "String"),
            JsonKind::Array => write!(f, "Array"),
            JsonKind::Object => write!(f, "Object"),
        }
    }
}

/// The kind of the provided value.
pub fn kind_of(value: &Json) -> JsonKind {
    match value {
        Json::Null => JsonKind::Null,
        Json::Bool(_) => JsonKind::Bool,
        Json::Number(_) => JsonKind::Number,
        Json::String(_) => JsonKind::String,
        Json::Array(_) => JsonKind::Array,
        Json::Object(_) => JsonKind::Object,
    }
}

/// Attempt to read the value as an integer of width `T`, succeeding only if
/// the value is a JSON integer token that lies within the range of `T`.
/// Floating point tokens are rejected, even when integral.
pub fn try_integer<T>(value: &Json) -> Option<T>
where
    T: TryFrom<i64> + TryFrom<u64>,
{
    if let Some(n) = value.as_i64() {
        T::try_from(n).ok()
    } else if let Some(n) = value.as_u64() {
        T::try_from(n).ok()
    } else {
        None
    }
}

/// Whether the value is a JSON number token at all (integer or floating).
pub fn is_number(value: &Json) -> bool {
    value.is_number()
}

/// The field of an object, if the value is an object carrying it.
pub fn field_of<'a>(value: &'a Json, name: &str) -> Option<&'a Json> {
    value.as_object().and_then(|map| map.get(name))
}

/// The elements of an array value.
pub fn items(value: &Json) -> Option<&[Json]> {
    value.as_array().map(Vec::as_slice)
}

/// The entries of an object value, in insertion order.
pub fn entries(value: &Json) -> Option<impl Iterator<Item = (&str, &Json)>> {
    value
        .as_object()
        .map(|map| map.iter().map(|(k, v)| (k.as_str(), v)))
}

/// An error produced attempting to parse malformed JSON text.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ParseError(#[from] serde_json::Error);

/// Parse JSON text into a [`Json`] document.
pub fn parse_str(text: &str) -> Result<Json, ParseError> {
    serde_json::from_str(text).map_err(ParseError)
}

/// Serialize a value compactly.
pub fn print(json: &Json) -> String {
    serde_json::to_string(json).expect("serializing a JSON tree cannot fail")
}

/// Serialize a value indented by `space` spaces per level, with `\n` line
/// endings on every platform.
pub fn print_indented(space: usize, json: &Json) -> String {
    let indent = " ".repeat(space);
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut out = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    json.serialize(&mut ser)
        .expect("serializing a JSON tree cannot fail");
    String::from_utf8(out).expect("serialized JSON is valid UTF-8")
}
