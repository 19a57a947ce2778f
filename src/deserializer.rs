//! Response mapping
//!
//! Walks a JSON response and a model's resolved properties to populate
//! fresh model instances. The response must carry the model under its
//! lower-cased type name:
//!
//! ```text
//! {"blogpost": {"title": "test", "author": {"display_name": "John Doe"}}}
//! ```
//!
//! Fields missing from the response keep their `Default` value; extra
//! response fields are ignored.

use std::marker::PhantomData;

use serde_json::{Map, Value};

use crate::error::{ParseError, ParseResult};
use crate::metadata::{GraphQLModel, PropertyKind, child_path, resolve};

/// Parse a response holding a single `T`.
pub fn parse_one<T: GraphQLModel>(json: &str) -> ParseResult<T> {
    let (key, root) = root_value::<T>(json)?;
    tracing::debug!(root = %key, "Parsing GraphQL response object");
    populate::<T>(&root, &key)
}

/// Parse a response holding an array of `T`.
pub fn parse_many<T: GraphQLModel>(json: &str) -> ParseResult<Vec<T>> {
    let (key, root) = root_value::<T>(json)?;
    let items = root
        .as_array()
        .ok_or_else(|| ParseError::mismatch(&key, "array", &root))?;
    tracing::debug!(root = %key, count = items.len(), "Parsing GraphQL response array");

    items
        .iter()
        .enumerate()
        .map(|(i, item)| populate::<T>(item, &format!("{}[{}]", key, i)))
        .collect()
}

/// Build a `T` from a raw JSON object.
///
/// String, number, enum and nested properties present in `raw` are
/// assigned; object and unknown properties are left untouched.
pub fn populate<T: GraphQLModel>(raw: &Value, path: &str) -> ParseResult<T> {
    let object = raw
        .as_object()
        .ok_or_else(|| ParseError::mismatch(path, "object", raw))?;

    let mut model = T::default();
    for property in resolve::<T>() {
        let Some(value) = object.get(&property.field_name) else {
            continue;
        };

        match property.kind {
            PropertyKind::String
            | PropertyKind::Number
            | PropertyKind::Enum
            | PropertyKind::NestedType => {
                let field_path = child_path(path, &property.field_name);
                model.assign_field(&property.source_name, value, &field_path)?;
            }
            PropertyKind::Object | PropertyKind::Unknown => {
                tracing::trace!(field = %property.field_name, "Leaving field unassigned");
            }
        }
    }

    Ok(model)
}

fn root_value<T: GraphQLModel>(json: &str) -> ParseResult<(String, Value)> {
    let mut document: Map<String, Value> = serde_json::from_str(json)?;
    let key = T::response_key();
    match document.remove(&key) {
        Some(value) => Ok((key, value)),
        None => Err(ParseError::MissingRootKey { key }),
    }
}

/// A GraphQL response body awaiting conversion into `T`.
pub struct GraphQLResponse<T: GraphQLModel> {
    json: String,
    _phantom: PhantomData<T>,
}

impl<T: GraphQLModel> GraphQLResponse<T> {
    pub fn new(json: impl Into<String>) -> Self {
        Self {
            json: json.into(),
            _phantom: PhantomData,
        }
    }

    /// Parse the response for a single object.
    pub fn parse(&self) -> ParseResult<T> {
        parse_one::<T>(&self.json)
    }

    /// Parse the response for an array of objects.
    pub fn parse_array(&self) -> ParseResult<Vec<T>> {
        parse_many::<T>(&self.json)
    }
}
