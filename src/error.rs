//! Error types
//!
//! Query construction and rendering fail with [`QueryError`]; mapping a JSON
//! response back onto a model fails with [`ParseError`].

use serde_json::Value;

/// Errors raised while building or rendering a query.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// Sibling selections of the same schema type are not told apart by alias.
    #[error("ambiguous fields: selections of type(s) {} need distinct aliases", .type_names.join(", "))]
    AmbiguousFields { type_names: Vec<String> },

    /// A property selector did not name a field of the model.
    #[error("property `{property}` does not exist on model `{model}`")]
    PropertyResolution { property: String, model: String },
}

/// Errors raised while mapping a JSON response onto a model.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response has no `{key}` root key")]
    MissingRootKey { key: String },

    #[error("field `{path}`: expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Enum values must arrive by member name, numeric indices are rejected.
    #[error("field `{path}`: `{value}` is not one of {}", .members.join(", "))]
    UnknownEnumMember {
        path: String,
        value: String,
        members: &'static [&'static str],
    },
}

impl ParseError {
    pub fn mismatch(path: &str, expected: &'static str, raw: &Value) -> Self {
        ParseError::TypeMismatch {
            path: path.to_string(),
            expected,
            found: json_type_name(raw),
        }
    }
}

/// Short name of a JSON value's type, used in mismatch messages.
pub fn json_type_name(raw: &Value) -> &'static str {
    match raw {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub type QueryResult<T> = std::result::Result<T, QueryError>;
pub type ParseResult<T> = std::result::Result<T, ParseError>;
