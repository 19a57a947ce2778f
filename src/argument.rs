//! Query arguments
//!
//! An argument value is classified once, when it is converted into an
//! [`ArgumentValue`]. Only string, number and enum values have a GraphQL
//! rendering; object and unknown values are kept but never emitted.

use serde_json::Value;

use crate::metadata::GraphQLEnumValue;

/// Classification of an argument value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentKind {
    String,
    Number,
    Enum,
    Object,
    Unknown,
}

/// A value passed to a query argument.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentValue {
    String(String),
    /// Decimal text form of the number
    Number(String),
    /// Enum member name
    Enum(&'static str),
    Object(Value),
    /// Debug text of a value with no GraphQL form
    Unknown(String),
}

impl ArgumentValue {
    /// Wrap an enum member, keeping its name rather than its discriminant.
    pub fn from_enum<E: GraphQLEnumValue>(value: E) -> Self {
        ArgumentValue::Enum(value.name())
    }

    pub fn kind(&self) -> ArgumentKind {
        match self {
            ArgumentValue::String(_) => ArgumentKind::String,
            ArgumentValue::Number(_) => ArgumentKind::Number,
            ArgumentValue::Enum(_) => ArgumentKind::Enum,
            ArgumentValue::Object(_) => ArgumentKind::Object,
            ArgumentValue::Unknown(_) => ArgumentKind::Unknown,
        }
    }

    /// GraphQL literal for this value, `None` when it has no rendering.
    ///
    /// Strings are quoted as-is, without escaping.
    pub fn render(&self) -> Option<String> {
        match self {
            ArgumentValue::String(s) => Some(format!("\"{}\"", s)),
            ArgumentValue::Number(n) => Some(n.clone()),
            ArgumentValue::Enum(name) => Some((*name).to_string()),
            ArgumentValue::Object(_) | ArgumentValue::Unknown(_) => None,
        }
    }
}

impl From<&str> for ArgumentValue {
    fn from(value: &str) -> Self {
        ArgumentValue::String(value.to_string())
    }
}

impl From<String> for ArgumentValue {
    fn from(value: String) -> Self {
        ArgumentValue::String(value)
    }
}

macro_rules! number_argument {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ArgumentValue {
                fn from(value: $ty) -> Self {
                    ArgumentValue::Number(value.to_string())
                }
            }
        )*
    };
}

number_argument!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<bool> for ArgumentValue {
    fn from(value: bool) -> Self {
        ArgumentValue::Unknown(value.to_string())
    }
}

impl From<Value> for ArgumentValue {
    fn from(value: Value) -> Self {
        ArgumentValue::Object(value)
    }
}

impl<T: Into<ArgumentValue>> From<Vec<T>> for ArgumentValue {
    fn from(values: Vec<T>) -> Self {
        let items = values
            .into_iter()
            .map(|v| match v.into() {
                ArgumentValue::String(s) => Value::String(s),
                ArgumentValue::Number(n) => serde_json::from_str(&n).unwrap_or(Value::String(n)),
                ArgumentValue::Enum(name) => Value::String(name.to_string()),
                ArgumentValue::Object(value) => value,
                ArgumentValue::Unknown(text) => Value::String(text),
            })
            .collect();
        ArgumentValue::Object(Value::Array(items))
    }
}

/// One `name: value` pair attached to a type or a field.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentDescriptor {
    pub name: String,
    pub value: ArgumentValue,
}

impl ArgumentDescriptor {
    pub fn new(name: impl Into<String>, value: impl Into<ArgumentValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn kind(&self) -> ArgumentKind {
        self.value.kind()
    }

    /// Render as `name: value`, or `None` when the value is dropped.
    pub fn render(&self) -> Option<String> {
        self.value
            .render()
            .map(|value| format!("{}: {}", self.name, value))
    }
}
