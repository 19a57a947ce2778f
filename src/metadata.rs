//! Field-mapping metadata
//!
//! Models describe themselves through a static table of [`FieldMeta`] rows,
//! normally generated by `#[derive(GraphQLModel)]`. The resolver in this
//! module walks those tables and classifies every mapped field into a
//! [`PropertyDescriptor`] tree that the serializer and deserializer share.
//!
//! ```rust,ignore
//! #[derive(GraphQLModel, Default)]
//! #[graphql(schema_type = "blog_post")]
//! pub struct BlogPost {
//!     #[graphql(field = "title")]
//!     pub title: String,
//!     #[graphql(field = "author")]
//!     pub author: Author,
//! }
//!
//! let properties = resolve::<BlogPost>();
//! ```

use serde_json::Value;

use crate::error::{ParseError, ParseResult};

/// One statically declared field of a model.
#[derive(Debug, Clone, Copy)]
pub struct FieldMeta {
    /// Identifier of the field in the Rust model
    pub source_name: &'static str,
    /// Schema field name, present only when the field carries mapping metadata
    pub field_name: Option<&'static str>,
    /// Explicitly excluded from automatic mapping
    pub ignored: bool,
    /// Shape of the field's value type
    pub shape: fn() -> ValueShape,
}

impl FieldMeta {
    pub fn is_mapped(&self) -> bool {
        self.field_name.is_some() && !self.ignored
    }
}

/// What a value type looks like to the mapper.
#[derive(Debug, Clone, Copy)]
pub enum ValueShape {
    String,
    Number,
    Enum,
    /// A struct, carrying the metadata table of its own fields
    Composite(fn() -> &'static [FieldMeta]),
    Unknown,
}

/// Classification of a mapped field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    String,
    Number,
    Enum,
    /// Composite type with at least one mapped field of its own
    NestedType,
    /// Composite type without mapped fields, emitted as a bare field
    Object,
    Unknown,
}

/// A mappable field together with its resolved children.
///
/// `children` is non-empty exactly when `kind` is [`PropertyKind::NestedType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDescriptor {
    pub source_name: String,
    pub field_name: String,
    pub kind: PropertyKind,
    pub children: Vec<PropertyDescriptor>,
}

/// A model type that can be queried and parsed.
///
/// Implemented by `#[derive(GraphQLModel)]`.
pub trait GraphQLModel: Default + Sized {
    /// The Rust type name (e.g., "BlogPost")
    const TYPE_NAME: &'static str;

    /// Schema type name override (e.g., "blog_post")
    const SCHEMA_TYPE: Option<&'static str> = None;

    /// Every visible field of the model, mapped or not, in declaration order
    fn fields() -> &'static [FieldMeta];

    /// Assign a raw JSON value to the field called `source_name`.
    ///
    /// Unknown names are ignored.
    fn assign_field(&mut self, source_name: &str, raw: &Value, path: &str) -> ParseResult<()>;

    /// Schema type used when building a query for this model
    fn default_type_name() -> String {
        Self::SCHEMA_TYPE
            .map(str::to_string)
            .unwrap_or_else(Self::response_key)
    }

    /// Root key expected in a response for this model.
    ///
    /// Always the lower-cased Rust type name, never the schema override.
    fn response_key() -> String {
        Self::TYPE_NAME.to_lowercase()
    }
}

/// A type that can appear as a model field.
pub trait GraphQLValue: Sized {
    fn shape() -> ValueShape;

    /// Convert a raw JSON value, reporting mismatches against `path`.
    fn from_json(raw: &Value, path: &str) -> ParseResult<Self>;
}

/// Enumerations usable as fields and argument values.
///
/// Implemented by `#[derive(GraphQLEnum)]`.
pub trait GraphQLEnumValue: Sized {
    /// Member names in declaration order
    const MEMBERS: &'static [&'static str];

    fn name(&self) -> &'static str;

    fn from_name(name: &str) -> Option<Self>;
}

/// Parse an enum member from its name.
///
/// The raw value's text is matched against member names, so numeric
/// discriminants are rejected.
pub fn enum_from_json<E: GraphQLEnumValue>(raw: &Value, path: &str) -> ParseResult<E> {
    let text = match raw {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    };
    E::from_name(&text).ok_or_else(|| ParseError::UnknownEnumMember {
        path: path.to_string(),
        value: text,
        members: E::MEMBERS,
    })
}

/// Resolve the mapped properties of a model.
pub fn resolve<T: GraphQLModel>() -> Vec<PropertyDescriptor> {
    resolve_fields(T::fields())
}

/// Resolve the mapped, non-ignored rows of a metadata table in order.
pub fn resolve_fields(fields: &[FieldMeta]) -> Vec<PropertyDescriptor> {
    fields
        .iter()
        .filter(|field| field.is_mapped())
        .filter_map(|field| field.field_name.map(|name| describe(field, name)))
        .collect()
}

/// Classify a single field under the given schema field name.
///
/// Composite shapes recurse: with mapped fields of their own they become
/// [`PropertyKind::NestedType`], otherwise [`PropertyKind::Object`].
pub fn describe(field: &FieldMeta, field_name: &str) -> PropertyDescriptor {
    let (kind, children) = match (field.shape)() {
        ValueShape::String => (PropertyKind::String, Vec::new()),
        ValueShape::Number => (PropertyKind::Number, Vec::new()),
        ValueShape::Enum => (PropertyKind::Enum, Vec::new()),
        ValueShape::Composite(nested) => {
            let children = resolve_fields(nested());
            if children.is_empty() {
                (PropertyKind::Object, children)
            } else {
                (PropertyKind::NestedType, children)
            }
        }
        ValueShape::Unknown => (PropertyKind::Unknown, Vec::new()),
    };

    PropertyDescriptor {
        source_name: field.source_name.to_string(),
        field_name: field_name.to_string(),
        kind,
        children,
    }
}

/// Find a field by its Rust identifier.
pub fn find_field<'a>(fields: &'a [FieldMeta], source_name: &str) -> Option<&'a FieldMeta> {
    fields.iter().find(|field| field.source_name == source_name)
}

/// Join a parent path and a child segment with a dot.
pub fn child_path(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_string()
    } else {
        format!("{}.{}", parent, child)
    }
}

// ============================================================================
// Built-in value types
// ============================================================================

impl GraphQLValue for String {
    fn shape() -> ValueShape {
        ValueShape::String
    }

    fn from_json(raw: &Value, path: &str) -> ParseResult<Self> {
        raw.as_str()
            .map(str::to_string)
            .ok_or_else(|| ParseError::mismatch(path, "string", raw))
    }
}

macro_rules! integer_value {
    ($($ty:ty),*) => {
        $(
            impl GraphQLValue for $ty {
                fn shape() -> ValueShape {
                    ValueShape::Number
                }

                fn from_json(raw: &Value, path: &str) -> ParseResult<Self> {
                    let wide = raw
                        .as_i64()
                        .map(i128::from)
                        .or_else(|| raw.as_u64().map(i128::from))
                        .ok_or_else(|| ParseError::mismatch(path, "integer", raw))?;
                    <$ty>::try_from(wide)
                        .map_err(|_| ParseError::mismatch(path, stringify!($ty), raw))
                }
            }
        )*
    };
}

integer_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl GraphQLValue for f64 {
    fn shape() -> ValueShape {
        ValueShape::Number
    }

    fn from_json(raw: &Value, path: &str) -> ParseResult<Self> {
        raw.as_f64()
            .ok_or_else(|| ParseError::mismatch(path, "number", raw))
    }
}

impl GraphQLValue for f32 {
    fn shape() -> ValueShape {
        ValueShape::Number
    }

    fn from_json(raw: &Value, path: &str) -> ParseResult<Self> {
        raw.as_f64()
            .map(|n| n as f32)
            .ok_or_else(|| ParseError::mismatch(path, "number", raw))
    }
}

impl GraphQLValue for bool {
    fn shape() -> ValueShape {
        ValueShape::Unknown
    }

    fn from_json(raw: &Value, path: &str) -> ParseResult<Self> {
        raw.as_bool()
            .ok_or_else(|| ParseError::mismatch(path, "boolean", raw))
    }
}

impl GraphQLValue for char {
    fn shape() -> ValueShape {
        ValueShape::Unknown
    }

    fn from_json(raw: &Value, path: &str) -> ParseResult<Self> {
        let text = raw
            .as_str()
            .ok_or_else(|| ParseError::mismatch(path, "character", raw))?;
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(ParseError::mismatch(path, "character", raw)),
        }
    }
}

fn no_fields() -> &'static [FieldMeta] {
    &[]
}

impl GraphQLValue for Value {
    fn shape() -> ValueShape {
        ValueShape::Composite(no_fields)
    }

    fn from_json(raw: &Value, _path: &str) -> ParseResult<Self> {
        Ok(raw.clone())
    }
}

impl<T: GraphQLValue> GraphQLValue for Vec<T> {
    fn shape() -> ValueShape {
        ValueShape::Composite(no_fields)
    }

    fn from_json(raw: &Value, path: &str) -> ParseResult<Self> {
        let items = raw
            .as_array()
            .ok_or_else(|| ParseError::mismatch(path, "array", raw))?;
        items
            .iter()
            .enumerate()
            .map(|(i, item)| T::from_json(item, &format!("{}[{}]", path, i)))
            .collect()
    }
}

impl<T: GraphQLValue> GraphQLValue for Option<T> {
    fn shape() -> ValueShape {
        T::shape()
    }

    fn from_json(raw: &Value, path: &str) -> ParseResult<Self> {
        if raw.is_null() {
            Ok(None)
        } else {
            T::from_json(raw, path).map(Some)
        }
    }
}
