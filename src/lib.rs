//! GraphQL query building and response mapping for annotated Rust models
//!
//! A model declares how its fields map onto a GraphQL schema with
//! `#[derive(GraphQLModel)]`. [`Query`] turns that metadata into query
//! text, and [`parse_one`] / [`parse_many`] map a JSON response back onto
//! the same model.
//!
//! ```rust,ignore
//! use graphql_builder::{GraphQLEnum, GraphQLModel, Query, parse_one};
//!
//! #[derive(GraphQLEnum, Clone, Copy, Debug, Default, PartialEq)]
//! pub enum Category {
//!     #[default]
//!     News,
//!     Art,
//! }
//!
//! #[derive(GraphQLModel, Default)]
//! #[graphql(schema_type = "blog_post")]
//! pub struct BlogPost {
//!     #[graphql(field = "title")]
//!     pub title: String,
//!     #[graphql(field = "category")]
//!     pub category: Category,
//! }
//!
//! let text = Query::<BlogPost>::new()
//!     .with_argument("category", Category::News)
//!     .build()?;
//!
//! let post: BlogPost = parse_one(r#"{"blogpost": {"title": "test", "category": "Art"}}"#)?;
//! ```

// Lets the derive output refer to `::graphql_builder` from inside this crate too.
extern crate self as graphql_builder;

pub mod argument;
pub mod config;
pub mod deserializer;
pub mod error;
pub mod metadata;
pub mod query;
pub mod serializer;

pub use argument::{ArgumentDescriptor, ArgumentKind, ArgumentValue};
pub use config::SerializerConfig;
pub use deserializer::{GraphQLResponse, parse_many, parse_one, populate};
pub use error::{ParseError, ParseResult, QueryError, QueryResult};
pub use metadata::{
    FieldMeta, GraphQLEnumValue, GraphQLModel, GraphQLValue, PropertyDescriptor, PropertyKind,
    ValueShape, resolve,
};
pub use query::{Query, QueryNode, ROOT_ARGUMENTS};
pub use serializer::{render, render_with};

pub use graphql_builder_macros::{GraphQLEnum, GraphQLModel};

#[doc(hidden)]
pub mod __private {
    pub use crate::metadata::enum_from_json;
    pub use serde_json::Value;
}
