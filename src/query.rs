//! Query builder
//!
//! [`Query`] is a fluent, by-value builder over a [`QueryNode`]. The node
//! holds everything the serializer needs: schema type name, alias,
//! operation name, field mappings, arguments and joined sibling nodes.
//!
//! ```rust,ignore
//! let text = Query::<BlogPost>::new()
//!     .set_operation_name("GetBlogPosts")
//!     .with_argument("id", 2)
//!     .with_field_argument("title", "length", 5)?
//!     .build()?;
//! ```

use std::collections::HashMap;
use std::marker::PhantomData;

use indexmap::IndexMap;

use crate::argument::{ArgumentDescriptor, ArgumentValue};
use crate::config::SerializerConfig;
use crate::error::{QueryError, QueryResult};
use crate::metadata::{FieldMeta, GraphQLModel, find_field};
use crate::serializer;

/// Key under which arguments on the root type itself are stored.
pub const ROOT_ARGUMENTS: &str = "";

/// The structured form of one schema-type selection.
#[derive(Debug, Clone)]
pub struct QueryNode {
    model_name: &'static str,
    fields: &'static [FieldMeta],
    type_name: String,
    alias: Option<String>,
    operation_name: Option<String>,
    field_mappings: IndexMap<String, String>,
    arguments: HashMap<String, Vec<ArgumentDescriptor>>,
    siblings: Vec<QueryNode>,
}

impl QueryNode {
    /// Create a node seeded from a model's metadata.
    pub fn for_model<T: GraphQLModel>() -> Self {
        let field_mappings = T::fields()
            .iter()
            .filter(|field| field.is_mapped())
            .filter_map(|field| {
                field
                    .field_name
                    .map(|name| (field.source_name.to_string(), name.to_string()))
            })
            .collect();

        Self {
            model_name: T::TYPE_NAME,
            fields: T::fields(),
            type_name: T::default_type_name(),
            alias: None,
            operation_name: None,
            field_mappings,
            arguments: HashMap::new(),
            siblings: Vec::new(),
        }
    }

    pub fn model_name(&self) -> &'static str {
        self.model_name
    }

    /// Metadata table of the model this node selects
    pub fn fields(&self) -> &'static [FieldMeta] {
        self.fields
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn operation_name(&self) -> Option<&str> {
        self.operation_name.as_deref()
    }

    /// Source name → schema field name, in insertion order
    pub fn field_mappings(&self) -> &IndexMap<String, String> {
        &self.field_mappings
    }

    /// Arguments registered for a field, or for the root type with [`ROOT_ARGUMENTS`].
    pub fn arguments(&self, field_key: &str) -> Option<&[ArgumentDescriptor]> {
        self.arguments.get(field_key).map(Vec::as_slice)
    }

    pub fn siblings(&self) -> &[QueryNode] {
        &self.siblings
    }

    /// This node followed by its siblings.
    pub fn all_nodes(&self) -> impl Iterator<Item = &QueryNode> {
        std::iter::once(self).chain(self.siblings.iter())
    }

    fn resolve_property(&self, property: &str) -> QueryResult<&'static FieldMeta> {
        find_field(self.fields, property).ok_or_else(|| QueryError::PropertyResolution {
            property: property.to_string(),
            model: self.model_name.to_string(),
        })
    }

    fn push_argument(&mut self, field_key: &str, argument: ArgumentDescriptor) {
        self.arguments
            .entry(field_key.to_string())
            .or_default()
            .push(argument);
    }
}

/// Fluent builder for a query over model `T`.
pub struct Query<T: GraphQLModel> {
    node: QueryNode,
    _phantom: PhantomData<T>,
}

impl<T: GraphQLModel> Query<T> {
    /// Create a builder with the model's default type name and mappings.
    pub fn new() -> Self {
        Self {
            node: QueryNode::for_model::<T>(),
            _phantom: PhantomData,
        }
    }

    /// Override the schema type name.
    pub fn set_type_name(mut self, name: impl Into<String>) -> Self {
        self.node.type_name = name.into();
        self
    }

    pub fn set_alias(mut self, alias: impl Into<String>) -> Self {
        self.node.alias = Some(alias.into());
        self
    }

    /// Name the whole query operation. Only read from the node that is built.
    pub fn set_operation_name(mut self, name: impl Into<String>) -> Self {
        self.node.operation_name = Some(name.into());
        self
    }

    /// Join another selection to be rendered alongside this one.
    pub fn join<U: GraphQLModel>(mut self, other: Query<U>) -> Self {
        self.node.siblings.push(other.into_node());
        self
    }

    /// Map a property that has no mapping metadata.
    ///
    /// Replaces the schema name in place if the property is already mapped.
    pub fn add_field_mapping(
        mut self,
        property: &str,
        field_name: impl Into<String>,
    ) -> QueryResult<Self> {
        let field = self.node.resolve_property(property)?;
        self.node
            .field_mappings
            .insert(field.source_name.to_string(), field_name.into());
        Ok(self)
    }

    /// Attach an argument to a field, or to the root type when `property` is `None`.
    ///
    /// Arguments under the same key accumulate in call order.
    pub fn add_argument(
        mut self,
        property: Option<&str>,
        name: impl Into<String>,
        value: impl Into<ArgumentValue>,
    ) -> QueryResult<Self> {
        let field_key = match property {
            Some(property) => self.node.resolve_property(property)?.source_name,
            None => ROOT_ARGUMENTS,
        };
        self.node
            .push_argument(field_key, ArgumentDescriptor::new(name, value));
        Ok(self)
    }

    /// Attach an argument to the root type.
    pub fn with_argument(mut self, name: impl Into<String>, value: impl Into<ArgumentValue>) -> Self {
        self.node
            .push_argument(ROOT_ARGUMENTS, ArgumentDescriptor::new(name, value));
        self
    }

    /// Attach an argument to a field.
    pub fn with_field_argument(
        self,
        property: &str,
        name: impl Into<String>,
        value: impl Into<ArgumentValue>,
    ) -> QueryResult<Self> {
        self.add_argument(Some(property), name, value)
    }

    /// Leave a mapped property out of the query. No-op if it is not mapped.
    pub fn ignore(mut self, property: &str) -> QueryResult<Self> {
        let field = self.node.resolve_property(property)?;
        self.node.field_mappings.shift_remove(field.source_name);
        Ok(self)
    }

    pub fn type_name(&self) -> &str {
        self.node.type_name()
    }

    pub fn alias(&self) -> Option<&str> {
        self.node.alias()
    }

    pub fn operation_name(&self) -> Option<&str> {
        self.node.operation_name()
    }

    pub fn field_mappings(&self) -> &IndexMap<String, String> {
        self.node.field_mappings()
    }

    pub fn arguments(&self, field_key: &str) -> Option<&[ArgumentDescriptor]> {
        self.node.arguments(field_key)
    }

    pub fn siblings(&self) -> &[QueryNode] {
        self.node.siblings()
    }

    pub fn node(&self) -> &QueryNode {
        &self.node
    }

    pub fn into_node(self) -> QueryNode {
        self.node
    }

    /// Render the query text.
    pub fn build(&self) -> QueryResult<String> {
        serializer::render(&self.node)
    }

    /// Render the query text with explicit formatting options.
    pub fn build_with(&self, config: &SerializerConfig) -> QueryResult<String> {
        serializer::render_with(&self.node, config)
    }
}

impl<T: GraphQLModel> Clone for Query<T> {
    fn clone(&self) -> Self {
        Self {
            node: self.node.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<T: GraphQLModel> std::fmt::Debug for Query<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Query").field("node", &self.node).finish()
    }
}

impl<T: GraphQLModel> Default for Query<T> {
    fn default() -> Self {
        Self::new()
    }
}
