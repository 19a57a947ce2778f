//! GraphQL query text generation
//!
//! Renders a [`QueryNode`] and its siblings into a query document:
//!
//! ```text
//! query GetBlogPosts {
//!     news: blog_post(category: News) {
//!         title
//!         author {
//!             display_name
//!         }
//!     }
//! }
//! ```
//!
//! The outer braces are only emitted for a named operation or when more than
//! one selection is rendered.

use indexmap::IndexMap;

use crate::config::SerializerConfig;
use crate::error::{QueryError, QueryResult};
use crate::metadata::{PropertyDescriptor, PropertyKind, describe, find_field};
use crate::query::{QueryNode, ROOT_ARGUMENTS};

/// Render a query with the default formatting.
pub fn render(node: &QueryNode) -> QueryResult<String> {
    render_with(node, &SerializerConfig::default())
}

/// Render a query document for `node` followed by its siblings.
pub fn render_with(node: &QueryNode, config: &SerializerConfig) -> QueryResult<String> {
    let all_nodes: Vec<&QueryNode> = node.all_nodes().collect();

    if all_nodes.len() > 1 {
        check_ambiguity(&all_nodes)?;
    }

    let mut out = String::new();
    let wrapped = match node.operation_name() {
        Some(operation) => {
            out.push_str(&format!("query {} {{\n", operation));
            true
        }
        None if all_nodes.len() > 1 => {
            out.push_str("{\n");
            true
        }
        None => false,
    };
    let base = usize::from(wrapped);

    for current in &all_nodes {
        render_node(&mut out, current, base, config);
    }

    if wrapped {
        out.push_str("}\n");
    }

    tracing::debug!(
        selections = all_nodes.len(),
        operation = node.operation_name().unwrap_or_default(),
        "Rendered GraphQL query"
    );

    Ok(out)
}

/// Fail when selections of one schema type are not told apart by alias.
fn check_ambiguity(nodes: &[&QueryNode]) -> QueryResult<()> {
    let mut groups: IndexMap<&str, Vec<Option<&str>>> = IndexMap::new();
    for node in nodes {
        groups.entry(node.type_name()).or_default().push(node.alias());
    }

    let ambiguous: Vec<String> = groups
        .into_iter()
        .filter(|(_, aliases)| {
            let mut distinct = aliases.clone();
            distinct.sort();
            distinct.dedup();
            distinct.len() < aliases.len()
        })
        .map(|(type_name, _)| type_name.to_string())
        .collect();

    if ambiguous.is_empty() {
        Ok(())
    } else {
        tracing::warn!(types = ?ambiguous, "Ambiguous sibling selections");
        Err(QueryError::AmbiguousFields {
            type_names: ambiguous,
        })
    }
}

fn render_node(out: &mut String, node: &QueryNode, depth: usize, config: &SerializerConfig) {
    out.push_str(&config.indent(depth));
    if let Some(alias) = node.alias() {
        out.push_str(alias);
        out.push_str(": ");
    }
    out.push_str(node.type_name());
    out.push_str(&render_arguments(node, ROOT_ARGUMENTS));
    out.push_str(" {\n");

    for property in node_properties(node) {
        render_property(out, node, &property, depth + 1, config);
    }

    out.push_str(&config.indent(depth));
    out.push_str("}\n");
}

/// Descriptors for a node's current field mappings, resolved against its model.
fn node_properties(node: &QueryNode) -> Vec<PropertyDescriptor> {
    node.field_mappings()
        .iter()
        .filter_map(|(source_name, field_name)| {
            find_field(node.fields(), source_name).map(|field| describe(field, field_name))
        })
        .collect()
}

fn render_property(
    out: &mut String,
    node: &QueryNode,
    property: &PropertyDescriptor,
    depth: usize,
    config: &SerializerConfig,
) {
    let indent = config.indent(depth);
    let arguments = render_arguments(node, &property.source_name);

    match property.kind {
        PropertyKind::NestedType => {
            out.push_str(&format!("{}{}{} {{\n", indent, property.field_name, arguments));
            for child in &property.children {
                render_property(out, node, child, depth + 1, config);
            }
            out.push_str(&format!("{}}}\n", indent));
        }
        PropertyKind::String | PropertyKind::Number | PropertyKind::Enum | PropertyKind::Object => {
            out.push_str(&format!("{}{}{}\n", indent, property.field_name, arguments));
        }
        PropertyKind::Unknown => {
            tracing::trace!(field = %property.field_name, "Skipping field of unsupported type");
        }
    }
}

/// `(name: value, ...)` for the arguments under `field_key`, or nothing.
fn render_arguments(node: &QueryNode, field_key: &str) -> String {
    let Some(arguments) = node.arguments(field_key) else {
        return String::new();
    };

    let rendered: Vec<String> = arguments
        .iter()
        .filter_map(|argument| {
            let text = argument.render();
            if text.is_none() {
                tracing::trace!(
                    argument = %argument.name,
                    kind = ?argument.kind(),
                    "Dropping argument without a GraphQL rendering"
                );
            }
            text
        })
        .collect();

    if rendered.is_empty() {
        String::new()
    } else {
        format!("({})", rendered.join(", "))
    }
}
