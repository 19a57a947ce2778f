//! Serializer configuration

use serde::Deserialize;

/// Formatting options for rendered query text.
///
/// Deserializable so a host application can embed it in its own config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SerializerConfig {
    /// Spaces per indentation level (default: 4)
    pub indent_width: usize,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self { indent_width: 4 }
    }
}

impl SerializerConfig {
    pub fn with_indent_width(mut self, indent_width: usize) -> Self {
        self.indent_width = indent_width;
        self
    }

    /// Whitespace for the given nesting depth
    pub fn indent(&self, depth: usize) -> String {
        " ".repeat(depth * self.indent_width)
    }
}
