//! Read-only node accessor interface.
//!
//! The generator never touches the node model directly; it reads metadata,
//! entry names and field values through [`NodeAccess`].

use crate::types::{Node, StandardType, Value};

/// Read-only view of one node's Object Dictionary.
pub trait NodeAccess {
    /// Node name.
    fn name(&self) -> &str;

    /// Node identifier.
    fn id(&self) -> u8;

    /// Node role, e.g. "slave".
    fn node_type(&self) -> &str;

    /// Node description, if any.
    fn description(&self) -> Option<&str>;

    /// Minimum size of string entries.
    fn default_string_size(&self) -> usize;

    /// All declared indices, in ascending order.
    fn indices(&self) -> Vec<u16>;

    /// Symbolic name of the entry at `index`.
    fn entry_name(&self, index: u16) -> Option<&str>;

    /// Value stored at `index`/`subindex`.
    fn entry_field(&self, index: u16, subindex: u8) -> Option<&Value>;

    /// Resolves a type reference into the symbolic type name.
    fn type_name(&self, type_ref: u16) -> Option<&str>;
}

impl NodeAccess for Node {
    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> u8 {
        self.id
    }

    fn node_type(&self) -> &str {
        &self.node_type
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn default_string_size(&self) -> usize {
        self.default_string_size
    }

    fn indices(&self) -> Vec<u16> {
        self.entries().map(|(idx, _)| idx).collect()
    }

    fn entry_name(&self, index: u16) -> Option<&str> {
        self.entry(index).map(|e| e.name.as_str())
    }

    fn entry_field(&self, index: u16, subindex: u8) -> Option<&Value> {
        self.entry(index).and_then(|e| e.field(subindex))
    }

    // Standard types first; user-defined types are named by their own entry.
    fn type_name(&self, type_ref: u16) -> Option<&str> {
        StandardType::from_index(type_ref)
            .map(|t| t.name())
            .or_else(|| self.entry_name(type_ref))
    }
}
