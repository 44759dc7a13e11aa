//! Per-node generation state.
//!
//! A [`GenerationContext`] is created for one node, carries its metadata,
//! the type cache and the text emitted so far, and is dropped when the
//! node is done.

use crate::error::CodegenError;
use crate::resolver::{TypeCache, TypeDescriptor, TypeResolver};
use objdictgen_schema::NodeAccess;

/// Immutable node metadata exposed to templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeMetadata {
    /// Node name.
    pub node_name: String,
    /// Node identifier.
    pub node_id: u8,
    /// Node role.
    pub node_type: String,
    /// Description, empty when the node has none.
    pub description: String,
    /// 1 for slave nodes, 0 otherwise.
    pub iam_a_slave: u8,
    /// Highest transmit PDO number; filled by the PDO emitter.
    pub max_pdo_transmit: u32,
    /// Minimum size of string types.
    pub default_string_size: usize,
}

impl NodeMetadata {
    /// Reads the metadata of a node.
    #[must_use]
    pub fn from_node<N: NodeAccess + ?Sized>(node: &N) -> Self {
        Self {
            node_name: node.name().to_string(),
            node_id: node.id(),
            node_type: node.node_type().to_string(),
            description: node.description().unwrap_or_default().to_string(),
            iam_a_slave: u8::from(node.node_type() == "slave"),
            max_pdo_transmit: 0,
            default_string_size: node.default_string_size(),
        }
    }

    /// Looks up a metadata value by its template key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "NodeName" => Some(self.node_name.clone()),
            "NodeID" => Some(self.node_id.to_string()),
            "NodeType" => Some(self.node_type.clone()),
            "Description" => Some(self.description.clone()),
            "iam_a_slave" => Some(self.iam_a_slave.to_string()),
            "maxPDOtransmit" => Some(self.max_pdo_transmit.to_string()),
            _ => None,
        }
    }
}

/// Substitutes `{Key}` placeholders with metadata values.
///
/// `{{` and `}}` produce literal braces.
///
/// # Errors
/// Returns `CodegenError::Template` on an unknown key or an unbalanced brace.
pub fn render_template(template: &str, metadata: &NodeMetadata) -> Result<String, CodegenError> {
    let mut output = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                output.push('{');
            }
            '{' => {
                let mut key = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(k) => key.push(k),
                        None => {
                            return Err(CodegenError::template(format!(
                                "unterminated placeholder '{{{key}'"
                            )));
                        }
                    }
                }
                let value = metadata
                    .get(&key)
                    .ok_or_else(|| CodegenError::template(format!("unknown key '{key}'")))?;
                output.push_str(&value);
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                output.push('}');
            }
            '}' => return Err(CodegenError::template("single '}' encountered")),
            _ => output.push(c),
        }
    }

    Ok(output)
}

/// Mutable state of one node's generation run.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    metadata: NodeMetadata,
    types: TypeCache,
    resolver: TypeResolver,
    output: String,
}

impl GenerationContext {
    /// Creates a fresh context for the given metadata.
    #[must_use]
    pub fn new(metadata: NodeMetadata) -> Self {
        let resolver = TypeResolver::new(metadata.default_string_size);
        Self {
            metadata,
            types: TypeCache::new(),
            resolver,
            output: String::new(),
        }
    }

    /// Creates a fresh context from a node's metadata.
    #[must_use]
    pub fn for_node<N: NodeAccess + ?Sized>(node: &N) -> Self {
        Self::new(NodeMetadata::from_node(node))
    }

    /// Returns the node metadata.
    #[must_use]
    pub fn metadata(&self) -> &NodeMetadata {
        &self.metadata
    }

    /// Returns the type cache.
    #[must_use]
    pub fn types(&self) -> &TypeCache {
        &self.types
    }

    /// Resolves a type name through the cache.
    ///
    /// # Errors
    /// Returns `CodegenError::InvalidType` if the name is not a valid type.
    pub fn resolve_type(&mut self, type_name: &str) -> Result<TypeDescriptor, CodegenError> {
        self.resolver.resolve(&mut self.types, type_name)
    }

    /// Resolves a type name, sizing string kinds from `samples`.
    ///
    /// # Errors
    /// Returns `CodegenError::InvalidType` if the name is not a valid type.
    pub fn resolve_type_with_samples<S: AsRef<str>>(
        &mut self,
        type_name: &str,
        samples: &[S],
    ) -> Result<TypeDescriptor, CodegenError> {
        self.resolver
            .resolve_with_samples(&mut self.types, type_name, samples)
    }

    /// Registers a descriptor under a type name.
    pub fn register_type(&mut self, type_name: impl Into<String>, descriptor: TypeDescriptor) {
        self.types.insert(type_name, descriptor);
    }

    /// Appends text verbatim.
    pub fn push_str(&mut self, text: &str) {
        self.output.push_str(text);
    }

    /// Renders a template against the metadata and appends the result.
    ///
    /// # Errors
    /// Returns `CodegenError::Template` if the template cannot be rendered.
    pub fn push_template(&mut self, template: &str) -> Result<(), CodegenError> {
        let rendered = render_template(template, &self.metadata)?;
        self.output.push_str(&rendered);
        Ok(())
    }

    /// Returns the text emitted so far.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Takes the emitted text, leaving the buffer empty.
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}
