//! # objdictgen Codegen
//!
//! CanFestival C code generation from Object Dictionary nodes.
//!
//! This crate provides:
//! - Type name resolution into canonical descriptors
//! - Identifier and literal formatting
//! - Value range validator generation
//! - Per-node context and index band setup

pub mod c;
pub mod context;
pub mod error;
pub mod generator;
pub mod resolver;

pub use context::{GenerationContext, NodeMetadata, render_template};
pub use error::CodegenError;
pub use generator::{GeneratedNode, Generator, IndexLists};
pub use resolver::{RangeId, TargetType, TypeCache, TypeDescriptor, TypeResolver};

/// Runs the per-node setup on a node given as XML.
///
/// # Arguments
/// * `xml` - Node XML content
///
/// # Returns
/// The node's context, index lists and value range validator.
///
/// # Errors
/// Returns `CodegenError` if parsing or generation fails.
pub fn generate_from_xml(xml: &str) -> Result<GeneratedNode, CodegenError> {
    let node = objdictgen_schema::parse_node(xml)?;
    Generator::new(&node).generate()
}

/// Runs the per-node setup on a node XML file.
///
/// # Arguments
/// * `path` - Path to the node XML file
///
/// # Returns
/// The node's context, index lists and value range validator.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, or generation fails.
pub fn generate_from_file(path: &std::path::Path) -> Result<GeneratedNode, CodegenError> {
    let xml = std::fs::read_to_string(path)?;
    generate_from_xml(&xml)
}
