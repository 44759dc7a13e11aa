//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use objdictgen::prelude::*;
//! ```

// Node model
pub use objdictgen_schema::{
    Entry, IndexBand, IndexCategory, Node, NodeAccess, ParseError, StandardType, Value, parse_node,
};

// Generation
pub use objdictgen_codegen::c::{
    ValueRange, ValueRangeTableBuilder, c_type_name, format_name, format_value,
};
pub use objdictgen_codegen::{
    CodegenError, GeneratedNode, GenerationContext, Generator, IndexLists, NodeMetadata, RangeId,
    TargetType, TypeCache, TypeDescriptor, TypeResolver, generate_from_file, generate_from_xml,
    render_template,
};
