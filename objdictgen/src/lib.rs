//! # objdictgen
//!
//! CanFestival C source generation from CANopen Object Dictionaries.
//!
//! ## Features
//!
//! - **Type resolution** - Maps CANopen type names to C types, with a per-node cache
//! - **Literal formatting** - Identifiers, integer, real, string and domain literals
//! - **Value range validators** - `#define` table and `_valueRangeTest` function per node
//! - **Index bands** - Range, communication, variable and SDO/PDO category splits
//!
//! ## Quick Start
//!
//! ```ignore
//! use objdictgen::prelude::*;
//!
//! let node = parse_node(&std::fs::read_to_string("node.xml")?)?;
//! let generated = Generator::new(&node).generate()?;
//! print!("{}", generated.value_range_content);
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Node model, index bands and XML loader
//! - [`codegen`] - Type resolution, formatting and value range generation

pub mod prelude;

/// Node model and XML loading.
pub mod schema {
    pub use objdictgen_schema::*;
}

/// C code generation from nodes.
pub mod codegen {
    pub use objdictgen_codegen::*;
}

// Re-export commonly used items at the crate root
pub use objdictgen_codegen::{
    CodegenError, GeneratedNode, GenerationContext, Generator, generate_from_file,
    generate_from_xml,
};
pub use objdictgen_schema::{Node, NodeAccess, ParseError, parse_node};
