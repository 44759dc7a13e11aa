//! # objdictgen Schema
//!
//! Object Dictionary node model consumed by the generator.
//!
//! This crate provides:
//! - Value and entry types for a node's Object Dictionary
//! - The read-only [`NodeAccess`] interface the generator works against
//! - Index bands and communication-profile categories
//! - An XML loader for in-memory nodes

pub mod bands;
pub mod error;
pub mod node;
pub mod parser;
pub mod types;

pub use bands::{IndexBand, IndexCategory};
pub use error::ParseError;
pub use node::NodeAccess;
pub use parser::parse_node;
pub use types::{DEFAULT_STRING_SIZE, Entry, Node, StandardType, Value};
