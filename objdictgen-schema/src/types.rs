//! Object Dictionary node definitions.
//!
//! This module contains the in-memory node model: typed values, entries
//! addressed by index/subindex, and the standard CANopen data-type table.

use std::collections::BTreeMap;
use std::fmt;

/// Default size of string entries when a node does not declare one.
pub const DEFAULT_STRING_SIZE: usize = 10;

/// A single value stored at an index/subindex position.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Integer value. Wide enough for the full UNSIGNED64 and INTEGER64 ranges.
    Integer(i128),
    /// Floating point value.
    Real(f64),
    /// Text value (strings and domain payloads).
    Text(String),
    /// Boolean value.
    Boolean(bool),
}

impl Value {
    /// Returns the integer payload, if this is an integer.
    #[must_use]
    pub const fn as_integer(&self) -> Option<i128> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the text payload, if this is text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true if this is a text value.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Returns a short name of the value's shape, used in diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Real(_) => "real",
            Self::Text(_) => "text",
            Self::Boolean(_) => "boolean",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Real(v) => write!(f, "{v:?}"),
            Self::Text(s) => f.write_str(s),
            Self::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl From<i128> for Value {
    fn from(v: i128) -> Self {
        Self::Integer(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v.into())
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::Integer(v.into())
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Integer(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// One Object Dictionary entry (an index) with its subindex values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entry {
    /// Symbolic entry name.
    pub name: String,
    /// Values by subindex.
    pub fields: BTreeMap<u8, Value>,
}

impl Entry {
    /// Creates a new entry without values.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Adds a value at the given subindex.
    #[must_use]
    pub fn with_field(mut self, subindex: u8, value: impl Into<Value>) -> Self {
        self.fields.insert(subindex, value.into());
        self
    }

    /// Looks up the value at a subindex.
    #[must_use]
    pub fn field(&self, subindex: u8) -> Option<&Value> {
        self.fields.get(&subindex)
    }
}

/// In-memory Object Dictionary of one node.
#[derive(Debug, Clone)]
pub struct Node {
    /// Node name, used for generated identifiers.
    pub name: String,
    /// Node identifier on the bus.
    pub id: u8,
    /// Node role, e.g. "master" or "slave".
    pub node_type: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Minimum size of string entries.
    pub default_string_size: usize,
    entries: BTreeMap<u16, Entry>,
}

impl Node {
    /// Creates a new empty node.
    #[must_use]
    pub fn new(name: impl Into<String>, id: u8) -> Self {
        Self {
            name: name.into(),
            id,
            node_type: "master".to_string(),
            description: None,
            default_string_size: DEFAULT_STRING_SIZE,
            entries: BTreeMap::new(),
        }
    }

    /// Sets the node role.
    #[must_use]
    pub fn with_type(mut self, node_type: impl Into<String>) -> Self {
        self.node_type = node_type.into();
        self
    }

    /// Sets the node description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the default string size.
    #[must_use]
    pub fn with_default_string_size(mut self, size: usize) -> Self {
        self.default_string_size = size;
        self
    }

    /// Adds an entry, builder style. A previous entry at the index is replaced.
    #[must_use]
    pub fn with_entry(mut self, index: u16, entry: Entry) -> Self {
        self.entries.insert(index, entry);
        self
    }

    /// Inserts an entry, returning the one previously stored at the index.
    pub fn insert_entry(&mut self, index: u16, entry: Entry) -> Option<Entry> {
        self.entries.insert(index, entry)
    }

    /// Looks up an entry by index.
    #[must_use]
    pub fn entry(&self, index: u16) -> Option<&Entry> {
        self.entries.get(&index)
    }

    /// Returns true if an entry exists at the index.
    #[must_use]
    pub fn has_entry(&self, index: u16) -> bool {
        self.entries.contains_key(&index)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the node has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries in ascending index order.
    pub fn entries(&self) -> impl Iterator<Item = (u16, &Entry)> {
        self.entries.iter().map(|(&idx, entry)| (idx, entry))
    }
}

/// Standard CANopen data types, addressed by their dictionary index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardType {
    /// 0x0001
    Boolean,
    /// 0x0002
    Integer8,
    /// 0x0003
    Integer16,
    /// 0x0004
    Integer32,
    /// 0x0005
    Unsigned8,
    /// 0x0006
    Unsigned16,
    /// 0x0007
    Unsigned32,
    /// 0x0008
    Real32,
    /// 0x0009
    VisibleString,
    /// 0x000A
    OctetString,
    /// 0x000B
    UnicodeString,
    /// 0x000C
    TimeOfDay,
    /// 0x000D
    TimeDifference,
    /// 0x000F
    Domain,
    /// 0x0010
    Integer24,
    /// 0x0011
    Real64,
    /// 0x0012
    Integer40,
    /// 0x0013
    Integer48,
    /// 0x0014
    Integer56,
    /// 0x0015
    Integer64,
    /// 0x0016
    Unsigned24,
    /// 0x0018
    Unsigned40,
    /// 0x0019
    Unsigned48,
    /// 0x001A
    Unsigned56,
    /// 0x001B
    Unsigned64,
}

impl StandardType {
    /// Looks up a standard type by its dictionary index.
    #[must_use]
    pub const fn from_index(index: u16) -> Option<Self> {
        match index {
            0x01 => Some(Self::Boolean),
            0x02 => Some(Self::Integer8),
            0x03 => Some(Self::Integer16),
            0x04 => Some(Self::Integer32),
            0x05 => Some(Self::Unsigned8),
            0x06 => Some(Self::Unsigned16),
            0x07 => Some(Self::Unsigned32),
            0x08 => Some(Self::Real32),
            0x09 => Some(Self::VisibleString),
            0x0A => Some(Self::OctetString),
            0x0B => Some(Self::UnicodeString),
            0x0C => Some(Self::TimeOfDay),
            0x0D => Some(Self::TimeDifference),
            0x0F => Some(Self::Domain),
            0x10 => Some(Self::Integer24),
            0x11 => Some(Self::Real64),
            0x12 => Some(Self::Integer40),
            0x13 => Some(Self::Integer48),
            0x14 => Some(Self::Integer56),
            0x15 => Some(Self::Integer64),
            0x16 => Some(Self::Unsigned24),
            0x18 => Some(Self::Unsigned40),
            0x19 => Some(Self::Unsigned48),
            0x1A => Some(Self::Unsigned56),
            0x1B => Some(Self::Unsigned64),
            _ => None,
        }
    }

    /// Returns the dictionary index of the type.
    #[must_use]
    pub const fn index(&self) -> u16 {
        match self {
            Self::Boolean => 0x01,
            Self::Integer8 => 0x02,
            Self::Integer16 => 0x03,
            Self::Integer32 => 0x04,
            Self::Unsigned8 => 0x05,
            Self::Unsigned16 => 0x06,
            Self::Unsigned32 => 0x07,
            Self::Real32 => 0x08,
            Self::VisibleString => 0x09,
            Self::OctetString => 0x0A,
            Self::UnicodeString => 0x0B,
            Self::TimeOfDay => 0x0C,
            Self::TimeDifference => 0x0D,
            Self::Domain => 0x0F,
            Self::Integer24 => 0x10,
            Self::Real64 => 0x11,
            Self::Integer40 => 0x12,
            Self::Integer48 => 0x13,
            Self::Integer56 => 0x14,
            Self::Integer64 => 0x15,
            Self::Unsigned24 => 0x16,
            Self::Unsigned40 => 0x18,
            Self::Unsigned48 => 0x19,
            Self::Unsigned56 => 0x1A,
            Self::Unsigned64 => 0x1B,
        }
    }

    /// Returns the symbolic type name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Boolean => "BOOLEAN",
            Self::Integer8 => "INTEGER8",
            Self::Integer16 => "INTEGER16",
            Self::Integer32 => "INTEGER32",
            Self::Unsigned8 => "UNSIGNED8",
            Self::Unsigned16 => "UNSIGNED16",
            Self::Unsigned32 => "UNSIGNED32",
            Self::Real32 => "REAL32",
            Self::VisibleString => "VISIBLE_STRING",
            Self::OctetString => "OCTET_STRING",
            Self::UnicodeString => "UNICODE_STRING",
            Self::TimeOfDay => "TIME_OF_DAY",
            Self::TimeDifference => "TIME_DIFFERENCE",
            Self::Domain => "DOMAIN",
            Self::Integer24 => "INTEGER24",
            Self::Real64 => "REAL64",
            Self::Integer40 => "INTEGER40",
            Self::Integer48 => "INTEGER48",
            Self::Integer56 => "INTEGER56",
            Self::Integer64 => "INTEGER64",
            Self::Unsigned24 => "UNSIGNED24",
            Self::Unsigned40 => "UNSIGNED40",
            Self::Unsigned48 => "UNSIGNED48",
            Self::Unsigned56 => "UNSIGNED56",
            Self::Unsigned64 => "UNSIGNED64",
        }
    }
}
