//! Type name resolution.
//!
//! Turns loosely structured CANopen type names such as `UNSIGNED32` or
//! `VISIBLE_STRING` into canonical [`TypeDescriptor`]s. Names are parsed as a
//! leading run of uppercase letters/underscores followed by a run of digits;
//! anything after the digits is ignored.

use crate::error::CodegenError;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Identifier of a value range pseudo-type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeId {
    /// The fixed emergency-object range (only 0 accepted).
    Emc,
    /// Sequentially numbered range, starting at 1.
    Numbered(u32),
}

impl fmt::Display for RangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Emc => f.write_str("EMC"),
            Self::Numbered(n) => write!(f, "{n}"),
        }
    }
}

/// Target representation of a resolved type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetType {
    /// Unsigned integer of the given bit width.
    Unsigned(u8),
    /// Signed integer of the given bit width.
    Signed(u8),
    /// Floating point of the given bit width.
    Real(u8),
    /// Visible or octet string.
    VisibleString,
    /// Opaque blob.
    Domain,
    /// Single-byte boolean.
    Boolean,
    /// Value range pseudo-type.
    ValueRange(RangeId),
}

impl TargetType {
    /// Returns true for kinds whose size depends on the sample data.
    #[must_use]
    pub const fn is_string_like(&self) -> bool {
        matches!(self, Self::VisibleString | Self::Domain)
    }

    /// Returns true for floating point kinds.
    #[must_use]
    pub const fn is_real(&self) -> bool {
        matches!(self, Self::Real(_))
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsigned(width) => write!(f, "uint{width}"),
            Self::Signed(width) => write!(f, "int{width}"),
            Self::Real(width) => write!(f, "real{width}"),
            Self::VisibleString => f.write_str("visible_string"),
            Self::Domain => f.write_str("domain"),
            Self::Boolean => f.write_str("boolean"),
            Self::ValueRange(id) => write!(f, "valueRange_{id}"),
        }
    }
}

impl FromStr for TargetType {
    type Err = CodegenError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let width = |digits: &str| digits.parse::<u8>().ok();
        let parsed = match tag {
            "visible_string" => Some(Self::VisibleString),
            "domain" => Some(Self::Domain),
            "boolean" => Some(Self::Boolean),
            "valueRange_EMC" => Some(Self::ValueRange(RangeId::Emc)),
            _ => {
                if let Some(n) = tag.strip_prefix("valueRange_") {
                    n.parse().ok().map(|n| Self::ValueRange(RangeId::Numbered(n)))
                } else if let Some(digits) = tag.strip_prefix("uint") {
                    width(digits).map(Self::Unsigned)
                } else if let Some(digits) = tag.strip_prefix("int") {
                    width(digits).map(Self::Signed)
                } else if let Some(digits) = tag.strip_prefix("real") {
                    width(digits).map(Self::Real)
                } else {
                    None
                }
            }
        };
        parsed.ok_or_else(|| CodegenError::invalid_type(tag))
    }
}

/// Canonical description of a resolved type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// Canonical C-side type name, e.g. `UNS8` or `INTEGER16`.
    pub name: String,
    /// Byte size for strings and blobs.
    pub size: Option<usize>,
    /// Target representation.
    pub target: TargetType,
    /// Whether the type is an unsigned integer.
    pub is_unsigned: bool,
}

impl TypeDescriptor {
    /// Creates a new type descriptor.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        size: Option<usize>,
        target: TargetType,
        is_unsigned: bool,
    ) -> Self {
        Self {
            name: name.into(),
            size,
            target,
            is_unsigned,
        }
    }

    /// Derives a value range pseudo-type that keeps this descriptor's
    /// name, size and signedness.
    #[must_use]
    pub fn to_value_range(&self, id: RangeId) -> Self {
        Self {
            name: self.name.clone(),
            size: self.size,
            target: TargetType::ValueRange(id),
            is_unsigned: self.is_unsigned,
        }
    }

    /// Returns true if the descriptor may be memoized by type name.
    #[must_use]
    pub const fn is_cacheable(&self) -> bool {
        !self.target.is_string_like()
    }
}

/// Per-node cache of resolved type descriptors, keyed by type name.
#[derive(Debug, Clone, Default)]
pub struct TypeCache {
    types: HashMap<String, TypeDescriptor>,
}

impl TypeCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a cached descriptor.
    #[must_use]
    pub fn get(&self, type_name: &str) -> Option<&TypeDescriptor> {
        self.types.get(type_name)
    }

    /// Registers a descriptor under a type name, replacing any previous one.
    pub fn insert(&mut self, type_name: impl Into<String>, descriptor: TypeDescriptor) {
        self.types.insert(type_name.into(), descriptor);
    }

    /// Returns true if the type name is cached.
    #[must_use]
    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    /// Returns the number of cached descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Resolver for CANopen type names.
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver {
    default_string_size: usize,
}

impl TypeResolver {
    /// Creates a resolver with the node's default string size.
    #[must_use]
    pub const fn new(default_string_size: usize) -> Self {
        Self {
            default_string_size,
        }
    }

    /// Returns the minimum size of string types.
    #[must_use]
    pub const fn default_string_size(&self) -> usize {
        self.default_string_size
    }

    /// Resolves a type name without sample data, consulting the cache.
    ///
    /// # Errors
    /// Returns `CodegenError::InvalidType` if the name is not a valid type.
    pub fn resolve(
        &self,
        cache: &mut TypeCache,
        type_name: &str,
    ) -> Result<TypeDescriptor, CodegenError> {
        self.resolve_with_samples::<&str>(cache, type_name, &[])
    }

    /// Resolves a type name, consulting the cache.
    ///
    /// String and blob kinds are sized from `samples` and never cached.
    ///
    /// # Errors
    /// Returns `CodegenError::InvalidType` if the name is not a valid type.
    pub fn resolve_with_samples<S: AsRef<str>>(
        &self,
        cache: &mut TypeCache,
        type_name: &str,
        samples: &[S],
    ) -> Result<TypeDescriptor, CodegenError> {
        if let Some(cached) = cache.get(type_name) {
            tracing::trace!(type_name, "type cache hit");
            return Ok(cached.clone());
        }

        let descriptor = self.parse(type_name, samples)?;
        if descriptor.is_cacheable() {
            tracing::trace!(type_name, target = %descriptor.target, "type cache miss");
            cache.insert(type_name, descriptor.clone());
        }
        Ok(descriptor)
    }

    /// Parses a type name into a descriptor without touching any cache.
    ///
    /// # Errors
    /// Returns `CodegenError::InvalidType` if the name is not a valid type.
    pub fn parse<S: AsRef<str>>(
        &self,
        type_name: &str,
        samples: &[S],
    ) -> Result<TypeDescriptor, CodegenError> {
        let (prefix, digits) = split_type_name(type_name);
        let invalid = || CodegenError::invalid_type(type_name);
        let longest_sample = samples
            .iter()
            .map(|s| s.as_ref().chars().count())
            .max()
            .unwrap_or(0);

        let descriptor = match prefix {
            "UNSIGNED" => {
                let width = integer_width(digits).ok_or_else(invalid)?;
                TypeDescriptor::new(
                    format!("UNS{width}"),
                    None,
                    TargetType::Unsigned(width),
                    true,
                )
            }
            "INTEGER" => {
                let width = integer_width(digits).ok_or_else(invalid)?;
                TypeDescriptor::new(
                    format!("INTEGER{width}"),
                    None,
                    TargetType::Signed(width),
                    false,
                )
            }
            "REAL" => {
                let width = match digits {
                    "32" => 32,
                    "64" => 64,
                    _ => return Err(invalid()),
                };
                TypeDescriptor::new(format!("REAL{width}"), None, TargetType::Real(width), false)
            }
            "VISIBLE_STRING" | "OCTET_STRING" => {
                let mut size = self.default_string_size.max(longest_sample);
                if !digits.is_empty() {
                    let explicit: usize = digits.parse().map_err(|_| invalid())?;
                    size = size.max(explicit);
                }
                TypeDescriptor::new("UNS8", Some(size), TargetType::VisibleString, false)
            }
            "DOMAIN" => TypeDescriptor::new("UNS8", Some(longest_sample), TargetType::Domain, false),
            "BOOLEAN" => TypeDescriptor::new("UNS8", None, TargetType::Boolean, false),
            _ => return Err(invalid()),
        };

        Ok(descriptor)
    }
}

/// Splits a type name into its uppercase/underscore prefix and the digit
/// run that immediately follows it.
fn split_type_name(type_name: &str) -> (&str, &str) {
    let prefix_len = type_name
        .bytes()
        .take_while(|b| b.is_ascii_uppercase() || *b == b'_')
        .count();
    let rest = &type_name[prefix_len..];
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    (&type_name[..prefix_len], &rest[..digits_len])
}

/// Parses an integer bit width: a multiple of 8 between 8 and 64.
fn integer_width(digits: &str) -> Option<u8> {
    let width: u8 = digits.parse().ok()?;
    (width % 8 == 0 && (8..=64).contains(&width)).then_some(width)
}
