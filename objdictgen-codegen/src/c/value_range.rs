//! Value range table generation.
//!
//! Range descriptors are dictionary entries in the range band whose name
//! looks like `UNS8[0-100]`. Each one becomes a `valueRange_N` pseudo-type,
//! a `#define` and a `case` in the node's `<Node>_valueRangeTest` function.
//! Subindex 1 holds the base type reference, subindexes 2 and 3 the bounds.

use crate::context::GenerationContext;
use crate::error::CodegenError;
use crate::resolver::{RangeId, TargetType, TypeDescriptor};
use objdictgen_schema::{IndexBand, NodeAccess, Value};
use std::fmt::Write;

/// Cache key and define name of the emergency-object range.
pub const EMC_RANGE_NAME: &str = "valueRange_EMC";

const EMC_DEFINE: &str = "\n#define valueRange_EMC 0x9F \
     /* Type for index 0x1003 subindex 0x00 (only set of value 0 is possible) */";

const EMC_CASE: &str = "    case valueRange_EMC:
      if (*(UNS8*)value != (UNS8)0) return OD_VALUE_RANGE_EXCEEDED;
      break;
";

const FUNCTION_HEADER: &str = "\nUNS32 {NodeName}_valueRangeTest (UNS8 typeValue, void * value)\n{{";

const SWITCH_OPEN: &str = "\n  switch (typeValue) {\n";

const SWITCH_CLOSE: &str = "  }\n  return 0;\n}\n";

const SUBINDEX_TYPE: u8 = 1;
const SUBINDEX_MIN: u8 = 2;
const SUBINDEX_MAX: u8 = 3;

/// One range descriptor found in the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueRange {
    /// Sequential range number, starting at 1.
    pub number: u32,
    /// Dictionary index of the descriptor entry.
    pub index: u16,
    /// Descriptor entry name, also the pseudo-type's cache key.
    pub name: String,
    /// Resolved base type.
    pub base: TypeDescriptor,
    /// Lower bound.
    pub min: i128,
    /// Upper bound.
    pub max: i128,
}

impl ValueRange {
    /// Returns true when the low-bound check is vacuous.
    #[must_use]
    pub fn skips_low_check(&self) -> bool {
        self.base.is_unsigned && self.min <= 0
    }

    /// Renders the `#define` line, including its leading newline.
    #[must_use]
    pub fn define(&self) -> String {
        format!(
            "\n#define valueRange_{} 0x{:02X} /* Type {}, {} < value < {} */",
            self.number, self.index, self.base.name, self.min, self.max
        )
    }

    /// Renders the `case` block.
    #[must_use]
    pub fn case_block(&self) -> String {
        let ty = &self.base.name;
        let mut out = format!("    case valueRange_{}:\n", self.number);
        if self.skips_low_check() {
            out.push_str(
                "      /* Negative or null low limit ignored because of unsigned type */;\n",
            );
        } else {
            let _ = writeln!(
                out,
                "      if (*({ty}*)value < ({ty}){}) return OD_VALUE_TOO_LOW;",
                self.min
            );
        }
        let _ = writeln!(
            out,
            "      if (*({ty}*)value > ({ty}){}) return OD_VALUE_TOO_HIGH;",
            self.max
        );
        out.push_str("    break;\n");
        out
    }
}

/// Returns true if an entry name declares a value range.
///
/// The name must start with `[A-Z_]*`, then `[0-9]*`, then a bracketed
/// `min-max` pair made of digits and dashes. Text after `]` is ignored.
#[must_use]
pub fn is_range_name(name: &str) -> bool {
    let rest = name.trim_start_matches(|c: char| c.is_ascii_uppercase() || c == '_');
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_digit());
    let Some(inner) = rest.strip_prefix('[') else {
        return false;
    };
    let bounds_len = inner
        .bytes()
        .take_while(|b| b.is_ascii_digit() || *b == b'-')
        .count();
    let bounds = &inner[..bounds_len];
    inner[bounds_len..].starts_with(']') && bounds.contains('-')
}

/// Builder for the value range validator of one node.
pub struct ValueRangeTableBuilder<'a, N: NodeAccess + ?Sized> {
    node: &'a N,
}

impl<'a, N: NodeAccess + ?Sized> ValueRangeTableBuilder<'a, N> {
    /// Creates a builder reading from the given node.
    #[must_use]
    pub fn new(node: &'a N) -> Self {
        Self { node }
    }

    /// Scans the range band and registers one pseudo-type per descriptor.
    ///
    /// The EMC range is registered first. Entries whose name is not a range
    /// declaration are skipped.
    ///
    /// # Errors
    /// Returns `CodegenError::ContractViolation` if a descriptor's type or
    /// bound fields are missing or not integers, and
    /// `CodegenError::InvalidType` if its base type cannot be resolved.
    pub fn collect(&self, ctx: &mut GenerationContext) -> Result<Vec<ValueRange>, CodegenError> {
        ctx.register_type(
            EMC_RANGE_NAME,
            TypeDescriptor::new("UNS8", Some(0), TargetType::ValueRange(RangeId::Emc), true),
        );

        let mut ranges = Vec::new();
        for index in IndexBand::Range.filter(&self.node.indices()) {
            let Some(name) = self.node.entry_name(index) else {
                continue;
            };
            if !is_range_name(name) {
                tracing::trace!(index, name, "not a range descriptor");
                continue;
            }

            let number = ranges.len() as u32 + 1;
            let type_ref = self.integer_field(index, SUBINDEX_TYPE, "type index")?;
            let type_name = u16::try_from(type_ref)
                .ok()
                .and_then(|type_ref| self.node.type_name(type_ref))
                .ok_or_else(|| {
                    CodegenError::contract(
                        location(index, SUBINDEX_TYPE),
                        "reference to a defined type",
                        format!("0x{type_ref:X}"),
                    )
                })?;
            let base = ctx.resolve_type(type_name)?;
            let min = self.integer_field(index, SUBINDEX_MIN, "integer")?;
            let max = self.integer_field(index, SUBINDEX_MAX, "integer")?;

            ctx.register_type(name, base.to_value_range(RangeId::Numbered(number)));
            tracing::debug!(index, name, number, base = %base.name, "registered value range");

            ranges.push(ValueRange {
                number,
                index,
                name: name.to_string(),
                base,
                min,
                max,
            });
        }

        Ok(ranges)
    }

    /// Builds the complete validator text and appends it to the context.
    ///
    /// Nothing is appended when an error is returned.
    ///
    /// # Errors
    /// Same as [`collect`](Self::collect), plus `CodegenError::Template` if
    /// the function header cannot be rendered.
    pub fn build(&self, ctx: &mut GenerationContext) -> Result<Vec<ValueRange>, CodegenError> {
        let ranges = self.collect(ctx)?;

        let mut defines = String::from(EMC_DEFINE);
        let mut cases = String::from(EMC_CASE);
        for range in &ranges {
            defines.push_str(&range.define());
            cases.push_str(&range.case_block());
        }

        let header = crate::context::render_template(FUNCTION_HEADER, ctx.metadata())?;
        ctx.push_str(&defines);
        ctx.push_str(&header);
        ctx.push_str(SWITCH_OPEN);
        ctx.push_str(&cases);
        ctx.push_str(SWITCH_CLOSE);

        Ok(ranges)
    }

    /// Reads an integer field of a descriptor entry.
    fn integer_field(
        &self,
        index: u16,
        subindex: u8,
        expected: &'static str,
    ) -> Result<i128, CodegenError> {
        match self.node.entry_field(index, subindex) {
            Some(Value::Integer(v)) => Ok(*v),
            Some(other) => Err(CodegenError::contract(
                location(index, subindex),
                expected,
                other.kind_name(),
            )),
            None => Err(CodegenError::contract(
                location(index, subindex),
                expected,
                "nothing",
            )),
        }
    }
}

fn location(index: u16, subindex: u8) -> String {
    format!("index 0x{index:04X} subindex 0x{subindex:02X}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use objdictgen_schema::{Entry, Node};

    fn range_entry(name: &str, type_ref: i64, min: i64, max: i64) -> Entry {
        Entry::new(name)
            .with_field(0, 3i64)
            .with_field(1, type_ref)
            .with_field(2, min)
            .with_field(3, max)
    }

    fn build(node: &Node) -> Result<(String, Vec<ValueRange>, GenerationContext), CodegenError> {
        let mut ctx = GenerationContext::for_node(node);
        let ranges = ValueRangeTableBuilder::new(node).build(&mut ctx)?;
        Ok((ctx.take_output(), ranges, ctx))
    }

    #[test]
    fn test_is_range_name() {
        assert!(is_range_name("UNS8[0-100]"));
        assert!(is_range_name("INTEGER16[-10-10]"));
        assert!(is_range_name("[1-2]"));
        assert!(is_range_name("UNS8[-]"));
        assert!(is_range_name("REAL32[0-1] trailing"));
        assert!(!is_range_name("UNS8[0100]"));
        assert!(!is_range_name("UNS8"));
        assert!(!is_range_name("Uns8[0-100]"));
        assert!(!is_range_name("UNS8 [0-100]"));
        assert!(!is_range_name("UNS8[0-100"));
        assert!(!is_range_name("UNS8[0-1.5]"));
        assert!(!is_range_name("A1B[0-1]"));
    }

    #[test]
    fn test_single_unsigned_range() {
        let node = Node::new("Demo", 1).with_entry(0x10, range_entry("UNS8[0-100]", 0x05, 0, 100));
        let (text, ranges, _) = build(&node).unwrap();

        let expected = concat!(
            "\n#define valueRange_EMC 0x9F /* Type for index 0x1003 subindex 0x00 (only set of value 0 is possible) */",
            "\n#define valueRange_1 0x10 /* Type UNS8, 0 < value < 100 */",
            "\nUNS32 Demo_valueRangeTest (UNS8 typeValue, void * value)\n{",
            "\n  switch (typeValue) {\n",
            "    case valueRange_EMC:\n",
            "      if (*(UNS8*)value != (UNS8)0) return OD_VALUE_RANGE_EXCEEDED;\n",
            "      break;\n",
            "    case valueRange_1:\n",
            "      /* Negative or null low limit ignored because of unsigned type */;\n",
            "      if (*(UNS8*)value > (UNS8)100) return OD_VALUE_TOO_HIGH;\n",
            "    break;\n",
            "  }\n  return 0;\n}\n",
        );

        assert_eq!(text, expected);
        assert_eq!(ranges.len(), 1);
        assert_eq!(text.matches("#define").count(), 2);
    }

    #[test]
    fn test_signed_range_has_low_check() {
        let node =
            Node::new("N", 1).with_entry(0xA0, range_entry("INTEGER16[-5-5]", 0x03, -5, 5));
        let (text, _, _) = build(&node).unwrap();
        assert!(text.contains("/* Type INTEGER16, -5 < value < 5 */"));
        assert!(text.contains(
            "      if (*(INTEGER16*)value < (INTEGER16)-5) return OD_VALUE_TOO_LOW;\n"
        ));
        assert!(text.contains(
            "      if (*(INTEGER16*)value > (INTEGER16)5) return OD_VALUE_TOO_HIGH;\n"
        ));
        assert!(!text.contains("ignored because of unsigned type"));
    }

    #[test]
    fn test_unsigned_positive_min_keeps_low_check() {
        let node = Node::new("N", 1).with_entry(0xA0, range_entry("UNS16[10-20]", 0x06, 10, 20));
        let (text, _, _) = build(&node).unwrap();
        assert!(text.contains("if (*(UNS16*)value < (UNS16)10) return OD_VALUE_TOO_LOW;"));
    }

    #[test]
    fn test_unsigned_negative_min_skips_low_check() {
        let node = Node::new("N", 1).with_entry(0xA0, range_entry("UNS32[-1-20]", 0x07, -1, 20));
        let (text, ranges, _) = build(&node).unwrap();
        assert!(ranges[0].skips_low_check());
        assert!(!text.contains("OD_VALUE_TOO_LOW"));
    }

    #[test]
    fn test_numbering_ascending_and_skips() {
        let node = Node::new("N", 1)
            .with_entry(0x00C0, range_entry("UNS8[1-9]", 0x05, 1, 9))
            .with_entry(0x0005, Entry::new("UNSIGNED8"))
            .with_entry(0x00A0, range_entry("INTEGER8[-1-1]", 0x02, -1, 1))
            .with_entry(0x00B0, Entry::new("Plain entry"))
            .with_entry(0x0300, range_entry("UNS8[0-1]", 0x05, 0, 1))
            .with_entry(0x2000, range_entry("UNS8[0-2]", 0x05, 0, 2));
        let (text, ranges, _) = build(&node).unwrap();

        let numbered: Vec<(u32, u16)> = ranges.iter().map(|r| (r.number, r.index)).collect();
        assert_eq!(numbered, vec![(1, 0x00A0), (2, 0x00C0)]);
        assert!(text.contains("#define valueRange_1 0xA0 "));
        assert!(text.contains("#define valueRange_2 0xC0 "));
        assert!(!text.contains("valueRange_3"));

        let first = text.find("case valueRange_1:").unwrap();
        let second = text.find("case valueRange_2:").unwrap();
        let emc = text.find("case valueRange_EMC:").unwrap();
        assert!(emc < first && first < second);
    }

    #[test]
    fn test_registers_pseudo_types() {
        let node = Node::new("N", 1).with_entry(0xA0, range_entry("INTEGER16[-5-5]", 0x03, -5, 5));
        let (_, _, ctx) = build(&node).unwrap();

        let emc = ctx.types().get(EMC_RANGE_NAME).unwrap();
        assert_eq!(emc.target, TargetType::ValueRange(RangeId::Emc));
        assert_eq!(emc.size, Some(0));
        assert!(emc.is_unsigned);

        let range = ctx.types().get("INTEGER16[-5-5]").unwrap();
        assert_eq!(range.name, "INTEGER16");
        assert_eq!(range.target, TargetType::ValueRange(RangeId::Numbered(1)));
        assert!(!range.is_unsigned);
        assert!(ctx.types().contains("INTEGER16"));
    }

    #[test]
    fn test_empty_node_only_emc() {
        let (text, ranges, _) = build(&Node::new("Empty", 1)).unwrap();
        assert!(ranges.is_empty());
        assert_eq!(text.matches("#define").count(), 1);
        assert_eq!(text.matches("case ").count(), 1);
        assert!(text.contains("UNS32 Empty_valueRangeTest (UNS8 typeValue, void * value)\n{"));
        assert!(text.ends_with("  }\n  return 0;\n}\n"));
    }

    #[test]
    fn test_custom_type_reference() {
        let node = Node::new("N", 1)
            .with_entry(0x0040, Entry::new("UNSIGNED24"))
            .with_entry(0x0041, range_entry("UNS24[0-5]", 0x40, 0, 5));
        let (text, ranges, _) = build(&node).unwrap();
        assert_eq!(ranges[0].base.name, "UNS24");
        assert!(text.contains("(UNS24)5"));
    }

    #[test]
    fn test_deterministic_output() {
        let node = Node::new("N", 1)
            .with_entry(0x00A1, range_entry("UNS8[0-9]", 0x05, 0, 9))
            .with_entry(0x00A0, range_entry("INTEGER32[-9-9]", 0x04, -9, 9));
        let (first, _, _) = build(&node).unwrap();
        let (second, _, _) = build(&node).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_min_is_contract_violation() {
        let node = Node::new("N", 1).with_entry(
            0xA0,
            Entry::new("UNS8[0-1]").with_field(1, 0x05i64).with_field(3, 1i64),
        );
        let err = build(&node).unwrap_err();
        assert!(matches!(
            err,
            CodegenError::ContractViolation { ref found, .. } if found == "nothing"
        ));
    }

    #[test]
    fn test_text_bound_is_contract_violation() {
        let node = Node::new("N", 1).with_entry(
            0xA0,
            Entry::new("UNS8[0-1]")
                .with_field(1, 0x05i64)
                .with_field(2, 0i64)
                .with_field(3, "one"),
        );
        let err = build(&node).unwrap_err();
        match err {
            CodegenError::ContractViolation {
                location,
                expected,
                found,
            } => {
                assert_eq!(location, "index 0x00A0 subindex 0x03");
                assert_eq!(expected, "integer");
                assert_eq!(found, "text");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_integer_type_ref_is_contract_violation() {
        let node = Node::new("N", 1).with_entry(
            0xA0,
            Entry::new("UNS8[0-1]")
                .with_field(1, "UNSIGNED8")
                .with_field(2, 0i64)
                .with_field(3, 1i64),
        );
        assert!(matches!(
            build(&node).unwrap_err(),
            CodegenError::ContractViolation { .. }
        ));
    }

    #[test]
    fn test_dangling_type_ref_is_contract_violation() {
        let node = Node::new("N", 1).with_entry(0xA0, range_entry("UNS8[0-1]", 0x7777, 0, 1));
        assert!(matches!(
            build(&node).unwrap_err(),
            CodegenError::ContractViolation { .. }
        ));
    }

    #[test]
    fn test_unsupported_base_type_is_invalid_type() {
        let node = Node::new("N", 1).with_entry(0xA0, range_entry("TOD[0-1]", 0x0C, 0, 1));
        let err = build(&node).unwrap_err();
        assert!(matches!(
            err,
            CodegenError::InvalidType { ref type_name } if type_name == "TIME_OF_DAY"
        ));
    }

    #[test]
    fn test_failure_appends_nothing() {
        let node = Node::new("N", 1).with_entry(0xA0, range_entry("UNS8[0-1]", 0x7777, 0, 1));
        let mut ctx = GenerationContext::for_node(&node);
        assert!(ValueRangeTableBuilder::new(&node).build(&mut ctx).is_err());
        assert_eq!(ctx.output(), "");
    }
}
