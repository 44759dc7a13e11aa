//! Synthetic nodes for generation benchmarks.

use objdictgen_schema::{Entry, Node, StandardType};

/// Base types cycled through by [`range_node`].
const RANGE_BASES: [StandardType; 4] = [
    StandardType::Unsigned8,
    StandardType::Integer16,
    StandardType::Unsigned32,
    StandardType::Integer64,
];

/// Builds a node with `ranges` range descriptors and `variables` plain
/// parameters in the variable band.
///
/// Ranges are placed from index `0x00A0` upwards and never leave the range
/// band.
#[must_use]
pub fn range_node(ranges: usize, variables: usize) -> Node {
    let mut node = Node::new("BenchNode", 1).with_type("slave");

    for (i, index) in (0x00A0u16..=0x0260).take(ranges).enumerate() {
        let base = RANGE_BASES[i % RANGE_BASES.len()];
        let max = (i as i64 + 1) * 10;
        let entry = Entry::new(format!("{}[0-{max}]", short_name(base)))
            .with_field(0, 3i64)
            .with_field(1, i64::from(base.index()))
            .with_field(2, 0i64)
            .with_field(3, max);
        node.insert_entry(index, entry);
    }

    for (i, index) in (0x2000u16..=0xBFFF).take(variables).enumerate() {
        node.insert_entry(
            index,
            Entry::new(format!("Variable {i}")).with_field(0, i as i64),
        );
    }

    node
}

/// Type names exercised by the resolver benchmarks.
#[must_use]
pub fn type_names() -> Vec<&'static str> {
    vec![
        "BOOLEAN",
        "INTEGER8",
        "INTEGER16",
        "INTEGER32",
        "INTEGER64",
        "UNSIGNED8",
        "UNSIGNED16",
        "UNSIGNED24",
        "UNSIGNED32",
        "UNSIGNED64",
        "REAL32",
        "REAL64",
    ]
}

fn short_name(base: StandardType) -> &'static str {
    match base {
        StandardType::Unsigned8 => "UNS8",
        StandardType::Integer16 => "INT16",
        StandardType::Unsigned32 => "UNS32",
        _ => "INT64",
    }
}
