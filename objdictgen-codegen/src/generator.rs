//! Per-node generation setup.
//!
//! Builds the [`GenerationContext`] of a node, splits its indices into the
//! bands the file emitter walks, and renders the value range validator.

use crate::c::value_range::{ValueRange, ValueRangeTableBuilder};
use crate::context::{GenerationContext, NodeMetadata};
use crate::error::CodegenError;
use objdictgen_schema::{IndexBand, IndexCategory, NodeAccess};

/// A node's indices split by band, each in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexLists {
    /// Range band, `0x0000..=0x0260`.
    pub ranges: Vec<u16>,
    /// Main band, `0x1000..=0xFFFF`.
    pub main: Vec<u16>,
    /// Variable band, `0x2000..=0xBFFF`.
    pub variables: Vec<u16>,
    /// Communication band, `0x1000..=0x11FF`.
    pub communication: Vec<u16>,
}

impl IndexLists {
    /// Splits ascending indices into bands.
    #[must_use]
    pub fn from_indices(indices: &[u16]) -> Self {
        Self {
            ranges: IndexBand::Range.filter(indices),
            main: IndexBand::Main.filter(indices),
            variables: IndexBand::Variable.filter(indices),
            communication: IndexBand::Communication.filter(indices),
        }
    }

    /// Main-band indices belonging to an SDO/PDO category.
    #[must_use]
    pub fn in_category(&self, category: IndexCategory) -> Vec<u16> {
        category.filter(&self.main)
    }
}

/// Result of the per-node setup, handed to the file emitter.
#[derive(Debug, Clone)]
pub struct GeneratedNode {
    /// Context holding metadata and the type cache, including pseudo-types.
    pub context: GenerationContext,
    /// Indices split by band.
    pub indices: IndexLists,
    /// Range descriptors found in the node.
    pub value_ranges: Vec<ValueRange>,
    /// Rendered `#define` table and `_valueRangeTest` function.
    pub value_range_content: String,
}

/// Per-node generator.
pub struct Generator<'a, N: NodeAccess + ?Sized> {
    node: &'a N,
    default_string_size: Option<usize>,
}

impl<'a, N: NodeAccess + ?Sized> Generator<'a, N> {
    /// Creates a new generator for a node.
    #[must_use]
    pub fn new(node: &'a N) -> Self {
        Self {
            node,
            default_string_size: None,
        }
    }

    /// Overrides the node's default string size.
    #[must_use]
    pub fn with_default_string_size(mut self, size: usize) -> Self {
        self.default_string_size = Some(size);
        self
    }

    /// Runs the setup for the node.
    ///
    /// # Errors
    /// Returns `CodegenError` if a range descriptor is malformed or refers to
    /// an invalid type. No partial output is returned.
    pub fn generate(&self) -> Result<GeneratedNode, CodegenError> {
        let mut metadata = NodeMetadata::from_node(self.node);
        if let Some(size) = self.default_string_size {
            metadata.default_string_size = size;
        }

        let mut context = GenerationContext::new(metadata);
        let indices = IndexLists::from_indices(&self.node.indices());

        let value_ranges = ValueRangeTableBuilder::new(self.node).build(&mut context)?;
        let value_range_content = context.take_output();

        tracing::debug!(
            node = %context.metadata().node_name,
            ranges = value_ranges.len(),
            parameters = indices.main.len(),
            "prepared node"
        );

        Ok(GeneratedNode {
            context,
            indices,
            value_ranges,
            value_range_content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{RangeId, TargetType};
    use objdictgen_schema::{Entry, Node};

    fn sample_node() -> Node {
        Node::new("Sample", 2)
            .with_type("slave")
            .with_entry(0x0005, Entry::new("UNSIGNED8"))
            .with_entry(
                0x00A0,
                Entry::new("UNS8[0-100]")
                    .with_field(1, 0x05i64)
                    .with_field(2, 0i64)
                    .with_field(3, 100i64),
            )
            .with_entry(0x1000, Entry::new("Device Type"))
            .with_entry(0x1018, Entry::new("Identity"))
            .with_entry(0x1200, Entry::new("Server SDO Parameter"))
            .with_entry(0x1400, Entry::new("Receive PDO 1 Parameter"))
            .with_entry(0x1600, Entry::new("Receive PDO 1 Mapping"))
            .with_entry(0x2000, Entry::new("Speed"))
            .with_entry(0x6000, Entry::new("Inputs"))
            .with_entry(0xC000, Entry::new("Out of variable band"))
    }

    #[test]
    fn test_index_lists() {
        let generated = Generator::new(&sample_node()).generate().unwrap();
        let lists = &generated.indices;
        assert_eq!(lists.ranges, vec![0x0005, 0x00A0]);
        assert_eq!(
            lists.main,
            vec![0x1000, 0x1018, 0x1200, 0x1400, 0x1600, 0x2000, 0x6000, 0xC000]
        );
        assert_eq!(lists.variables, vec![0x2000, 0x6000]);
        assert_eq!(lists.communication, vec![0x1000, 0x1018]);
    }

    #[test]
    fn test_index_categories() {
        let generated = Generator::new(&sample_node()).generate().unwrap();
        assert_eq!(
            generated.indices.in_category(IndexCategory::SdoServer),
            vec![0x1200]
        );
        assert_eq!(
            generated.indices.in_category(IndexCategory::PdoReceiveMap),
            vec![0x1600]
        );
        assert!(
            generated
                .indices
                .in_category(IndexCategory::PdoTransmit)
                .is_empty()
        );
    }

    #[test]
    fn test_generate_context_and_content() {
        let generated = Generator::new(&sample_node()).generate().unwrap();
        let meta = generated.context.metadata();
        assert_eq!(meta.node_name, "Sample");
        assert_eq!(meta.iam_a_slave, 1);

        assert_eq!(generated.value_ranges.len(), 1);
        assert!(
            generated
                .value_range_content
                .starts_with("\n#define valueRange_EMC 0x9F")
        );
        assert!(generated.context.output().is_empty());

        let range = generated.context.types().get("UNS8[0-100]").unwrap();
        assert_eq!(range.target, TargetType::ValueRange(RangeId::Numbered(1)));
    }

    #[test]
    fn test_default_string_size_override() {
        let node = sample_node();
        let mut generated = Generator::new(&node)
            .with_default_string_size(32)
            .generate()
            .unwrap();
        assert_eq!(generated.context.metadata().default_string_size, 32);
        let d = generated
            .context
            .resolve_type("VISIBLE_STRING")
            .unwrap();
        assert_eq!(d.size, Some(32));
    }

    #[test]
    fn test_generate_is_deterministic() {
        let node = sample_node();
        let first = Generator::new(&node).generate().unwrap();
        let second = Generator::new(&node).generate().unwrap();
        assert_eq!(first.value_range_content, second.value_range_content);
        assert_eq!(first.indices, second.indices);
    }

    #[test]
    fn test_generate_through_trait_object() {
        let node = sample_node();
        let dynamic: &dyn NodeAccess = &node;
        let generated = Generator::new(dynamic).generate().unwrap();
        assert_eq!(generated.value_ranges.len(), 1);
    }

    #[test]
    fn test_generate_error_propagates() {
        let node = Node::new("Bad", 1).with_entry(0x00A0, Entry::new("UNS8[0-1]"));
        let err = Generator::new(&node).generate().unwrap_err();
        assert!(matches!(err, CodegenError::ContractViolation { .. }));
    }
}
