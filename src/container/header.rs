use super::ReferenceSequenceContext;

/// A container header.
///
/// The container length field is written separately by the serializer, after
/// the block payloads are known.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Header {
    pub reference_sequence_context: ReferenceSequenceContext,
    pub record_count: usize,
    pub record_counter: u64,
    pub base_count: u64,
    pub block_count: usize,
    pub landmarks: Vec<usize>,
}
