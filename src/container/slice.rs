//! Slices and their builder.

pub(crate) mod builder;
pub(crate) mod mates;

pub(crate) use self::builder::Builder;

use super::{ReferenceSequenceContext, block::ContentId};

/// A slice header.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Header {
    pub reference_sequence_context: ReferenceSequenceContext,
    pub record_count: usize,
    pub record_counter: u64,
    /// Content IDs of the slice's blocks: the core block (0) followed by the
    /// external blocks.
    pub block_content_ids: Vec<ContentId>,
    /// MD5 of the covered reference fragment; all zero for multi-reference
    /// and unmapped slices.
    pub reference_md5: [u8; 16],
}
