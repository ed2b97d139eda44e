//! Aligned record and flags.

use bstr::BString;

use super::{cigar::Cigar, data::Value};
use crate::position::Position;

bitflags::bitflags! {
    /// SAM record flags.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub struct Flags: u16 {
        /// The read is segmented (paired).
        const SEGMENTED = 0x01;
        /// Each segment is properly aligned.
        const PROPERLY_SEGMENTED = 0x02;
        /// The read is unmapped.
        const UNMAPPED = 0x04;
        /// The mate is unmapped.
        const MATE_UNMAPPED = 0x08;
        /// The read is reverse complemented.
        const REVERSE_COMPLEMENTED = 0x10;
        /// The mate is reverse complemented.
        const MATE_REVERSE_COMPLEMENTED = 0x20;
        /// This is the first segment in the template.
        const FIRST_SEGMENT = 0x40;
        /// This is the last segment in the template.
        const LAST_SEGMENT = 0x80;
        /// This is a secondary alignment.
        const SECONDARY = 0x0100;
        /// The read failed quality checks.
        const QC_FAIL = 0x0200;
        /// The read is a PCR or optical duplicate.
        const DUPLICATE = 0x0400;
        /// This is a supplementary alignment.
        const SUPPLEMENTARY = 0x0800;
    }
}

impl Flags {
    /// Returns whether the read is segmented.
    pub fn is_segmented(self) -> bool {
        self.contains(Self::SEGMENTED)
    }

    /// Returns whether the read is unmapped.
    pub fn is_unmapped(self) -> bool {
        self.contains(Self::UNMAPPED)
    }

    /// Returns whether the mate is unmapped.
    pub fn is_mate_unmapped(self) -> bool {
        self.contains(Self::MATE_UNMAPPED)
    }

    /// Returns whether the read is reverse complemented.
    pub fn is_reverse_complemented(self) -> bool {
        self.contains(Self::REVERSE_COMPLEMENTED)
    }

    /// Returns whether the mate is reverse complemented.
    pub fn is_mate_reverse_complemented(self) -> bool {
        self.contains(Self::MATE_REVERSE_COMPLEMENTED)
    }

    /// Returns whether this is a secondary alignment.
    pub fn is_secondary(self) -> bool {
        self.contains(Self::SECONDARY)
    }

    /// Returns whether this is a supplementary alignment.
    pub fn is_supplementary(self) -> bool {
        self.contains(Self::SUPPLEMENTARY)
    }
}

/// An aligned sequencing read pushed into the write session.
///
/// Field semantics follow the SAM model: reference sequence IDs index into
/// the session's sequence dictionary, and alignment starts are 1-based.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    /// The read name.
    pub name: Option<BString>,
    /// The SAM flags.
    pub flags: Flags,
    /// The reference sequence ID.
    pub reference_sequence_id: Option<usize>,
    /// The 1-based alignment start.
    pub alignment_start: Option<Position>,
    /// The mapping quality.
    pub mapping_quality: Option<u8>,
    /// The CIGAR.
    pub cigar: Cigar,
    /// The mate reference sequence ID.
    pub mate_reference_sequence_id: Option<usize>,
    /// The 1-based mate alignment start.
    pub mate_alignment_start: Option<Position>,
    /// The template length.
    pub template_length: i32,
    /// The read bases.
    pub sequence: Vec<u8>,
    /// The per-base quality scores.
    pub quality_scores: Vec<u8>,
    /// The read group ordinal.
    pub read_group_id: Option<usize>,
    /// The tag fields.
    pub data: Vec<([u8; 2], Value)>,
}
