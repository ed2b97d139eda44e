//! Compression records: the internal representation of a read inside the
//! write pipeline.

pub(crate) mod feature;
pub(crate) mod flags;
pub(crate) mod mate_flags;

pub(crate) use self::{feature::Feature, flags::Flags, mate_flags::MateFlags};

use bstr::BString;

use crate::{
    alignment::{data::Value, record::Flags as BamFlags},
    position::Position,
};

/// A record in the form the slice and container builders consume.
///
/// Created by the record converter, linked by the mate resolver, and read by
/// the compression-header factory and the slice serializer.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Record {
    pub bam_flags: BamFlags,
    pub cram_flags: Flags,
    pub reference_sequence_id: Option<usize>,
    pub read_length: usize,
    pub alignment_start: Option<Position>,
    pub read_group_id: Option<usize>,
    pub name: Option<BString>,
    pub mate_flags: MateFlags,
    pub mate_reference_sequence_id: Option<usize>,
    pub mate_alignment_start: Option<Position>,
    pub template_length: i32,
    pub mate_distance: Option<usize>,
    pub data: Vec<([u8; 2], Value)>,
    pub features: Vec<Feature>,
    pub mapping_quality: Option<u8>,
    pub sequence: Vec<u8>,
    pub quality_scores: Vec<u8>,
    /// Index into the container's tag dictionary, stamped by the
    /// compression-header factory.
    pub tag_set_id: usize,
    /// Slice-local index of the next segment of the template.
    pub next_segment_index: Option<usize>,
    /// Slice-local index of the previous segment of the template.
    pub previous_segment_index: Option<usize>,
}

impl Record {
    /// Returns the number of reference bases the record covers.
    pub fn alignment_span(&self) -> usize {
        let mut span = self.read_length;

        for feature in &self.features {
            match feature {
                Feature::Insertion { bases, .. } => span -= bases.len(),
                Feature::InsertBase { .. } => span -= 1,
                Feature::SoftClip { bases, .. } => span -= bases.len(),
                Feature::Deletion { len, .. } => span += len,
                Feature::ReferenceSkip { len, .. } => span += len,
                _ => {}
            }
        }

        span
    }

    /// Returns the 1-based inclusive alignment end.
    pub fn alignment_end(&self) -> Option<Position> {
        self.alignment_start.and_then(|start| {
            let span = self.alignment_span();
            start.checked_add(span).and_then(|end| {
                // end = start + span - 1
                Position::new(usize::from(end) - 1)
            })
        })
    }
}
