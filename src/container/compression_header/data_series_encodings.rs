//! Data series encodings.

pub mod data_series;

pub use self::data_series::DataSeries;

use std::collections::HashSet;

use super::encoding::{
    Encoding,
    codec::{Byte, ByteArray, Integer},
};
use crate::container::block::{self, ContentId};

fn external_byte(series: DataSeries) -> Option<Encoding<Byte>> {
    Some(Encoding::new(Byte::External {
        block_content_id: block::ContentId::from(series),
    }))
}

fn external_integer(series: DataSeries) -> Option<Encoding<Integer>> {
    Some(Encoding::new(Integer::External {
        block_content_id: block::ContentId::from(series),
    }))
}

fn stop_byte_array(series: DataSeries) -> Option<Encoding<ByteArray>> {
    Some(Encoding::new(ByteArray::ByteArrayStop {
        stop_byte: 0x00,
        block_content_id: block::ContentId::from(series),
    }))
}

/// The encodings of the fixed data series.
///
/// A field left as `None` means the series is not declared in the
/// compression header, which is only legal when no record in the container
/// stores a value in that series.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DataSeriesEncodings {
    /// BF: BAM bit flags.
    pub bam_flags: Option<Encoding<Integer>>,
    /// CF: CRAM bit flags.
    pub cram_flags: Option<Encoding<Integer>>,
    /// RI: reference sequence IDs (multi-reference slices only).
    pub reference_sequence_ids: Option<Encoding<Integer>>,
    /// RL: read lengths.
    pub read_lengths: Option<Encoding<Integer>>,
    /// AP: alignment starts, absolute or as deltas.
    pub alignment_starts: Option<Encoding<Integer>>,
    /// RG: read group ordinals.
    pub read_group_ids: Option<Encoding<Integer>>,
    /// RN: read names.
    pub names: Option<Encoding<ByteArray>>,
    /// MF: mate flags.
    pub mate_flags: Option<Encoding<Integer>>,
    /// NS: mate reference sequence IDs.
    pub mate_reference_sequence_ids: Option<Encoding<Integer>>,
    /// NP: mate alignment starts.
    pub mate_alignment_starts: Option<Encoding<Integer>>,
    /// TS: template lengths.
    pub template_lengths: Option<Encoding<Integer>>,
    /// NF: distances to the next fragment.
    pub mate_distances: Option<Encoding<Integer>>,
    /// TL: tag set IDs.
    pub tag_set_ids: Option<Encoding<Integer>>,
    /// FN: read feature counts.
    pub feature_counts: Option<Encoding<Integer>>,
    /// FC: read feature codes.
    pub feature_codes: Option<Encoding<Byte>>,
    /// FP: in-read position deltas.
    pub feature_position_deltas: Option<Encoding<Integer>>,
    /// DL: deletion lengths.
    pub deletion_lengths: Option<Encoding<Integer>>,
    /// BS: base substitution codes.
    pub base_substitution_codes: Option<Encoding<Byte>>,
    /// IN: insertion bases.
    pub insertion_bases: Option<Encoding<ByteArray>>,
    /// RS: reference skip lengths.
    pub reference_skip_lengths: Option<Encoding<Integer>>,
    /// PD: padding lengths.
    pub padding_lengths: Option<Encoding<Integer>>,
    /// HC: hard clip lengths.
    pub hard_clip_lengths: Option<Encoding<Integer>>,
    /// SC: soft clip bases.
    pub soft_clip_bases: Option<Encoding<ByteArray>>,
    /// MQ: mapping qualities.
    pub mapping_qualities: Option<Encoding<Integer>>,
    /// BA: bases.
    pub bases: Option<Encoding<Byte>>,
    /// QS: quality scores.
    pub quality_scores: Option<Encoding<Byte>>,
}

impl DataSeriesEncodings {
    /// Creates the default encodings: each series stored in its own external
    /// block, with read names, insertion bases, and soft clip bases as
    /// NUL-terminated byte arrays.
    pub fn init() -> Self {
        Self {
            bam_flags: external_integer(DataSeries::BamFlags),
            cram_flags: external_integer(DataSeries::CramFlags),
            reference_sequence_ids: external_integer(DataSeries::ReferenceSequenceIds),
            read_lengths: external_integer(DataSeries::ReadLengths),
            alignment_starts: external_integer(DataSeries::AlignmentStarts),
            read_group_ids: external_integer(DataSeries::ReadGroupIds),
            names: stop_byte_array(DataSeries::Names),
            mate_flags: external_integer(DataSeries::MateFlags),
            mate_reference_sequence_ids: external_integer(DataSeries::MateReferenceSequenceIds),
            mate_alignment_starts: external_integer(DataSeries::MateAlignmentStarts),
            template_lengths: external_integer(DataSeries::TemplateLengths),
            mate_distances: external_integer(DataSeries::MateDistances),
            tag_set_ids: external_integer(DataSeries::TagSetIds),
            feature_counts: external_integer(DataSeries::FeatureCounts),
            feature_codes: external_byte(DataSeries::FeatureCodes),
            feature_position_deltas: external_integer(DataSeries::FeaturePositionDeltas),
            deletion_lengths: external_integer(DataSeries::DeletionLengths),
            base_substitution_codes: external_byte(DataSeries::BaseSubstitutionCodes),
            insertion_bases: stop_byte_array(DataSeries::InsertionBases),
            reference_skip_lengths: external_integer(DataSeries::ReferenceSkipLengths),
            padding_lengths: external_integer(DataSeries::PaddingLengths),
            hard_clip_lengths: external_integer(DataSeries::HardClipLengths),
            soft_clip_bases: stop_byte_array(DataSeries::SoftClipBases),
            mapping_qualities: external_integer(DataSeries::MappingQualities),
            bases: external_byte(DataSeries::Bases),
            quality_scores: external_byte(DataSeries::QualityScores),
        }
    }

    /// Drops encodings whose target blocks carry no data, so the compression
    /// header only declares series that actually appear in the container.
    pub(crate) fn retain_used_content_ids(&mut self, used_content_ids: &HashSet<ContentId>) {
        fn prune_byte(encoding: &mut Option<Encoding<Byte>>, used: &HashSet<ContentId>) {
            if let Some(e) = encoding {
                let Byte::External { block_content_id } = e.get();
                if !used.contains(block_content_id) {
                    *encoding = None;
                }
            }
        }

        fn prune_integer(encoding: &mut Option<Encoding<Integer>>, used: &HashSet<ContentId>) {
            if let Some(e) = encoding
                && let Integer::External { block_content_id } = e.get()
                && !used.contains(block_content_id)
            {
                *encoding = None;
            }
        }

        fn prune_byte_array(encoding: &mut Option<Encoding<ByteArray>>, used: &HashSet<ContentId>) {
            if let Some(e) = encoding {
                let block_content_id = match e.get() {
                    ByteArray::ByteArrayLength { value_encoding, .. } => {
                        let Byte::External { block_content_id } = value_encoding.get();
                        *block_content_id
                    }
                    ByteArray::ByteArrayStop {
                        block_content_id, ..
                    } => *block_content_id,
                };

                if !used.contains(&block_content_id) {
                    *encoding = None;
                }
            }
        }

        prune_integer(&mut self.bam_flags, used_content_ids);
        prune_integer(&mut self.cram_flags, used_content_ids);
        prune_integer(&mut self.reference_sequence_ids, used_content_ids);
        prune_integer(&mut self.read_lengths, used_content_ids);
        prune_integer(&mut self.alignment_starts, used_content_ids);
        prune_integer(&mut self.read_group_ids, used_content_ids);
        prune_byte_array(&mut self.names, used_content_ids);
        prune_integer(&mut self.mate_flags, used_content_ids);
        prune_integer(&mut self.mate_reference_sequence_ids, used_content_ids);
        prune_integer(&mut self.mate_alignment_starts, used_content_ids);
        prune_integer(&mut self.template_lengths, used_content_ids);
        prune_integer(&mut self.mate_distances, used_content_ids);
        prune_integer(&mut self.tag_set_ids, used_content_ids);
        prune_integer(&mut self.feature_counts, used_content_ids);
        prune_byte(&mut self.feature_codes, used_content_ids);
        prune_integer(&mut self.feature_position_deltas, used_content_ids);
        prune_integer(&mut self.deletion_lengths, used_content_ids);
        prune_byte(&mut self.base_substitution_codes, used_content_ids);
        prune_byte_array(&mut self.insertion_bases, used_content_ids);
        prune_integer(&mut self.reference_skip_lengths, used_content_ids);
        prune_integer(&mut self.padding_lengths, used_content_ids);
        prune_integer(&mut self.hard_clip_lengths, used_content_ids);
        prune_byte_array(&mut self.soft_clip_bases, used_content_ids);
        prune_integer(&mut self.mapping_qualities, used_content_ids);
        prune_byte(&mut self.bases, used_content_ids);
        prune_byte(&mut self.quality_scores, used_content_ids);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init() {
        let encodings = DataSeriesEncodings::init();

        assert_eq!(
            encodings.bam_flags,
            Some(Encoding::new(Integer::External {
                block_content_id: 1
            }))
        );

        assert_eq!(
            encodings.names,
            Some(Encoding::new(ByteArray::ByteArrayStop {
                stop_byte: 0x00,
                block_content_id: 7
            }))
        );

        assert_eq!(
            encodings.quality_scores,
            Some(Encoding::new(Byte::External {
                block_content_id: 28
            }))
        );
    }

    #[test]
    fn test_retain_used_content_ids() {
        let mut encodings = DataSeriesEncodings::init();

        let used: HashSet<ContentId> = [
            ContentId::from(DataSeries::BamFlags),
            ContentId::from(DataSeries::CramFlags),
            ContentId::from(DataSeries::ReadLengths),
        ]
        .into_iter()
        .collect();

        encodings.retain_used_content_ids(&used);

        assert!(encodings.bam_flags.is_some());
        assert!(encodings.cram_flags.is_some());
        assert!(encodings.read_lengths.is_some());
        assert!(encodings.names.is_none());
        assert!(encodings.mapping_qualities.is_none());
        assert!(encodings.quality_scores.is_none());
    }
}
