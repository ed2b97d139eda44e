//! Fixed data series.

use crate::container::block::ContentId;

/// A fixed data series.
///
/// Each series is stored in the external block whose content ID equals the
/// series number below. The BB and QQ series (18 and 19) are defined by the
/// format but unused by this writer: base and quality stretches are never
/// produced, so their numbers are skipped.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DataSeries {
    /// BF: BAM bit flags.
    BamFlags,
    /// CF: CRAM bit flags.
    CramFlags,
    /// RI: reference sequence IDs.
    ReferenceSequenceIds,
    /// RL: read lengths.
    ReadLengths,
    /// AP: alignment starts.
    AlignmentStarts,
    /// RG: read group ordinals.
    ReadGroupIds,
    /// RN: read names.
    Names,
    /// MF: mate flags.
    MateFlags,
    /// NS: mate reference sequence IDs.
    MateReferenceSequenceIds,
    /// NP: mate alignment starts.
    MateAlignmentStarts,
    /// TS: template lengths.
    TemplateLengths,
    /// NF: distances to the next fragment.
    MateDistances,
    /// TL: tag set IDs.
    TagSetIds,
    /// FN: read feature counts.
    FeatureCounts,
    /// FC: read feature codes.
    FeatureCodes,
    /// FP: in-read position deltas.
    FeaturePositionDeltas,
    /// DL: deletion lengths.
    DeletionLengths,
    /// BS: base substitution codes.
    BaseSubstitutionCodes,
    /// IN: insertion bases.
    InsertionBases,
    /// RS: reference skip lengths.
    ReferenceSkipLengths,
    /// PD: padding lengths.
    PaddingLengths,
    /// HC: hard clip lengths.
    HardClipLengths,
    /// SC: soft clip bases.
    SoftClipBases,
    /// MQ: mapping qualities.
    MappingQualities,
    /// BA: bases.
    Bases,
    /// QS: quality scores.
    QualityScores,
}

/// All data series this writer can produce, in content ID order.
pub(crate) const STANDARD_DATA_SERIES: [DataSeries; 26] = [
    DataSeries::BamFlags,
    DataSeries::CramFlags,
    DataSeries::ReferenceSequenceIds,
    DataSeries::ReadLengths,
    DataSeries::AlignmentStarts,
    DataSeries::ReadGroupIds,
    DataSeries::Names,
    DataSeries::MateFlags,
    DataSeries::MateReferenceSequenceIds,
    DataSeries::MateAlignmentStarts,
    DataSeries::TemplateLengths,
    DataSeries::MateDistances,
    DataSeries::TagSetIds,
    DataSeries::FeatureCounts,
    DataSeries::FeatureCodes,
    DataSeries::FeaturePositionDeltas,
    DataSeries::DeletionLengths,
    DataSeries::BaseSubstitutionCodes,
    DataSeries::InsertionBases,
    DataSeries::ReferenceSkipLengths,
    DataSeries::PaddingLengths,
    DataSeries::HardClipLengths,
    DataSeries::SoftClipBases,
    DataSeries::MappingQualities,
    DataSeries::Bases,
    DataSeries::QualityScores,
];

impl From<DataSeries> for [u8; 2] {
    fn from(data_series: DataSeries) -> Self {
        match data_series {
            DataSeries::BamFlags => [b'B', b'F'],
            DataSeries::CramFlags => [b'C', b'F'],
            DataSeries::ReferenceSequenceIds => [b'R', b'I'],
            DataSeries::ReadLengths => [b'R', b'L'],
            DataSeries::AlignmentStarts => [b'A', b'P'],
            DataSeries::ReadGroupIds => [b'R', b'G'],
            DataSeries::Names => [b'R', b'N'],
            DataSeries::MateFlags => [b'M', b'F'],
            DataSeries::MateReferenceSequenceIds => [b'N', b'S'],
            DataSeries::MateAlignmentStarts => [b'N', b'P'],
            DataSeries::TemplateLengths => [b'T', b'S'],
            DataSeries::MateDistances => [b'N', b'F'],
            DataSeries::TagSetIds => [b'T', b'L'],
            DataSeries::FeatureCounts => [b'F', b'N'],
            DataSeries::FeatureCodes => [b'F', b'C'],
            DataSeries::FeaturePositionDeltas => [b'F', b'P'],
            DataSeries::DeletionLengths => [b'D', b'L'],
            DataSeries::BaseSubstitutionCodes => [b'B', b'S'],
            DataSeries::InsertionBases => [b'I', b'N'],
            DataSeries::ReferenceSkipLengths => [b'R', b'S'],
            DataSeries::PaddingLengths => [b'P', b'D'],
            DataSeries::HardClipLengths => [b'H', b'C'],
            DataSeries::SoftClipBases => [b'S', b'C'],
            DataSeries::MappingQualities => [b'M', b'Q'],
            DataSeries::Bases => [b'B', b'A'],
            DataSeries::QualityScores => [b'Q', b'S'],
        }
    }
}

impl From<DataSeries> for ContentId {
    fn from(data_series: DataSeries) -> Self {
        match data_series {
            DataSeries::BamFlags => 1,
            DataSeries::CramFlags => 2,
            DataSeries::ReferenceSequenceIds => 3,
            DataSeries::ReadLengths => 4,
            DataSeries::AlignmentStarts => 5,
            DataSeries::ReadGroupIds => 6,
            DataSeries::Names => 7,
            DataSeries::MateFlags => 8,
            DataSeries::MateReferenceSequenceIds => 9,
            DataSeries::MateAlignmentStarts => 10,
            DataSeries::TemplateLengths => 11,
            DataSeries::MateDistances => 12,
            DataSeries::TagSetIds => 13,
            DataSeries::FeatureCounts => 14,
            DataSeries::FeatureCodes => 15,
            DataSeries::FeaturePositionDeltas => 16,
            DataSeries::DeletionLengths => 17,
            DataSeries::BaseSubstitutionCodes => 20,
            DataSeries::InsertionBases => 21,
            DataSeries::ReferenceSkipLengths => 22,
            DataSeries::PaddingLengths => 23,
            DataSeries::HardClipLengths => 24,
            DataSeries::SoftClipBases => 25,
            DataSeries::MappingQualities => 26,
            DataSeries::Bases => 27,
            DataSeries::QualityScores => 28,
        }
    }
}
