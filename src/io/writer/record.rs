//! Conversion of aligned records into compression records.

pub(crate) mod tag;

use super::options::Options;
use crate::{
    WriteError, alignment,
    alignment::cigar::{Cigar, Kind},
    container::compression_header::preservation_map::substitution_matrix::Base,
    position::Position,
    record::{Feature, Flags, MateFlags, Record},
    reference::{ReferenceRegion, ReferenceSource, SequenceDictionary},
};

/// Converts one aligned record into a compression record.
///
/// Flags are translated, bases are normalized to uppercase, tags are
/// filtered by the capture policy and sorted by tag ID, and read features
/// are derived from the CIGAR against the cached reference region.
///
/// The reference is only fetched for mapped records; an unavailable
/// reference is therefore fatal exactly when the record is mapped.
pub(crate) fn convert(
    record: &alignment::Record,
    options: &Options,
    dictionary: &SequenceDictionary,
    source: &mut dyn ReferenceSource,
    region: &mut ReferenceRegion,
) -> Result<Record, WriteError> {
    for id in [
        record.reference_sequence_id,
        record.mate_reference_sequence_id,
    ]
    .into_iter()
    .flatten()
    {
        if dictionary.get(id).is_none() {
            return Err(WriteError::UnknownContig {
                reference_sequence_id: id,
            });
        }
    }

    let sequence: Vec<u8> = record
        .sequence
        .iter()
        .map(|b| b.to_ascii_uppercase())
        .collect();

    let quality_scores = if record.quality_scores.is_empty() {
        vec![0xff; sequence.len()]
    } else if record.quality_scores.len() == sequence.len() {
        record.quality_scores.clone()
    } else {
        return Err(WriteError::InvalidArgument(format!(
            "sequence and quality score length mismatch: {} != {}",
            sequence.len(),
            record.quality_scores.len()
        )));
    };

    let features = if record.flags.is_unmapped() {
        Vec::new()
    } else {
        let (Some(reference_sequence_id), Some(alignment_start)) =
            (record.reference_sequence_id, record.alignment_start)
        else {
            return Err(WriteError::InvalidArgument(
                "mapped record is missing a reference sequence ID or alignment start".into(),
            ));
        };

        if record.cigar.read_length() != sequence.len() {
            return Err(WriteError::InvalidArgument(format!(
                "CIGAR read length ({}) does not match sequence length ({})",
                record.cigar.read_length(),
                sequence.len()
            )));
        }

        region.fetch(source, dictionary, reference_sequence_id)?;

        cigar_to_features(
            &record.cigar,
            &sequence,
            &quality_scores,
            region,
            alignment_start,
        )
    };

    let mut mate_flags = MateFlags::default();

    if record.flags.is_mate_reverse_complemented() {
        mate_flags.insert(MateFlags::ON_NEGATIVE_STRAND);
    }

    if record.flags.is_mate_unmapped() {
        mate_flags.insert(MateFlags::UNMAPPED);
    }

    let mut data: Vec<_> = record
        .data
        .iter()
        .filter(|(tag, _)| is_tag_captured(options, *tag))
        .cloned()
        .collect();

    data.sort_by_key(|(tag, value)| (tag[0], tag[1], value.ty()));

    Ok(Record {
        bam_flags: record.flags,
        cram_flags: Flags::QUALITY_SCORES_ARE_STORED_AS_ARRAY,
        reference_sequence_id: record.reference_sequence_id,
        read_length: sequence.len(),
        alignment_start: record.alignment_start,
        read_group_id: record.read_group_id,
        name: record.name.clone(),
        mate_flags,
        mate_reference_sequence_id: record.mate_reference_sequence_id,
        mate_alignment_start: record.mate_alignment_start,
        template_length: record.template_length,
        data,
        features,
        mapping_quality: record.mapping_quality,
        sequence,
        quality_scores,
        ..Default::default()
    })
}

/// The read group tag, always stored out of band as an ordinal.
const READ_GROUP_TAG: [u8; 2] = [b'R', b'G'];

fn is_tag_captured(options: &Options, tag: [u8; 2]) -> bool {
    if tag == READ_GROUP_TAG {
        return false;
    }

    if options.capture_all_tags {
        !options.ignore_tags.contains(&tag)
    } else {
        options.capture_tags.contains(&tag)
    }
}

/// Walks the CIGAR against the reference region, reducing the read to a list
/// of differences.
///
/// Reference positions past the end of the cached region compare as `N`.
fn cigar_to_features(
    cigar: &Cigar,
    sequence: &[u8],
    quality_scores: &[u8],
    region: &ReferenceRegion,
    alignment_start: Position,
) -> Vec<Feature> {
    let mut features = Vec::new();

    // 0-based position in the read and 0-based offset from the alignment
    // start on the reference.
    let mut read_pos = 0;
    let mut ref_offset = 0;

    let reference_start = usize::from(alignment_start) - 1;

    for op in cigar.iter() {
        match op.kind() {
            Kind::Match | Kind::SequenceMatch | Kind::SequenceMismatch => {
                for i in 0..op.len() {
                    let read_base = sequence[read_pos + i];
                    let reference_base = region
                        .base(reference_start + ref_offset + i)
                        .to_ascii_uppercase();

                    if read_base == reference_base {
                        continue;
                    }

                    let position = Position::new(read_pos + i + 1)
                        .expect("read positions are 1-based and nonzero");

                    match (
                        Base::try_from(reference_base),
                        Base::try_from(read_base),
                    ) {
                        (Ok(reference_base), Ok(read_base)) => {
                            features.push(Feature::Substitution {
                                position,
                                reference_base,
                                read_base,
                                code: None,
                            });
                        }
                        _ => features.push(Feature::ReadBase {
                            position,
                            base: read_base,
                            quality_score: quality_scores[read_pos + i],
                        }),
                    }
                }
            }
            Kind::Insertion => {
                for i in 0..op.len() {
                    let position = Position::new(read_pos + i + 1)
                        .expect("read positions are 1-based and nonzero");

                    features.push(Feature::InsertBase {
                        position,
                        base: sequence[read_pos + i],
                    });
                }
            }
            Kind::SoftClip => {
                let position =
                    Position::new(read_pos + 1).expect("read positions are 1-based and nonzero");

                features.push(Feature::SoftClip {
                    position,
                    bases: sequence[read_pos..read_pos + op.len()].to_vec(),
                });
            }
            Kind::Deletion => features.push(Feature::Deletion {
                position: Position::new(read_pos + 1)
                    .expect("read positions are 1-based and nonzero"),
                len: op.len(),
            }),
            Kind::Skip => features.push(Feature::ReferenceSkip {
                position: Position::new(read_pos + 1)
                    .expect("read positions are 1-based and nonzero"),
                len: op.len(),
            }),
            Kind::Pad => features.push(Feature::Padding {
                position: Position::new(read_pos + 1)
                    .expect("read positions are 1-based and nonzero"),
                len: op.len(),
            }),
            Kind::HardClip => features.push(Feature::HardClip {
                position: Position::new(read_pos + 1)
                    .expect("read positions are 1-based and nonzero"),
                len: op.len(),
            }),
        }

        if op.kind().consumes_read() {
            read_pos += op.len();
        }

        if op.kind().consumes_reference() {
            ref_offset += op.len();
        }
    }

    features
}
