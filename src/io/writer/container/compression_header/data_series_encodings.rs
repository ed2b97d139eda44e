use std::io::{self, Write};

use super::encoding::{write_byte_array_encoding, write_byte_encoding, write_integer_encoding};
use crate::{
    container::compression_header::{
        DataSeriesEncodings, Encoding,
        data_series_encodings::DataSeries,
        encoding::codec::{Byte, ByteArray, Integer},
    },
    io::writer::{collections::write_array, num::write_itf8},
};

pub(super) fn write_data_series_encodings<W>(
    writer: &mut W,
    data_series_encodings: &DataSeriesEncodings,
) -> io::Result<()>
where
    W: Write,
{
    let mut buf = Vec::new();
    encode(&mut buf, data_series_encodings)?;
    write_array(writer, &buf)
}

fn encode<W>(writer: &mut W, encodings: &DataSeriesEncodings) -> io::Result<()>
where
    W: Write,
{
    let len = data_series_encodings_len(encodings);
    let n = i32::try_from(len).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    write_itf8(writer, n)?;

    write_encodings(writer, encodings)?;

    Ok(())
}

fn data_series_encodings_len(encodings: &DataSeriesEncodings) -> usize {
    fn count(n: &mut usize, is_some: bool) {
        if is_some {
            *n += 1;
        }
    }

    let mut n = 0;

    count(&mut n, encodings.bam_flags.is_some());
    count(&mut n, encodings.cram_flags.is_some());
    count(&mut n, encodings.reference_sequence_ids.is_some());
    count(&mut n, encodings.read_lengths.is_some());
    count(&mut n, encodings.alignment_starts.is_some());
    count(&mut n, encodings.read_group_ids.is_some());
    count(&mut n, encodings.names.is_some());
    count(&mut n, encodings.mate_flags.is_some());
    count(&mut n, encodings.mate_reference_sequence_ids.is_some());
    count(&mut n, encodings.mate_alignment_starts.is_some());
    count(&mut n, encodings.template_lengths.is_some());
    count(&mut n, encodings.mate_distances.is_some());
    count(&mut n, encodings.tag_set_ids.is_some());
    count(&mut n, encodings.feature_counts.is_some());
    count(&mut n, encodings.feature_codes.is_some());
    count(&mut n, encodings.feature_position_deltas.is_some());
    count(&mut n, encodings.deletion_lengths.is_some());
    count(&mut n, encodings.base_substitution_codes.is_some());
    count(&mut n, encodings.insertion_bases.is_some());
    count(&mut n, encodings.reference_skip_lengths.is_some());
    count(&mut n, encodings.padding_lengths.is_some());
    count(&mut n, encodings.hard_clip_lengths.is_some());
    count(&mut n, encodings.soft_clip_bases.is_some());
    count(&mut n, encodings.mapping_qualities.is_some());
    count(&mut n, encodings.bases.is_some());
    count(&mut n, encodings.quality_scores.is_some());

    n
}

fn write_key<W>(writer: &mut W, key: DataSeries) -> io::Result<()>
where
    W: Write,
{
    let data = <[u8; 2]>::from(key);
    writer.write_all(&data)
}

#[rustfmt::skip]
fn write_encodings<W>(writer: &mut W, encodings: &DataSeriesEncodings) -> io::Result<()>
where
    W: Write,
{
    maybe_write_integer(writer, DataSeries::BamFlags, encodings.bam_flags.as_ref())?;
    maybe_write_integer(writer, DataSeries::CramFlags, encodings.cram_flags.as_ref())?;
    maybe_write_integer(writer, DataSeries::ReferenceSequenceIds, encodings.reference_sequence_ids.as_ref())?;
    maybe_write_integer(writer, DataSeries::ReadLengths, encodings.read_lengths.as_ref())?;
    maybe_write_integer(writer, DataSeries::AlignmentStarts, encodings.alignment_starts.as_ref())?;
    maybe_write_integer(writer, DataSeries::ReadGroupIds, encodings.read_group_ids.as_ref())?;
    maybe_write_byte_array(writer, DataSeries::Names, encodings.names.as_ref())?;
    maybe_write_integer(writer, DataSeries::MateFlags, encodings.mate_flags.as_ref())?;
    maybe_write_integer(writer, DataSeries::MateReferenceSequenceIds, encodings.mate_reference_sequence_ids.as_ref())?;
    maybe_write_integer(writer, DataSeries::MateAlignmentStarts, encodings.mate_alignment_starts.as_ref())?;
    maybe_write_integer(writer, DataSeries::TemplateLengths, encodings.template_lengths.as_ref())?;
    maybe_write_integer(writer, DataSeries::MateDistances, encodings.mate_distances.as_ref())?;
    maybe_write_integer(writer, DataSeries::TagSetIds, encodings.tag_set_ids.as_ref())?;
    maybe_write_integer(writer, DataSeries::FeatureCounts, encodings.feature_counts.as_ref())?;
    maybe_write_byte(writer, DataSeries::FeatureCodes, encodings.feature_codes.as_ref())?;
    maybe_write_integer(writer, DataSeries::FeaturePositionDeltas, encodings.feature_position_deltas.as_ref())?;
    maybe_write_integer(writer, DataSeries::DeletionLengths, encodings.deletion_lengths.as_ref())?;
    maybe_write_byte(writer, DataSeries::BaseSubstitutionCodes, encodings.base_substitution_codes.as_ref())?;
    maybe_write_byte_array(writer, DataSeries::InsertionBases, encodings.insertion_bases.as_ref())?;
    maybe_write_integer(writer, DataSeries::ReferenceSkipLengths, encodings.reference_skip_lengths.as_ref())?;
    maybe_write_integer(writer, DataSeries::PaddingLengths, encodings.padding_lengths.as_ref())?;
    maybe_write_integer(writer, DataSeries::HardClipLengths, encodings.hard_clip_lengths.as_ref())?;
    maybe_write_byte_array(writer, DataSeries::SoftClipBases, encodings.soft_clip_bases.as_ref())?;
    maybe_write_integer(writer, DataSeries::MappingQualities, encodings.mapping_qualities.as_ref())?;
    maybe_write_byte(writer, DataSeries::Bases, encodings.bases.as_ref())?;
    maybe_write_byte(writer, DataSeries::QualityScores, encodings.quality_scores.as_ref())?;

    Ok(())
}

fn maybe_write_byte<W>(
    writer: &mut W,
    key: DataSeries,
    encoding: Option<&Encoding<Byte>>,
) -> io::Result<()>
where
    W: Write,
{
    if let Some(encoding) = encoding {
        write_key(writer, key)?;
        write_byte_encoding(writer, encoding)?;
    }

    Ok(())
}

fn maybe_write_integer<W>(
    writer: &mut W,
    key: DataSeries,
    encoding: Option<&Encoding<Integer>>,
) -> io::Result<()>
where
    W: Write,
{
    if let Some(encoding) = encoding {
        write_key(writer, key)?;
        write_integer_encoding(writer, encoding)?;
    }

    Ok(())
}

fn maybe_write_byte_array<W>(
    writer: &mut W,
    key: DataSeries,
    encoding: Option<&Encoding<ByteArray>>,
) -> io::Result<()>
where
    W: Write,
{
    if let Some(encoding) = encoding {
        write_key(writer, key)?;
        write_byte_array_encoding(writer, encoding)?;
    }

    Ok(())
}
