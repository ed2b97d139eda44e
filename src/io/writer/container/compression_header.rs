//! The compression-header factory and serializer.

mod data_series_encodings;
mod encoding;
mod preservation_map;
mod tag_encodings;

use std::io::{self, Write};

use self::{
    data_series_encodings::write_data_series_encodings,
    preservation_map::{build_preservation_map, write_preservation_map},
    tag_encodings::{build_tag_encodings, write_tag_encodings},
};
use crate::{
    WriteError,
    container::{
        CompressionHeader, ReferenceSequenceContext,
        compression_header::DataSeriesEncodings,
    },
    io::writer::Options,
    record::Record,
};

/// Builds the compression header for one container.
///
/// All per-container state (substitution histogram, tag dictionary, tag
/// statistics) is computed afresh from the given records, so successive
/// containers do not leak encoding choices into each other. Substitution
/// codes and tag set IDs are stamped into the records as a side effect.
pub(super) fn build_compression_header(
    options: &Options,
    reference_sequence_context: ReferenceSequenceContext,
    slices: &mut [(ReferenceSequenceContext, Vec<Record>)],
) -> Result<CompressionHeader, WriteError> {
    let preservation_map =
        build_preservation_map(options, reference_sequence_context, slices);

    let data_series_encodings = options
        .data_series_encodings
        .clone()
        .unwrap_or_else(DataSeriesEncodings::init);

    let tag_encodings = build_tag_encodings(slices)?;

    Ok(CompressionHeader {
        preservation_map,
        data_series_encodings,
        tag_encodings,
    })
}

pub(super) fn write_compression_header<W>(
    writer: &mut W,
    compression_header: &CompressionHeader,
) -> io::Result<()>
where
    W: Write,
{
    write_preservation_map(writer, &compression_header.preservation_map)?;
    write_data_series_encodings(writer, &compression_header.data_series_encodings)?;
    write_tag_encodings(writer, &compression_header.tag_encodings)?;
    Ok(())
}
