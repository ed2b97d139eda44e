pub(super) mod block;
mod compression_header;
mod header;
mod slice;

use std::{
    cmp,
    collections::HashSet,
    io::{self, Write},
};

use bstr::BString;

use self::{
    block::{Block, write_block},
    compression_header::{build_compression_header, write_compression_header},
    header::write_header,
    slice::build_slice,
};
use super::Options;
use crate::{
    WriteError,
    container::{self, Header, ReferenceSequenceContext, block::ContentType},
    file_definition::Version,
    record::Record,
    reference::{ReferenceRegion, ReferenceSource, SequenceDictionary},
};

/// Serializes one container: the compression header block followed by each
/// slice's header, core, and external blocks.
///
/// Returns the container header, whose record count advances the session's
/// global record counter.
pub(super) fn write_container<W>(
    writer: &mut W,
    options: &Options,
    source: &mut dyn ReferenceSource,
    dictionary: &SequenceDictionary,
    region: &mut ReferenceRegion,
    record_counter: u64,
    slice_builders: Vec<container::slice::Builder>,
) -> Result<Header, WriteError>
where
    W: Write,
{
    let version = options.version;

    let mut slices: Vec<(ReferenceSequenceContext, Vec<Record>)> = slice_builders
        .into_iter()
        .map(|builder| {
            (
                builder.reference_sequence_context(),
                builder.into_records(),
            )
        })
        .collect();

    if !options.preserve_read_names {
        synthesize_read_names(&mut slices, record_counter);
    }

    for (_, records) in &mut slices {
        container::slice::mates::resolve(
            records,
            options.sort_order == super::options::SortOrder::Coordinate,
        );
    }

    let reference_sequence_context = join_reference_sequence_contexts(&slices)?;

    let compression_header =
        build_compression_header(options, reference_sequence_context, &mut slices)?;

    let mut built_slices = Vec::with_capacity(slices.len());
    let mut slice_record_counter = record_counter;
    let mut record_count = 0;
    let mut base_count = 0;

    for (context, records) in &slices {
        let slice = build_slice(
            &compression_header,
            *context,
            records,
            slice_record_counter,
            source,
            dictionary,
            region,
        )?;

        slice_record_counter += records.len() as u64;
        record_count += records.len();
        base_count += records.iter().map(|r| r.read_length as u64).sum::<u64>();

        built_slices.push(slice);
    }

    // Declare only the data series that produced blocks.
    let used_content_ids: HashSet<_> = built_slices
        .iter()
        .flat_map(|s| s.external_data_blocks.iter().map(|b| b.content_id))
        .collect();

    let mut compression_header = compression_header;
    compression_header
        .data_series_encodings
        .retain_used_content_ids(&used_content_ids);

    let mut buf = Vec::new();
    write_compression_header(&mut buf, &compression_header)?;
    let compression_header_block = Block::raw(ContentType::CompressionHeader, 0, buf);

    let compression_header_size = compression_header_block.size(version)?;
    let mut container_size = compression_header_size;
    let mut blocks = vec![compression_header_block];
    let mut landmarks = Vec::with_capacity(built_slices.len());
    let mut slice_offset = compression_header_size;

    for slice in built_slices {
        let mut slice_header_buf = Vec::new();
        slice::write_header(&mut slice_header_buf, &slice.header)?;
        let slice_header_block = Block::raw(ContentType::SliceHeader, 0, slice_header_buf);

        landmarks.push(slice_offset);

        let mut slice_size = slice_header_block.size(version)?;
        blocks.push(slice_header_block);

        slice_size += slice.core_data_block.size(version)?;
        blocks.push(slice.core_data_block);

        for block in &slice.external_data_blocks {
            slice_size += block.size(version)?;
        }

        blocks.extend(slice.external_data_blocks);

        slice_offset += slice_size;
        container_size += slice_size;
    }

    let header = Header {
        reference_sequence_context,
        record_count,
        record_counter,
        base_count,
        block_count: blocks.len(),
        landmarks,
    };

    write_header(writer, &header, container_size, version)?;

    for block in &blocks {
        write_block(writer, block, version)?;
    }

    Ok(header)
}

/// Gives unnamed records a name derived from the container-local record
/// ordinal, offset by the global record counter so names stay unique across
/// containers.
fn synthesize_read_names(
    slices: &mut [(ReferenceSequenceContext, Vec<Record>)],
    record_counter: u64,
) {
    let mut ordinal = record_counter;

    for (_, records) in slices {
        for record in records {
            if record.name.is_none() {
                record.name = Some(BString::from(ordinal.to_string()));
            }

            ordinal += 1;
        }
    }
}

/// Folds the slices' contexts into the container's: all slices of a
/// container either share one reference sequence, or are all unmapped, or
/// the container holds exactly one multi-reference slice.
fn join_reference_sequence_contexts(
    slices: &[(ReferenceSequenceContext, Vec<Record>)],
) -> Result<ReferenceSequenceContext, WriteError> {
    let mut iter = slices.iter().map(|(context, _)| *context);

    let mut joined = iter.next().ok_or_else(|| {
        WriteError::InvalidArgument("cannot build a container with no slices".into())
    })?;

    for context in iter {
        joined = match (joined, context) {
            (ReferenceSequenceContext::Some(a), ReferenceSequenceContext::Some(b))
                if a.reference_sequence_id() == b.reference_sequence_id() =>
            {
                ReferenceSequenceContext::some(
                    a.reference_sequence_id(),
                    cmp::min(a.alignment_start(), b.alignment_start()),
                    cmp::max(a.alignment_end(), b.alignment_end()),
                )
            }
            (ReferenceSequenceContext::None, ReferenceSequenceContext::None) => {
                ReferenceSequenceContext::None
            }
            (a, b) => {
                return Err(WriteError::InvalidArgument(format!(
                    "invalid slice reference sequence context: expected {a:?}, got {b:?}"
                )));
            }
        };
    }

    Ok(joined)
}

/// The fixed end-of-file container for CRAM 3.x.
pub(super) static EOF_V3: [u8; 38] = [
    0x0f, 0x00, 0x00, 0x00, 0xff, 0xff, 0xff, 0xff, 0x0f, 0xe0, 0x45, 0x4f, 0x46, 0x00, 0x00, 0x00,
    0x00, 0x01, 0x00, 0x05, 0xbd, 0xd9, 0x4f, 0x00, 0x01, 0x00, 0x06, 0x06, 0x01, 0x00, 0x01, 0x00,
    0x01, 0x00, 0xee, 0x63, 0x01, 0x4b,
];

pub(super) fn write_eof_container<W>(writer: &mut W, version: Version) -> io::Result<()>
where
    W: Write,
{
    if version.has_crc32() {
        return writer.write_all(&EOF_V3);
    }

    // CRAM 2.x: the same distinguished empty container, without CRC32s.
    use super::num::{write_i32_le, write_itf8, write_ltf8};

    // An empty compression header block: each of the three component maps is
    // a one-byte array holding an empty map.
    let block_body: [u8; 11] = [
        0x00, // compression method = none
        0x01, // content type = compression header
        0x00, // content ID = 0
        0x06, // compressed size = 6
        0x06, // uncompressed size = 6
        0x01, 0x00, 0x01, 0x00, 0x01, 0x00, // empty component maps
    ];

    let mut header_body = Vec::new();
    write_i32_le(&mut header_body, block_body.len() as i32)?;
    write_itf8(&mut header_body, -1)?; // reference sequence ID = unmapped
    write_itf8(&mut header_body, 0x454f46)?; // alignment start = "EOF"
    write_itf8(&mut header_body, 0)?; // alignment span
    write_itf8(&mut header_body, 0)?; // record count
    write_ltf8(&mut header_body, 0)?; // record counter
    write_ltf8(&mut header_body, 0)?; // base count
    write_itf8(&mut header_body, 1)?; // block count
    write_itf8(&mut header_body, 0)?; // landmarks

    writer.write_all(&header_body)?;
    writer.write_all(&block_body)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_eof_container_v3() -> io::Result<()> {
        let mut buf = Vec::new();
        write_eof_container(&mut buf, Version::V3_0)?;
        assert_eq!(buf, EOF_V3);
        Ok(())
    }

    #[test]
    fn test_write_eof_container_v2() -> io::Result<()> {
        let mut buf = Vec::new();
        write_eof_container(&mut buf, Version::V2_1)?;

        let expected = [
            0x0b, 0x00, 0x00, 0x00, // length = 11
            0xff, 0xff, 0xff, 0xff, 0x0f, // reference sequence ID = -1
            0xe0, 0x45, 0x4f, 0x46, // alignment start = 0x454f46
            0x00, // alignment span
            0x00, // record count
            0x00, // record counter
            0x00, // base count
            0x01, // block count
            0x00, // landmarks
            0x00, 0x01, 0x00, 0x06, 0x06, // block header
            0x01, 0x00, 0x01, 0x00, 0x01, 0x00, // empty compression header
        ];

        assert_eq!(buf, expected);

        Ok(())
    }
}
