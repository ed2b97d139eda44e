use std::io::{self, Write};

use indexmap::IndexMap;

use super::encoding::write_byte_array_encoding;
use crate::{
    WriteError,
    container::{
        ReferenceSequenceContext,
        block::ContentId,
        compression_header::{
            Encoding, TagEncodings,
            encoding::codec::{Byte, ByteArray, Integer},
            preservation_map::tag_sets::Key,
        },
    },
    io::writer::{collections::write_array, num::write_itf8, record::tag},
    record::Record,
};

/// The stop byte for string-valued tags.
const STOP_BYTE: u8 = b'\t';

/// Above this size, a variable-length array tag is worth a scan for an
/// unused stop byte before falling back to a length-prefixed encoding.
const STOP_BYTE_SCAN_THRESHOLD: usize = 100;

/// Per-tag serialized value statistics gathered over a container.
struct TagStats {
    key: Key,
    min_size: usize,
    max_size: usize,
    values: Vec<u8>,
}

/// Chooses an encoding for every distinct tag ID in the container.
///
/// Fixed-width value types get a zero-bit Huffman length and external bytes;
/// strings get a stop-byte encoding; variable-length arrays get a stop byte
/// if a free byte value exists, otherwise external lengths and bytes.
pub(super) fn build_tag_encodings(
    slices: &mut [(ReferenceSequenceContext, Vec<Record>)],
) -> Result<TagEncodings, WriteError> {
    let mut stats: IndexMap<ContentId, TagStats> = IndexMap::new();
    let mut buf = Vec::new();

    for (_, records) in slices.iter() {
        for record in records {
            for (name, value) in &record.data {
                let key = Key::new(*name, value.ty());
                let block_content_id = key.block_content_id();

                buf.clear();
                tag::write_value(&mut buf, *name, value)?;

                let entry = stats.entry(block_content_id).or_insert_with(|| TagStats {
                    key,
                    min_size: usize::MAX,
                    max_size: 0,
                    values: Vec::new(),
                });

                entry.min_size = entry.min_size.min(buf.len());
                entry.max_size = entry.max_size.max(buf.len());
                entry.values.extend_from_slice(&buf);
            }
        }
    }

    let mut tag_encodings = TagEncodings::new();

    for (block_content_id, stats) in stats {
        let encoding = choose_encoding(block_content_id, &stats);
        tag_encodings.insert(block_content_id, encoding);
    }

    Ok(tag_encodings)
}

fn choose_encoding(block_content_id: ContentId, stats: &TagStats) -> Encoding<ByteArray> {
    match stats.key.ty() {
        b'A' | b'c' | b'C' => fixed_width(block_content_id, 1),
        b's' | b'S' => fixed_width(block_content_id, 2),
        b'i' | b'I' | b'f' => fixed_width(block_content_id, 4),
        _ if stats.min_size == stats.max_size => fixed_width(block_content_id, stats.min_size),
        b'Z' | b'H' => Encoding::new(ByteArray::ByteArrayStop {
            stop_byte: STOP_BYTE,
            block_content_id,
        }),
        _ => {
            if stats.min_size > STOP_BYTE_SCAN_THRESHOLD
                && let Some(stop_byte) = find_unused_byte(&stats.values)
            {
                Encoding::new(ByteArray::ByteArrayStop {
                    stop_byte,
                    block_content_id,
                })
            } else {
                Encoding::new(ByteArray::ByteArrayLength {
                    len_encoding: Encoding::new(Integer::External { block_content_id }),
                    value_encoding: Encoding::new(Byte::External { block_content_id }),
                })
            }
        }
    }
}

fn fixed_width(block_content_id: ContentId, len: usize) -> Encoding<ByteArray> {
    Encoding::new(ByteArray::ByteArrayLength {
        len_encoding: Encoding::new(Integer::Huffman {
            alphabet: vec![len as i32],
            bit_lens: vec![0],
        }),
        value_encoding: Encoding::new(Byte::External { block_content_id }),
    })
}

fn find_unused_byte(values: &[u8]) -> Option<u8> {
    let mut present = [false; 256];

    for &b in values {
        present[usize::from(b)] = true;
    }

    present.iter().position(|&p| !p).map(|i| i as u8)
}

pub(super) fn write_tag_encodings<W>(
    writer: &mut W,
    tag_encodings: &TagEncodings,
) -> io::Result<()>
where
    W: Write,
{
    let mut buf = Vec::new();

    let len = i32::try_from(tag_encodings.len())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    write_itf8(&mut buf, len)?;

    for (&block_content_id, encoding) in tag_encodings {
        write_itf8(&mut buf, block_content_id)?;
        write_byte_array_encoding(&mut buf, encoding)?;
    }

    write_array(writer, &buf)
}
