use std::io::{self, Write};

use indexmap::IndexMap;

use crate::{
    container::{
        ReferenceSequenceContext,
        compression_header::preservation_map::tag_sets::{Key, TagSets},
    },
    io::writer::collections::write_array,
    record::Record,
};

/// Builds the container's tag dictionary and stamps each record with its
/// index into it.
///
/// Each record's tag-id triples (already sorted by the converter) are
/// concatenated and looked up in an insertion-ordered map; the first unseen
/// byte string claims the next index.
pub(super) fn build_tag_sets(slices: &mut [(ReferenceSequenceContext, Vec<Record>)]) -> TagSets {
    let mut indices: IndexMap<Vec<u8>, usize> = IndexMap::new();

    for (_, records) in slices.iter_mut() {
        for record in records {
            let mut line = Vec::with_capacity(record.data.len() * 3);

            for (tag, value) in &record.data {
                line.extend(Key::new(*tag, value.ty()).bytes());
            }

            let next_index = indices.len();
            record.tag_set_id = *indices.entry(line).or_insert(next_index);
        }
    }

    indices
        .keys()
        .map(|line| {
            line.chunks_exact(3)
                .map(|chunk| Key::new([chunk[0], chunk[1]], chunk[2]))
                .collect()
        })
        .collect()
}

/// Writes the tag dictionary: each set's triples followed by a NUL, the
/// whole wrapped as a length-prefixed array.
pub(super) fn write_tag_sets<W>(writer: &mut W, tag_sets: &TagSets) -> io::Result<()>
where
    W: Write,
{
    let mut buf = Vec::new();

    for keys in tag_sets {
        for key in keys {
            buf.extend(key.bytes());
        }

        buf.push(0x00);
    }

    write_array(writer, &buf)
}
