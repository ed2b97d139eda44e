mod substitution_matrix;
mod tag_sets;

use std::io::{self, Write};

use self::{
    substitution_matrix::{build_substitution_matrix, write_substitution_matrix},
    tag_sets::{build_tag_sets, write_tag_sets},
};
use crate::{
    container::{
        ReferenceSequenceContext,
        compression_header::{PreservationMap, preservation_map::Key},
    },
    io::writer::{
        collections::write_array,
        num::{write_itf8, write_u8},
        options::{Options, SortOrder},
    },
    record::Record,
};

pub(super) fn build_preservation_map(
    options: &Options,
    reference_sequence_context: ReferenceSequenceContext,
    slices: &mut [(ReferenceSequenceContext, Vec<Record>)],
) -> PreservationMap {
    // Alignment start deltas only pay off (and only decode unambiguously)
    // for a coordinate-sorted single-reference container.
    let alignment_starts_are_deltas = options.sort_order == SortOrder::Coordinate
        && matches!(
            reference_sequence_context,
            ReferenceSequenceContext::Some(_)
        );

    PreservationMap {
        records_have_names: options.preserve_read_names,
        alignment_starts_are_deltas,
        external_reference_sequence_is_required: true,
        substitution_matrix: build_substitution_matrix(slices),
        tag_sets: build_tag_sets(slices),
    }
}

pub(super) fn write_preservation_map<W>(
    writer: &mut W,
    preservation_map: &PreservationMap,
) -> io::Result<()>
where
    W: Write,
{
    let mut buf = Vec::new();
    encode(&mut buf, preservation_map)?;
    write_array(writer, &buf)
}

fn encode<W>(writer: &mut W, preservation_map: &PreservationMap) -> io::Result<()>
where
    W: Write,
{
    const MAP_LENGTH: i32 = 5;

    write_itf8(writer, MAP_LENGTH)?;

    write_key(writer, Key::RecordsHaveNames)?;
    write_bool(writer, preservation_map.records_have_names)?;

    write_key(writer, Key::AlignmentStartsAreDeltas)?;
    write_bool(writer, preservation_map.alignment_starts_are_deltas)?;

    write_key(writer, Key::ExternalReferenceSequenceIsRequired)?;
    write_bool(writer, preservation_map.external_reference_sequence_is_required)?;

    write_key(writer, Key::SubstitutionMatrix)?;
    write_substitution_matrix(writer, &preservation_map.substitution_matrix)?;

    write_key(writer, Key::TagSets)?;
    write_tag_sets(writer, &preservation_map.tag_sets)?;

    Ok(())
}

fn write_key<W>(writer: &mut W, key: Key) -> io::Result<()>
where
    W: Write,
{
    let data = <[u8; 2]>::from(key);
    writer.write_all(&data)
}

fn write_bool<W>(writer: &mut W, value: bool) -> io::Result<()>
where
    W: Write,
{
    if value {
        write_u8(writer, 0x01)
    } else {
        write_u8(writer, 0x00)
    }
}
