use std::io::{self, Write};

use flate2::CrcWriter;

use crate::{
    container::{Header, ReferenceSequenceContext},
    file_definition::Version,
    io::writer::num::{write_i32_le, write_itf8, write_ltf8, write_u32_le},
};

pub(crate) fn write_header<W>(
    writer: &mut W,
    header: &Header,
    len: usize,
    version: Version,
) -> io::Result<()>
where
    W: Write,
{
    if version.has_crc32() {
        let mut crc_writer = CrcWriter::new(writer);
        write_header_body(&mut crc_writer, header, len)?;
        let crc32 = crc_writer.crc().sum();
        write_u32_le(crc_writer.get_mut(), crc32)
    } else {
        write_header_body(writer, header, len)
    }
}

fn write_header_body<W>(writer: &mut W, header: &Header, len: usize) -> io::Result<()>
where
    W: Write,
{
    let length = i32::try_from(len).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    write_i32_le(writer, length)?;

    write_reference_sequence_context(writer, header.reference_sequence_context)?;

    let record_count = i32::try_from(header.record_count)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    write_itf8(writer, record_count)?;

    let record_counter = i64::try_from(header.record_counter)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    write_ltf8(writer, record_counter)?;

    let base_count = i64::try_from(header.base_count)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    write_ltf8(writer, base_count)?;

    let block_count = i32::try_from(header.block_count)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    write_itf8(writer, block_count)?;

    write_landmarks(writer, &header.landmarks)?;

    Ok(())
}

pub(crate) fn write_reference_sequence_context<W>(
    writer: &mut W,
    reference_sequence_context: ReferenceSequenceContext,
) -> io::Result<()>
where
    W: Write,
{
    const UNMAPPED: i32 = -1;
    const MULTIREF: i32 = -2;

    let (reference_sequence_id, alignment_start, alignment_span) = match reference_sequence_context
    {
        ReferenceSequenceContext::Some(context) => {
            let id = i32::try_from(context.reference_sequence_id())
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

            let start = i32::try_from(usize::from(context.alignment_start()))
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

            let span = i32::try_from(context.alignment_span())
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

            (id, start, span)
        }
        ReferenceSequenceContext::None => (UNMAPPED, 0, 0),
        ReferenceSequenceContext::Many => (MULTIREF, 0, 0),
    };

    write_itf8(writer, reference_sequence_id)?;
    write_itf8(writer, alignment_start)?;
    write_itf8(writer, alignment_span)?;

    Ok(())
}

fn write_landmarks<W>(writer: &mut W, landmarks: &[usize]) -> io::Result<()>
where
    W: Write,
{
    let len =
        i32::try_from(landmarks.len()).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    write_itf8(writer, len)?;

    for &pos in landmarks {
        let n = i32::try_from(pos).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        write_itf8(writer, n)?;
    }

    Ok(())
}
