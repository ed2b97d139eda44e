use std::io::{self, Write};

use crate::{
    container::{ReferenceSequenceContext, slice},
    io::writer::num::{write_itf8, write_ltf8},
};

pub(crate) fn write_header<W>(writer: &mut W, header: &slice::Header) -> io::Result<()>
where
    W: Write,
{
    write_reference_sequence_context(writer, header.reference_sequence_context)?;

    let record_count = i32::try_from(header.record_count)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    write_itf8(writer, record_count)?;

    let record_counter = i64::try_from(header.record_counter)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    write_ltf8(writer, record_counter)?;

    // The block count, then the content ID array with its own length prefix.
    let block_count = i32::try_from(header.block_content_ids.len())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    write_itf8(writer, block_count)?;
    write_itf8(writer, block_count)?;

    for &block_content_id in &header.block_content_ids {
        write_itf8(writer, block_content_id)?;
    }

    // No embedded reference bases block.
    write_itf8(writer, -1)?;

    writer.write_all(&header.reference_md5)?;

    Ok(())
}

fn write_reference_sequence_context<W>(
    writer: &mut W,
    reference_sequence_context: ReferenceSequenceContext,
) -> io::Result<()>
where
    W: Write,
{
    super::super::header::write_reference_sequence_context(writer, reference_sequence_context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;

    #[test]
    fn test_write_header() -> io::Result<()> {
        let header = slice::Header {
            reference_sequence_context: ReferenceSequenceContext::some(
                1,
                Position::new(9).unwrap(),
                Position::new(20).unwrap(),
            ),
            record_count: 5,
            record_counter: 8,
            block_content_ids: vec![0, 1, 2],
            reference_md5: [0x11; 16],
        };

        let mut buf = Vec::new();
        write_header(&mut buf, &header)?;

        let expected = [
            0x01, // reference sequence ID = 1
            0x09, // alignment start = 9
            0x0c, // alignment span = 12
            0x05, // record count = 5
            0x08, // record counter = 8
            0x03, // block count = 3
            0x03, // block content IDs length = 3
            0x00, 0x01, 0x02, // block content IDs
            0xff, 0xff, 0xff, 0xff, 0x0f, // embedded reference bases block content ID = -1
            0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11,
            0x11, 0x11, // reference MD5
        ];

        assert_eq!(buf, expected);

        Ok(())
    }

    #[test]
    fn test_write_header_for_an_unmapped_slice() -> io::Result<()> {
        let header = slice::Header {
            reference_sequence_context: ReferenceSequenceContext::None,
            record_count: 1,
            record_counter: 0,
            block_content_ids: vec![0],
            reference_md5: [0; 16],
        };

        let mut buf = Vec::new();
        write_header(&mut buf, &header)?;

        let expected = [
            0xff, 0xff, 0xff, 0xff, 0x0f, // reference sequence ID = -1
            0x00, // alignment start = 0
            0x00, // alignment span = 0
            0x01, // record count = 1
            0x00, // record counter = 0
            0x01, // block count = 1
            0x01, // block content IDs length = 1
            0x00, // block content IDs
            0xff, 0xff, 0xff, 0xff, 0x0f, // embedded reference bases block content ID = -1
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, // reference MD5
        ];

        assert_eq!(buf, expected);

        Ok(())
    }
}
