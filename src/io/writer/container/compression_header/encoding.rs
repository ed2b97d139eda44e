use std::io::{self, Write};

use crate::{
    container::{
        block::ContentId,
        compression_header::{
            Encoding,
            encoding::codec::{Byte, ByteArray, Integer},
        },
    },
    io::writer::num::{write_itf8, write_u8},
};

// Encoding kind IDs, as defined by the format.
const EXTERNAL: i32 = 1;
const HUFFMAN: i32 = 3;
const BYTE_ARRAY_LENGTH: i32 = 4;
const BYTE_ARRAY_STOP: i32 = 5;

pub(super) fn write_byte_encoding<W>(writer: &mut W, encoding: &Encoding<Byte>) -> io::Result<()>
where
    W: Write,
{
    match encoding.get() {
        Byte::External { block_content_id } => write_external_codec(writer, *block_content_id),
    }
}

pub(super) fn write_integer_encoding<W>(
    writer: &mut W,
    encoding: &Encoding<Integer>,
) -> io::Result<()>
where
    W: Write,
{
    match encoding.get() {
        Integer::External { block_content_id } => write_external_codec(writer, *block_content_id),
        Integer::Huffman { alphabet, bit_lens } => {
            write_huffman_codec(writer, alphabet, bit_lens)
        }
    }
}

pub(super) fn write_byte_array_encoding<W>(
    writer: &mut W,
    encoding: &Encoding<ByteArray>,
) -> io::Result<()>
where
    W: Write,
{
    match encoding.get() {
        ByteArray::ByteArrayLength {
            len_encoding,
            value_encoding,
        } => write_byte_array_length_codec(writer, len_encoding, value_encoding),
        ByteArray::ByteArrayStop {
            stop_byte,
            block_content_id,
        } => write_byte_array_stop_codec(writer, *stop_byte, *block_content_id),
    }
}

fn write_args<W>(writer: &mut W, buf: &[u8]) -> io::Result<()>
where
    W: Write,
{
    let len =
        i32::try_from(buf.len()).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    write_itf8(writer, len)?;
    writer.write_all(buf)
}

fn write_external_codec<W>(writer: &mut W, block_content_id: ContentId) -> io::Result<()>
where
    W: Write,
{
    let mut args = Vec::new();
    write_itf8(&mut args, block_content_id)?;

    write_itf8(writer, EXTERNAL)?;
    write_args(writer, &args)?;

    Ok(())
}

fn write_huffman_codec<W>(writer: &mut W, alphabet: &[i32], bit_lens: &[u32]) -> io::Result<()>
where
    W: Write,
{
    let mut args = Vec::new();

    let alphabet_len = i32::try_from(alphabet.len())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    write_itf8(&mut args, alphabet_len)?;

    for &symbol in alphabet {
        write_itf8(&mut args, symbol)?;
    }

    let bit_lens_len = i32::try_from(bit_lens.len())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    write_itf8(&mut args, bit_lens_len)?;

    for &len in bit_lens {
        let len = i32::try_from(len).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        write_itf8(&mut args, len)?;
    }

    write_itf8(writer, HUFFMAN)?;
    write_args(writer, &args)?;

    Ok(())
}

fn write_byte_array_length_codec<W>(
    writer: &mut W,
    len_encoding: &Encoding<Integer>,
    value_encoding: &Encoding<Byte>,
) -> io::Result<()>
where
    W: Write,
{
    let mut args = Vec::new();

    write_integer_encoding(&mut args, len_encoding)?;
    write_byte_encoding(&mut args, value_encoding)?;

    write_itf8(writer, BYTE_ARRAY_LENGTH)?;
    write_args(writer, &args)?;

    Ok(())
}

fn write_byte_array_stop_codec<W>(
    writer: &mut W,
    stop_byte: u8,
    block_content_id: ContentId,
) -> io::Result<()>
where
    W: Write,
{
    let mut args = Vec::new();
    write_u8(&mut args, stop_byte)?;
    write_itf8(&mut args, block_content_id)?;

    write_itf8(writer, BYTE_ARRAY_STOP)?;
    write_args(writer, &args)?;

    Ok(())
}
