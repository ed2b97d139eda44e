use std::{
    io::{self, Write},
    mem,
};

use flate2::CrcWriter;

use crate::{
    codecs,
    container::block::{CompressionMethod, ContentId, ContentType},
    file_definition::Version,
    io::writer::num::{itf8_size_of, write_itf8, write_u32_le, write_u8},
};

/// A block ready to be serialized: method, content attributes, and the
/// (possibly compressed) payload.
#[derive(Debug)]
pub(crate) struct Block {
    pub(crate) compression_method: CompressionMethod,
    pub(crate) content_type: ContentType,
    pub(crate) content_id: ContentId,
    pub(crate) uncompressed_size: usize,
    pub(crate) src: Vec<u8>,
}

impl Block {
    /// Creates an uncompressed block.
    pub fn raw(content_type: ContentType, content_id: ContentId, src: Vec<u8>) -> Self {
        Self {
            compression_method: CompressionMethod::None,
            content_type,
            content_id,
            uncompressed_size: src.len(),
            src,
        }
    }

    /// Creates a gzip-compressed block.
    pub fn gzip(content_type: ContentType, content_id: ContentId, src: &[u8]) -> io::Result<Self> {
        let buf = codecs::gzip::encode(src)?;

        Ok(Self {
            compression_method: CompressionMethod::Gzip,
            content_type,
            content_id,
            uncompressed_size: src.len(),
            src: buf,
        })
    }

    /// Creates a block compressed with whichever candidate codec yields the
    /// smallest payload. Empty payloads stay raw.
    pub fn compress_best(
        content_type: ContentType,
        content_id: ContentId,
        src: &[u8],
    ) -> io::Result<Self> {
        if src.is_empty() {
            return Ok(Self::raw(content_type, content_id, Vec::new()));
        }

        let (compression_method, buf) = codecs::compress_best(src)?;

        Ok(Self {
            compression_method,
            content_type,
            content_id,
            uncompressed_size: src.len(),
            src: buf,
        })
    }

    /// Returns the serialized size of the block in bytes.
    pub fn size(&self, version: Version) -> io::Result<usize> {
        let compressed_size = i32::try_from(self.src.len())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        let uncompressed_size = i32::try_from(self.uncompressed_size)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        let mut size = mem::size_of::<u8>() // compression method
            + mem::size_of::<u8>() // content type
            + itf8_size_of(self.content_id)
            + itf8_size_of(compressed_size)
            + itf8_size_of(uncompressed_size)
            + self.src.len();

        if version.has_crc32() {
            size += mem::size_of::<u32>();
        }

        Ok(size)
    }
}

pub(crate) fn write_block<W>(writer: &mut W, block: &Block, version: Version) -> io::Result<()>
where
    W: Write,
{
    if version.has_crc32() {
        let mut crc_writer = CrcWriter::new(writer);
        write_block_body(&mut crc_writer, block)?;
        let crc32 = crc_writer.crc().sum();
        write_u32_le(crc_writer.get_mut(), crc32)
    } else {
        write_block_body(writer, block)
    }
}

fn write_block_body<W>(writer: &mut W, block: &Block) -> io::Result<()>
where
    W: Write,
{
    write_u8(writer, u8::from(block.compression_method))?;
    write_u8(writer, u8::from(block.content_type))?;
    write_itf8(writer, block.content_id)?;

    write_size(writer, block.src.len())?;
    write_size(writer, block.uncompressed_size)?;

    writer.write_all(&block.src)?;

    Ok(())
}

fn write_size<W>(writer: &mut W, size: usize) -> io::Result<()>
where
    W: Write,
{
    let n = i32::try_from(size).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    write_itf8(writer, n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_block() -> io::Result<()> {
        let block = Block::raw(ContentType::ExternalData, 1, b"cram".to_vec());

        let mut buf = Vec::new();
        write_block(&mut buf, &block, Version::V3_0)?;

        let expected = [
            0x00, // compression method = none
            0x04, // content type = external data
            0x01, // content ID = 1
            0x04, // compressed size = 4
            0x04, // uncompressed size = 4
            b'c', b'r', b'a', b'm', // data
            0x9b, 0x26, 0x56, 0xe6, // CRC32
        ];

        assert_eq!(buf, expected);

        Ok(())
    }

    #[test]
    fn test_write_block_without_crc32() -> io::Result<()> {
        let block = Block::raw(ContentType::ExternalData, 1, b"cram".to_vec());

        let mut buf = Vec::new();
        write_block(&mut buf, &block, Version::V2_1)?;

        assert_eq!(
            buf,
            [0x00, 0x04, 0x01, 0x04, 0x04, b'c', b'r', b'a', b'm']
        );

        Ok(())
    }

    #[test]
    fn test_size() -> io::Result<()> {
        let block = Block::raw(ContentType::ExternalData, 1, b"cram".to_vec());
        assert_eq!(block.size(Version::V3_0)?, 13);
        assert_eq!(block.size(Version::V2_1)?, 9);
        Ok(())
    }
}
