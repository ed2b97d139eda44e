//! Test support: record fixtures and a minimal CRAM stream walker.
//!
//! The walker understands just enough of the container layout to verify the
//! framing this crate writes: the file definition, container headers and
//! their CRC32s, block headers, and the end-of-file sentinel.

use cram_write::{
    Position,
    alignment::{
        self,
        cigar::{Kind, Op},
    },
};

pub const EOF_V3: [u8; 38] = [
    0x0f, 0x00, 0x00, 0x00, 0xff, 0xff, 0xff, 0xff, 0x0f, 0xe0, 0x45, 0x4f, 0x46, 0x00, 0x00, 0x00,
    0x00, 0x01, 0x00, 0x05, 0xbd, 0xd9, 0x4f, 0x00, 0x01, 0x00, 0x06, 0x06, 0x01, 0x00, 0x01, 0x00,
    0x01, 0x00, 0xee, 0x63, 0x01, 0x4b,
];

/// A synthetic reference sequence: `ACGTAG` repeated to the requested
/// length.
pub fn reference_bases(len: usize) -> Vec<u8> {
    b"ACGTAG".iter().copied().cycle().take(len).collect()
}

/// A mapped record whose bases match the reference exactly.
pub fn mapped_record(
    name: &str,
    reference_sequence_id: usize,
    alignment_start: usize,
    reference: &[u8],
    read_length: usize,
) -> alignment::Record {
    let start = alignment_start - 1;
    let sequence = reference[start..start + read_length].to_vec();

    alignment::Record {
        name: Some(name.into()),
        reference_sequence_id: Some(reference_sequence_id),
        alignment_start: Position::new(alignment_start),
        mapping_quality: Some(30),
        cigar: [Op::new(Kind::Match, read_length)].into_iter().collect(),
        sequence,
        quality_scores: vec![40; read_length],
        ..Default::default()
    }
}

pub fn unmapped_record(name: &str) -> alignment::Record {
    alignment::Record {
        name: Some(name.into()),
        flags: alignment::record::Flags::UNMAPPED,
        sequence: b"ACGT".to_vec(),
        quality_scores: vec![30; 4],
        ..Default::default()
    }
}

#[derive(Debug)]
pub struct Block {
    pub compression_method: u8,
    pub content_type: u8,
    pub content_id: i32,
    pub uncompressed_size: usize,
    pub data: Vec<u8>,
}

#[derive(Debug)]
pub struct Container {
    pub byte_offset: u64,
    pub reference_sequence_id: i32,
    pub alignment_start: i32,
    pub alignment_span: i32,
    pub record_count: i32,
    pub record_counter: i64,
    pub block_count: i32,
    pub landmarks: Vec<i32>,
    pub blocks: Vec<Block>,
}

impl Container {
    /// Returns the decoded slice headers (content type 2 blocks).
    pub fn slice_headers(&self) -> Vec<SliceHeader> {
        self.blocks
            .iter()
            .filter(|block| block.content_type == 2)
            .map(|block| read_slice_header(&block.data))
            .collect()
    }
}

#[derive(Debug)]
pub struct SliceHeader {
    pub reference_sequence_id: i32,
    pub alignment_start: i32,
    pub alignment_span: i32,
    pub record_count: i32,
    pub record_counter: i64,
    pub block_count: i32,
    pub reference_md5: [u8; 16],
}

/// A fully parsed CRAM stream.
#[derive(Debug)]
pub struct Stream {
    pub version: (u8, u8),
    pub containers: Vec<Container>,
}

/// Parses a CRAM byte stream, checking framing and CRC32s along the way.
pub fn walk(src: &[u8]) -> Stream {
    let mut pos = 0;

    assert_eq!(&src[0..4], b"CRAM", "bad magic number");
    let version = (src[4], src[5]);
    pos += 26;

    let has_crc32 = version.0 >= 3;
    let mut containers = Vec::new();

    loop {
        assert!(pos < src.len(), "missing EOF sentinel");

        let byte_offset = pos as u64;
        let header_start = pos;

        let len = read_i32_le(src, &mut pos);
        let reference_sequence_id = read_itf8(src, &mut pos);
        let alignment_start = read_itf8(src, &mut pos);
        let alignment_span = read_itf8(src, &mut pos);
        let record_count = read_itf8(src, &mut pos);
        let record_counter = read_ltf8(src, &mut pos);
        let _base_count = read_ltf8(src, &mut pos);
        let block_count = read_itf8(src, &mut pos);

        let landmark_count = read_itf8(src, &mut pos);
        let landmarks: Vec<i32> = (0..landmark_count)
            .map(|_| read_itf8(src, &mut pos))
            .collect();

        if has_crc32 {
            let expected = crc32(&src[header_start..pos]);
            let actual = read_u32_le(src, &mut pos);
            assert_eq!(actual, expected, "container header CRC32 mismatch");
        }

        let is_eof = reference_sequence_id == -1 && alignment_start == 0x454f46;

        let blocks_end = pos + len as usize;
        let mut blocks = Vec::new();

        while pos < blocks_end {
            blocks.push(read_block(src, &mut pos, has_crc32));
        }

        assert_eq!(pos, blocks_end, "container length mismatch");

        if is_eof {
            assert_eq!(pos, src.len(), "trailing bytes after EOF sentinel");
            return Stream {
                version,
                containers,
            };
        }

        containers.push(Container {
            byte_offset,
            reference_sequence_id,
            alignment_start,
            alignment_span,
            record_count,
            record_counter,
            block_count,
            landmarks,
            blocks,
        });
    }
}

fn read_block(src: &[u8], pos: &mut usize, has_crc32: bool) -> Block {
    let block_start = *pos;

    let compression_method = src[*pos];
    *pos += 1;
    let content_type = src[*pos];
    *pos += 1;

    let content_id = read_itf8(src, pos);
    let compressed_size = read_itf8(src, pos) as usize;
    let uncompressed_size = read_itf8(src, pos) as usize;

    let data = src[*pos..*pos + compressed_size].to_vec();
    *pos += compressed_size;

    if has_crc32 {
        let expected = crc32(&src[block_start..*pos]);
        let actual = read_u32_le(src, pos);
        assert_eq!(actual, expected, "block CRC32 mismatch");
    }

    Block {
        compression_method,
        content_type,
        content_id,
        uncompressed_size,
        data,
    }
}

fn read_slice_header(src: &[u8]) -> SliceHeader {
    let mut pos = 0;

    let reference_sequence_id = read_itf8(src, &mut pos);
    let alignment_start = read_itf8(src, &mut pos);
    let alignment_span = read_itf8(src, &mut pos);
    let record_count = read_itf8(src, &mut pos);
    let record_counter = read_ltf8(src, &mut pos);
    let block_count = read_itf8(src, &mut pos);

    let id_count = read_itf8(src, &mut pos);
    for _ in 0..id_count {
        read_itf8(src, &mut pos);
    }

    let _embedded_reference_id = read_itf8(src, &mut pos);

    let mut reference_md5 = [0; 16];
    reference_md5.copy_from_slice(&src[pos..pos + 16]);

    SliceHeader {
        reference_sequence_id,
        alignment_start,
        alignment_span,
        record_count,
        record_counter,
        block_count,
        reference_md5,
    }
}

fn crc32(src: &[u8]) -> u32 {
    let mut crc = flate2::Crc::new();
    crc.update(src);
    crc.sum()
}

fn read_i32_le(src: &[u8], pos: &mut usize) -> i32 {
    let n = i32::from_le_bytes(src[*pos..*pos + 4].try_into().unwrap());
    *pos += 4;
    n
}

fn read_u32_le(src: &[u8], pos: &mut usize) -> u32 {
    let n = u32::from_le_bytes(src[*pos..*pos + 4].try_into().unwrap());
    *pos += 4;
    n
}

fn read_itf8(src: &[u8], pos: &mut usize) -> i32 {
    let b0 = u32::from(src[*pos]);
    *pos += 1;

    let mut read_u8 = || {
        let b = u32::from(src[*pos]);
        *pos += 1;
        b
    };

    let n = if b0 < 0x80 {
        b0
    } else if b0 < 0xc0 {
        ((b0 & 0x7f) << 8) | read_u8()
    } else if b0 < 0xe0 {
        ((b0 & 0x3f) << 16) | (read_u8() << 8) | read_u8()
    } else if b0 < 0xf0 {
        ((b0 & 0x1f) << 24) | (read_u8() << 16) | (read_u8() << 8) | read_u8()
    } else {
        ((b0 & 0x0f) << 28)
            | (read_u8() << 20)
            | (read_u8() << 12)
            | (read_u8() << 4)
            | (read_u8() & 0x0f)
    };

    n as i32
}

fn read_ltf8(src: &[u8], pos: &mut usize) -> i64 {
    let b0 = u64::from(src[*pos]);
    *pos += 1;

    let mut read_u8 = || {
        let b = u64::from(src[*pos]);
        *pos += 1;
        b
    };

    // Counters in these tests stay small; three bytes is plenty.
    let n = if b0 < 0x80 {
        b0
    } else if b0 < 0xc0 {
        ((b0 & 0x7f) << 8) | read_u8()
    } else if b0 < 0xe0 {
        ((b0 & 0x3f) << 16) | (read_u8() << 8) | read_u8()
    } else {
        panic!("LTF-8 value too large for the test walker");
    };

    n as i64
}
