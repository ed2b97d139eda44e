mod header;
pub(super) mod records;

use std::io;

use md5::{Digest, Md5};

pub(super) use self::header::write_header;
use self::records::ExternalDataWriters;
use super::block::Block;
use crate::{
    WriteError,
    container::{
        CompressionHeader, ReferenceSequenceContext,
        block::{ContentId, ContentType},
        compression_header::data_series_encodings::data_series::STANDARD_DATA_SERIES,
        slice,
    },
    io::BitWriter,
    record::Record,
    reference::{ReferenceRegion, ReferenceSource, SequenceDictionary},
};

const CORE_DATA_BLOCK_CONTENT_ID: ContentId = 0;

/// A fully serialized slice: its header and its data blocks.
pub(super) struct Slice {
    pub header: slice::Header,
    pub core_data_block: Block,
    pub external_data_blocks: Vec<Block>,
}

/// Serializes the records of one slice into data series buffers, compresses
/// them, and computes the reference MD5.
#[allow(clippy::too_many_arguments)]
pub(super) fn build_slice(
    compression_header: &CompressionHeader,
    reference_sequence_context: ReferenceSequenceContext,
    records: &[Record],
    record_counter: u64,
    source: &mut dyn ReferenceSource,
    dictionary: &SequenceDictionary,
    region: &mut ReferenceRegion,
) -> Result<Slice, WriteError> {
    let (core_data_buf, external_data_bufs) =
        write_records(compression_header, reference_sequence_context, records)?;

    let core_data_block = if core_data_buf.is_empty() {
        Block::raw(ContentType::CoreData, CORE_DATA_BLOCK_CONTENT_ID, Vec::new())
    } else {
        Block::gzip(
            ContentType::CoreData,
            CORE_DATA_BLOCK_CONTENT_ID,
            &core_data_buf,
        )?
    };

    let external_data_blocks = external_data_bufs
        .into_iter()
        .filter(|(_, buf)| !buf.is_empty())
        .map(|(block_content_id, buf)| {
            Block::compress_best(ContentType::ExternalData, block_content_id, &buf)
        })
        .collect::<io::Result<Vec<_>>>()?;

    let mut block_content_ids = vec![core_data_block.content_id];
    block_content_ids.extend(external_data_blocks.iter().map(|block| block.content_id));

    let reference_md5 = calculate_reference_md5(
        reference_sequence_context,
        source,
        dictionary,
        region,
    )?;

    let header = slice::Header {
        reference_sequence_context,
        record_count: records.len(),
        record_counter,
        block_content_ids,
        reference_md5,
    };

    Ok(Slice {
        header,
        core_data_block,
        external_data_blocks,
    })
}

fn write_records(
    compression_header: &CompressionHeader,
    reference_sequence_context: ReferenceSequenceContext,
    records: &[Record],
) -> io::Result<(Vec<u8>, Vec<(ContentId, Vec<u8>)>)> {
    let mut core_data_writer = BitWriter::default();
    let mut external_data_writers = ExternalDataWriters::default();

    for data_series in STANDARD_DATA_SERIES {
        external_data_writers.insert(ContentId::from(data_series), Vec::new());
    }

    for &block_content_id in compression_header.tag_encodings.keys() {
        external_data_writers.insert(block_content_id, Vec::new());
    }

    let mut writer = records::Writer::new(
        compression_header,
        &mut core_data_writer,
        &mut external_data_writers,
        reference_sequence_context,
    );

    for record in records {
        writer.write_record(record)?;
    }

    Ok((
        core_data_writer.finish()?,
        external_data_writers.into_iter().collect(),
    ))
}

/// Computes the MD5 of the reference fragment a single-reference slice
/// covers; multi-reference and unmapped slices get an all-zero digest.
fn calculate_reference_md5(
    reference_sequence_context: ReferenceSequenceContext,
    source: &mut dyn ReferenceSource,
    dictionary: &SequenceDictionary,
    region: &mut ReferenceRegion,
) -> Result<[u8; 16], WriteError> {
    let ReferenceSequenceContext::Some(context) = reference_sequence_context else {
        return Ok([0; 16]);
    };

    let start = usize::from(context.alignment_start()) - 1;
    let span = context.alignment_span();

    region.fetch_range(
        source,
        dictionary,
        context.reference_sequence_id(),
        start,
        span,
    )?;

    let mut hasher = Md5::new();
    hasher.update(region.bases_in(start, span));

    Ok(<[u8; 16]>::from(hasher.finalize()))
}
