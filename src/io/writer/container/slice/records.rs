use std::{
    error, fmt,
    io::{self, Write},
};

use indexmap::IndexMap;

use crate::{
    container::{
        ReferenceSequenceContext,
        block::ContentId,
        compression_header::{
            CompressionHeader, Encoding,
            data_series_encodings::DataSeries,
            encoding::codec::{Byte, ByteArray, Integer},
            preservation_map::tag_sets::Key,
        },
    },
    io::{
        BitWriter,
        writer::{num::write_itf8, record::tag},
    },
    position::Position,
    record::{Feature, Record},
};

/// One byte buffer per external block, keyed by content ID.
pub(super) type ExternalDataWriters = IndexMap<ContentId, Vec<u8>>;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum WriteRecordError {
    MissingDataSeriesEncoding(DataSeries),
    MissingTagEncoding(ContentId),
    MissingExternalBlock(ContentId),
    MissingSubstitutionCode,
    UnsupportedEncoding,
}

impl error::Error for WriteRecordError {}

impl fmt::Display for WriteRecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDataSeriesEncoding(data_series) => {
                write!(f, "missing data series encoding: {data_series:?}")
            }
            Self::MissingTagEncoding(block_content_id) => {
                write!(f, "missing tag encoding: {block_content_id}")
            }
            Self::MissingExternalBlock(block_content_id) => {
                write!(f, "missing external block: {block_content_id}")
            }
            Self::MissingSubstitutionCode => {
                f.write_str("substitution feature has no stamped code")
            }
            Self::UnsupportedEncoding => f.write_str("unsupported encoding on the write path"),
        }
    }
}

fn write_record_error(e: WriteRecordError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, e)
}

/// Serializes records into the core and external data series buffers.
pub(super) struct Writer<'a> {
    compression_header: &'a CompressionHeader,
    core_data_writer: &'a mut BitWriter,
    external_data_writers: &'a mut ExternalDataWriters,
    reference_sequence_context: ReferenceSequenceContext,
    prev_alignment_start: Option<Position>,
}

impl<'a> Writer<'a> {
    pub fn new(
        compression_header: &'a CompressionHeader,
        core_data_writer: &'a mut BitWriter,
        external_data_writers: &'a mut ExternalDataWriters,
        reference_sequence_context: ReferenceSequenceContext,
    ) -> Self {
        let prev_alignment_start = match reference_sequence_context {
            ReferenceSequenceContext::Some(context) => Some(context.alignment_start()),
            _ => None,
        };

        Self {
            compression_header,
            core_data_writer,
            external_data_writers,
            reference_sequence_context,
            prev_alignment_start,
        }
    }

    pub fn write_record(&mut self, record: &Record) -> io::Result<()> {
        self.write_bam_flags(record)?;
        self.write_cram_flags(record)?;

        self.write_positional_data(record)?;

        if self.preservation_map().records_have_names {
            self.write_name(record)?;
        }

        self.write_mate_data(record)?;
        self.write_tag_data(record)?;

        if record.bam_flags.is_unmapped() {
            self.write_unmapped_read(record)?;
        } else {
            self.write_mapped_read(record)?;
        }

        self.prev_alignment_start = record.alignment_start;

        Ok(())
    }

    fn preservation_map(&self) -> &'a crate::container::compression_header::PreservationMap {
        &self.compression_header.preservation_map
    }

    fn integer_encoding(&self, data_series: DataSeries) -> io::Result<&'a Encoding<Integer>> {
        let encodings = &self.compression_header.data_series_encodings;

        let encoding = match data_series {
            DataSeries::BamFlags => encodings.bam_flags.as_ref(),
            DataSeries::CramFlags => encodings.cram_flags.as_ref(),
            DataSeries::ReferenceSequenceIds => encodings.reference_sequence_ids.as_ref(),
            DataSeries::ReadLengths => encodings.read_lengths.as_ref(),
            DataSeries::AlignmentStarts => encodings.alignment_starts.as_ref(),
            DataSeries::ReadGroupIds => encodings.read_group_ids.as_ref(),
            DataSeries::MateFlags => encodings.mate_flags.as_ref(),
            DataSeries::MateReferenceSequenceIds => encodings.mate_reference_sequence_ids.as_ref(),
            DataSeries::MateAlignmentStarts => encodings.mate_alignment_starts.as_ref(),
            DataSeries::TemplateLengths => encodings.template_lengths.as_ref(),
            DataSeries::MateDistances => encodings.mate_distances.as_ref(),
            DataSeries::TagSetIds => encodings.tag_set_ids.as_ref(),
            DataSeries::FeatureCounts => encodings.feature_counts.as_ref(),
            DataSeries::FeaturePositionDeltas => encodings.feature_position_deltas.as_ref(),
            DataSeries::DeletionLengths => encodings.deletion_lengths.as_ref(),
            DataSeries::ReferenceSkipLengths => encodings.reference_skip_lengths.as_ref(),
            DataSeries::PaddingLengths => encodings.padding_lengths.as_ref(),
            DataSeries::HardClipLengths => encodings.hard_clip_lengths.as_ref(),
            DataSeries::MappingQualities => encodings.mapping_qualities.as_ref(),
            _ => None,
        };

        encoding
            .ok_or_else(|| write_record_error(WriteRecordError::MissingDataSeriesEncoding(data_series)))
    }

    fn byte_encoding(&self, data_series: DataSeries) -> io::Result<&'a Encoding<Byte>> {
        let encodings = &self.compression_header.data_series_encodings;

        let encoding = match data_series {
            DataSeries::FeatureCodes => encodings.feature_codes.as_ref(),
            DataSeries::BaseSubstitutionCodes => encodings.base_substitution_codes.as_ref(),
            DataSeries::Bases => encodings.bases.as_ref(),
            DataSeries::QualityScores => encodings.quality_scores.as_ref(),
            _ => None,
        };

        encoding
            .ok_or_else(|| write_record_error(WriteRecordError::MissingDataSeriesEncoding(data_series)))
    }

    fn byte_array_encoding(&self, data_series: DataSeries) -> io::Result<&'a Encoding<ByteArray>> {
        let encodings = &self.compression_header.data_series_encodings;

        let encoding = match data_series {
            DataSeries::Names => encodings.names.as_ref(),
            DataSeries::InsertionBases => encodings.insertion_bases.as_ref(),
            DataSeries::SoftClipBases => encodings.soft_clip_bases.as_ref(),
            _ => None,
        };

        encoding
            .ok_or_else(|| write_record_error(WriteRecordError::MissingDataSeriesEncoding(data_series)))
    }

    fn put_itf8(&mut self, data_series: DataSeries, value: i32) -> io::Result<()> {
        let encoding = self.integer_encoding(data_series)?;

        encode_itf8(
            encoding,
            self.core_data_writer,
            self.external_data_writers,
            value,
        )
    }

    fn put_byte(&mut self, data_series: DataSeries, value: u8) -> io::Result<()> {
        let encoding = self.byte_encoding(data_series)?;

        encode_byte(
            encoding,
            self.core_data_writer,
            self.external_data_writers,
            value,
        )
    }

    fn put_byte_array(&mut self, data_series: DataSeries, data: &[u8]) -> io::Result<()> {
        let encoding = self.byte_array_encoding(data_series)?;

        encode_byte_array(
            encoding,
            self.core_data_writer,
            self.external_data_writers,
            data,
        )
    }

    fn write_bam_flags(&mut self, record: &Record) -> io::Result<()> {
        let n = i32::from(record.bam_flags.bits());
        self.put_itf8(DataSeries::BamFlags, n)
    }

    fn write_cram_flags(&mut self, record: &Record) -> io::Result<()> {
        let n = i32::from(u8::from(record.cram_flags));
        self.put_itf8(DataSeries::CramFlags, n)
    }

    fn write_positional_data(&mut self, record: &Record) -> io::Result<()> {
        const UNMAPPED: i32 = -1;

        if self.reference_sequence_context.is_many() {
            let id = match record.reference_sequence_id {
                Some(id) => {
                    i32::try_from(id).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?
                }
                None => UNMAPPED,
            };

            self.put_itf8(DataSeries::ReferenceSequenceIds, id)?;
        }

        let read_length = i32::try_from(record.read_length)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        self.put_itf8(DataSeries::ReadLengths, read_length)?;

        self.write_alignment_start(record)?;

        let read_group_id = match record.read_group_id {
            Some(id) => {
                i32::try_from(id).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?
            }
            None => -1,
        };
        self.put_itf8(DataSeries::ReadGroupIds, read_group_id)?;

        Ok(())
    }

    fn write_alignment_start(&mut self, record: &Record) -> io::Result<()> {
        let alignment_start_or_delta = if self.preservation_map().alignment_starts_are_deltas {
            match (record.alignment_start, self.prev_alignment_start) {
                (Some(start), Some(prev)) => {
                    let start = to_i32_position(start)?;
                    let prev = to_i32_position(prev)?;
                    start - prev
                }
                (None, None) => 0,
                _ => {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        "cannot delta-encode a mix of placed and unplaced records",
                    ));
                }
            }
        } else {
            record
                .alignment_start
                .map(to_i32_position)
                .transpose()?
                .unwrap_or_default()
        };

        self.put_itf8(DataSeries::AlignmentStarts, alignment_start_or_delta)
    }

    fn write_name(&mut self, record: &Record) -> io::Result<()> {
        const MISSING: &[u8] = b"*";

        let name = record
            .name
            .as_ref()
            .map(|name| name.as_slice())
            .unwrap_or(MISSING);

        self.put_byte_array(DataSeries::Names, name)
    }

    fn write_mate_data(&mut self, record: &Record) -> io::Result<()> {
        const UNMAPPED: i32 = -1;

        if record.cram_flags.is_detached() {
            let mate_flags = i32::from(u8::from(record.mate_flags));
            self.put_itf8(DataSeries::MateFlags, mate_flags)?;

            if !self.preservation_map().records_have_names {
                self.write_name(record)?;
            }

            let id = match record.mate_reference_sequence_id {
                Some(id) => {
                    i32::try_from(id).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?
                }
                None => UNMAPPED,
            };
            self.put_itf8(DataSeries::MateReferenceSequenceIds, id)?;

            let start = record
                .mate_alignment_start
                .map(to_i32_position)
                .transpose()?
                .unwrap_or_default();
            self.put_itf8(DataSeries::MateAlignmentStarts, start)?;

            self.put_itf8(DataSeries::TemplateLengths, record.template_length)?;
        } else if record.cram_flags.mate_is_downstream() {
            let distance = record.mate_distance.ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    "downstream mate without a distance",
                )
            })?;

            let n = i32::try_from(distance)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
            self.put_itf8(DataSeries::MateDistances, n)?;
        }

        Ok(())
    }

    fn write_tag_data(&mut self, record: &Record) -> io::Result<()> {
        let tag_set_id = i32::try_from(record.tag_set_id)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        self.put_itf8(DataSeries::TagSetIds, tag_set_id)?;

        let mut buf = Vec::new();

        for (name, value) in &record.data {
            let block_content_id = Key::new(*name, value.ty()).block_content_id();

            let encoding = self
                .compression_header
                .tag_encodings
                .get(&block_content_id)
                .ok_or_else(|| {
                    write_record_error(WriteRecordError::MissingTagEncoding(block_content_id))
                })?;

            buf.clear();
            tag::write_value(&mut buf, *name, value)
                .map_err(|_| write_record_error(WriteRecordError::UnsupportedEncoding))?;

            encode_byte_array(
                encoding,
                self.core_data_writer,
                self.external_data_writers,
                &buf,
            )?;
        }

        Ok(())
    }

    fn write_mapped_read(&mut self, record: &Record) -> io::Result<()> {
        let feature_count = i32::try_from(record.features.len())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        self.put_itf8(DataSeries::FeatureCounts, feature_count)?;

        let mut prev_position = 0;

        for feature in &record.features {
            let position = usize::from(feature.position());
            let delta = position - prev_position;
            self.write_feature(feature, delta)?;
            prev_position = position;
        }

        let mapping_quality = i32::from(record.mapping_quality.unwrap_or(0xff));
        self.put_itf8(DataSeries::MappingQualities, mapping_quality)?;

        if record.cram_flags.quality_scores_are_stored_as_array() {
            for &score in &record.quality_scores {
                self.put_byte(DataSeries::QualityScores, score)?;
            }
        }

        Ok(())
    }

    fn write_feature(&mut self, feature: &Feature, position_delta: usize) -> io::Result<()> {
        self.put_byte(DataSeries::FeatureCodes, feature.code())?;

        let delta = i32::try_from(position_delta)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        self.put_itf8(DataSeries::FeaturePositionDeltas, delta)?;

        match feature {
            Feature::ReadBase {
                base,
                quality_score,
                ..
            } => {
                self.put_byte(DataSeries::Bases, *base)?;
                self.put_byte(DataSeries::QualityScores, *quality_score)?;
            }
            Feature::Substitution { code, .. } => {
                let code = code
                    .ok_or_else(|| write_record_error(WriteRecordError::MissingSubstitutionCode))?;
                self.put_byte(DataSeries::BaseSubstitutionCodes, code)?;
            }
            Feature::Insertion { bases, .. } => {
                self.put_byte_array(DataSeries::InsertionBases, bases)?;
            }
            Feature::InsertBase { base, .. } => {
                self.put_byte(DataSeries::Bases, *base)?;
            }
            Feature::Deletion { len, .. } => {
                let n = i32::try_from(*len)
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
                self.put_itf8(DataSeries::DeletionLengths, n)?;
            }
            Feature::QualityScore { quality_score, .. } => {
                self.put_byte(DataSeries::QualityScores, *quality_score)?;
            }
            Feature::ReferenceSkip { len, .. } => {
                let n = i32::try_from(*len)
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
                self.put_itf8(DataSeries::ReferenceSkipLengths, n)?;
            }
            Feature::SoftClip { bases, .. } => {
                self.put_byte_array(DataSeries::SoftClipBases, bases)?;
            }
            Feature::Padding { len, .. } => {
                let n = i32::try_from(*len)
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
                self.put_itf8(DataSeries::PaddingLengths, n)?;
            }
            Feature::HardClip { len, .. } => {
                let n = i32::try_from(*len)
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
                self.put_itf8(DataSeries::HardClipLengths, n)?;
            }
        }

        Ok(())
    }

    fn write_unmapped_read(&mut self, record: &Record) -> io::Result<()> {
        for &base in &record.sequence {
            self.put_byte(DataSeries::Bases, base)?;
        }

        if record.cram_flags.quality_scores_are_stored_as_array() {
            for &score in &record.quality_scores {
                self.put_byte(DataSeries::QualityScores, score)?;
            }
        }

        Ok(())
    }
}

fn to_i32_position(position: Position) -> io::Result<i32> {
    i32::try_from(usize::from(position)).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
}

fn external_writer<'w>(
    external_data_writers: &'w mut ExternalDataWriters,
    block_content_id: ContentId,
) -> io::Result<&'w mut Vec<u8>> {
    external_data_writers
        .get_mut(&block_content_id)
        .ok_or_else(|| write_record_error(WriteRecordError::MissingExternalBlock(block_content_id)))
}

fn encode_byte(
    encoding: &Encoding<Byte>,
    _core_data_writer: &mut BitWriter,
    external_data_writers: &mut ExternalDataWriters,
    value: u8,
) -> io::Result<()> {
    match encoding.get() {
        Byte::External { block_content_id } => {
            external_writer(external_data_writers, *block_content_id)?.push(value);
            Ok(())
        }
    }
}

fn encode_itf8(
    encoding: &Encoding<Integer>,
    _core_data_writer: &mut BitWriter,
    external_data_writers: &mut ExternalDataWriters,
    value: i32,
) -> io::Result<()> {
    match encoding.get() {
        Integer::External { block_content_id } => {
            let writer = external_writer(external_data_writers, *block_content_id)?;
            write_itf8(writer, value)
        }
        Integer::Huffman { alphabet, .. } => {
            // A one-symbol alphabet encodes as zero bits; nothing is written.
            if alphabet.len() == 1 && alphabet[0] == value {
                Ok(())
            } else {
                Err(write_record_error(WriteRecordError::UnsupportedEncoding))
            }
        }
    }
}

fn encode_byte_array(
    encoding: &Encoding<ByteArray>,
    core_data_writer: &mut BitWriter,
    external_data_writers: &mut ExternalDataWriters,
    data: &[u8],
) -> io::Result<()> {
    match encoding.get() {
        ByteArray::ByteArrayLength {
            len_encoding,
            value_encoding,
        } => {
            let len = i32::try_from(data.len())
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

            encode_itf8(len_encoding, core_data_writer, external_data_writers, len)?;

            match value_encoding.get() {
                Byte::External { block_content_id } => {
                    external_writer(external_data_writers, *block_content_id)?
                        .extend_from_slice(data);
                    Ok(())
                }
            }
        }
        ByteArray::ByteArrayStop {
            stop_byte,
            block_content_id,
        } => {
            let writer = external_writer(external_data_writers, *block_content_id)?;
            writer.extend_from_slice(data);
            writer.push(*stop_byte);
            Ok(())
        }
    }
}
