//! End-to-end tests: push records through a write session and walk the
//! resulting byte stream.

mod common;

use cram_write::{
    WriteError,
    container::ReferenceSequenceContext,
    file_definition::Version,
    io::writer::Builder,
    reference::{SequenceDictionary, Sequences},
};

fn single_sequence_fixtures(len: usize) -> (SequenceDictionary, Sequences, Vec<u8>) {
    let bases = common::reference_bases(len);

    (
        SequenceDictionary::from(vec![("sq0".into(), len)]),
        Sequences::from(vec![("sq0".into(), bases.clone())]),
        bases,
    )
}

#[test]
fn test_empty_stream_is_file_definition_plus_eof() -> Result<(), WriteError> {
    let mut writer = Builder::default().build_from_writer(Vec::new());
    writer.finish()?;

    let buf = writer.get_ref();

    assert_eq!(buf.len(), 26 + common::EOF_V3.len());
    assert_eq!(&buf[0..4], b"CRAM");
    assert_eq!(&buf[26..], common::EOF_V3);

    let stream = common::walk(buf);
    assert!(stream.containers.is_empty());

    Ok(())
}

#[test]
fn test_empty_stream_v2_1_has_a_crc_less_sentinel() -> Result<(), WriteError> {
    let mut writer = Builder::default()
        .set_version(Version::V2_1)
        .build_from_writer(Vec::new());
    writer.finish()?;

    let buf = writer.get_ref();

    // The 2.1 sentinel is the same empty container without CRC32s.
    assert_eq!(buf.len(), 26 + 30);
    assert_eq!(buf[4], 2);
    assert_eq!(buf[5], 1);

    let stream = common::walk(buf);
    assert!(stream.containers.is_empty());

    Ok(())
}

#[test]
fn test_single_unmapped_record() -> Result<(), WriteError> {
    let mut writer = Builder::default().build_from_writer(Vec::new());

    writer.write_record(&common::unmapped_record("q0"))?;
    writer.finish()?;

    let entries = writer.container_entries().to_vec();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].record_count, 1);
    assert_eq!(entries[0].record_counter, 0);
    assert_eq!(
        entries[0].reference_sequence_context,
        ReferenceSequenceContext::None
    );

    let stream = common::walk(writer.get_ref());
    assert_eq!(stream.version, (3, 0));
    assert_eq!(stream.containers.len(), 1);

    let container = &stream.containers[0];
    assert_eq!(container.reference_sequence_id, -1);
    assert_eq!(container.alignment_start, 0);
    assert_eq!(container.alignment_span, 0);
    assert_eq!(container.record_count, 1);
    assert_eq!(container.block_count as usize, container.blocks.len());
    assert_eq!(container.byte_offset, entries[0].byte_offset);

    // The compression header block leads and is stored raw.
    assert_eq!(container.blocks[0].content_type, 1);
    assert_eq!(container.blocks[0].compression_method, 0);
    assert_eq!(container.blocks[0].content_id, 0);
    assert_eq!(
        container.blocks[0].uncompressed_size,
        container.blocks[0].data.len()
    );

    let slice_headers = container.slice_headers();
    assert_eq!(slice_headers.len(), 1);
    assert_eq!(slice_headers[0].reference_sequence_id, -1);
    assert_eq!(slice_headers[0].alignment_start, 0);
    assert_eq!(slice_headers[0].record_count, 1);
    assert_eq!(slice_headers[0].reference_md5, [0; 16]);

    Ok(())
}

#[test]
fn test_slice_capacity_splits_containers() -> Result<(), WriteError> {
    let (dictionary, source, bases) = single_sequence_fixtures(2000);

    let mut writer = Builder::default()
        .set_sequence_dictionary(dictionary)
        .set_reference_source(source)
        .set_records_per_slice(1000)
        .build_from_writer(Vec::new());

    for i in 0..1001 {
        let record = common::mapped_record(&format!("q{i}"), 0, i + 1, &bases, 4);
        writer.write_record(&record)?;
    }

    writer.finish()?;

    let entries = writer.container_entries().to_vec();
    assert_eq!(entries.len(), 2);

    assert_eq!(entries[0].record_count, 1000);
    assert_eq!(entries[0].record_counter, 0);
    assert_eq!(entries[1].record_count, 1);
    assert_eq!(entries[1].record_counter, 1000);

    let stream = common::walk(writer.get_ref());
    assert_eq!(stream.containers.len(), 2);

    for (container, entry) in stream.containers.iter().zip(&entries) {
        assert_eq!(container.byte_offset, entry.byte_offset);
        assert_eq!(container.record_count as u64, entry.record_count);
        assert_eq!(container.record_counter as u64, entry.record_counter);
        assert_eq!(container.reference_sequence_id, 0);

        let slice_headers = container.slice_headers();
        assert_eq!(slice_headers.len(), 1);
        assert_eq!(slice_headers[0].reference_sequence_id, 0);
        assert_ne!(slice_headers[0].reference_md5, [0; 16]);
    }

    let first_slice = &stream.containers[0].slice_headers()[0];
    assert_eq!(first_slice.record_count, 1000);
    assert_eq!(first_slice.alignment_start, 1);
    // Starts 1..=1000 with 4-base reads cover positions 1..=1003.
    assert_eq!(first_slice.alignment_span, 1003);
    assert!(first_slice.block_count > 0);

    assert_eq!(stream.containers[1].slice_headers()[0].record_count, 1);
    assert_eq!(stream.containers[1].slice_headers()[0].record_counter, 1000);

    Ok(())
}

#[test]
fn test_short_single_reference_runs_promote_to_a_multi_reference_slice()
-> Result<(), WriteError> {
    let len = 600;
    let bases = common::reference_bases(len);

    let dictionary =
        SequenceDictionary::from(vec![("sq0".into(), len), ("sq1".into(), len)]);
    let source = Sequences::from(vec![
        ("sq0".into(), bases.clone()),
        ("sq1".into(), bases.clone()),
    ]);

    let mut writer = Builder::default()
        .set_sequence_dictionary(dictionary)
        .set_reference_source(source)
        .set_min_single_reference_slice_size(1000)
        .build_from_writer(Vec::new());

    for contig in 0..2 {
        for i in 0..500 {
            let record = common::mapped_record(&format!("q{contig}.{i}"), contig, i + 1, &bases, 4);
            writer.write_record(&record)?;
        }
    }

    writer.finish()?;

    let entries = writer.container_entries().to_vec();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].record_count, 1000);
    assert_eq!(
        entries[0].reference_sequence_context,
        ReferenceSequenceContext::Many
    );

    let stream = common::walk(writer.get_ref());
    assert_eq!(stream.containers.len(), 1);
    assert_eq!(stream.containers[0].reference_sequence_id, -2);

    let slice_headers = stream.containers[0].slice_headers();
    assert_eq!(slice_headers.len(), 1);
    assert_eq!(slice_headers[0].reference_sequence_id, -2);
    assert_eq!(slice_headers[0].record_count, 1000);
    assert_eq!(slice_headers[0].reference_md5, [0; 16]);

    Ok(())
}

#[test]
fn test_mapped_then_unmapped_splits_containers() -> Result<(), WriteError> {
    let (dictionary, source, bases) = single_sequence_fixtures(4000);

    let mut writer = Builder::default()
        .set_sequence_dictionary(dictionary)
        .set_reference_source(source)
        .build_from_writer(Vec::new());

    for i in 0..2000 {
        let record = common::mapped_record(&format!("m{i}"), 0, i + 1, &bases, 4);
        writer.write_record(&record)?;
    }

    for i in 0..2000 {
        writer.write_record(&common::unmapped_record(&format!("u{i}")))?;
    }

    writer.finish()?;

    let entries = writer.container_entries().to_vec();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].record_count, 2000);
    assert!(matches!(
        entries[0].reference_sequence_context,
        ReferenceSequenceContext::Some(_)
    ));
    assert_eq!(entries[1].record_count, 2000);
    assert_eq!(
        entries[1].reference_sequence_context,
        ReferenceSequenceContext::None
    );

    let stream = common::walk(writer.get_ref());
    assert_eq!(stream.containers.len(), 2);
    assert_eq!(stream.containers[0].reference_sequence_id, 0);
    assert_eq!(stream.containers[1].reference_sequence_id, -1);

    Ok(())
}

#[test]
fn test_mapped_after_unmapped_is_out_of_order() -> Result<(), WriteError> {
    let (dictionary, source, bases) = single_sequence_fixtures(100);

    let mut writer = Builder::default()
        .set_sequence_dictionary(dictionary)
        .set_reference_source(source)
        .build_from_writer(Vec::new());

    writer.write_record(&common::unmapped_record("u0"))?;

    let mapped = common::mapped_record("m0", 0, 1, &bases, 4);

    assert!(matches!(
        writer.write_record(&mapped),
        Err(WriteError::OutOfOrder { .. })
    ));

    // The failure is fatal to the session.
    assert!(matches!(
        writer.write_record(&common::unmapped_record("u1")),
        Err(WriteError::SessionClosed)
    ));

    Ok(())
}

#[test]
fn test_multiple_slices_share_a_container_on_one_reference() -> Result<(), WriteError> {
    let (dictionary, source, bases) = single_sequence_fixtures(2000);

    let mut writer = Builder::default()
        .set_sequence_dictionary(dictionary)
        .set_reference_source(source)
        .set_records_per_slice(100)
        .set_slices_per_container(2)
        .build_from_writer(Vec::new());

    for i in 0..200 {
        let record = common::mapped_record(&format!("q{i}"), 0, i + 1, &bases, 4);
        writer.write_record(&record)?;
    }

    writer.finish()?;

    let entries = writer.container_entries().to_vec();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].record_count, 200);

    let stream = common::walk(writer.get_ref());
    assert_eq!(stream.containers.len(), 1);

    let container = &stream.containers[0];
    let slice_headers = container.slice_headers();
    assert_eq!(slice_headers.len(), 2);
    assert_eq!(container.landmarks.len(), 2);
    assert_eq!(slice_headers[0].record_count, 100);
    assert_eq!(slice_headers[0].record_counter, 0);
    assert_eq!(slice_headers[1].record_count, 100);
    assert_eq!(slice_headers[1].record_counter, 100);

    // Both slices map to the container's single reference sequence.
    assert_eq!(container.reference_sequence_id, 0);
    assert_eq!(slice_headers[0].reference_sequence_id, 0);
    assert_eq!(slice_headers[1].reference_sequence_id, 0);

    Ok(())
}

#[test]
fn test_records_with_tags_round_the_pipeline() -> Result<(), WriteError> {
    use cram_write::alignment::data::{Array, Value};

    let (dictionary, source, bases) = single_sequence_fixtures(100);

    let mut writer = Builder::default()
        .set_sequence_dictionary(dictionary)
        .set_reference_source(source)
        .build_from_writer(Vec::new());

    for i in 0..10 {
        let mut record = common::mapped_record(&format!("q{i}"), 0, i + 1, &bases, 8);

        record.data = vec![
            ([b'N', b'M'], Value::Int32(0)),
            ([b'X', b'Z'], Value::String(format!("v{i}").into())),
            ([b'X', b'B'], Value::Array(Array::UInt8(vec![1; i + 1]))),
        ];

        writer.write_record(&record)?;
    }

    writer.finish()?;

    let stream = common::walk(writer.get_ref());
    assert_eq!(stream.containers.len(), 1);
    assert_eq!(stream.containers[0].record_count, 10);

    Ok(())
}

#[test]
fn test_record_past_the_end_of_the_reference_is_encoded() -> Result<(), WriteError> {
    let (dictionary, source, bases) = single_sequence_fixtures(10);

    let mut writer = Builder::default()
        .set_sequence_dictionary(dictionary)
        .set_reference_source(source)
        .build_from_writer(Vec::new());

    // Four of the eight aligned bases hang past the contig end.
    let mut record = common::mapped_record("q0", 0, 7, &bases[..8], 2);
    record.sequence = b"GTNNNNNN".to_vec();
    record.quality_scores = vec![40; 8];
    record.cigar = [cram_write::alignment::cigar::Op::new(
        cram_write::alignment::cigar::Kind::Match,
        8,
    )]
    .into_iter()
    .collect();

    writer.write_record(&record)?;
    writer.finish()?;

    let stream = common::walk(writer.get_ref());
    assert_eq!(stream.containers.len(), 1);
    assert_eq!(stream.containers[0].record_count, 1);

    Ok(())
}
