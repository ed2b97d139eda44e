use std::mem;

use super::{ReferenceSequenceContext, slice};
use crate::{WriteError, io::writer::Options, record::Record};

/// The outcome of offering a record to the container builder.
#[derive(Debug)]
pub(crate) enum AddOutcome {
    /// The record joined the container.
    Added,
    /// The container must be emitted; the returned record starts the next
    /// container.
    Full(Record),
}

/// Accumulates slices into a container, deciding when the container must be
/// emitted.
///
/// A container is emitted when it holds the configured number of slices, when
/// the slice that just closed is multi-reference (so a multi-reference slice
/// always travels alone), or when the reference context changes between
/// slices (two single-reference slices with different IDs may not share a
/// container).
#[derive(Debug, Default)]
pub(crate) struct Builder {
    slice_builder: slice::Builder,
    slice_builders: Vec<slice::Builder>,
}

impl Builder {
    pub fn is_empty(&self) -> bool {
        self.slice_builder.is_empty() && self.slice_builders.is_empty()
    }

    pub fn add_record(
        &mut self,
        record: Record,
        options: &Options,
    ) -> Result<AddOutcome, WriteError> {
        let record = match self.slice_builder.add_record(record, options)? {
            slice::builder::AddOutcome::Added => return Ok(AddOutcome::Added),
            slice::builder::AddOutcome::Full(record) => record,
        };

        let closed = mem::take(&mut self.slice_builder);
        let closed_context = closed.reference_sequence_context();
        self.slice_builders.push(closed);

        if closed_context.is_many() {
            return Ok(AddOutcome::Full(record));
        }

        if self.slice_builders.len() >= options.slices_per_container {
            return Ok(AddOutcome::Full(record));
        }

        let container_reference_sequence_id = match closed_context {
            ReferenceSequenceContext::Some(context) => Some(context.reference_sequence_id()),
            _ => None,
        };

        if record.reference_sequence_id != container_reference_sequence_id {
            return Ok(AddOutcome::Full(record));
        }

        match self.slice_builder.add_record(record, options)? {
            slice::builder::AddOutcome::Added => Ok(AddOutcome::Added),
            slice::builder::AddOutcome::Full(_) => {
                unreachable!("an empty slice accepts any record")
            }
        }
    }

    /// Closes the pending slice and returns all slices of the container.
    pub fn finish(mut self) -> Vec<slice::Builder> {
        if !self.slice_builder.is_empty() {
            self.slice_builders.push(self.slice_builder);
        }

        self.slice_builders
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;

    fn mapped(reference_sequence_id: usize, alignment_start: usize) -> Record {
        Record {
            reference_sequence_id: Some(reference_sequence_id),
            alignment_start: Position::new(alignment_start),
            read_length: 4,
            ..Default::default()
        }
    }

    fn unmapped() -> Record {
        Record {
            bam_flags: crate::alignment::record::Flags::UNMAPPED,
            read_length: 4,
            ..Default::default()
        }
    }

    fn options() -> Options {
        Options {
            records_per_slice: 2,
            min_single_reference_slice_size: 1,
            slices_per_container: 2,
            ..Default::default()
        }
    }

    #[test]
    fn test_emits_at_slice_capacity() -> Result<(), WriteError> {
        let options = options();
        let mut builder = Builder::default();

        for i in 0..4 {
            assert!(matches!(
                builder.add_record(mapped(0, i + 1), &options)?,
                AddOutcome::Added
            ));
        }

        // The fifth record closes the second slice, filling the container.
        assert!(matches!(
            builder.add_record(mapped(0, 5), &options)?,
            AddOutcome::Full(_)
        ));

        let slices = builder.finish();
        let record_counts: Vec<_> = slices
            .into_iter()
            .map(|slice| slice.into_records().len())
            .collect();
        assert_eq!(record_counts, [2, 2]);

        Ok(())
    }

    #[test]
    fn test_emits_on_reference_change_between_slices() -> Result<(), WriteError> {
        let options = options();
        let mut builder = Builder::default();

        builder.add_record(mapped(0, 1), &options)?;
        builder.add_record(mapped(0, 2), &options)?;

        // The run on sequence 0 stands alone; a record on sequence 1 may not
        // join the same container.
        assert!(matches!(
            builder.add_record(mapped(1, 1), &options)?,
            AddOutcome::Full(_)
        ));

        Ok(())
    }

    #[test]
    fn test_emits_on_mapped_to_unmapped_transition() -> Result<(), WriteError> {
        let options = options();
        let mut builder = Builder::default();

        builder.add_record(mapped(0, 1), &options)?;
        builder.add_record(mapped(0, 2), &options)?;

        assert!(matches!(
            builder.add_record(unmapped(), &options)?,
            AddOutcome::Full(_)
        ));

        Ok(())
    }

    #[test]
    fn test_multi_reference_slice_travels_alone() -> Result<(), WriteError> {
        let options = Options {
            records_per_slice: 2,
            min_single_reference_slice_size: 2,
            slices_per_container: 2,
            ..Default::default()
        };

        let mut builder = Builder::default();

        // One record each on sequences 0 and 1: a multi-reference slice.
        builder.add_record(mapped(0, 1), &options)?;
        builder.add_record(mapped(1, 1), &options)?;

        assert!(matches!(
            builder.add_record(mapped(2, 1), &options)?,
            AddOutcome::Full(_)
        ));

        let slices = builder.finish();
        assert_eq!(slices.len(), 1);
        assert!(slices[0].reference_sequence_context().is_many());

        Ok(())
    }
}
