use crate::{
    WriteError,
    container::ReferenceSequenceContext,
    io::writer::options::{Options, SortOrder},
    record::Record,
};

/// The outcome of offering a record to a slice builder.
#[derive(Debug)]
pub(crate) enum AddOutcome {
    /// The record joined the slice.
    Added,
    /// The slice must close; the returned record starts the next slice.
    Full(Record),
}

/// Accumulates records into a slice, deciding when the slice must close.
///
/// A slice closes when it reaches the configured record count, or when the
/// reference context changes while the current run is large enough to stand
/// alone as a single-reference slice. A run that cannot reach
/// `min_single_reference_slice_size` before the context changes is promoted
/// to a multi-reference slice instead.
#[derive(Debug, Default)]
pub(crate) struct Builder {
    records: Vec<Record>,
    reference_sequence_context: Option<ReferenceSequenceContext>,
}

impl Builder {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Returns the context of the accumulated records.
    ///
    /// An empty builder reads as unmapped-unplaced.
    pub fn reference_sequence_context(&self) -> ReferenceSequenceContext {
        self.reference_sequence_context.unwrap_or_default()
    }

    pub fn add_record(
        &mut self,
        record: Record,
        options: &Options,
    ) -> Result<AddOutcome, WriteError> {
        let sorted = options.sort_order == SortOrder::Coordinate;
        let next_id = record.reference_sequence_id;
        let count = self.records.len();

        let Some(context) = self.reference_sequence_context else {
            self.push(record);
            return Ok(AddOutcome::Added);
        };

        let full = match context {
            ReferenceSequenceContext::None => match next_id {
                None => count >= options.records_per_slice,
                Some(_) if sorted => {
                    return Err(WriteError::OutOfOrder { name: record.name });
                }
                Some(_) => count >= options.records_per_slice,
            },
            ReferenceSequenceContext::Many => {
                if sorted {
                    count >= options.min_single_reference_slice_size
                } else {
                    count >= options.records_per_slice
                }
            }
            ReferenceSequenceContext::Some(context) => {
                if next_id == Some(context.reference_sequence_id()) {
                    count >= options.records_per_slice
                } else {
                    count >= options.min_single_reference_slice_size
                }
            }
        };

        if full {
            Ok(AddOutcome::Full(record))
        } else {
            self.push(record);
            Ok(AddOutcome::Added)
        }
    }

    fn push(&mut self, record: Record) {
        let id = record.reference_sequence_id;
        let start = record.alignment_start;
        let end = record.alignment_end();

        match &mut self.reference_sequence_context {
            Some(context) => context.update(id, start, end),
            None => {
                self.reference_sequence_context =
                    Some(ReferenceSequenceContext::from_placement(id, start, end));
            }
        }

        self.records.push(record);
    }
}
