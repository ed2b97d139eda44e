//! CRAM writer.

mod builder;
pub(crate) mod collections;
mod container;
mod header;
pub(crate) mod num;
pub mod options;
pub(crate) mod record;

pub use self::{builder::Builder, options::Options};

use std::{
    io::{self, Write},
    mem,
};

use self::{
    container::{write_container, write_eof_container},
    header::write_file_definition,
};
use crate::{
    FileDefinition, WriteError, alignment,
    container::{ReferenceSequenceContext, builder::AddOutcome},
    reference::{ReferenceRegion, ReferenceSource, SequenceDictionary},
};

/// Bookkeeping for one emitted container, for consumption by index writers.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContainerEntry {
    /// The stream position of the container's first byte.
    pub byte_offset: u64,
    /// The number of records in all containers emitted before this one.
    pub record_counter: u64,
    /// The number of records in this container.
    pub record_count: u64,
    /// The container's reference sequence context.
    pub reference_sequence_context: ReferenceSequenceContext,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    Open,
    Closed,
}

struct CountingWriter<W> {
    inner: W,
    position: u64,
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.position += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// A CRAM write session.
///
/// Records are pushed one at a time; each push may emit zero or one finished
/// container. [`Writer::finish`] flushes the final container and writes the
/// end-of-file sentinel. Once finished or aborted, the session rejects
/// further calls with [`WriteError::SessionClosed`].
pub struct Writer<W> {
    inner: CountingWriter<W>,
    source: Box<dyn ReferenceSource>,
    dictionary: SequenceDictionary,
    region: ReferenceRegion,
    options: Options,
    container_builder: crate::container::Builder,
    record_counter: u64,
    container_entries: Vec<ContainerEntry>,
    file_definition_written: bool,
    state: State,
}

impl<W> Writer<W>
where
    W: Write,
{
    pub(super) fn new(
        inner: W,
        source: Box<dyn ReferenceSource>,
        dictionary: SequenceDictionary,
        options: Options,
    ) -> Self {
        Self {
            inner: CountingWriter { inner, position: 0 },
            source,
            dictionary,
            region: ReferenceRegion::default(),
            options,
            container_builder: crate::container::Builder::default(),
            record_counter: 0,
            container_entries: Vec::new(),
            file_definition_written: false,
            state: State::Open,
        }
    }

    /// Returns a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.inner.inner
    }

    /// Returns the current stream position.
    pub fn position(&self) -> u64 {
        self.inner.position
    }

    /// Returns bookkeeping for the containers emitted so far.
    pub fn container_entries(&self) -> &[ContainerEntry] {
        &self.container_entries
    }

    /// Converts the given record and pushes it into the pipeline.
    ///
    /// If the record closes a container, that container is serialized before
    /// the record is accepted into the next one.
    pub fn write_record(&mut self, record: &alignment::Record) -> Result<(), WriteError> {
        self.ensure_open()?;

        let result = self.write_record_inner(record);

        if result.is_err() {
            self.state = State::Closed;
        }

        result
    }

    fn write_record_inner(&mut self, record: &alignment::Record) -> Result<(), WriteError> {
        self.write_file_definition()?;

        let mut record = record::convert(
            record,
            &self.options,
            &self.dictionary,
            &mut *self.source,
            &mut self.region,
        )?;

        loop {
            match self.container_builder.add_record(record, &self.options)? {
                AddOutcome::Added => return Ok(()),
                AddOutcome::Full(next) => {
                    record = next;
                    self.flush_container()?;
                }
            }
        }
    }

    /// Flushes the pending container, writes the end-of-file sentinel, and
    /// closes the session.
    ///
    /// An input of zero records still produces a valid stream: the file
    /// definition immediately followed by the sentinel.
    pub fn finish(&mut self) -> Result<(), WriteError> {
        self.ensure_open()?;
        self.state = State::Closed;

        self.write_file_definition()?;
        self.flush_container()?;
        write_eof_container(&mut self.inner, self.options.version)?;
        self.inner.flush()?;

        Ok(())
    }

    /// Closes the session without flushing the pending container.
    ///
    /// The output is left truncated at the last fully emitted container.
    pub fn abort(&mut self) {
        self.state = State::Closed;
    }

    fn ensure_open(&self) -> Result<(), WriteError> {
        match self.state {
            State::Open => Ok(()),
            State::Closed => Err(WriteError::SessionClosed),
        }
    }

    fn write_file_definition(&mut self) -> Result<(), WriteError> {
        if self.file_definition_written {
            return Ok(());
        }

        if !self.options.version.is_writable() {
            return Err(WriteError::InvalidArgument(format!(
                "unsupported CRAM version: {}",
                self.options.version
            )));
        }

        let file_definition = FileDefinition::from(self.options.version);
        write_file_definition(&mut self.inner, &file_definition)?;
        self.file_definition_written = true;

        Ok(())
    }

    fn flush_container(&mut self) -> Result<(), WriteError> {
        let builder = mem::take(&mut self.container_builder);

        if builder.is_empty() {
            return Ok(());
        }

        let byte_offset = self.inner.position;

        let header = write_container(
            &mut self.inner,
            &self.options,
            &mut *self.source,
            &self.dictionary,
            &mut self.region,
            self.record_counter,
            builder.finish(),
        )?;

        let record_count = header.record_count as u64;

        self.container_entries.push(ContainerEntry {
            byte_offset,
            record_counter: header.record_counter,
            record_count,
            reference_sequence_context: header.reference_sequence_context,
        });

        self.record_counter += record_count;

        Ok(())
    }
}
