use std::{
    fs::File,
    io::{self, Write},
    path::Path,
};

use super::{Options, Writer, options::SortOrder};
use crate::{
    container::compression_header::DataSeriesEncodings,
    file_definition::Version,
    reference::{ReferenceSource, SequenceDictionary, Sequences},
};

/// A CRAM writer builder.
pub struct Builder {
    reference_source: Box<dyn ReferenceSource>,
    sequence_dictionary: SequenceDictionary,
    options: Options,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            reference_source: Box::new(Sequences::default()),
            sequence_dictionary: SequenceDictionary::default(),
            options: Options::default(),
        }
    }
}

impl Builder {
    /// Sets the reference source.
    ///
    /// A reference is required to encode mapped records; unmapped-only
    /// streams can leave the default empty source in place.
    pub fn set_reference_source<S>(mut self, reference_source: S) -> Self
    where
        S: ReferenceSource + 'static,
    {
        self.reference_source = Box::new(reference_source);
        self
    }

    /// Sets the sequence dictionary that record reference sequence IDs index
    /// into.
    pub fn set_sequence_dictionary(mut self, sequence_dictionary: SequenceDictionary) -> Self {
        self.sequence_dictionary = sequence_dictionary;
        self
    }

    /// Sets the CRAM version to write.
    ///
    /// The default is 3.0.
    ///
    /// # Examples
    ///
    /// ```
    /// use cram_write::{file_definition::Version, io::writer::Builder};
    /// let builder = Builder::default().set_version(Version::V3_1);
    /// ```
    pub fn set_version(mut self, version: Version) -> Self {
        self.options.version = version;
        self
    }

    /// Sets the maximum number of records per slice.
    ///
    /// The default is 10000.
    ///
    /// # Panics
    ///
    /// Panics if `records_per_slice` is 0.
    pub fn set_records_per_slice(mut self, records_per_slice: usize) -> Self {
        assert!(records_per_slice > 0, "records_per_slice must be > 0");
        self.options.records_per_slice = records_per_slice;
        self
    }

    /// Sets the maximum number of slices per container.
    ///
    /// The default is 1.
    ///
    /// # Panics
    ///
    /// Panics if `slices_per_container` is 0.
    pub fn set_slices_per_container(mut self, slices_per_container: usize) -> Self {
        assert!(slices_per_container > 0, "slices_per_container must be > 0");
        self.options.slices_per_container = slices_per_container;
        self
    }

    /// Sets the single-reference run length below which a reference change
    /// promotes the pending slice to multi-reference instead of closing it.
    ///
    /// The default is 1000.
    pub fn set_min_single_reference_slice_size(mut self, size: usize) -> Self {
        self.options.min_single_reference_slice_size = size;
        self
    }

    /// Sets whether to preserve read names.
    ///
    /// If `false`, unnamed records receive names synthesized from the record
    /// ordinal.
    ///
    /// The default is `true`.
    pub fn preserve_read_names(mut self, value: bool) -> Self {
        self.options.preserve_read_names = value;
        self
    }

    /// Sets whether every tag is captured.
    ///
    /// When `false`, only the tags named by
    /// [`Builder::set_capture_tags`] are kept. The read group tag is stored
    /// out of band and never captured.
    ///
    /// The default is `true`.
    pub fn capture_all_tags(mut self, value: bool) -> Self {
        self.options.capture_all_tags = value;
        self
    }

    /// Sets the tags to capture when not capturing all tags.
    pub fn set_capture_tags(mut self, tags: Vec<[u8; 2]>) -> Self {
        self.options.capture_tags = tags;
        self
    }

    /// Sets the tags to drop when capturing all tags.
    pub fn set_ignore_tags(mut self, tags: Vec<[u8; 2]>) -> Self {
        self.options.ignore_tags = tags;
        self
    }

    /// Overrides the fixed data series encodings.
    pub fn set_data_series_encodings(mut self, encodings: DataSeriesEncodings) -> Self {
        self.options.data_series_encodings = Some(encodings);
        self
    }

    /// Sets the sort order of the input stream.
    ///
    /// The default is [`SortOrder::Coordinate`].
    pub fn set_sort_order(mut self, sort_order: SortOrder) -> Self {
        self.options.sort_order = sort_order;
        self
    }

    /// Builds a CRAM writer from a path.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use cram_write::io::writer::Builder;
    /// let writer = Builder::default().build_from_path("out.cram")?;
    /// # Ok::<_, std::io::Error>(())
    /// ```
    pub fn build_from_path<P>(self, dst: P) -> io::Result<Writer<File>>
    where
        P: AsRef<Path>,
    {
        File::create(dst).map(|file| self.build_from_writer(file))
    }

    /// Builds a CRAM writer from a writer.
    ///
    /// # Examples
    ///
    /// ```
    /// use cram_write::io::writer::Builder;
    /// let writer = Builder::default().build_from_writer(Vec::new());
    /// ```
    pub fn build_from_writer<W>(self, writer: W) -> Writer<W>
    where
        W: Write,
    {
        Writer::new(
            writer,
            self.reference_source,
            self.sequence_dictionary,
            self.options,
        )
    }
}
