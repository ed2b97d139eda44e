//! **cram-write** builds and serializes CRAM streams from aligned sequencing
//! reads.
//!
//! The pipeline is a push-driven funnel: the caller feeds one
//! [`alignment::Record`] at a time into a [`io::Writer`] session, which
//! converts it into a compression record, accumulates records into slices and
//! slices into containers, and serializes each finished container to the
//! underlying stream. [`io::Writer::finish`] flushes the final container and
//! writes the end-of-file sentinel.
//!
//! # Examples
//!
//! ```
//! use cram_write::{
//!     alignment,
//!     io::writer::Builder,
//!     reference::{SequenceDictionary, Sequences},
//! };
//!
//! let dictionary = SequenceDictionary::from(vec![("sq0".into(), 8)]);
//! let source = Sequences::from(vec![("sq0".into(), b"ACGTACGT".to_vec())]);
//!
//! let mut writer = Builder::default()
//!     .set_sequence_dictionary(dictionary)
//!     .set_reference_source(source)
//!     .build_from_writer(Vec::new());
//!
//! let record = alignment::Record {
//!     sequence: b"ACGT".to_vec(),
//!     flags: alignment::record::Flags::UNMAPPED,
//!     ..Default::default()
//! };
//!
//! writer.write_record(&record)?;
//! writer.finish()?;
//! # Ok::<_, cram_write::WriteError>(())
//! ```

pub mod alignment;
pub(crate) mod codecs;
pub mod container;
mod error;
pub mod file_definition;
pub mod io;
mod position;
pub(crate) mod record;
pub mod reference;

pub use self::{error::WriteError, file_definition::FileDefinition, position::Position};

pub(crate) const MAGIC_NUMBER: [u8; 4] = *b"CRAM";
