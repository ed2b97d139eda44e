use std::{error, fmt, io};

use bstr::BString;

/// An error produced by the CRAM write pipeline.
///
/// The `Display` implementation yields a one-line diagnostic naming the error
/// kind and, where available, the contig, record name, or stream position
/// that triggered it.
#[derive(Debug)]
pub enum WriteError {
    /// A precondition was violated at the public surface, e.g. contradictory
    /// options or a record that cannot be represented.
    InvalidArgument(String),
    /// A coordinate-sorted input violated the sort order.
    OutOfOrder {
        /// The name of the offending record, if it has one.
        name: Option<BString>,
    },
    /// A record references a sequence ID outside the sequence dictionary.
    UnknownContig {
        /// The out-of-range reference sequence ID.
        reference_sequence_id: usize,
    },
    /// The reference source returned no bases for a known contig.
    ReferenceUnavailable {
        /// The name of the reference sequence.
        name: BString,
    },
    /// A tag value could not be encoded as its declared type.
    EncodingFailure {
        /// The tag name.
        tag: [u8; 2],
    },
    /// The session was used after `finish` or `abort`.
    SessionClosed,
    /// The underlying stream failed.
    Io(io::Error),
}

impl error::Error for WriteError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(reason) => write!(f, "invalid argument: {reason}"),
            Self::OutOfOrder { name } => match name {
                Some(name) => write!(f, "record out of order: {name}"),
                None => f.write_str("record out of order"),
            },
            Self::UnknownContig {
                reference_sequence_id,
            } => {
                write!(f, "unknown reference sequence ID: {reference_sequence_id}")
            }
            Self::ReferenceUnavailable { name } => {
                write!(f, "reference sequence unavailable: {name}")
            }
            Self::EncodingFailure { tag } => {
                write!(
                    f,
                    "invalid value for tag: {}{}",
                    char::from(tag[0]),
                    char::from(tag[1])
                )
            }
            Self::SessionClosed => f.write_str("write session is closed"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl From<io::Error> for WriteError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
