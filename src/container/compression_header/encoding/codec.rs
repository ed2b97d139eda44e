//! Encoding codecs.
//!
//! Only the codecs this writer emits are modeled; the format defines further
//! codec kinds (Golomb, beta, subexponential, gamma) that are read-side
//! concerns.

use super::Encoding;
use crate::container::block::ContentId;

/// A codec for a byte data series.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Byte {
    /// Bytes are stored in an external block.
    External {
        /// The target block content ID.
        block_content_id: ContentId,
    },
}

/// A codec for an integer data series.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Integer {
    /// Integers are stored in an external block as ITF-8.
    External {
        /// The target block content ID.
        block_content_id: ContentId,
    },
    /// Integers are canonical-Huffman coded into the core block.
    ///
    /// A one-symbol alphabet has a zero-bit codeword, which this writer uses
    /// for constant-length byte arrays.
    Huffman {
        /// The symbol alphabet.
        alphabet: Vec<i32>,
        /// The codeword bit lengths, parallel to the alphabet.
        bit_lens: Vec<u32>,
    },
}

/// A codec for a byte-array data series.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ByteArray {
    /// A length-prefixed byte array.
    ByteArrayLength {
        /// The encoding of array lengths.
        len_encoding: Encoding<Integer>,
        /// The encoding of array bytes.
        value_encoding: Encoding<Byte>,
    },
    /// A byte array terminated by a stop byte.
    ByteArrayStop {
        /// The terminator.
        stop_byte: u8,
        /// The target block content ID.
        block_content_id: ContentId,
    },
}
