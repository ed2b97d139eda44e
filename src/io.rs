//! CRAM stream I/O.

pub(crate) mod bit_writer;
pub mod writer;

pub(crate) use self::bit_writer::BitWriter;
pub use self::writer::Writer;
