//! Container compression header.

pub mod data_series_encodings;
pub mod encoding;
pub(crate) mod preservation_map;

pub use self::{data_series_encodings::DataSeriesEncodings, encoding::Encoding};
pub(crate) use self::preservation_map::PreservationMap;

use indexmap::IndexMap;

use self::encoding::codec::ByteArray;
use super::block::ContentId;

/// Per-tag encodings keyed by block content ID, in insertion order.
pub(crate) type TagEncodings = IndexMap<ContentId, Encoding<ByteArray>>;

/// A compression header: how the records of one container are decoded.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CompressionHeader {
    pub preservation_map: PreservationMap,
    pub data_series_encodings: DataSeriesEncodings,
    pub tag_encodings: TagEncodings,
}
