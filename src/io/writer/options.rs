//! Encoding strategy.

use crate::{
    container::compression_header::DataSeriesEncodings, file_definition::Version,
};

pub(crate) const DEFAULT_RECORDS_PER_SLICE: usize = 10000;
pub(crate) const DEFAULT_SLICES_PER_CONTAINER: usize = 1;
pub(crate) const DEFAULT_MIN_SINGLE_REFERENCE_SLICE_SIZE: usize = 1000;

/// The record sort order of the input stream.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SortOrder {
    /// Records arrive sorted by reference sequence and position, unmapped
    /// last.
    #[default]
    Coordinate,
    /// Records arrive in no particular order.
    Unsorted,
}

/// The encoding strategy of a write session.
#[derive(Clone, Debug)]
pub struct Options {
    pub(crate) version: Version,
    pub(crate) records_per_slice: usize,
    pub(crate) slices_per_container: usize,
    pub(crate) min_single_reference_slice_size: usize,
    pub(crate) preserve_read_names: bool,
    pub(crate) capture_all_tags: bool,
    pub(crate) capture_tags: Vec<[u8; 2]>,
    pub(crate) ignore_tags: Vec<[u8; 2]>,
    pub(crate) data_series_encodings: Option<DataSeriesEncodings>,
    pub(crate) sort_order: SortOrder,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            version: Version::default(),
            records_per_slice: DEFAULT_RECORDS_PER_SLICE,
            slices_per_container: DEFAULT_SLICES_PER_CONTAINER,
            min_single_reference_slice_size: DEFAULT_MIN_SINGLE_REFERENCE_SLICE_SIZE,
            preserve_read_names: true,
            capture_all_tags: true,
            capture_tags: Vec::new(),
            ignore_tags: Vec::new(),
            data_series_encodings: None,
            sort_order: SortOrder::default(),
        }
    }
}
