//! Reference sequence sources.

use bstr::{BStr, BString};

/// A source of reference sequence bases.
///
/// Implementations may return `None` only when the named sequence is
/// genuinely absent. [`ReferenceSource::bases_for_range`] may return fewer
/// bases than requested, which indicates the sequence is shorter than the
/// requested range.
pub trait ReferenceSource {
    /// Returns all bases of the named reference sequence.
    fn bases_for(&mut self, name: &BStr) -> Option<Vec<u8>>;

    /// Returns up to `len` bases of the named reference sequence starting at
    /// the 0-based `offset`.
    fn bases_for_range(&mut self, name: &BStr, offset: usize, len: usize) -> Option<Vec<u8>> {
        self.bases_for(name).map(|bases| {
            let start = offset.min(bases.len());
            let end = offset.saturating_add(len).min(bases.len());
            bases[start..end].to_vec()
        })
    }
}

/// An in-memory reference source.
///
/// # Examples
///
/// ```
/// use bstr::BStr;
/// use cram_write::reference::{ReferenceSource, Sequences};
///
/// let mut source = Sequences::from(vec![("sq0".into(), b"ACGT".to_vec())]);
/// assert_eq!(source.bases_for(BStr::new("sq0")), Some(b"ACGT".to_vec()));
/// assert!(source.bases_for(BStr::new("sq1")).is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Sequences(Vec<(BString, Vec<u8>)>);

impl From<Vec<(BString, Vec<u8>)>> for Sequences {
    fn from(sequences: Vec<(BString, Vec<u8>)>) -> Self {
        Self(sequences)
    }
}

impl ReferenceSource for Sequences {
    fn bases_for(&mut self, name: &BStr) -> Option<Vec<u8>> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, bases)| bases.clone())
    }
}
