//! Reference sequence dictionary.

use bstr::{BStr, BString};

/// Reference sequence names and lengths, ordered by sequence ID.
///
/// Record reference sequence IDs index into this dictionary.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SequenceDictionary(Vec<(BString, usize)>);

impl SequenceDictionary {
    /// Returns the number of reference sequences.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the dictionary is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the name and length of the reference sequence with the given
    /// ID.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstr::BStr;
    /// use cram_write::reference::SequenceDictionary;
    ///
    /// let dictionary = SequenceDictionary::from(vec![("sq0".into(), 8)]);
    /// assert_eq!(dictionary.get(0), Some((BStr::new("sq0"), 8)));
    /// assert!(dictionary.get(1).is_none());
    /// ```
    pub fn get(&self, reference_sequence_id: usize) -> Option<(&BStr, usize)> {
        self.0
            .get(reference_sequence_id)
            .map(|(name, len)| (name.as_ref(), *len))
    }
}

impl From<Vec<(BString, usize)>> for SequenceDictionary {
    fn from(sequences: Vec<(BString, usize)>) -> Self {
        Self(sequences)
    }
}
