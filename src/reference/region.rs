use super::{ReferenceSource, SequenceDictionary};
use crate::WriteError;

/// A cache of the most recently fetched reference bases.
///
/// The region either is uninitialized or covers a contiguous fragment of one
/// reference sequence. A source returning fewer bases than requested is
/// tolerated: the region length then reflects what was actually returned, and
/// positions past the end read as `N`.
#[derive(Debug, Default)]
pub(crate) struct ReferenceRegion {
    reference_sequence_id: Option<usize>,
    offset: usize,
    requested_len: usize,
    bases: Vec<u8>,
}

impl ReferenceRegion {
    /// Ensures the region holds the entire given reference sequence.
    pub fn fetch(
        &mut self,
        source: &mut dyn ReferenceSource,
        dictionary: &SequenceDictionary,
        reference_sequence_id: usize,
    ) -> Result<(), WriteError> {
        let (name, len) = dictionary
            .get(reference_sequence_id)
            .ok_or(WriteError::UnknownContig {
                reference_sequence_id,
            })?;

        if self.reference_sequence_id == Some(reference_sequence_id)
            && self.offset == 0
            && self.requested_len == len
        {
            return Ok(());
        }

        let bases = source
            .bases_for(name)
            .ok_or_else(|| WriteError::ReferenceUnavailable {
                name: name.to_owned(),
            })?;

        self.reference_sequence_id = Some(reference_sequence_id);
        self.offset = 0;
        self.requested_len = len;
        self.bases = bases;

        Ok(())
    }

    /// Ensures the region covers `[offset, offset + len)` of the given
    /// reference sequence.
    pub fn fetch_range(
        &mut self,
        source: &mut dyn ReferenceSource,
        dictionary: &SequenceDictionary,
        reference_sequence_id: usize,
        offset: usize,
        len: usize,
    ) -> Result<(), WriteError> {
        let (name, _) = dictionary
            .get(reference_sequence_id)
            .ok_or(WriteError::UnknownContig {
                reference_sequence_id,
            })?;

        if self.reference_sequence_id == Some(reference_sequence_id)
            && self.offset == offset
            && self.requested_len == len
        {
            return Ok(());
        }

        let bases = source
            .bases_for_range(name, offset, len)
            .ok_or_else(|| WriteError::ReferenceUnavailable {
                name: name.to_owned(),
            })?;

        self.reference_sequence_id = Some(reference_sequence_id);
        self.offset = offset;
        self.requested_len = len;
        self.bases = bases;

        Ok(())
    }

    /// Returns the base at the 0-based position on the reference sequence.
    ///
    /// Positions outside the cached region read as `N`.
    pub fn base(&self, position: usize) -> u8 {
        position
            .checked_sub(self.offset)
            .and_then(|i| self.bases.get(i))
            .copied()
            .unwrap_or(b'N')
    }

    /// Returns the cached bases covering `[start, start + len)`, clipped to
    /// what is available.
    pub fn bases_in(&self, start: usize, len: usize) -> &[u8] {
        let i = start.saturating_sub(self.offset).min(self.bases.len());
        let j = i.saturating_add(len).min(self.bases.len());
        &self.bases[i..j]
    }

    /// Returns the number of cached bases.
    pub fn len(&self) -> usize {
        self.bases.len()
    }
}
