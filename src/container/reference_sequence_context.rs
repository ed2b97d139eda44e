//! Reference sequence context of a slice or container.

use std::cmp;

use crate::position::Position;

/// A single-reference context: the reference sequence and the alignment
/// interval covered so far.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Context {
    reference_sequence_id: usize,
    alignment_start: Position,
    alignment_end: Position,
}

impl Context {
    /// Returns the reference sequence ID.
    pub fn reference_sequence_id(&self) -> usize {
        self.reference_sequence_id
    }

    /// Returns the 1-based alignment start.
    pub fn alignment_start(&self) -> Position {
        self.alignment_start
    }

    /// Returns the 1-based inclusive alignment end.
    pub fn alignment_end(&self) -> Position {
        self.alignment_end
    }

    /// Returns the number of covered reference positions.
    pub fn alignment_span(&self) -> usize {
        usize::from(self.alignment_end) - usize::from(self.alignment_start) + 1
    }
}

/// The reference sequence context of a slice or container.
///
/// Within a single-reference context every mapped record's reference sequence
/// ID equals the context's; a multi-reference context admits any ID,
/// including the unmapped sentinel; an unmapped-unplaced context holds only
/// unmapped records.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReferenceSequenceContext {
    /// Single reference.
    Some(Context),
    /// Unmapped and unplaced.
    None,
    /// Multiple references.
    Many,
}

impl ReferenceSequenceContext {
    /// Creates a single-reference context.
    pub(crate) fn some(
        reference_sequence_id: usize,
        alignment_start: Position,
        alignment_end: Position,
    ) -> Self {
        Self::Some(Context {
            reference_sequence_id,
            alignment_start,
            alignment_end,
        })
    }

    /// Creates a context from one record's placement.
    pub(crate) fn from_placement(
        reference_sequence_id: Option<usize>,
        alignment_start: Option<Position>,
        alignment_end: Option<Position>,
    ) -> Self {
        match (reference_sequence_id, alignment_start, alignment_end) {
            (Some(id), Some(start), Some(end)) => Self::some(id, start, end),
            _ => Self::None,
        }
    }

    /// Returns whether this is a multi-reference context.
    pub fn is_many(&self) -> bool {
        matches!(self, Self::Many)
    }

    /// Folds one record's placement into the context.
    pub(crate) fn update(
        &mut self,
        reference_sequence_id: Option<usize>,
        alignment_start: Option<Position>,
        alignment_end: Option<Position>,
    ) {
        *self = match (*self, reference_sequence_id, alignment_start, alignment_end) {
            (Self::Some(context), Some(id), Some(start), Some(end))
                if id == context.reference_sequence_id() =>
            {
                Self::some(
                    id,
                    cmp::min(start, context.alignment_start()),
                    cmp::max(end, context.alignment_end()),
                )
            }
            (Self::Some(..), ..) => Self::Many,
            (Self::None, None, ..) => Self::None,
            (Self::None, Some(_), ..) => Self::Many,
            (Self::Many, ..) => Self::Many,
        };
    }

    /// Returns the reference sequence ID for a single-reference context.
    pub fn reference_sequence_id(&self) -> Option<usize> {
        match self {
            Self::Some(context) => Some(context.reference_sequence_id()),
            _ => None,
        }
    }
}

impl Default for ReferenceSequenceContext {
    fn default() -> Self {
        Self::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update() {
        let mut context = ReferenceSequenceContext::some(
            0,
            Position::new(8).unwrap(),
            Position::new(13).unwrap(),
        );
        context.update(Some(0), Position::new(5), Position::new(21));
        assert_eq!(
            context,
            ReferenceSequenceContext::some(0, Position::new(5).unwrap(), Position::new(21).unwrap())
        );

        let mut context = ReferenceSequenceContext::some(
            0,
            Position::new(8).unwrap(),
            Position::new(13).unwrap(),
        );
        context.update(Some(1), Position::new(5), Position::new(21));
        assert_eq!(context, ReferenceSequenceContext::Many);

        let mut context = ReferenceSequenceContext::some(
            0,
            Position::new(8).unwrap(),
            Position::new(13).unwrap(),
        );
        context.update(None, None, None);
        assert_eq!(context, ReferenceSequenceContext::Many);

        let mut context = ReferenceSequenceContext::None;
        context.update(None, None, None);
        assert_eq!(context, ReferenceSequenceContext::None);

        let mut context = ReferenceSequenceContext::None;
        context.update(Some(0), Position::new(1), Position::new(1));
        assert_eq!(context, ReferenceSequenceContext::Many);

        let mut context = ReferenceSequenceContext::Many;
        context.update(None, None, None);
        assert_eq!(context, ReferenceSequenceContext::Many);
    }

    #[test]
    fn test_alignment_span() {
        let context = ReferenceSequenceContext::some(
            0,
            Position::new(8).unwrap(),
            Position::new(13).unwrap(),
        );

        let ReferenceSequenceContext::Some(context) = context else {
            panic!("expected a single-reference context");
        };

        assert_eq!(context.alignment_span(), 6);
    }
}
