//! Substitution matrix.

use std::{cmp::Reverse, error, fmt};

/// A reference or read base as the substitution matrix sees it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Base {
    A,
    C,
    G,
    T,
    N,
}

/// The five bases in canonical order, the tie-break order for matrix rows.
pub(crate) const BASES: [Base; 5] = [Base::A, Base::C, Base::G, Base::T, Base::N];

impl Base {
    fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::C => 1,
            Self::G => 2,
            Self::T => 3,
            Self::N => 4,
        }
    }
}

impl From<Base> for u8 {
    fn from(base: Base) -> Self {
        match base {
            Base::A => b'A',
            Base::C => b'C',
            Base::G => b'G',
            Base::T => b'T',
            Base::N => b'N',
        }
    }
}

/// An error returned when a byte is not an uppercase ACGTN base.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct TryFromByteError(pub u8);

impl error::Error for TryFromByteError {}

impl fmt::Display for TryFromByteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid base: {:#04x}", self.0)
    }
}

impl TryFrom<u8> for Base {
    type Error = TryFromByteError;

    fn try_from(b: u8) -> Result<Self, Self::Error> {
        match b {
            b'A' => Ok(Self::A),
            b'C' => Ok(Self::C),
            b'G' => Ok(Self::G),
            b'T' => Ok(Self::T),
            b'N' => Ok(Self::N),
            _ => Err(TryFromByteError(b)),
        }
    }
}

/// Substitution frequency counts over all records of a container.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Histogram([[u64; 5]; 5]);

impl Histogram {
    /// Records one observed substitution.
    pub fn hit(&mut self, reference_base: Base, read_base: Base) {
        self.0[reference_base.index()][read_base.index()] += 1;
    }
}

/// A 5×4 substitution matrix.
///
/// Row `r` lists the four bases other than `r`, ordered by descending
/// substitution frequency; a base's position in its row is its 2-bit code.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct SubstitutionMatrix {
    substitutions: [[Base; 4]; 5],
}

impl SubstitutionMatrix {
    /// Returns the 2-bit code of a substitution.
    pub fn find_code(&self, reference_base: Base, read_base: Base) -> u8 {
        let row = &self.substitutions[reference_base.index()];

        row.iter()
            .position(|&base| base == read_base)
            .map(|i| i as u8)
            .unwrap_or_default()
    }

    /// Returns the read base a code decodes to for the given reference base.
    pub fn get(&self, reference_base: Base, code: u8) -> Base {
        self.substitutions[reference_base.index()][usize::from(code & 0x03)]
    }
}

impl Default for SubstitutionMatrix {
    fn default() -> Self {
        Self {
            substitutions: [
                [Base::C, Base::G, Base::T, Base::N],
                [Base::A, Base::G, Base::T, Base::N],
                [Base::A, Base::C, Base::T, Base::N],
                [Base::A, Base::C, Base::G, Base::N],
                [Base::A, Base::C, Base::G, Base::T],
            ],
        }
    }
}

impl From<Histogram> for SubstitutionMatrix {
    fn from(histogram: Histogram) -> Self {
        let mut matrix = Self::default();

        for (r, reference_base) in BASES.into_iter().enumerate() {
            let mut alternates: Vec<_> = BASES
                .into_iter()
                .filter(|&base| base != reference_base)
                .collect();

            // Descending frequency, ties in canonical base order.
            alternates
                .sort_by_key(|&base| (Reverse(histogram.0[r][base.index()]), base.index()));

            matrix.substitutions[r].copy_from_slice(&alternates);
        }

        matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_histogram_for_substitution_matrix() {
        let mut histogram = Histogram::default();

        // ref A: T seen thrice, G twice, C once.
        for _ in 0..3 {
            histogram.hit(Base::A, Base::T);
        }
        for _ in 0..2 {
            histogram.hit(Base::A, Base::G);
        }
        histogram.hit(Base::A, Base::C);

        // ref C: G and T tie; canonical order breaks the tie.
        histogram.hit(Base::C, Base::G);
        histogram.hit(Base::C, Base::T);

        let matrix = SubstitutionMatrix::from(histogram);

        assert_eq!(
            matrix.substitutions[0],
            [Base::T, Base::G, Base::C, Base::N]
        );
        assert_eq!(
            matrix.substitutions[1],
            [Base::G, Base::T, Base::A, Base::N]
        );
        // Unobserved rows keep the canonical order.
        assert_eq!(
            matrix.substitutions[4],
            [Base::A, Base::C, Base::G, Base::T]
        );
    }

    #[test]
    fn test_find_code_and_get() {
        let matrix = SubstitutionMatrix::default();

        assert_eq!(matrix.find_code(Base::A, Base::C), 0);
        assert_eq!(matrix.find_code(Base::A, Base::N), 3);
        assert_eq!(matrix.find_code(Base::T, Base::G), 2);

        assert_eq!(matrix.get(Base::A, 0), Base::C);
        assert_eq!(matrix.get(Base::T, 2), Base::G);
        assert_eq!(matrix.get(Base::N, 3), Base::T);
    }
}
