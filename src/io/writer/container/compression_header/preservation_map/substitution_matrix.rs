use std::io::{self, Write};

use crate::{
    container::{
        ReferenceSequenceContext,
        compression_header::preservation_map::substitution_matrix::{
            BASES, Histogram, SubstitutionMatrix,
        },
    },
    record::{Feature, Record},
};

/// Builds the substitution matrix from the frequencies observed across all
/// records, then stamps each substitution feature with its 2-bit code.
pub(super) fn build_substitution_matrix(
    slices: &mut [(ReferenceSequenceContext, Vec<Record>)],
) -> SubstitutionMatrix {
    let mut histogram = Histogram::default();

    for (_, records) in slices.iter() {
        for record in records {
            for feature in &record.features {
                if let Feature::Substitution {
                    reference_base,
                    read_base,
                    ..
                } = feature
                {
                    histogram.hit(*reference_base, *read_base);
                }
            }
        }
    }

    let substitution_matrix = SubstitutionMatrix::from(histogram);

    for (_, records) in slices.iter_mut() {
        for record in records {
            for feature in &mut record.features {
                if let Feature::Substitution {
                    reference_base,
                    read_base,
                    code,
                    ..
                } = feature
                {
                    *code = Some(substitution_matrix.find_code(*reference_base, *read_base));
                }
            }
        }
    }

    substitution_matrix
}

/// Writes the matrix as five packed bytes: for each reference base, the
/// 2-bit codes of its four alternates in canonical order.
pub(super) fn write_substitution_matrix<W>(
    writer: &mut W,
    substitution_matrix: &SubstitutionMatrix,
) -> io::Result<()>
where
    W: Write,
{
    let mut buf = [0u8; 5];

    for (reference_base, b) in BASES.into_iter().zip(&mut buf) {
        for alternate in BASES.into_iter().filter(|&base| base != reference_base) {
            let code = substitution_matrix.find_code(reference_base, alternate);
            *b = (*b << 2) | code;
        }
    }

    writer.write_all(&buf)
}
