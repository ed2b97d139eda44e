//! Block content codecs.

pub(crate) mod bzip2;
pub(crate) mod gzip;
pub(crate) mod rans_4x8;

use std::io;

use crate::container::block::CompressionMethod;

/// Compresses a buffer with every candidate codec and keeps the smallest
/// output.
///
/// The candidates are gzip, bzip2, and rANS 4x8 order-0 and order-1; ties go
/// to the faster decoder (gzip, then rANS, then bzip2). Order-1 needs at
/// least four bytes of input.
pub(crate) fn compress_best(src: &[u8]) -> io::Result<(CompressionMethod, Vec<u8>)> {
    let mut best = (CompressionMethod::Gzip, gzip::encode(src)?);

    let mut consider = |method: CompressionMethod, buf: Vec<u8>| {
        if buf.len() < best.1.len() {
            best = (method, buf);
        }
    };

    consider(
        CompressionMethod::Rans4x8,
        rans_4x8::encode(rans_4x8::Order::Zero, src)?,
    );

    if src.len() >= 4 {
        consider(
            CompressionMethod::Rans4x8,
            rans_4x8::encode(rans_4x8::Order::One, src)?,
        );
    }

    consider(CompressionMethod::Bzip2, bzip2::encode(src)?);

    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compress_best_prefers_gzip_for_incompressible_data() -> io::Result<()> {
        // Pseudo-random bytes: deflate falls back to stored blocks, which
        // still beat the other candidates by a wide margin.
        let src: Vec<u8> = (0..200u32).map(|i| ((i * 37 + 11) % 251) as u8).collect();

        let (method, _) = compress_best(&src)?;
        assert_eq!(method, CompressionMethod::Gzip);

        Ok(())
    }

    #[test]
    fn test_compress_best_prefers_gzip_for_text() -> io::Result<()> {
        let src = b"the quick brown fox jumps over the lazy dog. ".repeat(100);

        let (method, _) = compress_best(&src)?;
        assert_eq!(method, CompressionMethod::Gzip);

        Ok(())
    }

    #[test]
    fn test_compress_best_prefers_rans_for_skewed_data() -> io::Result<()> {
        // A heavily skewed, repeat-free base distribution: entropy coding
        // wins where dictionary matching cannot.
        let mut state = 1u64;
        let src: Vec<u8> = (0..2000)
            .map(|_| {
                state = (state * 1103515245 + 12345) & 0x7fff_ffff;
                match state % 100 {
                    0..90 => b'A',
                    90..94 => b'C',
                    94..97 => b'G',
                    97..99 => b'T',
                    _ => b'N',
                }
            })
            .collect();

        let (method, _) = compress_best(&src)?;
        assert_eq!(method, CompressionMethod::Rans4x8);

        Ok(())
    }
}
