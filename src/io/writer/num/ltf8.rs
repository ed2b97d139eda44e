use std::io::{self, Write};

/// Writes an LTF-8 integer: one to nine bytes, the number of leading ones in
/// the first byte giving the total length.
pub(crate) fn write_ltf8<W>(writer: &mut W, n: i64) -> io::Result<()>
where
    W: Write,
{
    if n >> (8 - 1) == 0 {
        writer.write_all(&[n as u8])
    } else if n >> (16 - 2) == 0 {
        writer.write_all(&[0x80 | (n >> 8) as u8, n as u8])
    } else if n >> (24 - 3) == 0 {
        writer.write_all(&[0xc0 | (n >> 16) as u8, (n >> 8) as u8, n as u8])
    } else if n >> (32 - 4) == 0 {
        writer.write_all(&[
            0xe0 | (n >> 24) as u8,
            (n >> 16) as u8,
            (n >> 8) as u8,
            n as u8,
        ])
    } else if n >> (40 - 5) == 0 {
        writer.write_all(&[
            0xf0 | (n >> 32) as u8,
            (n >> 24) as u8,
            (n >> 16) as u8,
            (n >> 8) as u8,
            n as u8,
        ])
    } else if n >> (48 - 6) == 0 {
        writer.write_all(&[
            0xf8 | (n >> 40) as u8,
            (n >> 32) as u8,
            (n >> 24) as u8,
            (n >> 16) as u8,
            (n >> 8) as u8,
            n as u8,
        ])
    } else if n >> (56 - 7) == 0 {
        writer.write_all(&[
            0xfc | (n >> 48) as u8,
            (n >> 40) as u8,
            (n >> 32) as u8,
            (n >> 24) as u8,
            (n >> 16) as u8,
            (n >> 8) as u8,
            n as u8,
        ])
    } else if n >> (64 - 8) == 0 {
        writer.write_all(&[
            0xfe,
            (n >> 48) as u8,
            (n >> 40) as u8,
            (n >> 32) as u8,
            (n >> 24) as u8,
            (n >> 16) as u8,
            (n >> 8) as u8,
            n as u8,
        ])
    } else {
        writer.write_all(&[
            0xff,
            (n >> 56) as u8,
            (n >> 48) as u8,
            (n >> 40) as u8,
            (n >> 32) as u8,
            (n >> 24) as u8,
            (n >> 16) as u8,
            (n >> 8) as u8,
            n as u8,
        ])
    }
}
