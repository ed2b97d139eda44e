//! Wire integer encodings.

mod itf8;
mod ltf8;

pub(crate) use self::{
    itf8::{itf8_size_of, write_itf8},
    ltf8::write_ltf8,
};

use std::io::{self, Write};

pub(crate) fn write_u8<W>(writer: &mut W, n: u8) -> io::Result<()>
where
    W: Write,
{
    writer.write_all(&[n])
}

pub(crate) fn write_i32_le<W>(writer: &mut W, n: i32) -> io::Result<()>
where
    W: Write,
{
    writer.write_all(&n.to_le_bytes())
}

pub(crate) fn write_u32_le<W>(writer: &mut W, n: u32) -> io::Result<()>
where
    W: Write,
{
    writer.write_all(&n.to_le_bytes())
}
