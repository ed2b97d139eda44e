use std::io::{self, Write};

use crate::{FileDefinition, MAGIC_NUMBER};

/// Writes the 26-byte file definition: magic number, format version, and
/// file ID.
pub(crate) fn write_file_definition<W>(
    writer: &mut W,
    file_definition: &FileDefinition,
) -> io::Result<()>
where
    W: Write,
{
    writer.write_all(&MAGIC_NUMBER)?;

    let version = file_definition.version();
    writer.write_all(&[version.major(), version.minor()])?;

    writer.write_all(file_definition.file_id())?;

    Ok(())
}
