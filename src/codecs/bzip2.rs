use std::io::{self, Write};

use bzip2::{Compression, write::BzEncoder};

pub(crate) fn encode(src: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = BzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(src)?;
    encoder.finish()
}
