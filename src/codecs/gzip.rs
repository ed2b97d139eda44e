use std::io::{self, Write};

use flate2::{Compression, write::GzEncoder};

pub(crate) fn encode(src: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(src)?;
    encoder.finish()
}
