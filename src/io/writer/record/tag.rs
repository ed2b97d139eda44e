//! Tag value serialization.

use crate::{
    WriteError,
    alignment::data::{Array, Value},
};

/// Appends a tag value in its binary (BAM) form.
///
/// Strings and hex values are NUL-terminated; arrays carry a subtype byte
/// and a little-endian element count.
pub(crate) fn write_value(dst: &mut Vec<u8>, tag: [u8; 2], value: &Value) -> Result<(), WriteError> {
    match value {
        Value::Character(c) => dst.push(*c),
        Value::Int8(n) => dst.push(*n as u8),
        Value::UInt8(n) => dst.push(*n),
        Value::Int16(n) => dst.extend(n.to_le_bytes()),
        Value::UInt16(n) => dst.extend(n.to_le_bytes()),
        Value::Int32(n) => dst.extend(n.to_le_bytes()),
        Value::UInt32(n) => dst.extend(n.to_le_bytes()),
        Value::Float(n) => dst.extend(n.to_le_bytes()),
        Value::String(s) | Value::Hex(s) => {
            if s.contains(&0x00) {
                return Err(WriteError::EncodingFailure { tag });
            }

            dst.extend_from_slice(s);
            dst.push(0x00);
        }
        Value::Array(array) => {
            let n = u32::try_from(array.len()).map_err(|_| WriteError::EncodingFailure { tag })?;

            dst.push(array.subtype());
            dst.extend(n.to_le_bytes());

            match array {
                Array::Int8(values) => dst.extend(values.iter().map(|&n| n as u8)),
                Array::UInt8(values) => dst.extend_from_slice(values),
                Array::Int16(values) => {
                    for n in values {
                        dst.extend(n.to_le_bytes());
                    }
                }
                Array::UInt16(values) => {
                    for n in values {
                        dst.extend(n.to_le_bytes());
                    }
                }
                Array::Int32(values) => {
                    for n in values {
                        dst.extend(n.to_le_bytes());
                    }
                }
                Array::UInt32(values) => {
                    for n in values {
                        dst.extend(n.to_le_bytes());
                    }
                }
                Array::Float(values) => {
                    for n in values {
                        dst.extend(n.to_le_bytes());
                    }
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_value() -> Result<(), WriteError> {
        fn t(value: &Value, expected: &[u8]) -> Result<(), WriteError> {
            let mut buf = Vec::new();
            write_value(&mut buf, [b'X', b'X'], value)?;
            assert_eq!(buf, expected, "value = {value:?}");
            Ok(())
        }

        t(&Value::Character(b'q'), &[b'q'])?;
        t(&Value::Int8(-2), &[0xfe])?;
        t(&Value::UInt8(8), &[0x08])?;
        t(&Value::Int16(-256), &[0x00, 0xff])?;
        t(&Value::UInt16(0x1234), &[0x34, 0x12])?;
        t(&Value::Int32(-2), &[0xfe, 0xff, 0xff, 0xff])?;
        t(&Value::UInt32(0x0a0b0c0d), &[0x0d, 0x0c, 0x0b, 0x0a])?;
        t(&Value::Float(1.0), &[0x00, 0x00, 0x80, 0x3f])?;
        t(&Value::String("ndls".into()), &[b'n', b'd', b'l', b's', 0x00])?;
        t(
            &Value::Array(Array::UInt16(vec![1, 2])),
            &[b'S', 0x02, 0x00, 0x00, 0x00, 0x01, 0x00, 0x02, 0x00],
        )?;

        Ok(())
    }

    #[test]
    fn test_write_value_rejects_embedded_nul() {
        let mut buf = Vec::new();
        let value = Value::String(bstr::BString::from(&b"n\x00dls"[..]));

        assert!(matches!(
            write_value(&mut buf, [b'X', b'Z'], &value),
            Err(WriteError::EncodingFailure { tag: [b'X', b'Z'] })
        ));
    }
}
