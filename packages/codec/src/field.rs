//! Length-prefixed field primitives.
//!
//! Every string field on the wire is `prefix` + `bytes`, where the
//! prefix is a u8 or little-endian u16. An absent optional field is a
//! zero prefix with no content bytes at all.
//!
//! The allowed/enum block is the odd one out: the block itself carries
//! a u16 byte count, but each element inside it is prefixed by its
//! length rendered as two uppercase ASCII hex digits ("0A" = 10), not
//! a raw byte.

use bytes::{Buf, BufMut, BytesMut};

use crate::error::{DecodeError, EncodeError};

const U8_MAX: usize = u8::MAX as usize;
const U16_MAX: usize = u16::MAX as usize;

pub(crate) fn get_u8(buf: &mut impl Buf, field: &'static str) -> Result<u8, DecodeError> {
    if buf.remaining() < 1 {
        return Err(DecodeError::Truncated {
            field,
            needed: 1,
            available: 0,
        });
    }
    Ok(buf.get_u8())
}

pub(crate) fn get_u16(buf: &mut impl Buf, field: &'static str) -> Result<u16, DecodeError> {
    if buf.remaining() < 2 {
        return Err(DecodeError::Truncated {
            field,
            needed: 2,
            available: buf.remaining(),
        });
    }
    Ok(buf.get_u16_le())
}

fn get_string(buf: &mut impl Buf, len: usize, field: &'static str) -> Result<String, DecodeError> {
    if buf.remaining() < len {
        return Err(DecodeError::Truncated {
            field,
            needed: len,
            available: buf.remaining(),
        });
    }
    let bytes = buf.copy_to_bytes(len);
    String::from_utf8(bytes.to_vec()).map_err(|_| DecodeError::InvalidUtf8 { field })
}

/// Read a u8-prefixed string field.
pub(crate) fn get_u8_string(
    buf: &mut impl Buf,
    field: &'static str,
) -> Result<String, DecodeError> {
    let len = get_u8(buf, field)? as usize;
    get_string(buf, len, field)
}

/// Read a u16-prefixed string field.
pub(crate) fn get_u16_string(
    buf: &mut impl Buf,
    field: &'static str,
) -> Result<String, DecodeError> {
    let len = get_u16(buf, field)? as usize;
    get_string(buf, len, field)
}

/// Read a u8-prefixed optional field. A zero prefix means absent.
pub(crate) fn get_u8_opt_string(
    buf: &mut impl Buf,
    field: &'static str,
) -> Result<Option<String>, DecodeError> {
    let len = get_u8(buf, field)? as usize;
    if len == 0 {
        return Ok(None);
    }
    get_string(buf, len, field).map(Some)
}

/// Write a u8-prefixed string field.
pub(crate) fn put_u8_string(
    buf: &mut BytesMut,
    s: &str,
    field: &'static str,
) -> Result<(), EncodeError> {
    if s.len() > U8_MAX {
        return Err(EncodeError::FieldTooLong {
            field,
            len: s.len(),
            max: U8_MAX,
        });
    }
    buf.put_u8(s.len() as u8);
    buf.put_slice(s.as_bytes());
    Ok(())
}

/// Write a u16-prefixed string field.
pub(crate) fn put_u16_string(
    buf: &mut BytesMut,
    s: &str,
    field: &'static str,
) -> Result<(), EncodeError> {
    if s.len() > U16_MAX {
        return Err(EncodeError::FieldTooLong {
            field,
            len: s.len(),
            max: U16_MAX,
        });
    }
    buf.put_u16_le(s.len() as u16);
    buf.put_slice(s.as_bytes());
    Ok(())
}

/// Write a u8-prefixed optional field. `None` encodes as a zero prefix.
pub(crate) fn put_u8_opt_string(
    buf: &mut BytesMut,
    s: Option<&str>,
    field: &'static str,
) -> Result<(), EncodeError> {
    put_u8_string(buf, s.unwrap_or(""), field)
}

fn hex_digit_value(byte: u8) -> Result<usize, DecodeError> {
    match byte {
        b'0'..=b'9' => Ok((byte - b'0') as usize),
        b'A'..=b'F' => Ok((byte - b'A' + 10) as usize),
        _ => Err(DecodeError::BadHexLength { byte }),
    }
}

fn hex_prefix(len: usize) -> [u8; 2] {
    const DIGITS: &[u8; 16] = b"0123456789ABCDEF";
    [DIGITS[len / 16], DIGITS[len % 16]]
}

/// Pack a list of allowed values into an allowed-block body.
///
/// Each element is emitted as a two-hex-digit ASCII length followed by
/// the element bytes. The returned buffer is the block body only; the
/// caller writes the block's own u16 byte count.
pub fn pack_allowed(elements: &[String]) -> Result<Vec<u8>, EncodeError> {
    if elements.len() > U8_MAX {
        return Err(EncodeError::TooManyElements {
            field: "allowed",
            count: elements.len(),
            max: U8_MAX,
        });
    }
    let mut block = Vec::new();
    for element in elements {
        if element.len() > U8_MAX {
            return Err(EncodeError::FieldTooLong {
                field: "allowed element",
                len: element.len(),
                max: U8_MAX,
            });
        }
        block.extend_from_slice(&hex_prefix(element.len()));
        block.extend_from_slice(element.as_bytes());
    }
    Ok(block)
}

/// Unpack an allowed-block body into its list of elements.
///
/// Scans the block in `hex(len) + 2` strides. Malformed hex digits and
/// strides that run past the end of the block are fatal decode errors.
pub fn unpack_allowed(block: &[u8]) -> Result<Vec<String>, DecodeError> {
    let mut elements = Vec::new();
    let mut offset = 0;
    while offset < block.len() {
        if offset + 2 > block.len() {
            return Err(DecodeError::BadAllowedBlock {
                offset,
                len: block.len() - offset,
            });
        }
        let len = hex_digit_value(block[offset])? * 16 + hex_digit_value(block[offset + 1])?;
        let start = offset + 2;
        if start + len > block.len() {
            return Err(DecodeError::BadAllowedBlock { offset, len });
        }
        let element = std::str::from_utf8(&block[start..start + len])
            .map_err(|_| DecodeError::InvalidUtf8 { field: "allowed" })?;
        elements.push(element.to_string());
        offset = start + len;
    }
    Ok(elements)
}
