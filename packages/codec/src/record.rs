//! The per-node wire record.

use bytes::{Buf, BufMut, BytesMut};

use crate::error::{DecodeError, EncodeError};
use crate::field;
use crate::vocab::{NodeKind, Validation};

/// One node's fields as they appear on the wire, in read order.
///
/// The record carries the declared child count but not the children
/// themselves; the tree layer drives the recursion. Optional fields are
/// absent on branch-like nodes and encode as a zero length prefix.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NodeRecord {
    pub name: String,
    pub kind: NodeKind,
    pub uuid: String,
    pub description: String,
    pub datatype: Option<String>,
    pub min: Option<String>,
    pub max: Option<String>,
    pub unit: Option<String>,
    pub allowed: Vec<String>,
    pub default_value: Option<String>,
    pub validation: Validation,
    pub child_count: u8,
}

impl NodeRecord {
    /// A record with the given name and kind and everything else empty.
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        NodeRecord {
            name: name.into(),
            kind,
            ..NodeRecord::default()
        }
    }

    /// Decode one record from the front of `buf`, advancing it.
    ///
    /// Field order is fixed; the stream carries no delimiters, so a
    /// short read on any field is fatal for the whole stream.
    pub fn decode(buf: &mut impl Buf) -> Result<NodeRecord, DecodeError> {
        let name = field::get_u8_string(buf, "name")?;
        let kind = NodeKind::from_wire(&field::get_u8_string(buf, "type")?);
        let uuid = field::get_u8_string(buf, "uuid")?;
        let description = field::get_u16_string(buf, "description")?;
        let datatype = field::get_u8_opt_string(buf, "datatype")?;
        let min = field::get_u8_opt_string(buf, "min")?;
        let max = field::get_u8_opt_string(buf, "max")?;
        let unit = field::get_u8_opt_string(buf, "unit")?;

        let block = field::get_u16_string(buf, "allowed")?;
        let allowed = field::unpack_allowed(block.as_bytes())?;

        let default_value = field::get_u8_opt_string(buf, "default")?;
        let validation = Validation::from_wire(&field::get_u8_string(buf, "validate")?);
        let child_count = field::get_u8(buf, "children")?;

        Ok(NodeRecord {
            name,
            kind,
            uuid,
            description,
            datatype,
            min,
            max,
            unit,
            allowed,
            default_value,
            validation,
            child_count,
        })
    }

    /// Encode this record onto the end of `buf`.
    pub fn encode(&self, buf: &mut BytesMut) -> Result<(), EncodeError> {
        field::put_u8_string(buf, &self.name, "name")?;
        field::put_u8_string(buf, self.kind.wire_name(), "type")?;
        field::put_u8_string(buf, &self.uuid, "uuid")?;
        field::put_u16_string(buf, &self.description, "description")?;
        field::put_u8_opt_string(buf, self.datatype.as_deref(), "datatype")?;
        field::put_u8_opt_string(buf, self.min.as_deref(), "min")?;
        field::put_u8_opt_string(buf, self.max.as_deref(), "max")?;
        field::put_u8_opt_string(buf, self.unit.as_deref(), "unit")?;

        let block = field::pack_allowed(&self.allowed)?;
        if block.len() > u16::MAX as usize {
            return Err(EncodeError::FieldTooLong {
                field: "allowed",
                len: block.len(),
                max: u16::MAX as usize,
            });
        }
        buf.put_u16_le(block.len() as u16);
        buf.put_slice(&block);

        field::put_u8_opt_string(buf, self.default_value.as_deref(), "default")?;
        field::put_u8_string(buf, self.validation.wire_string(), "validate")?;
        buf.put_u8(self.child_count);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf_record() -> NodeRecord {
        NodeRecord {
            name: "Speed".to_string(),
            kind: NodeKind::Sensor,
            uuid: "1c5cd31dbf3a4c84aef1b727941e5f86".to_string(),
            description: "Vehicle speed".to_string(),
            datatype: Some("float".to_string()),
            min: Some("0".to_string()),
            max: Some("300".to_string()),
            unit: Some("km/h".to_string()),
            allowed: vec![],
            default_value: Some("0".to_string()),
            validation: Validation::ReadWrite,
            child_count: 0,
        }
    }

    #[test]
    fn leaf_roundtrip() {
        let record = leaf_record();
        let mut buf = BytesMut::new();
        record.encode(&mut buf).unwrap();
        let decoded = NodeRecord::decode(&mut buf.freeze()).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn branch_roundtrip_with_absent_fields() {
        let record = NodeRecord {
            name: "Vehicle".to_string(),
            kind: NodeKind::Branch,
            uuid: "ccc825f94139544dbfc4676b2740a41e".to_string(),
            description: "High-level vehicle data".to_string(),
            child_count: 3,
            ..NodeRecord::default()
        };
        let mut buf = BytesMut::new();
        record.encode(&mut buf).unwrap();
        let decoded = NodeRecord::decode(&mut buf.freeze()).unwrap();
        assert_eq!(decoded, record);
        assert_eq!(decoded.datatype, None);
        assert_eq!(decoded.unit, None);
    }

    #[test]
    fn allowed_values_roundtrip() {
        let mut record = leaf_record();
        record.allowed = vec!["PARK".to_string(), "DRIVE".to_string(), "R".to_string()];
        let mut buf = BytesMut::new();
        record.encode(&mut buf).unwrap();
        let decoded = NodeRecord::decode(&mut buf.freeze()).unwrap();
        assert_eq!(decoded.allowed, record.allowed);
    }

    #[test]
    fn absence_means_no_content_bytes() {
        // A minimal record: every optional field absent, empty strings
        // elsewhere. 9 u8 prefixes + 2 u16 prefixes + child count.
        let record = NodeRecord::new("", NodeKind::Unknown);
        let mut buf = BytesMut::new();
        record.encode(&mut buf).unwrap();
        assert_eq!(buf.len(), 9 + 2 * 2 + 1);
        assert!(buf.iter().all(|&b| b == 0));
    }

    #[test]
    fn wire_layout_is_stable() {
        let record = NodeRecord {
            name: "A".to_string(),
            kind: NodeKind::Sensor,
            uuid: "u1".to_string(),
            description: "d".to_string(),
            datatype: Some("int8".to_string()),
            validation: Validation::WriteOnly,
            child_count: 2,
            ..NodeRecord::default()
        };
        let mut buf = BytesMut::new();
        record.encode(&mut buf).unwrap();
        let mut expected = Vec::new();
        expected.extend_from_slice(&[1, b'A']);
        expected.extend_from_slice(&[6]);
        expected.extend_from_slice(b"sensor");
        expected.extend_from_slice(&[2, b'u', b'1']);
        expected.extend_from_slice(&[1, 0, b'd']); // u16 LE description
        expected.extend_from_slice(&[4]);
        expected.extend_from_slice(b"int8");
        expected.extend_from_slice(&[0, 0, 0]); // min, max, unit absent
        expected.extend_from_slice(&[0, 0]); // empty allowed block (u16 LE)
        expected.extend_from_slice(&[0]); // default absent
        expected.extend_from_slice(&[10]);
        expected.extend_from_slice(b"write-only");
        expected.extend_from_slice(&[2]); // child count
        assert_eq!(&buf[..], &expected[..]);
    }

    #[test]
    fn unknown_type_name_decodes_permissively() {
        let mut record = leaf_record();
        record.kind = NodeKind::Sensor;
        let mut buf = BytesMut::new();
        record.encode(&mut buf).unwrap();
        // Corrupt the type name: "sensor" -> "sensox".
        let mut bytes = buf.to_vec();
        let type_start = 1 + record.name.len() + 1;
        bytes[type_start + 5] = b'x';
        let decoded = NodeRecord::decode(&mut &bytes[..]).unwrap();
        assert_eq!(decoded.kind, NodeKind::Unknown);
    }

    #[test]
    fn truncated_record_is_fatal() {
        let record = leaf_record();
        let mut buf = BytesMut::new();
        record.encode(&mut buf).unwrap();
        let bytes = buf.freeze();
        let mut short = bytes.slice(..bytes.len() - 3);
        assert!(NodeRecord::decode(&mut short).is_err());
    }

    #[test]
    fn malformed_allowed_hex_is_fatal() {
        let mut record = leaf_record();
        record.allowed = vec!["ab".to_string()];
        let mut buf = BytesMut::new();
        record.encode(&mut buf).unwrap();
        let mut bytes = buf.to_vec();
        // The block body starts after name/type/uuid/descr/datatype/
        // min/max/unit and the block's own u16 prefix; its first two
        // bytes are the "02" hex prefix. Find and corrupt it.
        let needle = b"02ab";
        let pos = bytes
            .windows(needle.len())
            .position(|w| w == needle)
            .unwrap();
        bytes[pos] = b'z';
        let err = NodeRecord::decode(&mut &bytes[..]).unwrap_err();
        assert_eq!(err, DecodeError::BadHexLength { byte: b'z' });
    }
}
