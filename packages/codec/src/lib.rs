//! vsstree-codec: Binary Wire Format for VSS Trees
//!
//! This is the byte layer of the vsstree stack. It knows how to turn a
//! single node's fields into a contiguous byte sequence and back, and
//! nothing else - no tree structure, no traversal, no queries.
//!
//! The format is not self-describing: there is no header, no magic
//! number, and no version field. The schema is implicit in the read
//! order, so every field must be read and written in exactly the order
//! defined by [`NodeRecord::decode`] and [`NodeRecord::encode`].
//!
//! # Example
//!
//! ```rust
//! use bytes::BytesMut;
//! use vsstree_codec::{NodeKind, NodeRecord};
//!
//! let mut record = NodeRecord::new("Speed", NodeKind::Sensor);
//! record.datatype = Some("float".to_string());
//! record.unit = Some("km/h".to_string());
//!
//! let mut buf = BytesMut::new();
//! record.encode(&mut buf).unwrap();
//!
//! let decoded = NodeRecord::decode(&mut buf.freeze()).unwrap();
//! assert_eq!(decoded, record);
//! ```

mod error;
mod field;
mod record;
mod vocab;

pub use error::{DecodeError, EncodeError};
pub use field::{pack_allowed, unpack_allowed};
pub use record::NodeRecord;
pub use vocab::{NodeKind, Validation};
