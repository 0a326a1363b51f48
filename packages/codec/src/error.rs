//! Error types for the wire format layer.
//!
//! Errors at this level are byte-level only. Structural errors like an
//! unsatisfiable child count belong to the tree layer.

/// Errors raised while decoding a node from a byte stream.
///
/// The format has no resynchronization mechanism, so every variant here
/// is fatal for the stream being decoded: once a length prefix cannot
/// be satisfied the remainder of the stream is unusable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The stream ended before a declared field length was satisfied.
    Truncated {
        field: &'static str,
        needed: usize,
        available: usize,
    },

    /// A string field does not contain valid UTF-8.
    InvalidUtf8 { field: &'static str },

    /// An allowed-block element length prefix contains a byte that is
    /// not an uppercase ASCII hex digit.
    BadHexLength { byte: u8 },

    /// An allowed-block element stride runs past the end of the block.
    BadAllowedBlock { offset: usize, len: usize },
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::Truncated {
                field,
                needed,
                available,
            } => {
                write!(
                    f,
                    "truncated stream: field '{}' needs {} bytes, {} available",
                    field, needed, available
                )
            }
            DecodeError::InvalidUtf8 { field } => {
                write!(f, "field '{}' is not valid UTF-8", field)
            }
            DecodeError::BadHexLength { byte } => {
                write!(
                    f,
                    "allowed-block length prefix contains non-hex byte 0x{:02x}",
                    byte
                )
            }
            DecodeError::BadAllowedBlock { offset, len } => {
                write!(
                    f,
                    "allowed-block element at offset {} declares {} bytes past end of block",
                    offset, len
                )
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Errors raised while encoding a node to a byte stream.
///
/// Every length prefix in the format is fixed-width, so oversized
/// fields are rejected outright rather than silently truncated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// A field is longer than its length prefix can express.
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    /// A list has more elements than its count byte can express.
    TooManyElements {
        field: &'static str,
        count: usize,
        max: usize,
    },
}

impl std::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodeError::FieldTooLong { field, len, max } => {
                write!(
                    f,
                    "field '{}' is {} bytes, maximum is {}",
                    field, len, max
                )
            }
            EncodeError::TooManyElements { field, count, max } => {
                write!(
                    f,
                    "field '{}' has {} elements, maximum is {}",
                    field, count, max
                )
            }
        }
    }
}

impl std::error::Error for EncodeError {}
