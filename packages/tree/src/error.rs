//! Error types for the tree layer.

use vsstree_codec::{DecodeError, EncodeError};

/// Errors raised while loading or storing a tree.
///
/// A failed load never yields a partial tree; the caller gets exactly
/// one of a complete `Tree` or an error.
#[derive(Debug)]
pub enum TreeError {
    /// I/O failure opening, reading or writing the byte source/sink.
    Io(std::io::Error),

    /// The codec rejected the stream.
    Decode(DecodeError),

    /// The codec rejected a field while serializing.
    Encode(EncodeError),

    /// The stream decoded to a complete tree with bytes left over,
    /// which means a length prefix upstream was wrong.
    TrailingBytes { remaining: usize },
}

impl std::fmt::Display for TreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeError::Io(e) => write!(f, "io error: {}", e),
            TreeError::Decode(e) => write!(f, "decode error: {}", e),
            TreeError::Encode(e) => write!(f, "encode error: {}", e),
            TreeError::TrailingBytes { remaining } => {
                write!(f, "{} trailing bytes after root subtree", remaining)
            }
        }
    }
}

impl std::error::Error for TreeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TreeError::Io(e) => Some(e),
            TreeError::Decode(e) => Some(e),
            TreeError::Encode(e) => Some(e),
            TreeError::TrailingBytes { .. } => None,
        }
    }
}

impl From<std::io::Error> for TreeError {
    fn from(e: std::io::Error) -> Self {
        TreeError::Io(e)
    }
}

impl From<DecodeError> for TreeError {
    fn from(e: DecodeError) -> Self {
        TreeError::Decode(e)
    }
}

impl From<EncodeError> for TreeError {
    fn from(e: EncodeError) -> Self {
        TreeError::Encode(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn display_and_source() {
        let e = TreeError::TrailingBytes { remaining: 7 };
        assert!(format!("{}", e).contains("7 trailing bytes"));
        assert!(StdError::source(&e).is_none());

        let e: TreeError = DecodeError::InvalidUtf8 { field: "name" }.into();
        assert!(format!("{}", e).contains("decode error"));
        assert!(StdError::source(&e).is_some());

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let e: TreeError = io.into();
        assert!(matches!(e, TreeError::Io(_)));
    }
}
