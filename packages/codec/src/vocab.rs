//! Wire vocabulary: node kinds and validation levels.

/// The tagged variant of a node.
///
/// Serialized on the wire as its lowercase name. Unrecognized names
/// decode to [`NodeKind::Unknown`] rather than failing, to tolerate
/// minor format drift between producer generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NodeKind {
    #[default]
    Branch,
    Struct,
    Sensor,
    Actuator,
    Attribute,
    Property,
    Unknown,
}

impl NodeKind {
    /// Parse a wire name. Unrecognized names map to `Unknown`.
    pub fn from_wire(name: &str) -> NodeKind {
        match name {
            "branch" => NodeKind::Branch,
            "struct" => NodeKind::Struct,
            "sensor" => NodeKind::Sensor,
            "actuator" => NodeKind::Actuator,
            "attribute" => NodeKind::Attribute,
            "property" => NodeKind::Property,
            _ => {
                log::warn!("unknown node type {:?}, decoding as Unknown", name);
                NodeKind::Unknown
            }
        }
    }

    /// The name written to the wire. `Unknown` has no name and is
    /// written as an empty string.
    pub fn wire_name(self) -> &'static str {
        match self {
            NodeKind::Branch => "branch",
            NodeKind::Struct => "struct",
            NodeKind::Sensor => "sensor",
            NodeKind::Actuator => "actuator",
            NodeKind::Attribute => "attribute",
            NodeKind::Property => "property",
            NodeKind::Unknown => "",
        }
    }

    /// Branch-like kinds carry no leaf metadata and may have children.
    pub fn is_branch_like(self) -> bool {
        matches!(self, NodeKind::Branch | NodeKind::Struct)
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Unknown => write!(f, "unknown"),
            _ => write!(f, "{}", self.wire_name()),
        }
    }
}

/// Access-control classification of a node.
///
/// Wire values are 0, 1, 2, 11 and 12; the +consent variants add 10 to
/// the base level. On the wire the level is a string such as
/// `"read-write"` or `"write-only+consent"`; an empty or unrecognized
/// string decodes to `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Validation {
    #[default]
    None,
    WriteOnly,
    ReadWrite,
    WriteOnlyConsent,
    ReadWriteConsent,
}

/// Precedence matrix, indexed by [`Validation::matrix_index`] of both
/// operands. Read-write dominates write-only, and +consent dominates
/// no consent. Symmetric and idempotent.
const VALIDATION_MATRIX: [[Validation; 5]; 5] = {
    use Validation::*;
    [
        [None, WriteOnly, ReadWrite, WriteOnlyConsent, ReadWriteConsent],
        [WriteOnly, WriteOnly, ReadWrite, WriteOnlyConsent, ReadWriteConsent],
        [ReadWrite, ReadWrite, ReadWrite, ReadWriteConsent, ReadWriteConsent],
        [
            WriteOnlyConsent,
            WriteOnlyConsent,
            ReadWriteConsent,
            WriteOnlyConsent,
            ReadWriteConsent,
        ],
        [
            ReadWriteConsent,
            ReadWriteConsent,
            ReadWriteConsent,
            ReadWriteConsent,
            ReadWriteConsent,
        ],
    ]
};

impl Validation {
    /// The numeric wire value: 0, 1, 2, 11 or 12.
    pub fn as_u8(self) -> u8 {
        match self {
            Validation::None => 0,
            Validation::WriteOnly => 1,
            Validation::ReadWrite => 2,
            Validation::WriteOnlyConsent => 11,
            Validation::ReadWriteConsent => 12,
        }
    }

    /// Parse a numeric value. Values other than the five defined ones
    /// map to `None` (permissive).
    pub fn from_u8(value: u8) -> Validation {
        match value {
            1 => Validation::WriteOnly,
            2 => Validation::ReadWrite,
            11 => Validation::WriteOnlyConsent,
            12 => Validation::ReadWriteConsent,
            _ => Validation::None,
        }
    }

    /// Parse the wire string form. Matching is by substring, the same
    /// way every historical reader did it; anything that mentions
    /// neither base level decodes to `None`.
    pub fn from_wire(s: &str) -> Validation {
        let base = if s.contains("write-only") {
            1
        } else if s.contains("read-write") {
            2
        } else {
            0
        };
        let consent = if s.contains("consent") { 10 } else { 0 };
        Validation::from_u8(base + consent)
    }

    /// The string written to the wire. `None` is written as empty.
    pub fn wire_string(self) -> &'static str {
        match self {
            Validation::None => "",
            Validation::WriteOnly => "write-only",
            Validation::ReadWrite => "read-write",
            Validation::WriteOnlyConsent => "write-only+consent",
            Validation::ReadWriteConsent => "read-write+consent",
        }
    }

    fn matrix_index(self) -> usize {
        match self {
            Validation::None => 0,
            Validation::WriteOnly => 1,
            Validation::ReadWrite => 2,
            Validation::WriteOnlyConsent => 3,
            Validation::ReadWriteConsent => 4,
        }
    }

    /// Combine two levels under the precedence matrix.
    pub fn combine(self, other: Validation) -> Validation {
        VALIDATION_MATRIX[self.matrix_index()][other.matrix_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_wire_roundtrip() {
        for kind in [
            NodeKind::Branch,
            NodeKind::Struct,
            NodeKind::Sensor,
            NodeKind::Actuator,
            NodeKind::Attribute,
            NodeKind::Property,
        ] {
            assert_eq!(NodeKind::from_wire(kind.wire_name()), kind);
        }
    }

    #[test]
    fn unknown_kind_is_permissive() {
        assert_eq!(NodeKind::from_wire("rbranch"), NodeKind::Unknown);
        assert_eq!(NodeKind::from_wire(""), NodeKind::Unknown);
        assert_eq!(NodeKind::Unknown.wire_name(), "");
    }

    #[test]
    fn branch_like_kinds() {
        assert!(NodeKind::Branch.is_branch_like());
        assert!(NodeKind::Struct.is_branch_like());
        assert!(!NodeKind::Sensor.is_branch_like());
        assert!(!NodeKind::Actuator.is_branch_like());
        assert!(!NodeKind::Attribute.is_branch_like());
        assert!(!NodeKind::Property.is_branch_like());
    }

    #[test]
    fn validation_wire_roundtrip() {
        for v in [
            Validation::None,
            Validation::WriteOnly,
            Validation::ReadWrite,
            Validation::WriteOnlyConsent,
            Validation::ReadWriteConsent,
        ] {
            assert_eq!(Validation::from_wire(v.wire_string()), v);
            assert_eq!(Validation::from_u8(v.as_u8()), v);
        }
    }

    #[test]
    fn validation_unrecognized_is_none() {
        assert_eq!(Validation::from_wire(""), Validation::None);
        assert_eq!(Validation::from_wire("read-only"), Validation::None);
        assert_eq!(Validation::from_u8(7), Validation::None);
    }

    #[test]
    fn validation_consent_without_base_is_none() {
        // consent alone adds 10 to base 0, which is not a defined value
        assert_eq!(Validation::from_wire("consent"), Validation::None);
    }

    #[test]
    fn combine_priorities() {
        // write-only + read-write+consent => read-write+consent
        assert_eq!(
            Validation::WriteOnly.combine(Validation::ReadWriteConsent),
            Validation::ReadWriteConsent
        );
        assert_eq!(
            Validation::None.combine(Validation::None),
            Validation::None
        );
        assert_eq!(
            Validation::ReadWrite.combine(Validation::WriteOnlyConsent),
            Validation::ReadWriteConsent
        );
    }

    #[test]
    fn combine_is_symmetric_and_idempotent() {
        let all = [
            Validation::None,
            Validation::WriteOnly,
            Validation::ReadWrite,
            Validation::WriteOnlyConsent,
            Validation::ReadWriteConsent,
        ];
        for a in all {
            assert_eq!(a.combine(a), a);
            for b in all {
                assert_eq!(a.combine(b), b.combine(a));
            }
        }
    }
}
