//! Scalar types shared by matches and actions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Flow table index within the switch pipeline.
pub type TableId = u8;

/// Flow priority (higher value wins).
pub type FlowPriority = u16;

/// EtherType of an NSH packet (RFC 8300).
pub const ETHERTYPE_NSH: u16 = 0x894f;

/// Header type pushed by an `encap` action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PacketType {
    Ethernet,
    Nsh,
}

impl fmt::Display for PacketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ethernet => write!(f, "ethernet"),
            Self::Nsh => write!(f, "nsh"),
        }
    }
}

/// NSH MD type 1 fixed context header slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MetadataSlot {
    C1,
    C2,
    C3,
    C4,
}

impl MetadataSlot {
    /// All slots in ascending order.
    pub const ALL: [MetadataSlot; 4] = [Self::C1, Self::C2, Self::C3, Self::C4];

    /// Zero-based position of the slot in the context header.
    pub const fn index(&self) -> usize {
        match self {
            Self::C1 => 0,
            Self::C2 => 1,
            Self::C3 => 2,
            Self::C4 => 3,
        }
    }

    /// OpenFlow field name (`nsh_c1` .. `nsh_c4`).
    pub const fn field_name(&self) -> &'static str {
        match self {
            Self::C1 => "nsh_c1",
            Self::C2 => "nsh_c2",
            Self::C3 => "nsh_c3",
            Self::C4 => "nsh_c4",
        }
    }
}

impl fmt::Display for MetadataSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.field_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_slots_ascending() {
        let indices: Vec<usize> = MetadataSlot::ALL.iter().map(|s| s.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert!(MetadataSlot::C1 < MetadataSlot::C4);
    }

    #[test]
    fn test_packet_type_display() {
        assert_eq!(PacketType::Nsh.to_string(), "nsh");
        assert_eq!(PacketType::Ethernet.to_string(), "ethernet");
    }
}
