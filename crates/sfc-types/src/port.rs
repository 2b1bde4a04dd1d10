//! Switch port identifiers.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An OpenFlow port number on a switch.
///
/// Reserved ports (`IN_PORT`, `NORMAL`, `LOCAL`) are not port numbers; they
/// are expressed by the flow primitives that reference them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortNumber(u32);

impl PortNumber {
    pub const fn new(port: u32) -> Self {
        PortNumber(port)
    }

    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for PortNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PortNumber {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>()
            .map(PortNumber)
            .map_err(|_| ParseError::InvalidPortNumber(s.to_string()))
    }
}

impl From<u32> for PortNumber {
    fn from(port: u32) -> Self {
        PortNumber(port)
    }
}

/// A port qualified by the switch node that owns it (`<node>:<port>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeConnector {
    pub node: String,
    pub port: PortNumber,
}

impl NodeConnector {
    pub fn new(node: impl Into<String>, port: PortNumber) -> Self {
        Self {
            node: node.into(),
            port,
        }
    }
}

impl fmt::Display for NodeConnector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.node, self.port)
    }
}
