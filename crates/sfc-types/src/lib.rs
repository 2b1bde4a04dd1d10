//! Common types for service function chaining on OpenFlow switches.
//!
//! This crate provides type-safe representations of the network primitives
//! shared by the classifier flow builders:
//!
//! - [`MacAddress`]: 48-bit Ethernet MAC addresses
//! - [`PortNumber`]: OpenFlow switch port numbers
//! - [`NodeConnector`]: a port qualified by the switch node that owns it
//! - [`PathId`], [`ServicePathId`], [`ServiceIndex`]: chain identifiers

mod mac;
mod port;

pub use mac::MacAddress;
pub use port::{NodeConnector, PortNumber};

/// Rendered service path identifier.
pub type PathId = u32;

/// NSH service path identifier (NSP, 24 bits on the wire).
pub type ServicePathId = u32;

/// NSH service index (NSI), also used as the hop index of a path.
pub type ServiceIndex = u8;

/// Common error type for parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid MAC address format: {0}")]
    InvalidMacAddress(String),

    #[error("invalid port number: {0}")]
    InvalidPortNumber(String),
}
