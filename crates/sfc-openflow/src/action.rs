//! Flow actions and ordered action lists.
//!
//! OpenFlow applies the actions of an apply-actions instruction in the
//! order given by each action's `order` index. [`ActionList`] is the only
//! way to obtain [`OrderedAction`] values and assigns the index on append,
//! so a list always carries the indices `0..len` in position order.

use crate::types::{MetadataSlot, PacketType};
use serde::{Deserialize, Serialize};
use sfc_types::{MacAddress, PortNumber, ServiceIndex, ServicePathId};
use std::fmt;
use std::net::Ipv4Addr;

/// Target of an output action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputPort {
    /// A numbered switch port.
    Port(PortNumber),
    /// Send back out of the port the packet arrived on.
    InPort,
    /// Hand the packet to the switch's normal L2/L3 processing.
    Normal,
}

impl fmt::Display for OutputPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Port(port) => write!(f, "{}", port),
            Self::InPort => write!(f, "IN_PORT"),
            Self::Normal => write!(f, "NORMAL"),
        }
    }
}

impl From<PortNumber> for OutputPort {
    fn from(port: PortNumber) -> Self {
        Self::Port(port)
    }
}

/// Field written by a set-field action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetField {
    Nsp(ServicePathId),
    Nsi(ServiceIndex),
    NshMetadata { slot: MetadataSlot, value: u32 },
    EthDst(MacAddress),
}

impl fmt::Display for SetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nsp(nsp) => write!(f, "set_field:{}->nsh_spi", nsp),
            Self::Nsi(nsi) => write!(f, "set_field:{}->nsh_si", nsi),
            Self::NshMetadata { slot, value } => write!(f, "set_field:0x{:08x}->{}", value, slot),
            Self::EthDst(mac) => write!(f, "set_field:{}->eth_dst", mac),
        }
    }
}

/// A single flow action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Push a header of the given type.
    Encap(PacketType),
    /// Pop the outermost header.
    Decap,
    SetField(SetField),
    /// Set the IPv4 destination of the VXLAN tunnel the packet leaves on.
    SetTunnelIpv4Dst(Ipv4Addr),
    Output(OutputPort),
}

impl Action {
    pub fn encap(packet_type: PacketType) -> Self {
        Self::Encap(packet_type)
    }

    pub fn decap() -> Self {
        Self::Decap
    }

    pub fn set_nsp(nsp: ServicePathId) -> Self {
        Self::SetField(SetField::Nsp(nsp))
    }

    pub fn set_nsi(nsi: ServiceIndex) -> Self {
        Self::SetField(SetField::Nsi(nsi))
    }

    pub fn set_nsh_metadata(slot: MetadataSlot, value: u32) -> Self {
        Self::SetField(SetField::NshMetadata { slot, value })
    }

    pub fn set_eth_dst(mac: MacAddress) -> Self {
        Self::SetField(SetField::EthDst(mac))
    }

    pub fn set_tunnel_ipv4_dst(addr: Ipv4Addr) -> Self {
        Self::SetTunnelIpv4Dst(addr)
    }

    pub fn output(port: impl Into<OutputPort>) -> Self {
        Self::Output(port.into())
    }

    pub fn output_in_port() -> Self {
        Self::Output(OutputPort::InPort)
    }

    pub fn normal() -> Self {
        Self::Output(OutputPort::Normal)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encap(packet_type) => write!(f, "encap({})", packet_type),
            Self::Decap => write!(f, "decap()"),
            Self::SetField(field) => write!(f, "{}", field),
            Self::SetTunnelIpv4Dst(addr) => write!(f, "set_field:{}->tun_dst", addr),
            Self::Output(port) => write!(f, "output:{}", port),
        }
    }
}

/// An action together with its execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct OrderedAction {
    order: u32,
    action: Action,
}

impl OrderedAction {
    pub fn order(&self) -> u32 {
        self.order
    }

    pub fn action(&self) -> &Action {
        &self.action
    }
}

/// Append-only list of actions with contiguous order indices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ActionList(Vec<OrderedAction>);

impl ActionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an action, assigning it the next order index.
    pub fn push(&mut self, action: Action) -> &mut Self {
        let order = self.0.len() as u32;
        self.0.push(OrderedAction { order, action });
        self
    }

    /// Consuming form of [`ActionList::push`].
    pub fn with(mut self, action: Action) -> Self {
        self.push(action);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[OrderedAction] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &OrderedAction> {
        self.0.iter()
    }

    /// Returns the bare actions in order.
    pub fn actions(&self) -> Vec<Action> {
        self.0.iter().map(|a| a.action).collect()
    }
}

impl Extend<Action> for ActionList {
    fn extend<I: IntoIterator<Item = Action>>(&mut self, iter: I) {
        for action in iter {
            self.push(action);
        }
    }
}

impl FromIterator<Action> for ActionList {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        let mut list = ActionList::new();
        list.extend(iter);
        list
    }
}

impl fmt::Display for ActionList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.0.iter().map(|a| a.action.to_string()).collect();
        write!(f, "{}", rendered.join(","))
    }
}
