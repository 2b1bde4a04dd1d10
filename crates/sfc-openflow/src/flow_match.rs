//! Flow match criteria.

use crate::types::ETHERTYPE_NSH;
use serde::{Deserialize, Serialize};
use sfc_types::{MacAddress, NodeConnector, ServiceIndex, ServicePathId};
use std::fmt;
use std::net::Ipv4Addr;

/// Ingress port predicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InPort {
    /// The switch's local (internal) port.
    Local,
    /// A numbered port on a specific node.
    Connector(NodeConnector),
}

impl fmt::Display for InPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "LOCAL"),
            // ovs-ofctl addresses ports relative to the bridge being programmed
            Self::Connector(nc) => write!(f, "{}", nc.port),
        }
    }
}

/// Match criteria of a flow.
///
/// Unset fields are wildcards; a match with no field set matches every
/// packet. Fields are set through the `with_*` builders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlowMatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_port: Option<InPort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eth_src: Option<MacAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eth_dst: Option<MacAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eth_type: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_proto: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv4_src: Option<Ipv4Addr>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv4_dst: Option<Ipv4Addr>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tp_src: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tp_dst: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nsp: Option<ServicePathId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nsi: Option<ServiceIndex>,
}

impl FlowMatch {
    /// Creates a match-any criteria.
    pub fn any() -> Self {
        Self::default()
    }

    /// Creates an NSH match on service path and service index.
    ///
    /// The NSH EtherType is set as the prerequisite of the NSH fields.
    pub fn nsh(nsp: ServicePathId, nsi: ServiceIndex) -> Self {
        Self::any()
            .with_eth_type(ETHERTYPE_NSH)
            .with_nsp(nsp)
            .with_nsi(nsi)
    }

    /// Creates a destination MAC match.
    pub fn eth_dst(mac: MacAddress) -> Self {
        Self::any().with_eth_dst(mac)
    }

    pub fn with_in_port(mut self, in_port: InPort) -> Self {
        self.in_port = Some(in_port);
        self
    }

    pub fn with_eth_dst(mut self, mac: MacAddress) -> Self {
        self.eth_dst = Some(mac);
        self
    }

    pub fn with_eth_type(mut self, eth_type: u16) -> Self {
        self.eth_type = Some(eth_type);
        self
    }

    pub fn with_ip_proto(mut self, proto: u8) -> Self {
        self.ip_proto = Some(proto);
        self
    }

    pub fn with_ipv4_src(mut self, addr: Ipv4Addr) -> Self {
        self.ipv4_src = Some(addr);
        self
    }

    pub fn with_ipv4_dst(mut self, addr: Ipv4Addr) -> Self {
        self.ipv4_dst = Some(addr);
        self
    }

    pub fn with_tp_src(mut self, port: u16) -> Self {
        self.tp_src = Some(port);
        self
    }

    pub fn with_tp_dst(mut self, port: u16) -> Self {
        self.tp_dst = Some(port);
        self
    }

    pub fn with_nsp(mut self, nsp: ServicePathId) -> Self {
        self.nsp = Some(nsp);
        self
    }

    pub fn with_nsi(mut self, nsi: ServiceIndex) -> Self {
        self.nsi = Some(nsi);
        self
    }

    /// Returns true if no field is set.
    pub fn is_any(&self) -> bool {
        *self == Self::any()
    }

    /// Returns the set predicates as `field=value` pairs in ovs-ofctl syntax.
    pub fn predicates(&self) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(in_port) = &self.in_port {
            out.push(format!("in_port={}", in_port));
        }
        if let Some(mac) = self.eth_src {
            out.push(format!("dl_src={}", mac));
        }
        if let Some(mac) = self.eth_dst {
            out.push(format!("dl_dst={}", mac));
        }
        if let Some(eth_type) = self.eth_type {
            out.push(format!("dl_type=0x{:04x}", eth_type));
        }
        if let Some(proto) = self.ip_proto {
            out.push(format!("nw_proto={}", proto));
        }
        if let Some(addr) = self.ipv4_src {
            out.push(format!("nw_src={}", addr));
        }
        if let Some(addr) = self.ipv4_dst {
            out.push(format!("nw_dst={}", addr));
        }
        if let Some(port) = self.tp_src {
            out.push(format!("tp_src={}", port));
        }
        if let Some(port) = self.tp_dst {
            out.push(format!("tp_dst={}", port));
        }
        if let Some(nsp) = self.nsp {
            out.push(format!("nsh_spi={}", nsp));
        }
        if let Some(nsi) = self.nsi {
            out.push(format!("nsh_si={}", nsi));
        }
        out
    }
}

impl fmt::Display for FlowMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.predicates().join(","))
    }
}
