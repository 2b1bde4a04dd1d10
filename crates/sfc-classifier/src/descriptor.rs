//! Chain descriptor: the rendered-path data the classifier flows encode.

use crate::error::{ClassifierError, ClassifierResult};
use serde::{Deserialize, Serialize};
use sfc_openflow::MetadataSlot;
use sfc_types::{PathId, ServiceIndex, ServicePathId};
use std::net::Ipv4Addr;
use tracing::warn;

/// NSH MD type 1 context headers. Absent slots are not written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NshMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub c1: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub c2: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub c3: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub c4: Option<u32>,
}

impl NshMetadata {
    pub fn get(&self, slot: MetadataSlot) -> Option<u32> {
        match slot {
            MetadataSlot::C1 => self.c1,
            MetadataSlot::C2 => self.c2,
            MetadataSlot::C3 => self.c3,
            MetadataSlot::C4 => self.c4,
        }
    }

    pub fn set(&mut self, slot: MetadataSlot, value: Option<u32>) {
        let field = match slot {
            MetadataSlot::C1 => &mut self.c1,
            MetadataSlot::C2 => &mut self.c2,
            MetadataSlot::C3 => &mut self.c3,
            MetadataSlot::C4 => &mut self.c4,
        };
        *field = value;
    }
}

/// Service chain data of one rendered path, as seen by the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChainDescriptor {
    /// Rendered path id.
    pub path_id: PathId,
    /// NSH service path id.
    pub nsp: ServicePathId,
    /// Service index the chain starts at.
    pub start_index: ServiceIndex,
    /// Service index of packets leaving the last service function.
    pub end_index: ServiceIndex,
    /// VXLAN tunnel destination; required by every NSH tunnel flow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tunnel_destination: Option<Ipv4Addr>,
    #[serde(default)]
    pub metadata: NshMetadata,
}

impl ChainDescriptor {
    pub fn new(
        path_id: PathId,
        nsp: ServicePathId,
        start_index: ServiceIndex,
        end_index: ServiceIndex,
    ) -> Self {
        Self {
            path_id,
            nsp,
            start_index,
            end_index,
            tunnel_destination: None,
            metadata: NshMetadata::default(),
        }
    }

    pub fn with_tunnel_destination(mut self, addr: Ipv4Addr) -> Self {
        self.tunnel_destination = Some(addr);
        self
    }

    pub fn with_metadata(mut self, slot: MetadataSlot, value: u32) -> Self {
        self.metadata.set(slot, Some(value));
        self
    }

    /// Returns the tunnel destination, failing if it is absent.
    pub fn require_tunnel_destination(&self) -> ClassifierResult<Ipv4Addr> {
        self.tunnel_destination.ok_or_else(|| {
            warn!(
                path_id = self.path_id,
                "Rejecting classifier flow: tunnel destination is required"
            );
            ClassifierError::required("tunnel destination")
        })
    }
}
