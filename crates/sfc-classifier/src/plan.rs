//! Classifier plan files.
//!
//! A plan lists the classifier flows wanted for one switch as a sequence of
//! requests, each naming a builder and its arguments:
//!
//! ```yaml
//! flows:
//!   - kind: table_miss
//!   - kind: nsh_out
//!     flow_key: out1
//!     match: { eth_type: 2048, tp_dst: 80 }
//!     chain: { path_id: 21, nsp: 21, start_index: 255, end_index: 252,
//!              tunnel_destination: 10.0.0.2 }
//!     out_port: 5
//!   - kind: mac_chain_in
//!     node: openflow:1
//!     flow_key: mc3
//!     out_port: 7
//!     gateway_mac: aa:bb:cc:dd:ee:ff
//!     path_id: 7
//!     start_index: 3
//! ```
//!
//! Plans are YAML (`.yaml`/`.yml`) or JSON (`.json`).

use crate::bootstrap::{init_classifier_table, init_local_input_flow, init_local_output_flow};
use crate::descriptor::ChainDescriptor;
use crate::error::{ClassifierError, ClassifierResult};
use crate::mac_chain::{
    create_classifier_mac_chaining_relay_flow, create_mac_chain_classifier_in_flow,
    create_mac_chain_classifier_out_flow,
};
use crate::nsh::{
    create_classifier_in_flow, create_classifier_out_flow, create_classifier_relay_flow,
};
use crate::vmac::VirtualMacTable;
use serde::Deserialize;
use sfc_openflow::{FlowEntry, FlowMatch, TableId};
use sfc_types::{MacAddress, PathId, PortNumber, ServiceIndex};
use std::borrow::Cow;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Result type alias for plan operations.
pub type PlanResult<T> = Result<T, PlanError>;

/// Errors raised while loading or building a plan.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Failed to read plan '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported plan format '{}' (expected .yaml, .yml or .json)", .path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("Invalid JSON plan: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML plan: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Flow request #{index} rejected: {source}")]
    Flow {
        index: usize,
        #[source]
        source: ClassifierError,
    },

    #[error("Duplicate flow '{id}' in table {table}")]
    DuplicateFlow { table: TableId, id: String },
}

/// A port given either as a number or as the string a rendered path carries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PortArg {
    Number(u32),
    Text(String),
}

impl PortArg {
    pub fn as_str(&self) -> Cow<'_, str> {
        match self {
            Self::Number(port) => Cow::Owned(port.to_string()),
            Self::Text(port) => Cow::Borrowed(port),
        }
    }
}

/// A single flow request of a plan.
///
/// Unknown fields are rejected, and the classification match of the `out`
/// requests must be given explicitly.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum FlowRequest {
    TableMiss {},
    LocalOutput {
        out_port: PortNumber,
    },
    LocalInput {
        node: String,
        in_port: PortNumber,
    },
    NshOut {
        flow_key: String,
        #[serde(rename = "match")]
        flow_match: FlowMatch,
        chain: ChainDescriptor,
        #[serde(default)]
        out_port: Option<PortNumber>,
    },
    NshIn {
        flow_key: String,
        chain: ChainDescriptor,
        #[serde(default)]
        out_port: Option<PortNumber>,
    },
    NshRelay {
        flow_key: String,
        chain: ChainDescriptor,
    },
    MacChainOut {
        node: String,
        flow_key: String,
        #[serde(rename = "match")]
        flow_match: FlowMatch,
        out_port: PortArg,
        path_id: PathId,
        start_index: ServiceIndex,
    },
    MacChainRelay {
        node: String,
        flow_key: String,
        out_port: PortArg,
        path_id: PathId,
        start_index: ServiceIndex,
        last_index: ServiceIndex,
    },
    MacChainIn {
        node: String,
        flow_key: String,
        out_port: PortArg,
        gateway_mac: MacAddress,
        path_id: PathId,
        start_index: ServiceIndex,
    },
}

impl FlowRequest {
    /// Runs the builder this request names.
    pub fn build<V: VirtualMacTable>(&self, vmacs: &V) -> ClassifierResult<FlowEntry> {
        match self {
            Self::TableMiss {} => Ok(init_classifier_table()),
            Self::LocalOutput { out_port } => Ok(init_local_output_flow(*out_port)),
            Self::LocalInput { node, in_port } => init_local_input_flow(node, *in_port),
            Self::NshOut {
                flow_key,
                flow_match,
                chain,
                out_port,
            } => create_classifier_out_flow(flow_key, flow_match.clone(), chain, *out_port),
            Self::NshIn {
                flow_key,
                chain,
                out_port,
            } => create_classifier_in_flow(flow_key, chain, *out_port),
            Self::NshRelay { flow_key, chain } => create_classifier_relay_flow(flow_key, chain),
            Self::MacChainOut {
                node,
                flow_key,
                flow_match,
                out_port,
                path_id,
                start_index,
            } => create_mac_chain_classifier_out_flow(
                vmacs,
                node,
                flow_key,
                flow_match.clone(),
                &out_port.as_str(),
                *path_id,
                *start_index,
            ),
            Self::MacChainRelay {
                node,
                flow_key,
                out_port,
                path_id,
                start_index,
                last_index,
            } => create_classifier_mac_chaining_relay_flow(
                vmacs,
                node,
                flow_key,
                &out_port.as_str(),
                *path_id,
                *start_index,
                *last_index,
            ),
            Self::MacChainIn {
                node,
                flow_key,
                out_port,
                gateway_mac,
                path_id,
                start_index,
            } => create_mac_chain_classifier_in_flow(
                vmacs,
                node,
                flow_key,
                &out_port.as_str(),
                *gateway_mac,
                *path_id,
                *start_index,
            ),
        }
    }
}

/// A classifier plan.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassifierPlan {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub flows: Vec<FlowRequest>,
}

impl ClassifierPlan {
    pub fn from_yaml(text: &str) -> PlanResult<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json(text: &str) -> PlanResult<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Loads a plan, picking the format from the file extension.
pub fn load_plan(path: &Path) -> PlanResult<ClassifierPlan> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let parse: fn(&str) -> PlanResult<ClassifierPlan> = match ext.as_deref() {
        Some("yaml") | Some("yml") => ClassifierPlan::from_yaml,
        Some("json") => ClassifierPlan::from_json,
        _ => {
            return Err(PlanError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }
    };

    let text = fs::read_to_string(path).map_err(|source| PlanError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let plan = parse(&text)?;
    info!("Loaded plan {} with {} flow requests", path.display(), plan.flows.len());
    Ok(plan)
}

/// Builds every flow of `plan` in order.
///
/// Fails on the first rejected request, and if two requests produce the
/// same `(table, id)` key.
pub fn build_plan<V: VirtualMacTable>(
    plan: &ClassifierPlan,
    vmacs: &V,
) -> PlanResult<Vec<FlowEntry>> {
    let mut seen = HashSet::new();
    let mut flows = Vec::with_capacity(plan.flows.len());

    for (index, request) in plan.flows.iter().enumerate() {
        let flow = request
            .build(vmacs)
            .map_err(|source| PlanError::Flow { index, source })?;

        if !seen.insert((flow.table(), flow.id().to_string())) {
            return Err(PlanError::DuplicateFlow {
                table: flow.table(),
                id: flow.id().to_string(),
            });
        }
        debug!("Plan request #{} built flow {}", index, flow.id());
        flows.push(flow);
    }

    Ok(flows)
}
