//! # sfc-classifier - SFC classifier flow builders
//!
//! This crate translates rendered service function chain data into the
//! OpenFlow entries of a switch's classifier table (table 0). The
//! classifier decides how classified traffic enters a chain and how it is
//! handed back at the end of it.
//!
//! ## Encapsulation strategies
//! - **NSH over VXLAN** ([`nsh`]): push NSH + Ethernet headers, tunnel to
//!   the next forwarder; decapsulate or relay at the end of the chain
//! - **MAC chaining** ([`mac_chain`]): rewrite the destination MAC to a
//!   per-hop virtual MAC ([`vmac`]); restore the gateway MAC at the end
//!
//! ## Table bootstrap
//! - Table-miss flow continuing in the ingress transport table
//! - Local offload port input/output flows
//!
//! Every builder is a pure function returning an immutable
//! [`FlowEntry`](sfc_openflow::FlowEntry) or a [`ClassifierError`] when a
//! required argument is missing. Installing flows on a switch is left to
//! the caller.
//!
//! ## Plans
//! [`plan`] loads YAML/JSON lists of flow requests and builds them in one
//! pass; the `sfc-classifier` binary renders plans as JSON or ovs-ofctl
//! flow lines.

pub mod bootstrap;
pub mod constants;
pub mod descriptor;
mod entry;
pub mod error;
pub mod mac_chain;
pub mod nsh;
pub mod plan;
pub mod vmac;

pub use bootstrap::{init_classifier_table, init_local_input_flow, init_local_output_flow};
pub use descriptor::{ChainDescriptor, NshMetadata};
pub use error::{ClassifierError, ClassifierResult};
pub use mac_chain::{
    create_classifier_mac_chaining_relay_flow, create_mac_chain_classifier_in_flow,
    create_mac_chain_classifier_out_flow,
};
pub use nsh::{
    build_nsh_actions, create_classifier_in_flow, create_classifier_out_flow,
    create_classifier_relay_flow,
};
pub use plan::{build_plan, load_plan, ClassifierPlan, FlowRequest, PlanError, PlanResult};
pub use vmac::{PathMacs, VirtualMacGenerator, VirtualMacTable};
