//! MAC chaining classifier flows.
//!
//! Instead of an NSH header, the chain position travels in the destination
//! MAC: each hop of a path owns a virtual MAC and every forwarder rewrites
//! `eth_dst` to the next hop's address. At the end of the chain the
//! gateway MAC is restored so routing past the chain is unaffected.
//!
//! Port arguments arrive as strings from the rendered path and must be
//! decimal port numbers.

use crate::constants::{FLOW_PRIORITY_CLASSIFIER, FLOW_PRIORITY_MAC_CHAIN_IN};
use crate::entry::classifier_flow;
use crate::error::{parse_port, require_non_empty, ClassifierResult};
use crate::vmac::VirtualMacTable;
use sfc_openflow::{Action, ActionList, FlowEntry, FlowMatch};
use sfc_types::{MacAddress, PathId, ServiceIndex};

/// Returns the flow steering traffic matching `flow_match` into the chain:
/// the destination MAC becomes the virtual MAC of hop `start_index`.
pub fn create_mac_chain_classifier_out_flow<V: VirtualMacTable>(
    vmacs: &V,
    node_name: &str,
    flow_key: &str,
    flow_match: FlowMatch,
    out_port: &str,
    path_id: PathId,
    start_index: ServiceIndex,
) -> ClassifierResult<FlowEntry> {
    require_non_empty("flow key", flow_key)?;
    require_non_empty("node name", node_name)?;
    let out_port = parse_port(out_port)?;

    let path = vmacs.forward_path(path_id);
    let actions = ActionList::new()
        .with(Action::set_eth_dst(path.hop(start_index)))
        .with(Action::output(out_port));

    Ok(classifier_flow(
        flow_key,
        FLOW_PRIORITY_CLASSIFIER,
        flow_match,
        actions,
    ))
}

/// Returns the flow moving packets that reached hop `last_index` on to hop
/// `start_index` of the same path.
pub fn create_classifier_mac_chaining_relay_flow<V: VirtualMacTable>(
    vmacs: &V,
    node_name: &str,
    flow_key: &str,
    out_port: &str,
    path_id: PathId,
    start_index: ServiceIndex,
    last_index: ServiceIndex,
) -> ClassifierResult<FlowEntry> {
    require_non_empty("flow key", flow_key)?;
    require_non_empty("node name", node_name)?;
    let out_port = parse_port(out_port)?;

    let path = vmacs.forward_path(path_id);
    let flow_match = FlowMatch::eth_dst(path.hop(last_index));
    let actions = ActionList::new()
        .with(Action::set_eth_dst(path.hop(start_index)))
        .with(Action::output(out_port));

    Ok(classifier_flow(
        flow_key,
        FLOW_PRIORITY_CLASSIFIER,
        flow_match,
        actions,
    ))
}

/// Returns the flow ending the chain for packets addressed to hop
/// `start_index`: the gateway MAC is restored before output.
///
/// Installed at [`FLOW_PRIORITY_MAC_CHAIN_IN`] so that it wins over a relay
/// flow matching the same virtual MAC on this node.
pub fn create_mac_chain_classifier_in_flow<V: VirtualMacTable>(
    vmacs: &V,
    node_name: &str,
    flow_key: &str,
    out_port: &str,
    gateway_mac: MacAddress,
    path_id: PathId,
    start_index: ServiceIndex,
) -> ClassifierResult<FlowEntry> {
    require_non_empty("flow key", flow_key)?;
    require_non_empty("node name", node_name)?;
    let out_port = parse_port(out_port)?;

    let path = vmacs.forward_path(path_id);
    let flow_match = FlowMatch::eth_dst(path.hop(start_index));
    let actions = ActionList::new()
        .with(Action::set_eth_dst(gateway_mac))
        .with(Action::output(out_port));

    Ok(classifier_flow(
        flow_key,
        FLOW_PRIORITY_MAC_CHAIN_IN,
        flow_match,
        actions,
    ))
}
