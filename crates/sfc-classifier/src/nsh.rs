//! NSH over VXLAN classifier flows.
//!
//! The classifier pushes an NSH header (and an outer Ethernet header) onto
//! classified packets and tunnels them to the first service function
//! forwarder. Packets coming back at the end of the chain are matched on
//! their service path and final service index; the node then either strips
//! the headers and delivers the packet (`in`) or re-tunnels it (`relay`).
//! Which of the two applies is the caller's decision.

use crate::constants::FLOW_PRIORITY_CLASSIFIER;
use crate::descriptor::ChainDescriptor;
use crate::entry::classifier_flow;
use crate::error::{require_non_empty, ClassifierResult};
use sfc_openflow::{Action, ActionList, FlowEntry, FlowMatch, MetadataSlot, PacketType};
use sfc_types::PortNumber;

/// Builds the actions pushing an NSH header for `descriptor`.
///
/// The list holds, in order: `encap(nsh)`, `encap(ethernet)`, the NSP, the
/// starting NSI and one set-field per present metadata slot (C1 to C4).
/// Callers append their own actions to the returned list.
pub fn build_nsh_actions(descriptor: &ChainDescriptor) -> ActionList {
    let mut actions = ActionList::new();
    actions
        .push(Action::encap(PacketType::Nsh))
        .push(Action::encap(PacketType::Ethernet))
        .push(Action::set_nsp(descriptor.nsp))
        .push(Action::set_nsi(descriptor.start_index));

    for slot in MetadataSlot::ALL {
        if let Some(value) = descriptor.metadata.get(slot) {
            actions.push(Action::set_nsh_metadata(slot, value));
        }
    }
    actions
}

/// Output to `out_port`, or back out of the ingress port when none is given.
fn output_or_in_port(out_port: Option<PortNumber>) -> Action {
    match out_port {
        Some(port) => Action::output(port),
        None => Action::output_in_port(),
    }
}

/// Returns the flow encapsulating traffic matching `flow_match` into the
/// chain and tunnelling it to the descriptor's tunnel destination.
pub fn create_classifier_out_flow(
    flow_key: &str,
    flow_match: FlowMatch,
    descriptor: &ChainDescriptor,
    out_port: Option<PortNumber>,
) -> ClassifierResult<FlowEntry> {
    require_non_empty("flow key", flow_key)?;
    let tunnel_destination = descriptor.require_tunnel_destination()?;

    let mut actions = build_nsh_actions(descriptor);
    actions
        .push(Action::set_tunnel_ipv4_dst(tunnel_destination))
        .push(output_or_in_port(out_port));

    Ok(classifier_flow(
        flow_key,
        FLOW_PRIORITY_CLASSIFIER,
        flow_match,
        actions,
    ))
}

/// Returns the flow terminating the chain: strips the outer Ethernet and
/// the NSH headers of packets at the end of the path and delivers them.
pub fn create_classifier_in_flow(
    flow_key: &str,
    descriptor: &ChainDescriptor,
    out_port: Option<PortNumber>,
) -> ClassifierResult<FlowEntry> {
    require_non_empty("flow key", flow_key)?;
    descriptor.require_tunnel_destination()?;

    let flow_match = FlowMatch::nsh(descriptor.nsp, descriptor.end_index);
    let actions = ActionList::new()
        // outer Ethernet
        .with(Action::decap())
        // NSH
        .with(Action::decap())
        .with(output_or_in_port(out_port));

    Ok(classifier_flow(
        flow_key,
        FLOW_PRIORITY_CLASSIFIER,
        flow_match,
        actions,
    ))
}

/// Returns the flow re-tunnelling packets at the end of the path towards
/// the descriptor's tunnel destination without decapsulating them.
pub fn create_classifier_relay_flow(
    flow_key: &str,
    descriptor: &ChainDescriptor,
) -> ClassifierResult<FlowEntry> {
    require_non_empty("flow key", flow_key)?;
    let tunnel_destination = descriptor.require_tunnel_destination()?;

    let flow_match = FlowMatch::nsh(descriptor.nsp, descriptor.end_index);
    let actions = ActionList::new()
        .with(Action::set_tunnel_ipv4_dst(tunnel_destination))
        .with(Action::output_in_port());

    Ok(classifier_flow(
        flow_key,
        FLOW_PRIORITY_CLASSIFIER,
        flow_match,
        actions,
    ))
}
