//! Integration tests for the classifier flow builders
//!
//! These tests exercise the public builders end to end: the flows a rendered
//! path produces, the ordering of their actions and the priorities that
//! separate flow classes on one node.

use pretty_assertions::assert_eq;
use sfc_classifier::constants::{
    FLOW_PRIORITY_CLASSIFIER, FLOW_PRIORITY_MAC_CHAIN_IN, TABLE_INDEX_CLASSIFIER,
    TABLE_INDEX_INGRESS_TRANSPORT,
};
use sfc_classifier::{
    build_nsh_actions, create_classifier_in_flow, create_classifier_mac_chaining_relay_flow,
    create_classifier_out_flow, create_classifier_relay_flow, create_mac_chain_classifier_in_flow,
    create_mac_chain_classifier_out_flow, init_classifier_table, init_local_input_flow,
    init_local_output_flow, ChainDescriptor, ClassifierError, VirtualMacGenerator,
    VirtualMacTable,
};
use sfc_openflow::{Action, FlowEntry, FlowMatch, MetadataSlot, PacketType};
use sfc_types::{MacAddress, PathId, PortNumber, ServiceIndex};
use std::net::Ipv4Addr;

/// Virtual MAC table recording nothing but (path, hop), so expectations can
/// be written without knowing the production layout
fn mock_vmac(path_id: PathId, hop: ServiceIndex) -> MacAddress {
    MacAddress::new([0x0a, 0, 0, path_id as u8, 0, hop])
}

fn nsh_chain() -> ChainDescriptor {
    ChainDescriptor::new(21, 21, 255, 252).with_tunnel_destination(Ipv4Addr::new(10, 0, 0, 2))
}

fn actions_of(flow: &FlowEntry) -> Vec<Action> {
    flow.actions().iter().map(|a| *a.action()).collect()
}

fn assert_contiguous_order(flow: &FlowEntry) {
    for (position, action) in flow.actions().iter().enumerate() {
        assert_eq!(action.order() as usize, position, "flow {}", flow.id());
    }
}

/// Every flow the builders can produce, for properties that hold across all of them
fn all_flows() -> Vec<FlowEntry> {
    let chain = nsh_chain()
        .with_metadata(MetadataSlot::C1, 1)
        .with_metadata(MetadataSlot::C3, 3);
    let gw: MacAddress = "aa:bb:cc:dd:ee:ff".parse().unwrap();
    vec![
        init_classifier_table(),
        init_local_output_flow(PortNumber::new(1)),
        init_local_input_flow("openflow:1", PortNumber::new(2)).unwrap(),
        create_classifier_out_flow("out1", FlowMatch::any(), &chain, Some(PortNumber::new(5)))
            .unwrap(),
        create_classifier_out_flow("out2", FlowMatch::any(), &chain, None).unwrap(),
        create_classifier_in_flow("in1", &chain, None).unwrap(),
        create_classifier_relay_flow("relay1", &chain).unwrap(),
        create_mac_chain_classifier_out_flow(
            &mock_vmac,
            "openflow:1",
            "mc1",
            FlowMatch::any(),
            "5",
            7,
            0,
        )
        .unwrap(),
        create_classifier_mac_chaining_relay_flow(&mock_vmac, "openflow:1", "mc2", "6", 7, 0, 3)
            .unwrap(),
        create_mac_chain_classifier_in_flow(&mock_vmac, "openflow:1", "mc3", "7", gw, 7, 3)
            .unwrap(),
    ]
}

// ============ Scenarios ============

#[test]
fn test_table_miss_goes_to_ingress_transport() {
    let flow = init_classifier_table();

    assert_eq!(flow.table(), 0);
    assert_eq!(flow.priority(), 5);
    assert!(flow.flow_match().is_any());
    assert_eq!(flow.instructions().len(), 1);
    assert_eq!(flow.instructions().goto_target(), Some(TABLE_INDEX_INGRESS_TRANSPORT));
}

#[test]
fn test_nsh_out_flow_action_sequence() {
    let match_x = FlowMatch::any()
        .with_eth_type(0x0800)
        .with_ipv4_src(Ipv4Addr::new(192, 168, 2, 1));
    let flow =
        create_classifier_out_flow("out1", match_x.clone(), &nsh_chain(), Some(PortNumber::new(5)))
            .unwrap();

    assert_eq!(flow.id(), "out1");
    assert_eq!(flow.table(), TABLE_INDEX_CLASSIFIER);
    assert_eq!(flow.priority(), 1000);
    assert_eq!(flow.flow_match(), &match_x);
    assert_eq!(
        actions_of(&flow),
        vec![
            Action::encap(PacketType::Nsh),
            Action::encap(PacketType::Ethernet),
            Action::set_nsp(21),
            Action::set_nsi(255),
            Action::set_tunnel_ipv4_dst(Ipv4Addr::new(10, 0, 0, 2)),
            Action::output(PortNumber::new(5)),
        ]
    );
    assert_contiguous_order(&flow);
}

#[test]
fn test_nsh_in_flow_without_port_returns_to_in_port() {
    let flow = create_classifier_in_flow("in1", &nsh_chain(), None).unwrap();

    assert_eq!(flow.flow_match().nsp, Some(21));
    assert_eq!(flow.flow_match().nsi, Some(252));
    assert_eq!(
        actions_of(&flow),
        vec![Action::decap(), Action::decap(), Action::output_in_port()]
    );
    assert_eq!(flow.priority(), FLOW_PRIORITY_CLASSIFIER);
}

#[test]
fn test_mac_chain_out_flow() {
    let match_y = FlowMatch::any().with_ip_proto(17).with_tp_dst(53);
    let flow = create_mac_chain_classifier_out_flow(
        &mock_vmac,
        "nodeA",
        "mc1",
        match_y.clone(),
        "5",
        7,
        0,
    )
    .unwrap();

    assert_eq!(flow.flow_match(), &match_y);
    assert_eq!(
        actions_of(&flow),
        vec![
            Action::set_eth_dst(mock_vmac(7, 0)),
            Action::output(PortNumber::new(5)),
        ]
    );
    assert_eq!(flow.priority(), 1000);
}

#[test]
fn test_mac_chain_relay_flow() {
    let flow =
        create_classifier_mac_chaining_relay_flow(&mock_vmac, "nodeA", "mc2", "6", 7, 0, 3)
            .unwrap();

    assert_eq!(flow.flow_match(), &FlowMatch::eth_dst(mock_vmac(7, 3)));
    assert_eq!(
        actions_of(&flow),
        vec![
            Action::set_eth_dst(mock_vmac(7, 0)),
            Action::output(PortNumber::new(6)),
        ]
    );
    assert_eq!(flow.priority(), 1000);
}

#[test]
fn test_mac_chain_in_flow() {
    let gw: MacAddress = "aa:bb:cc:dd:ee:ff".parse().unwrap();
    let flow =
        create_mac_chain_classifier_in_flow(&mock_vmac, "nodeA", "mc3", "7", gw, 7, 3).unwrap();

    assert_eq!(flow.flow_match(), &FlowMatch::eth_dst(mock_vmac(7, 3)));
    assert_eq!(
        actions_of(&flow),
        vec![Action::set_eth_dst(gw), Action::output(PortNumber::new(7))]
    );
    assert_eq!(flow.priority(), 1001);
}

// ============ Properties ============

#[test]
fn test_metadata_emitted_iff_present() {
    let base = nsh_chain();
    // every subset of the four slots
    for mask in 0u8..16 {
        let mut chain = base.clone();
        for slot in MetadataSlot::ALL {
            if mask & (1 << slot.index()) != 0 {
                chain = chain.with_metadata(slot, 0x100 + slot.index() as u32);
            }
        }

        let expected: Vec<Action> = MetadataSlot::ALL
            .into_iter()
            .filter(|slot| mask & (1 << slot.index()) != 0)
            .map(|slot| Action::set_nsh_metadata(slot, 0x100 + slot.index() as u32))
            .collect();

        let actions = build_nsh_actions(&chain).actions();
        assert_eq!(actions[4..].to_vec(), expected, "mask {:04b}", mask);
    }
}

#[test]
fn test_all_flows_have_contiguous_order() {
    for flow in all_flows() {
        assert_contiguous_order(&flow);
    }
}

#[test]
fn test_mac_chain_in_outranks_relay() {
    let gw = MacAddress::ZERO;
    for (path_id, start, last) in [(1, 0, 1), (7, 3, 3), (u32::MAX, 255, 0)] {
        let relay = create_classifier_mac_chaining_relay_flow(
            &VirtualMacGenerator,
            "n",
            "relay",
            "1",
            path_id,
            start,
            last,
        )
        .unwrap();
        let chain_in = create_mac_chain_classifier_in_flow(
            &VirtualMacGenerator,
            "n",
            "in",
            "2",
            gw,
            path_id,
            start,
        )
        .unwrap();
        assert_eq!(chain_in.priority(), relay.priority() + 1);
    }
    assert_eq!(FLOW_PRIORITY_MAC_CHAIN_IN, FLOW_PRIORITY_CLASSIFIER + 1);
}

#[test]
fn test_builders_are_deterministic() {
    assert_eq!(all_flows(), all_flows());
}

#[test]
fn test_missing_tunnel_destination_rejected() {
    let chain = ChainDescriptor::new(21, 21, 255, 252);
    let expected = Err(ClassifierError::required("tunnel destination"));

    assert_eq!(
        create_classifier_out_flow("out1", FlowMatch::any(), &chain, None),
        expected
    );
    assert_eq!(create_classifier_in_flow("in1", &chain, None), expected);
    assert_eq!(create_classifier_relay_flow("relay1", &chain), expected);
}

#[test]
fn test_missing_flow_key_rejected() {
    let expected = Err(ClassifierError::required("flow key"));

    assert_eq!(
        create_classifier_out_flow("", FlowMatch::any(), &nsh_chain(), None),
        expected
    );
    assert_eq!(create_classifier_in_flow("", &nsh_chain(), None), expected);
    assert_eq!(create_classifier_relay_flow("", &nsh_chain()), expected);
}

#[test]
fn test_default_generator_matches_handle() {
    let flow = create_classifier_mac_chaining_relay_flow(
        &VirtualMacGenerator,
        "openflow:1",
        "mc2",
        "6",
        7,
        0,
        3,
    )
    .unwrap();
    let path = VirtualMacGenerator.forward_path(7);
    assert_eq!(flow.flow_match().eth_dst, Some(path.hop(3)));
    assert_eq!(
        flow.to_string(),
        "table=0, priority=1000,dl_dst=02:00:00:00:07:03 \
         actions=set_field:02:00:00:00:07:00->eth_dst,output:6"
    );
}
