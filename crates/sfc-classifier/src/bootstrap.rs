//! Table-miss and local port flows of the classifier table.

use crate::constants::{
    FLOW_ID_LOCAL_INPUT, FLOW_ID_LOCAL_OUTPUT, FLOW_ID_MATCH_ANY, FLOW_PRIORITY_CLASSIFIER,
    FLOW_PRIORITY_MATCH_ANY, TABLE_INDEX_CLASSIFIER, TABLE_INDEX_INGRESS_TRANSPORT,
};
use crate::entry::{classifier_flow, log_built};
use crate::error::{require_non_empty, ClassifierResult};
use sfc_openflow::{Action, ActionList, FlowEntry, FlowMatch, InPort, Instructions};
use sfc_types::{NodeConnector, PortNumber};

/// Returns the table-miss flow of the classifier table.
///
/// Matches everything at the lowest classifier priority and continues in the
/// ingress transport table, so unclassified traffic is not dropped.
pub fn init_classifier_table() -> FlowEntry {
    let flow = FlowEntry::new(
        FLOW_ID_MATCH_ANY,
        TABLE_INDEX_CLASSIFIER,
        FLOW_PRIORITY_MATCH_ANY,
        FlowMatch::any(),
        Instructions::goto_table(TABLE_INDEX_INGRESS_TRANSPORT),
    );
    log_built(&flow);
    flow
}

/// Returns the flow sending traffic from the switch's local port out of
/// `out_port` (the hardware offload port).
pub fn init_local_output_flow(out_port: PortNumber) -> FlowEntry {
    let flow_match = FlowMatch::any().with_in_port(InPort::Local);
    let actions = ActionList::new().with(Action::output(out_port));
    classifier_flow(FLOW_ID_LOCAL_OUTPUT, FLOW_PRIORITY_CLASSIFIER, flow_match, actions)
}

/// Returns the flow handing traffic received on `in_port` of `node_name` to
/// normal switching.
pub fn init_local_input_flow(node_name: &str, in_port: PortNumber) -> ClassifierResult<FlowEntry> {
    require_non_empty("node name", node_name)?;

    let flow_match =
        FlowMatch::any().with_in_port(InPort::Connector(NodeConnector::new(node_name, in_port)));
    let actions = ActionList::new().with(Action::normal());
    Ok(classifier_flow(
        FLOW_ID_LOCAL_INPUT,
        FLOW_PRIORITY_CLASSIFIER,
        flow_match,
        actions,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClassifierError;
    use pretty_assertions::assert_eq;
    use sfc_openflow::OutputPort;

    #[test]
    fn test_table_miss() {
        let flow = init_classifier_table();
        assert_eq!(flow.id(), "MatchAny");
        assert_eq!(flow.table(), 0);
        assert_eq!(flow.priority(), 5);
        assert!(flow.flow_match().is_any());
        assert_eq!(flow.instructions().len(), 1);
        assert_eq!(flow.instructions().goto_target(), Some(1));
    }

    #[test]
    fn test_local_output_flow() {
        let flow = init_local_output_flow(PortNumber::new(3));
        assert_eq!(flow.id(), "classifier_dpdk_output");
        assert_eq!(flow.priority(), 1000);
        assert_eq!(flow.flow_match().in_port, Some(InPort::Local));
        assert_eq!(
            flow.actions()[0].action(),
            &Action::Output(OutputPort::Port(PortNumber::new(3)))
        );
        assert_eq!(flow.to_string(), "table=0, priority=1000,in_port=LOCAL actions=output:3");
    }

    #[test]
    fn test_local_input_flow() {
        let flow = init_local_input_flow("openflow:1", PortNumber::new(4)).unwrap();
        assert_eq!(flow.id(), "classifier_dpdk_input");
        assert_eq!(flow.priority(), 1000);
        assert_eq!(
            flow.flow_match().in_port,
            Some(InPort::Connector(NodeConnector::new("openflow:1", PortNumber::new(4))))
        );
        assert_eq!(flow.actions().len(), 1);
        assert_eq!(flow.actions()[0].action(), &Action::normal());
    }

    #[test]
    fn test_local_input_requires_node() {
        assert_eq!(
            init_local_input_flow("", PortNumber::new(4)),
            Err(ClassifierError::required("node name"))
        );
    }
}
