//! Table indices, priorities and well-known flow ids of the classifier.
//!
//! These values are shared with the rest of the SFC pipeline and must not
//! change independently of it.

use sfc_openflow::{FlowPriority, TableId};

/// Table the classifier flows are written into.
pub const TABLE_INDEX_CLASSIFIER: TableId = 0;

/// Next pipeline stage, target of the classifier table-miss flow.
pub const TABLE_INDEX_INGRESS_TRANSPORT: TableId = 1;

/// Priority of the table-miss flow.
pub const FLOW_PRIORITY_MATCH_ANY: FlowPriority = 5;

/// Default priority of every classifier flow.
pub const FLOW_PRIORITY_CLASSIFIER: FlowPriority = 1000;

/// Priority of the MAC chaining "in" flow.
///
/// Its match can coincide with a MAC chaining relay match on the node that
/// terminates the chain; the chain end must win.
pub const FLOW_PRIORITY_MAC_CHAIN_IN: FlowPriority = FLOW_PRIORITY_CLASSIFIER + 1;

pub const FLOW_ID_MATCH_ANY: &str = "MatchAny";
pub const FLOW_ID_LOCAL_OUTPUT: &str = "classifier_dpdk_output";
pub const FLOW_ID_LOCAL_INPUT: &str = "classifier_dpdk_input";
