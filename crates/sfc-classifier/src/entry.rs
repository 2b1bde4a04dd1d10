//! Assembly of classifier table entries.

use crate::constants::TABLE_INDEX_CLASSIFIER;
use sfc_openflow::{ActionList, FlowEntry, FlowMatch, FlowPriority, Instructions};
use tracing::debug;

/// Wraps `actions` into an apply-actions flow in the classifier table.
pub(crate) fn classifier_flow(
    id: &str,
    priority: FlowPriority,
    flow_match: FlowMatch,
    actions: ActionList,
) -> FlowEntry {
    let flow = FlowEntry::new(
        id,
        TABLE_INDEX_CLASSIFIER,
        priority,
        flow_match,
        Instructions::apply_actions(actions),
    );
    log_built(&flow);
    flow
}

/// Logs a constructed classifier table entry.
pub(crate) fn log_built(flow: &FlowEntry) {
    debug!(
        flow_id = flow.id(),
        table = flow.table(),
        priority = flow.priority(),
        "Built classifier flow: {}",
        flow
    );
}
