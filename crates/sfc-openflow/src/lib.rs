//! OpenFlow flow primitives for service function chaining.
//!
//! This crate is the fixed vocabulary the classifier builders assemble flows
//! from:
//!
//! - [`FlowMatch`]: match criteria (ingress port, MAC, NSH and L3/L4 fields)
//! - [`Action`] and [`ActionList`]: ordered actions, indexed on append
//! - [`Instructions`]: apply-actions and goto-table instructions
//! - [`FlowEntry`]: an immutable flow for one table
//!
//! Every type renders in `ovs-ofctl` flow syntax through `Display`, which is
//! what operators compare against `ovs-ofctl dump-flows` output.
//!
//! # Architecture
//!
//! ```text
//! FlowMatch ──┐
//!             ├──> FlowEntry (id, table, priority)
//! ActionList ─┴──> Instructions
//! ```

mod action;
mod flow;
mod flow_match;
mod types;

pub use action::{Action, ActionList, OrderedAction, OutputPort, SetField};
pub use flow::{FlowEntry, Instruction, Instructions};
pub use flow_match::{FlowMatch, InPort};
pub use types::{FlowPriority, MetadataSlot, PacketType, TableId, ETHERTYPE_NSH};
