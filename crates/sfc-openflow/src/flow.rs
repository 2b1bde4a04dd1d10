//! Flow entries and instructions.

use crate::action::{ActionList, OrderedAction};
use crate::flow_match::FlowMatch;
use crate::types::{FlowPriority, TableId};
use serde::Serialize;
use std::fmt;

/// A single flow instruction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Instruction {
    ApplyActions(ActionList),
    GotoTable(TableId),
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApplyActions(actions) => write!(f, "{}", actions),
            Self::GotoTable(table) => write!(f, "goto_table:{}", table),
        }
    }
}

/// The instruction set of a flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Instructions(Vec<Instruction>);

impl Instructions {
    /// Wraps an action list into a single apply-actions instruction.
    pub fn apply_actions(actions: ActionList) -> Self {
        Self(vec![Instruction::ApplyActions(actions)])
    }

    /// Creates a single goto-table instruction.
    pub fn goto_table(table: TableId) -> Self {
        Self(vec![Instruction::GotoTable(table)])
    }

    pub fn as_slice(&self) -> &[Instruction] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the first apply-actions list, if any.
    pub fn action_list(&self) -> Option<&ActionList> {
        self.0.iter().find_map(|i| match i {
            Instruction::ApplyActions(actions) => Some(actions),
            Instruction::GotoTable(_) => None,
        })
    }

    /// Returns the goto-table target, if any.
    pub fn goto_target(&self) -> Option<TableId> {
        self.0.iter().find_map(|i| match i {
            Instruction::GotoTable(table) => Some(*table),
            Instruction::ApplyActions(_) => None,
        })
    }
}

impl fmt::Display for Instructions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.0.iter().map(|i| i.to_string()).collect();
        write!(f, "{}", rendered.join(","))
    }
}

/// An immutable flow table entry.
///
/// A flow is keyed by `(table, id)`; the programming interface replaces an
/// existing flow with the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FlowEntry {
    id: String,
    table: TableId,
    priority: FlowPriority,
    #[serde(rename = "match")]
    flow_match: FlowMatch,
    instructions: Instructions,
}

impl FlowEntry {
    pub fn new(
        id: impl Into<String>,
        table: TableId,
        priority: FlowPriority,
        flow_match: FlowMatch,
        instructions: Instructions,
    ) -> Self {
        Self {
            id: id.into(),
            table,
            priority,
            flow_match,
            instructions,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn table(&self) -> TableId {
        self.table
    }

    pub fn priority(&self) -> FlowPriority {
        self.priority
    }

    pub fn flow_match(&self) -> &FlowMatch {
        &self.flow_match
    }

    pub fn instructions(&self) -> &Instructions {
        &self.instructions
    }

    /// Returns the ordered apply-actions of this flow (empty if none).
    pub fn actions(&self) -> &[OrderedAction] {
        self.instructions
            .action_list()
            .map(ActionList::as_slice)
            .unwrap_or(&[])
    }
}

impl fmt::Display for FlowEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "table={}, priority={}", self.table, self.priority)?;
        if !self.flow_match.is_any() {
            write!(f, ",{}", self.flow_match)?;
        }
        write!(f, " actions={}", self.instructions)
    }
}
