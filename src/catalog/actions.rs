//! Action tools
//!
//! Most mutating calls return an action that completes asynchronously.
//! These tools let a caller poll for its outcome.

use super::fields::{action_status, by_id};
use super::{Operation, ToolSpec};
use crate::hcloud::Resource;
use crate::tools::{Field, FieldType, ObjectSchema};

pub fn specs() -> Vec<ToolSpec> {
    vec![
        ToolSpec::new(
            "list_actions",
            "List actions, optionally filtered by ID and status",
            Resource::Action,
            Operation::List,
            ObjectSchema::new()
                .field(Field::optional("id", FieldType::array_of(FieldType::Integer)).describe("Only actions with these IDs"))
                .field(Field::optional("status", action_status()).describe("Only actions with this status")),
        ),
        ToolSpec::new("get_action", "Get an action by ID", Resource::Action, Operation::Get, by_id("ID of the action")),
    ]
}
