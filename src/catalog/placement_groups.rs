//! Placement group tools

use super::fields::{by_id, labels, list_filters, rename};
use super::{Operation, ToolSpec};
use crate::hcloud::Resource;
use crate::tools::{FieldType, ObjectSchema};

const PLACEMENT_GROUP_ID: &str = "ID of the placement group";

pub fn specs() -> Vec<ToolSpec> {
    vec![
        ToolSpec::new(
            "list_placement_groups",
            "List all placement groups",
            Resource::PlacementGroup,
            Operation::List,
            list_filters(),
        ),
        ToolSpec::new(
            "create_placement_group",
            "Create a new placement group",
            Resource::PlacementGroup,
            Operation::Create,
            ObjectSchema::new()
                .required("name", FieldType::String)
                .required("type", FieldType::one_of_literals(&["spread"]))
                .field(labels()),
        ),
        ToolSpec::new(
            "delete_placement_group",
            "Delete a placement group",
            Resource::PlacementGroup,
            Operation::Delete,
            by_id(PLACEMENT_GROUP_ID),
        ),
        ToolSpec::new(
            "update_placement_group",
            "Update a placement group (name, labels)",
            Resource::PlacementGroup,
            Operation::Update,
            rename(PLACEMENT_GROUP_ID),
        ),
    ]
}
