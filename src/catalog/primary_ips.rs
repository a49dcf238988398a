//! Primary IP tools
//!
//! Primary IPs are datacenter-scoped static addresses that can be moved
//! between servers while those are powered off.

use serde_json::json;

use super::fields::{by_id, ip_type, labels, list_filters};
use super::{Operation, ToolSpec};
use crate::hcloud::Resource;
use crate::tools::{Field, FieldType, ObjectSchema};

const PRIMARY_IP_ID: &str = "ID of the primary IP";

fn assignee_type() -> Field {
    Field::optional("assignee_type", FieldType::one_of_literals(&["server"])).with_default(json!("server"))
}

pub fn specs() -> Vec<ToolSpec> {
    vec![
        ToolSpec::new(
            "list_primary_ips",
            "List all primary IPs",
            Resource::PrimaryIp,
            Operation::List,
            list_filters().optional("ip", FieldType::String),
        ),
        ToolSpec::new(
            "create_primary_ip",
            "Create a primary IP",
            Resource::PrimaryIp,
            Operation::Create,
            ObjectSchema::new()
                .required("name", FieldType::String)
                .required("type", ip_type())
                .field(assignee_type())
                .field(Field::optional("assignee_id", FieldType::Integer).describe("ID of a server to assign to"))
                .field(Field::optional("datacenter", FieldType::String).describe("Datacenter (e.g. fsn1-dc14), required without assignee"))
                .field(Field::optional("auto_delete", FieldType::Boolean).describe("Delete together with the assigned server"))
                .field(labels()),
        ),
        ToolSpec::new(
            "delete_primary_ip",
            "Delete a primary IP",
            Resource::PrimaryIp,
            Operation::Delete,
            by_id(PRIMARY_IP_ID),
        ),
        ToolSpec::new(
            "update_primary_ip",
            "Update a primary IP (name, auto_delete, labels)",
            Resource::PrimaryIp,
            Operation::Update,
            by_id(PRIMARY_IP_ID)
                .optional("name", FieldType::String)
                .optional("auto_delete", FieldType::Boolean)
                .field(labels()),
        ),
        ToolSpec::new(
            "assign_primary_ip",
            "Assign a primary IP to a powered-off server",
            Resource::PrimaryIp,
            Operation::Action("assign"),
            by_id(PRIMARY_IP_ID)
                .field(Field::required("assignee_id", FieldType::Integer).describe("ID of the server"))
                .field(assignee_type()),
        ),
        ToolSpec::new(
            "unassign_primary_ip",
            "Unassign a primary IP from its server",
            Resource::PrimaryIp,
            Operation::Action("unassign"),
            by_id(PRIMARY_IP_ID),
        ),
    ]
}
