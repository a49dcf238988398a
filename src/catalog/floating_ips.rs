//! Floating IP tools

use super::fields::{by_id, ip_type, labels, list_filters, reference};
use super::{Operation, ToolSpec};
use crate::hcloud::Resource;
use crate::tools::{Field, FieldType, ObjectSchema};

const FLOATING_IP_ID: &str = "ID of the floating IP";

pub fn specs() -> Vec<ToolSpec> {
    vec![
        ToolSpec::new(
            "list_floating_ips",
            "List all floating IPs",
            Resource::FloatingIp,
            Operation::List,
            list_filters(),
        ),
        ToolSpec::new(
            "create_floating_ip",
            "Create a floating IP",
            Resource::FloatingIp,
            Operation::Create,
            ObjectSchema::new()
                .required("type", ip_type())
                .field(Field::optional("home_location", FieldType::String).describe("Location (e.g. fsn1), required without server"))
                .field(Field::optional("server", FieldType::Integer).describe("ID of a server to assign to"))
                .optional("name", FieldType::String)
                .optional("description", FieldType::String)
                .field(labels()),
        ),
        ToolSpec::new(
            "delete_floating_ip",
            "Delete a floating IP",
            Resource::FloatingIp,
            Operation::Delete,
            by_id(FLOATING_IP_ID),
        ),
        ToolSpec::new(
            "update_floating_ip",
            "Update a floating IP (description, labels)",
            Resource::FloatingIp,
            Operation::Update,
            by_id(FLOATING_IP_ID)
                .optional("description", FieldType::String)
                .field(labels()),
        ),
        ToolSpec::new(
            "assign_floating_ip",
            "Assign a floating IP to a server",
            Resource::FloatingIp,
            Operation::Action("assign"),
            by_id(FLOATING_IP_ID).field(reference("server", "ID of the server")),
        ),
        ToolSpec::new(
            "unassign_floating_ip",
            "Unassign a floating IP",
            Resource::FloatingIp,
            Operation::Action("unassign"),
            by_id(FLOATING_IP_ID),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_takes_description_and_labels() {
        let specs = specs();
        let update = specs.iter().find(|s| s.name == "update_floating_ip").unwrap();
        assert_eq!(update.description, "Update a floating IP (description, labels)");

        let args = update
            .schema
            .validate(&json!({"id": 4, "description": "egress", "labels": {"env": "prod"}, "name": "ignored"}))
            .unwrap();
        assert_eq!(args.len(), 3);
        assert!(!args.contains_key("name"));
    }
}
