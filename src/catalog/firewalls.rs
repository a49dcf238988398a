//! Firewall tools

use super::fields::{by_id, id_object, labels, list_filters, rename, selector_object};
use super::{Operation, ToolSpec};
use crate::hcloud::Resource;
use crate::tools::{Field, FieldType, ObjectSchema};

const FIREWALL_ID: &str = "ID of the firewall";

pub fn specs() -> Vec<ToolSpec> {
    vec![
        ToolSpec::new("list_firewalls", "List all firewalls", Resource::Firewall, Operation::List, list_filters()),
        ToolSpec::new("get_firewall", "Get a firewall by ID", Resource::Firewall, Operation::Get, by_id(FIREWALL_ID)),
        ToolSpec::new(
            "create_firewall",
            "Create a new firewall",
            Resource::Firewall,
            Operation::Create,
            ObjectSchema::new()
                .required("name", FieldType::String)
                .field(Field::optional("rules", FieldType::array_of(FieldType::Any)).describe("Firewall rules, passed through as given"))
                .field(Field::optional("apply_to", FieldType::array_of(resource_ref())).describe("Resources to apply the firewall to"))
                .field(labels()),
        ),
        ToolSpec::new("delete_firewall", "Delete a firewall", Resource::Firewall, Operation::Delete, by_id(FIREWALL_ID)),
        ToolSpec::new(
            "update_firewall",
            "Update a firewall (name, labels)",
            Resource::Firewall,
            Operation::Update,
            rename(FIREWALL_ID),
        ),
        ToolSpec::new(
            "set_firewall_rules",
            "Replace all rules of a firewall. An empty list removes every rule.",
            Resource::Firewall,
            Operation::Action("set_rules"),
            by_id(FIREWALL_ID).required("rules", FieldType::array_of(rule())),
        ),
        ToolSpec::new(
            "apply_firewall_to_resources",
            "Apply a firewall to servers or label selectors",
            Resource::Firewall,
            Operation::Action("apply_to_resources"),
            by_id(FIREWALL_ID).required("apply_to", FieldType::array_of(resource_ref())),
        ),
        ToolSpec::new(
            "remove_firewall_from_resources",
            "Remove a firewall from servers or label selectors",
            Resource::Firewall,
            Operation::Action("remove_from_resources"),
            by_id(FIREWALL_ID).required("remove_from", FieldType::array_of(resource_ref())),
        ),
    ]
}

fn rule() -> FieldType {
    FieldType::Object(
        ObjectSchema::new()
            .required("direction", FieldType::one_of_literals(&["in", "out"]))
            .required("protocol", FieldType::one_of_literals(&["tcp", "udp", "icmp", "esp", "gre"]))
            .field(Field::optional("port", FieldType::String).describe("Port or range (e.g. 80 or 8000-9000)"))
            .field(Field::optional("source_ips", FieldType::array_of(FieldType::String)).describe("Source CIDRs for inbound rules"))
            .field(
                Field::optional("destination_ips", FieldType::array_of(FieldType::String))
                    .describe("Destination CIDRs for outbound rules"),
            )
            .optional("description", FieldType::String),
    )
}

fn resource_ref() -> FieldType {
    FieldType::Object(
        ObjectSchema::new()
            .required("type", FieldType::one_of_literals(&["server", "label_selector"]))
            .optional("server", id_object())
            .optional("label_selector", selector_object()),
    )
}
