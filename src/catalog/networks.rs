//! Network tools

use super::fields::{by_id, labels, list_filters, rename};
use super::{Operation, ToolSpec};
use crate::hcloud::Resource;
use crate::tools::{Field, FieldType, ObjectSchema};

const NETWORK_ID: &str = "ID of the network";

pub fn specs() -> Vec<ToolSpec> {
    vec![
        ToolSpec::new("list_networks", "List all networks", Resource::Network, Operation::List, list_filters()),
        ToolSpec::new("get_network", "Get a network by ID", Resource::Network, Operation::Get, by_id(NETWORK_ID)),
        ToolSpec::new(
            "create_network",
            "Create a new network",
            Resource::Network,
            Operation::Create,
            ObjectSchema::new()
                .required("name", FieldType::String)
                .field(Field::required("ip_range", FieldType::String).describe("IP range in CIDR notation (e.g. 10.0.0.0/16)"))
                .optional("subnets", FieldType::array_of(FieldType::Object(subnet())))
                .optional("routes", FieldType::array_of(FieldType::Object(route())))
                .optional("expose_routes_to_vswitch", FieldType::Boolean)
                .field(labels()),
        ),
        ToolSpec::new("delete_network", "Delete a network", Resource::Network, Operation::Delete, by_id(NETWORK_ID)),
        ToolSpec::new(
            "update_network",
            "Update a network (name, labels)",
            Resource::Network,
            Operation::Update,
            rename(NETWORK_ID),
        ),
        ToolSpec::new(
            "add_subnet_to_network",
            "Add a subnet to a network",
            Resource::Network,
            Operation::Action("add_subnet"),
            with_id(subnet()),
        ),
        ToolSpec::new(
            "delete_subnet_from_network",
            "Delete a subnet from a network",
            Resource::Network,
            Operation::Action("delete_subnet"),
            by_id(NETWORK_ID)
                .field(Field::required("ip_range", FieldType::String).describe("IP range of the subnet to delete")),
        ),
        ToolSpec::new(
            "add_route_to_network",
            "Add a route to a network",
            Resource::Network,
            Operation::Action("add_route"),
            with_id(route()),
        ),
        ToolSpec::new(
            "delete_route_from_network",
            "Delete a route from a network",
            Resource::Network,
            Operation::Action("delete_route"),
            with_id(route()),
        ),
    ]
}

fn subnet() -> ObjectSchema {
    ObjectSchema::new()
        .required("type", FieldType::one_of_literals(&["cloud", "server", "vswitch"]))
        .field(Field::required("network_zone", FieldType::String).describe("Network zone (e.g. eu-central)"))
        .field(Field::optional("ip_range", FieldType::String).describe("Subnet range, otherwise auto-allocated"))
        .field(Field::optional("vswitch_id", FieldType::Integer).describe("Robot vSwitch ID for vswitch subnets"))
}

fn route() -> ObjectSchema {
    ObjectSchema::new()
        .field(Field::required("destination", FieldType::String).describe("Destination network in CIDR notation"))
        .field(Field::required("gateway", FieldType::String).describe("Gateway IP inside the network"))
}

/// Prefix `schema` with the network ID
fn with_id(schema: ObjectSchema) -> ObjectSchema {
    schema
        .fields()
        .iter()
        .cloned()
        .fold(by_id(NETWORK_ID), ObjectSchema::field)
}
