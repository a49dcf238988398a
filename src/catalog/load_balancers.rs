//! Load balancer tools

use super::fields::{by_id, id_object, labels, list_filters, reference, rename, selector_object};
use super::{Operation, ToolSpec};
use crate::hcloud::Resource;
use crate::tools::{Field, FieldType, ObjectSchema};

const LOAD_BALANCER_ID: &str = "ID of the load balancer";

pub fn specs() -> Vec<ToolSpec> {
    vec![
        ToolSpec::new(
            "list_load_balancers",
            "List all load balancers",
            Resource::LoadBalancer,
            Operation::List,
            list_filters(),
        ),
        ToolSpec::new(
            "get_load_balancer",
            "Get a load balancer by ID",
            Resource::LoadBalancer,
            Operation::Get,
            by_id(LOAD_BALANCER_ID),
        ),
        ToolSpec::new(
            "create_load_balancer",
            "Create a new load balancer",
            Resource::LoadBalancer,
            Operation::Create,
            ObjectSchema::new()
                .required("name", FieldType::String)
                .optional(
                    "algorithm",
                    FieldType::Object(
                        ObjectSchema::new()
                            .required("type", FieldType::one_of_literals(&["round_robin", "least_connections"])),
                    ),
                )
                .required("location", FieldType::String)
                .field(Field::required("load_balancer_type", FieldType::String).describe("Load balancer type (e.g. lb11)"))
                .optional("network_zone", FieldType::String)
                .field(Field::optional("network", FieldType::Integer).describe("ID of a network to attach"))
                .optional("public_interface", FieldType::Boolean)
                .field(labels()),
        ),
        ToolSpec::new(
            "delete_load_balancer",
            "Delete a load balancer",
            Resource::LoadBalancer,
            Operation::Delete,
            by_id(LOAD_BALANCER_ID),
        ),
        ToolSpec::new(
            "update_load_balancer",
            "Update a load balancer (name, labels)",
            Resource::LoadBalancer,
            Operation::Update,
            rename(LOAD_BALANCER_ID),
        ),
        ToolSpec::new(
            "add_load_balancer_target",
            "Add a target to a load balancer",
            Resource::LoadBalancer,
            Operation::Action("add_target"),
            target_schema().optional("use_private_ip", FieldType::Boolean),
        ),
        ToolSpec::new(
            "remove_load_balancer_target",
            "Remove a target from a load balancer",
            Resource::LoadBalancer,
            Operation::Action("remove_target"),
            target_schema(),
        ),
        ToolSpec::new(
            "add_load_balancer_service",
            "Add a service to a load balancer",
            Resource::LoadBalancer,
            Operation::Action("add_service"),
            service_schema(),
        ),
        ToolSpec::new(
            "delete_load_balancer_service",
            "Delete a service from a load balancer",
            Resource::LoadBalancer,
            Operation::Action("delete_service"),
            by_id(LOAD_BALANCER_ID).required("listen_port", FieldType::Number),
        ),
        ToolSpec::new(
            "attach_load_balancer_to_network",
            "Attach a load balancer to a network",
            Resource::LoadBalancer,
            Operation::Action("attach_to_network"),
            by_id(LOAD_BALANCER_ID)
                .field(reference("network", "ID of the network"))
                .field(Field::optional("ip", FieldType::String).describe("IP to request, otherwise auto-assigned")),
        ),
        ToolSpec::new(
            "detach_load_balancer_from_network",
            "Detach a load balancer from a network",
            Resource::LoadBalancer,
            Operation::Action("detach_from_network"),
            by_id(LOAD_BALANCER_ID).field(reference("network", "ID of the network")),
        ),
    ]
}

fn target_schema() -> ObjectSchema {
    by_id(LOAD_BALANCER_ID)
        .required("type", FieldType::one_of_literals(&["server", "label_selector", "ip"]))
        .optional("server", id_object())
        .optional("label_selector", selector_object())
        .optional("ip", FieldType::Object(ObjectSchema::new().required("ip", FieldType::String)))
}

fn service_schema() -> ObjectSchema {
    let health_check_http = ObjectSchema::new()
        .field(Field::optional("domain", FieldType::String).nullable())
        .optional("path", FieldType::String)
        .optional("response", FieldType::String)
        .optional("status_codes", FieldType::array_of(FieldType::String))
        .optional("tls", FieldType::Boolean);

    let health_check = ObjectSchema::new()
        .required("protocol", FieldType::one_of_literals(&["tcp", "http"]))
        .required("port", FieldType::Number)
        .required("interval", FieldType::Number)
        .required("timeout", FieldType::Number)
        .required("retries", FieldType::Number)
        .optional("http", FieldType::Object(health_check_http));

    let http = ObjectSchema::new()
        .optional("cookie_name", FieldType::String)
        .optional("cookie_lifetime", FieldType::Number)
        .field(Field::optional("certificates", FieldType::array_of(FieldType::Integer)).describe("Certificate IDs"))
        .optional("redirect_http", FieldType::Boolean)
        .optional("sticky_sessions", FieldType::Boolean);

    by_id(LOAD_BALANCER_ID)
        .required("protocol", FieldType::one_of_literals(&["tcp", "http", "https"]))
        .required("listen_port", FieldType::Number)
        .required("destination_port", FieldType::Number)
        .required("proxyprotocol", FieldType::Boolean)
        .optional("health_check", FieldType::Object(health_check))
        .optional("http", FieldType::Object(http))
}
