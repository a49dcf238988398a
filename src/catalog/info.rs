//! Read-only catalog tools: locations, datacenters, images, types, pricing

use super::fields::{list_filters, name_filter};
use super::{Operation, ToolSpec};
use crate::hcloud::Resource;
use crate::tools::{FieldType, ObjectSchema};

pub fn specs() -> Vec<ToolSpec> {
    vec![
        ToolSpec::new("list_locations", "List all locations", Resource::Location, Operation::List, name_filter()),
        ToolSpec::new(
            "list_datacenters",
            "List all datacenters",
            Resource::Datacenter,
            Operation::List,
            name_filter(),
        ),
        ToolSpec::new(
            "list_images",
            "List all images",
            Resource::Image,
            Operation::List,
            list_filters()
                .optional("type", FieldType::one_of_literals(&["system", "app", "snapshot", "backup"]))
                .optional("architecture", FieldType::one_of_literals(&["x86", "arm"])),
        ),
        ToolSpec::new(
            "list_server_types",
            "List all server types",
            Resource::ServerType,
            Operation::List,
            name_filter(),
        ),
        ToolSpec::new(
            "list_load_balancer_types",
            "List all load balancer types",
            Resource::LoadBalancerType,
            Operation::List,
            name_filter(),
        ),
        ToolSpec::new("get_pricing", "Get all prices", Resource::Pricing, Operation::Pricing, ObjectSchema::new()),
    ]
}
