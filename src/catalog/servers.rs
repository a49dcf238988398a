//! Server tools

use serde_json::json;

use super::fields::{action_status, by_id, id, labels, list_filters, reference, rename};
use super::{Operation, ToolSpec};
use crate::hcloud::Resource;
use crate::tools::{Field, FieldType, ObjectSchema};

const SERVER_ID: &str = "ID of the server";

pub fn specs() -> Vec<ToolSpec> {
    let power = |name, description, action| {
        ToolSpec::new(name, description, Resource::Server, Operation::Action(action), by_id(SERVER_ID))
    };

    vec![
        ToolSpec::new(
            "list_servers",
            "List all servers",
            Resource::Server,
            Operation::List,
            list_filters().optional(
                "status",
                FieldType::one_of_literals(&[
                    "initializing",
                    "starting",
                    "running",
                    "stopping",
                    "off",
                    "deleting",
                    "rebuilding",
                    "migrating",
                    "unknown",
                ]),
            ),
        ),
        ToolSpec::new("get_server", "Get a server by ID", Resource::Server, Operation::Get, by_id(SERVER_ID)),
        ToolSpec::new("create_server", "Create a new server", Resource::Server, Operation::Create, create_schema()),
        ToolSpec::new("delete_server", "Delete a server", Resource::Server, Operation::Delete, by_id(SERVER_ID)),
        ToolSpec::new(
            "update_server",
            "Update a server (name, labels)",
            Resource::Server,
            Operation::Update,
            rename(SERVER_ID),
        ),
        ToolSpec::new(
            "change_server_type",
            "Change the type of a server (scales resources). Server must be powered off.",
            Resource::Server,
            Operation::Action("change_type"),
            ObjectSchema::new()
                .field(id(SERVER_ID))
                .field(Field::required("server_type", FieldType::String).describe("New server type (e.g. cx22)"))
                .field(
                    Field::optional("upgrade_disk", FieldType::Boolean)
                        .with_default(json!(true))
                        .describe("Whether to upgrade disk size. If true, cannot downgrade later."),
                ),
        ),
        power("power_on_server", "Power on a server", "poweron"),
        power("power_off_server", "Power off a server (hard)", "poweroff"),
        power("reboot_server", "Reboot a server (soft)", "reboot"),
        power("shutdown_server", "Shutdown a server (soft)", "shutdown"),
        power("reset_server", "Reset a server (hard)", "reset"),
        ToolSpec::new(
            "attach_iso",
            "Attach an ISO to a server",
            Resource::Server,
            Operation::Action("attach_iso"),
            by_id(SERVER_ID).field(Field::required("iso", FieldType::String).describe("ID or name of the ISO")),
        ),
        power("detach_iso", "Detach an ISO from a server", "detach_iso"),
        ToolSpec::new(
            "attach_server_to_network",
            "Attach a server to a network",
            Resource::Server,
            Operation::Action("attach_to_network"),
            by_id(SERVER_ID)
                .field(reference("network", "ID of the network"))
                .field(Field::optional("ip", FieldType::String).describe("IP to request, otherwise auto-assigned"))
                .optional("alias_ips", FieldType::array_of(FieldType::String)),
        ),
        ToolSpec::new(
            "detach_server_from_network",
            "Detach a server from a network",
            Resource::Server,
            Operation::Action("detach_from_network"),
            by_id(SERVER_ID).field(reference("network", "ID of the network")),
        ),
        ToolSpec::new(
            "enable_server_rescue",
            "Enable rescue mode for a server. Takes effect on the next reboot.",
            Resource::Server,
            Operation::Action("enable_rescue"),
            by_id(SERVER_ID)
                .field(Field::optional("type", FieldType::one_of_literals(&["linux64"])).describe("Rescue system type"))
                .field(
                    Field::optional("ssh_keys", FieldType::array_of(FieldType::Integer))
                        .describe("IDs of SSH keys to inject into the rescue system"),
                ),
        ),
        power("disable_server_rescue", "Disable rescue mode for a server", "disable_rescue"),
        ToolSpec::new(
            "create_server_image",
            "Create an image (snapshot or backup) from a server",
            Resource::Server,
            Operation::Action("create_image"),
            by_id(SERVER_ID)
                .field(Field::optional("description", FieldType::String).describe("Description of the image"))
                .optional("type", FieldType::one_of_literals(&["snapshot", "backup"]))
                .field(labels()),
        ),
        ToolSpec::new(
            "rebuild_server",
            "Rebuild a server from an image. All data on the server is lost.",
            Resource::Server,
            Operation::Action("rebuild"),
            by_id(SERVER_ID).field(Field::required("image", FieldType::String).describe("ID or name of the image")),
        ),
        ToolSpec::new(
            "list_server_actions",
            "List actions of a server",
            Resource::Server,
            Operation::ListActions,
            by_id(SERVER_ID).optional("status", action_status()),
        ),
    ]
}

fn create_schema() -> ObjectSchema {
    ObjectSchema::new()
        .required("name", FieldType::String)
        .field(Field::required("server_type", FieldType::String).describe("Server type name (e.g. cx22)"))
        .field(Field::required("image", FieldType::String).describe("Image ID or name (e.g. ubuntu-24.04)"))
        .optional("location", FieldType::String)
        .optional("datacenter", FieldType::String)
        .optional("start_after_create", FieldType::Boolean)
        .field(
            Field::optional(
                "ssh_keys",
                FieldType::array_of(FieldType::OneOf(vec![FieldType::String, FieldType::Number])),
            )
            .describe("List of SSH key names or IDs"),
        )
        .optional(
            "firewalls",
            FieldType::array_of(FieldType::Object(ObjectSchema::new().required("firewall", FieldType::Integer))),
        )
        .optional("networks", FieldType::array_of(FieldType::Integer))
        .optional("volumes", FieldType::array_of(FieldType::Integer))
        .optional("placement_group", FieldType::Integer)
        .field(Field::optional("user_data", FieldType::String).describe("Cloud-init user data"))
        .optional("automount", FieldType::Boolean)
        .optional(
            "public_net",
            FieldType::Object(
                ObjectSchema::new()
                    .optional("enable_ipv4", FieldType::Boolean)
                    .optional("enable_ipv6", FieldType::Boolean)
                    .field(Field::optional("ipv4", FieldType::Integer).nullable())
                    .field(Field::optional("ipv6", FieldType::Integer).nullable()),
            ),
        )
        .field(labels())
}
