//! Volume tools

use super::fields::{by_id, labels, list_filters, reference, rename};
use super::{Operation, ToolSpec};
use crate::hcloud::Resource;
use crate::tools::{Field, FieldType, ObjectSchema};

const VOLUME_ID: &str = "ID of the volume";

pub fn specs() -> Vec<ToolSpec> {
    vec![
        ToolSpec::new("list_volumes", "List all volumes", Resource::Volume, Operation::List, list_filters()),
        ToolSpec::new("get_volume", "Get a volume by ID", Resource::Volume, Operation::Get, by_id(VOLUME_ID)),
        ToolSpec::new(
            "create_volume",
            "Create a new volume",
            Resource::Volume,
            Operation::Create,
            ObjectSchema::new()
                .required("name", FieldType::String)
                .field(Field::required("size", FieldType::Integer).describe("Size in GB"))
                .optional("automount", FieldType::Boolean)
                .field(Field::optional("format", FieldType::String).describe("Filesystem to format with (xfs or ext4)"))
                .optional("location", FieldType::String)
                .field(Field::optional("server", FieldType::Integer).describe("ID of a server to attach to"))
                .field(labels()),
        ),
        ToolSpec::new("delete_volume", "Delete a volume", Resource::Volume, Operation::Delete, by_id(VOLUME_ID)),
        ToolSpec::new(
            "update_volume",
            "Update a volume (name, labels)",
            Resource::Volume,
            Operation::Update,
            rename(VOLUME_ID),
        ),
        ToolSpec::new(
            "attach_volume",
            "Attach a volume to a server",
            Resource::Volume,
            Operation::Action("attach"),
            by_id(VOLUME_ID)
                .field(reference("server", "ID of the server"))
                .optional("automount", FieldType::Boolean),
        ),
        ToolSpec::new(
            "detach_volume",
            "Detach a volume",
            Resource::Volume,
            Operation::Action("detach"),
            by_id(VOLUME_ID),
        ),
        ToolSpec::new(
            "resize_volume",
            "Resize a volume. Volumes can only grow.",
            Resource::Volume,
            Operation::Action("resize"),
            by_id(VOLUME_ID).field(Field::required("size", FieldType::Integer).describe("New size in GB")),
        ),
    ]
}
