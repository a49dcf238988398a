//! SSH key tools

use super::fields::{by_id, labels, list_filters, rename};
use super::{Operation, ToolSpec};
use crate::hcloud::Resource;
use crate::tools::{Field, FieldType, ObjectSchema};

const SSH_KEY_ID: &str = "ID of the SSH key";

pub fn specs() -> Vec<ToolSpec> {
    vec![
        ToolSpec::new(
            "list_ssh_keys",
            "List all SSH keys",
            Resource::SshKey,
            Operation::List,
            list_filters().field(Field::optional("fingerprint", FieldType::String).describe("Filter by fingerprint")),
        ),
        ToolSpec::new(
            "create_ssh_key",
            "Create a new SSH key",
            Resource::SshKey,
            Operation::Create,
            ObjectSchema::new()
                .required("name", FieldType::String)
                .field(Field::required("public_key", FieldType::String).describe("Public key in OpenSSH format"))
                .field(labels()),
        ),
        ToolSpec::new("delete_ssh_key", "Delete an SSH key", Resource::SshKey, Operation::Delete, by_id(SSH_KEY_ID)),
        ToolSpec::new(
            "update_ssh_key",
            "Update an SSH key (name, labels)",
            Resource::SshKey,
            Operation::Update,
            rename(SSH_KEY_ID),
        ),
    ]
}
