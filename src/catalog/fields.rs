//! Field and schema building blocks shared by the catalog tables

use crate::tools::{Field, FieldType, ObjectSchema};

/// Required resource ID
pub fn id(description: &'static str) -> Field {
    Field::required("id", FieldType::Integer).describe(description)
}

/// Optional user-defined labels
pub fn labels() -> Field {
    Field::optional("labels", FieldType::Labels).describe("User-defined labels (key/value pairs)")
}

/// Required reference to another resource by ID
pub fn reference(name: &'static str, description: &'static str) -> Field {
    Field::required(name, FieldType::Integer).describe(description)
}

/// Schema holding only the resource ID
pub fn by_id(description: &'static str) -> ObjectSchema {
    ObjectSchema::new().field(id(description))
}

/// `{id, name?, labels?}`, the common rename/relabel update
pub fn rename(description: &'static str) -> ObjectSchema {
    by_id(description)
        .field(Field::optional("name", FieldType::String).describe("New name"))
        .field(labels())
}

/// Name and label selector filters accepted by most collections
pub fn list_filters() -> ObjectSchema {
    name_filter().field(
        Field::optional("label_selector", FieldType::String).describe("Filter by label selector (e.g. env=prod)"),
    )
}

/// Name filter only
pub fn name_filter() -> ObjectSchema {
    ObjectSchema::new().field(Field::optional("name", FieldType::String).describe("Filter by exact name"))
}

/// `{"id": <integer>}` nested reference object
pub fn id_object() -> FieldType {
    FieldType::Object(ObjectSchema::new().required("id", FieldType::Integer))
}

/// `{"selector": <string>}` nested label selector object
pub fn selector_object() -> FieldType {
    FieldType::Object(ObjectSchema::new().required("selector", FieldType::String))
}

/// IP family of floating and primary IPs
pub fn ip_type() -> FieldType {
    FieldType::one_of_literals(&["ipv4", "ipv6"])
}

/// Action status filter
pub fn action_status() -> FieldType {
    FieldType::one_of_literals(&["running", "success", "error"])
}
