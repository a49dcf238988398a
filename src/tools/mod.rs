//! Tool System - declarations, argument schemas, and the dispatch registry

mod definition;
mod registry;
mod schema;

pub use definition::{Content, ToolDeclaration, ToolDescriptor, ToolHandler, ToolResult};
pub use registry::ToolRegistry;
pub use schema::{Field, FieldError, FieldType, ObjectSchema, ValidationErrors};
