//! Tool registry and dispatch
//!
//! Owns the name → declaration mapping. Built once at startup, then shared
//! read-only (typically behind an `Arc`) by every concurrent invocation.

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use log::{debug, warn};
use serde_json::{Map, Value};

use crate::error::{McpError, Result};

use super::definition::{ToolDeclaration, ToolDescriptor, ToolHandler, ToolResult};
use super::schema::ObjectSchema;

/// Catalog of declared tools plus listing and invocation
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolDeclaration>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool.
    ///
    /// The last registration for a name wins: it replaces the earlier
    /// declaration in place, keeping its listing position, and the replaced
    /// declaration is returned.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        schema: ObjectSchema,
        handler: ToolHandler,
    ) -> Option<ToolDeclaration> {
        self.add(ToolDeclaration::new(name, description, schema, handler))
    }

    /// Register a pre-built declaration (same overwrite rule as [`register`](Self::register))
    pub fn add(&mut self, declaration: ToolDeclaration) -> Option<ToolDeclaration> {
        match self.index.get(&declaration.name) {
            Some(&position) => {
                warn!("Tool '{}' registered twice, keeping the last declaration", declaration.name);
                Some(std::mem::replace(&mut self.tools[position], declaration))
            }
            None => {
                self.index.insert(declaration.name.clone(), self.tools.len());
                self.tools.push(declaration);
                None
            }
        }
    }

    /// Advertised view of every tool, in registration order
    pub fn list_tools(&self) -> Vec<ToolDescriptor> {
        self.tools.iter().map(ToolDeclaration::descriptor).collect()
    }

    /// Get a declaration by name
    pub fn get(&self, name: &str) -> Option<&ToolDeclaration> {
        self.index.get(name).map(|&position| &self.tools[position])
    }

    /// Check if a tool exists
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Tool names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Validate `arguments` and run the named tool.
    ///
    /// Unknown tools and invalid arguments are errors; everything the handler
    /// produces, including a panic, comes back as a [`ToolResult`].
    pub async fn invoke(&self, name: &str, arguments: Value) -> Result<ToolResult> {
        let tool = self
            .get(name)
            .ok_or_else(|| McpError::ToolNotFound(name.to_string()))?;

        let arguments = match arguments {
            Value::Null => Value::Object(Map::new()),
            other => other,
        };
        let validated = tool
            .schema
            .validate(&arguments)
            .map_err(|errors| McpError::InvalidArguments {
                tool: name.to_string(),
                errors,
            })?;

        tracing::debug!(tool = %name, "Invoking tool");
        let handler = tool.handler.clone();
        let outcome = AssertUnwindSafe(async move { handler(validated).await })
            .catch_unwind()
            .await;

        let result = match outcome {
            Ok(result) => result,
            Err(panic) => {
                let reason = panic_message(panic.as_ref());
                tracing::error!(tool = %name, reason = %reason, "Tool handler panicked");
                ToolResult::failure(format!("tool handler panicked: {}", reason))
            }
        };
        debug!("Tool '{}' finished (is_error: {})", name, result.is_error);
        Ok(result)
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::FieldType;
    use serde_json::json;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn echo_handler() -> ToolHandler {
        Arc::new(|args: Map<String, Value>| async move { ToolResult::json(&Value::Object(args)) }.boxed())
    }

    fn fixed_handler(text: &'static str) -> ToolHandler {
        Arc::new(move |_args: Map<String, Value>| async move { ToolResult::text(text) }.boxed())
    }

    fn id_schema() -> ObjectSchema {
        ObjectSchema::new().required("id", FieldType::Integer)
    }

    #[test]
    fn test_registry_new_empty() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.list_tools().is_empty());
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = ToolRegistry::new();
        let replaced = registry.register("get_volume", "Get a volume", id_schema(), echo_handler());

        assert!(replaced.is_none());
        assert!(registry.contains("get_volume"));
        assert_eq!(registry.get("get_volume").unwrap().description, "Get a volume");
        assert!(registry.get("get_network").is_none());
    }

    #[test]
    fn test_list_tools_in_registration_order() {
        let mut registry = ToolRegistry::new();
        registry.register("list_servers", "List all servers", ObjectSchema::new(), echo_handler());
        registry.register("delete_server", "Delete a server", id_schema(), echo_handler());
        registry.register("get_pricing", "Get all prices", ObjectSchema::new(), echo_handler());

        let names: Vec<String> = registry.list_tools().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["list_servers", "delete_server", "get_pricing"]);
        assert_eq!(registry.names(), vec!["list_servers", "delete_server", "get_pricing"]);
    }

    #[test]
    fn test_list_tools_idempotent() {
        let mut registry = ToolRegistry::new();
        registry.register("list_servers", "List all servers", ObjectSchema::new(), echo_handler());
        registry.register("delete_server", "Delete a server", id_schema(), echo_handler());

        assert_eq!(registry.list_tools(), registry.list_tools());
    }

    #[tokio::test]
    async fn test_last_registration_wins() {
        let mut registry = ToolRegistry::new();
        registry.register("first", "First", ObjectSchema::new(), fixed_handler("one"));
        registry.register("dup", "Original", ObjectSchema::new(), fixed_handler("old"));
        let replaced = registry.register("dup", "Replacement", ObjectSchema::new(), fixed_handler("new"));

        assert_eq!(replaced.unwrap().description, "Original");
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names(), vec!["first", "dup"]);

        let result = registry.invoke("dup", json!({})).await.unwrap();
        assert_eq!(result.first_text(), Some("new"));
    }

    #[tokio::test]
    async fn test_invoke_unknown_tool() {
        let registry = ToolRegistry::new();
        let err = registry.invoke("nope", json!({})).await.unwrap_err();
        assert!(matches!(err, McpError::ToolNotFound(ref name) if name == "nope"));
    }

    #[tokio::test]
    async fn test_invoke_invalid_arguments() {
        let mut registry = ToolRegistry::new();
        registry.register("delete_server", "Delete a server", id_schema(), echo_handler());

        let err = registry.invoke("delete_server", json!({"id": "x"})).await.unwrap_err();
        match err {
            McpError::InvalidArguments { tool, errors } => {
                assert_eq!(tool, "delete_server");
                assert_eq!(errors.paths(), vec!["id"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_arguments_skip_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let handler: ToolHandler = Arc::new(move |_args: Map<String, Value>| {
            counter.fetch_add(1, Ordering::SeqCst);
            async { ToolResult::text("ran") }.boxed()
        });

        let mut registry = ToolRegistry::new();
        registry.register("delete_server", "Delete a server", id_schema(), handler);

        assert!(registry.invoke("delete_server", json!({})).await.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert!(registry.invoke("delete_server", json!({"id": 3})).await.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_null_arguments_treated_as_empty() {
        let mut registry = ToolRegistry::new();
        registry.register("list_servers", "List all servers", ObjectSchema::new(), fixed_handler("[]"));

        let result = registry.invoke("list_servers", Value::Null).await.unwrap();
        assert_eq!(result.first_text(), Some("[]"));
    }

    #[tokio::test]
    async fn test_handler_receives_validated_arguments() {
        let mut registry = ToolRegistry::new();
        let schema = id_schema().field(
            crate::tools::Field::optional("upgrade_disk", FieldType::Boolean).with_default(json!(true)),
        );
        registry.register("change_server_type", "Change type", schema, echo_handler());

        let result = registry
            .invoke("change_server_type", json!({"id": 5, "extra": "dropped"}))
            .await
            .unwrap();
        let echoed: Value = serde_json::from_str(result.first_text().unwrap()).unwrap();
        assert_eq!(echoed, json!({"id": 5, "upgrade_disk": true}));
    }

    #[tokio::test]
    async fn test_handler_error_result_passes_through() {
        let mut registry = ToolRegistry::new();
        let handler: ToolHandler = Arc::new(|_args: Map<String, Value>| async { ToolResult::failure("conflict") }.boxed());
        registry.register("power_on_server", "Power on", id_schema(), handler);

        let result = registry.invoke("power_on_server", json!({"id": 1})).await.unwrap();
        assert!(result.is_error);
        assert_eq!(result.first_text(), Some("Error: conflict"));
    }

    #[tokio::test]
    async fn test_panicking_handler_becomes_error_result() {
        let mut registry = ToolRegistry::new();
        let handler: ToolHandler = Arc::new(|_args: Map<String, Value>| async { panic!("handler exploded") }.boxed());
        registry.register("reset_server", "Reset", id_schema(), handler);

        let result = registry.invoke("reset_server", json!({"id": 1})).await.unwrap();
        assert!(result.is_error);
        assert_eq!(
            result.first_text(),
            Some("Error: tool handler panicked: handler exploded")
        );
    }

    #[tokio::test]
    async fn test_panic_before_future_is_caught() {
        let mut registry = ToolRegistry::new();
        let handler: ToolHandler = Arc::new(|_args: Map<String, Value>| panic!("sync {}", "failure"));
        registry.register("reboot_server", "Reboot", id_schema(), handler);

        let result = registry.invoke("reboot_server", json!({"id": 1})).await.unwrap();
        assert_eq!(
            result.first_text(),
            Some("Error: tool handler panicked: sync failure")
        );
    }
}
