//! Tool declarations and the uniform result envelope
//!
//! A [`ToolDeclaration`] binds a name, description and argument schema to a
//! handler. Handlers always resolve to a [`ToolResult`]; provider failures are
//! carried in-band through `is_error`.

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::schema::ObjectSchema;

/// Handler bound to a tool. Receives the validated argument map.
pub type ToolHandler = Arc<dyn Fn(Map<String, Value>) -> BoxFuture<'static, ToolResult> + Send + Sync>;

/// One item of tool output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Content {
    /// Plain text
    Text { text: String },
    /// Binary image, base64-encoded on the wire
    Image {
        #[serde(with = "base64_data")]
        data: Vec<u8>,
        #[serde(rename = "mimeType")]
        mime_type: String,
    },
}

impl Content {
    /// Create a text item
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Create an image item
    pub fn image(data: impl Into<Vec<u8>>, mime_type: impl Into<String>) -> Self {
        Self::Image {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Text value, if this is a text item
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            Self::Image { .. } => None,
        }
    }
}

/// Result envelope returned by every tool invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    pub content: Vec<Content>,
    #[serde(default)]
    pub is_error: bool,
}

impl ToolResult {
    /// Successful result with a single text item
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![Content::text(text)],
            is_error: false,
        }
    }

    /// Successful result holding `value` as 2-space indented JSON
    pub fn json(value: &Value) -> Self {
        match serde_json::to_string_pretty(value) {
            Ok(text) => Self::text(text),
            Err(e) => Self::failure(e.to_string()),
        }
    }

    /// Error-flagged result. The text is always `"Error: <message>"` with a
    /// non-empty message.
    pub fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            "unknown error".to_string()
        } else {
            message
        };
        Self {
            content: vec![Content::text(format!("Error: {}", message))],
            is_error: true,
        }
    }

    /// Text of the first content item, if it is text
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().and_then(Content::as_text)
    }
}

/// A registered tool
#[derive(Clone)]
pub struct ToolDeclaration {
    pub name: String,
    pub description: String,
    pub schema: ObjectSchema,
    pub(crate) handler: ToolHandler,
}

impl ToolDeclaration {
    /// Create a declaration
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        schema: ObjectSchema,
        handler: ToolHandler,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            schema,
            handler,
        }
    }

    /// Advertised view of this tool (handler excluded)
    pub fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: self.name.clone(),
            description: self.description.clone(),
            input_schema: self.schema.to_json_schema(),
        }
    }
}

impl fmt::Debug for ToolDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDeclaration")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("schema", &self.schema)
            .finish()
    }
}

/// Tool entry as advertised by `tools/list`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

mod base64_data {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(data))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;
    use serde_json::json;

    #[test]
    fn test_text_result() {
        let result = ToolResult::text("Network deleted successfully");
        assert!(!result.is_error);
        assert_eq!(result.first_text(), Some("Network deleted successfully"));
    }

    #[test]
    fn test_json_result_is_pretty_printed() {
        let result = ToolResult::json(&json!({"id": 42, "name": "web-1"}));
        assert!(!result.is_error);
        assert_eq!(result.first_text(), Some("{\n  \"id\": 42,\n  \"name\": \"web-1\"\n}"));
    }

    #[test]
    fn test_failure_prefix() {
        let result = ToolResult::failure("server not found (not_found)");
        assert!(result.is_error);
        assert_eq!(result.first_text(), Some("Error: server not found (not_found)"));
    }

    #[test]
    fn test_failure_never_has_empty_message() {
        let result = ToolResult::failure("  ");
        assert_eq!(result.first_text(), Some("Error: unknown error"));
    }

    #[test]
    fn test_result_serialization() {
        let json = serde_json::to_value(ToolResult::failure("boom")).unwrap();
        assert_eq!(
            json,
            json!({"content": [{"type": "text", "text": "Error: boom"}], "isError": true})
        );
    }

    #[test]
    fn test_image_content_serialization() {
        let content = Content::image(vec![0x89, 0x50, 0x4e, 0x47], "image/png");
        let json = serde_json::to_value(&content).unwrap();
        assert_eq!(json, json!({"type": "image", "data": "iVBORw==", "mimeType": "image/png"}));

        let restored: Content = serde_json::from_value(json).unwrap();
        assert_eq!(restored, content);
        assert!(restored.as_text().is_none());
    }

    #[test]
    fn test_result_deserialization_defaults_is_error() {
        let result: ToolResult =
            serde_json::from_value(json!({"content": [{"type": "text", "text": "ok"}]})).unwrap();
        assert!(!result.is_error);
    }

    #[test]
    fn test_declaration_descriptor() {
        let handler: ToolHandler = Arc::new(|_args: Map<String, Value>| async { ToolResult::text("ok") }.boxed());
        let decl = ToolDeclaration::new(
            "list_servers",
            "List all servers",
            ObjectSchema::new(),
            handler,
        );

        let descriptor = decl.descriptor();
        assert_eq!(descriptor.name, "list_servers");
        assert_eq!(descriptor.input_schema["type"], "object");

        let json = serde_json::to_value(&descriptor).unwrap();
        assert!(json.get("inputSchema").is_some());
        assert!(format!("{:?}", decl).contains("list_servers"));
    }
}
