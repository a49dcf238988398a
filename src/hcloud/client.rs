//! HTTP implementation of [`HcloudApi`]

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;

use crate::config::Config;
use crate::error::{McpError, Result};

use super::api::{HcloudApi, Query};
use super::error::{ApiError, ApiResult};
use super::resource::Resource;

/// Hetzner Cloud API base URL
pub const DEFAULT_ENDPOINT: &str = "https://api.hetzner.cloud/v1";

/// reqwest-backed API client with bearer authentication
pub struct HcloudClient {
    client: Client,
    token: String,
    endpoint: String,
}

impl HcloudClient {
    /// Create a client against `endpoint`
    pub fn new(token: impl Into<String>, endpoint: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| McpError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            token: token.into(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from process configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.token.clone(), config.endpoint.clone())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Absolute URL for the given path segments
    fn url(&self, segments: &[&str]) -> String {
        let mut url = self.endpoint.clone();
        for segment in segments {
            url.push('/');
            url.push_str(segment);
        }
        url
    }

    /// Send one request. `None` means the provider answered without a body.
    async fn send(&self, method: Method, url: String, query: &Query, body: Option<Value>) -> ApiResult<Option<Value>> {
        debug!("{} {}", method, url);
        let mut request = self.client.request(method, &url).bearer_auth(&self.token);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::from_response(status.as_u16(), &text));
        }
        parse_body(status, &text)
    }

    async fn send_expecting(&self, method: Method, url: String, query: &Query, body: Option<Value>) -> ApiResult<Value> {
        self.send(method, url, query, body)
            .await?
            .ok_or_else(|| ApiError::Decode("expected a response body".to_string()))
    }
}

/// Parse a successful response body
fn parse_body(status: StatusCode, text: &str) -> ApiResult<Option<Value>> {
    if status == StatusCode::NO_CONTENT || text.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(text)?))
}

/// Pull `key` out of a response object
fn take_key(mut response: Value, key: &str) -> ApiResult<Value> {
    response
        .get_mut(key)
        .map(Value::take)
        .ok_or_else(|| ApiError::Decode(format!("response has no '{}' field", key)))
}

fn take_array(response: Value, key: &str) -> ApiResult<Vec<Value>> {
    match take_key(response, key)? {
        Value::Array(items) => Ok(items),
        other => Err(ApiError::Decode(format!("'{}' is not an array: {}", key, other))),
    }
}

#[async_trait]
impl HcloudApi for HcloudClient {
    async fn list(&self, resource: Resource, query: Query) -> ApiResult<Vec<Value>> {
        let url = self.url(&[resource.path()]);
        let response = self.send_expecting(Method::GET, url, &query, None).await?;
        take_array(response, resource.path())
    }

    async fn get(&self, resource: Resource, id: u64) -> ApiResult<Value> {
        let url = self.url(&[resource.path(), &id.to_string()]);
        let response = self.send_expecting(Method::GET, url, &Query::new(), None).await?;
        take_key(response, resource.singular())
    }

    async fn create(&self, resource: Resource, body: Value) -> ApiResult<Value> {
        let url = self.url(&[resource.path()]);
        self.send_expecting(Method::POST, url, &Query::new(), Some(body)).await
    }

    async fn update(&self, resource: Resource, id: u64, body: Value) -> ApiResult<Value> {
        let url = self.url(&[resource.path(), &id.to_string()]);
        self.send_expecting(Method::PUT, url, &Query::new(), Some(body)).await
    }

    async fn delete(&self, resource: Resource, id: u64) -> ApiResult<Option<Value>> {
        let url = self.url(&[resource.path(), &id.to_string()]);
        self.send(Method::DELETE, url, &Query::new(), None).await
    }

    async fn action(&self, resource: Resource, id: u64, action: &str, body: Option<Value>) -> ApiResult<Value> {
        let url = self.url(&[resource.path(), &id.to_string(), "actions", action]);
        self.send_expecting(Method::POST, url, &Query::new(), body).await
    }

    async fn list_actions(&self, resource: Resource, id: u64, query: Query) -> ApiResult<Vec<Value>> {
        let url = self.url(&[resource.path(), &id.to_string(), "actions"]);
        let response = self.send_expecting(Method::GET, url, &query, None).await?;
        take_array(response, "actions")
    }

    async fn pricing(&self) -> ApiResult<Value> {
        let url = self.url(&["pricing"]);
        self.send_expecting(Method::GET, url, &Query::new(), None).await
    }
}

impl std::fmt::Debug for HcloudClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HcloudClient")
            .field("endpoint", &self.endpoint)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> HcloudClient {
        HcloudClient::new("test-token", DEFAULT_ENDPOINT).unwrap()
    }

    #[test]
    fn test_url_building() {
        let client = client();
        assert_eq!(client.url(&["servers"]), "https://api.hetzner.cloud/v1/servers");
        assert_eq!(
            client.url(&["servers", "42", "actions", "poweron"]),
            "https://api.hetzner.cloud/v1/servers/42/actions/poweron"
        );
        assert_eq!(client.url(&["pricing"]), "https://api.hetzner.cloud/v1/pricing");
    }

    #[test]
    fn test_endpoint_trailing_slash_trimmed() {
        let client = HcloudClient::new("t", "http://localhost:8080/v1/").unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8080/v1");
        assert_eq!(client.url(&["volumes", "7"]), "http://localhost:8080/v1/volumes/7");
    }

    #[test]
    fn test_debug_hides_token() {
        let debug = format!("{:?}", client());
        assert!(!debug.contains("test-token"));
        assert!(debug.contains("redacted"));
    }

    #[test]
    fn test_parse_body_no_content() {
        assert_eq!(parse_body(StatusCode::NO_CONTENT, "").unwrap(), None);
        assert_eq!(parse_body(StatusCode::OK, "  \n").unwrap(), None);
    }

    #[test]
    fn test_parse_body_json() {
        let parsed = parse_body(StatusCode::CREATED, r#"{"action": {"id": 1}}"#).unwrap();
        assert_eq!(parsed, Some(json!({"action": {"id": 1}})));
    }

    #[test]
    fn test_parse_body_invalid_json() {
        let err = parse_body(StatusCode::OK, "not json").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_take_key_unwraps_singular() {
        let response = json!({"server": {"id": 42, "name": "web-1"}});
        assert_eq!(take_key(response, "server").unwrap(), json!({"id": 42, "name": "web-1"}));
    }

    #[test]
    fn test_take_key_missing() {
        let err = take_key(json!({"meta": {}}), "servers").unwrap_err();
        assert_eq!(err.to_string(), "Failed to decode response: response has no 'servers' field");
    }

    #[test]
    fn test_take_array() {
        let response = json!({"networks": [{"id": 1}, {"id": 2}], "meta": {"pagination": {}}});
        assert_eq!(take_array(response, "networks").unwrap().len(), 2);

        let err = take_array(json!({"networks": {}}), "networks").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_from_config() {
        let config = Config {
            token: "abc".to_string(),
            endpoint: "http://127.0.0.1:9/v1".to_string(),
        };
        let client = HcloudClient::from_config(&config).unwrap();
        assert_eq!(client.endpoint(), "http://127.0.0.1:9/v1");
    }
}
