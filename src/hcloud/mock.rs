//! In-memory [`HcloudApi`] that records every call

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::{Value, json};

use super::api::{HcloudApi, Query};
use super::error::{ApiError, ApiResult};
use super::resource::Resource;

/// One call observed by [`MockHcloudApi`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub operation: &'static str,
    pub resource: Option<Resource>,
    pub id: Option<u64>,
    pub action: Option<String>,
    pub body: Option<Value>,
    pub query: Query,
}

impl RecordedCall {
    fn new(operation: &'static str, resource: Option<Resource>) -> Self {
        Self {
            operation,
            resource,
            id: None,
            action: None,
            body: None,
            query: Query::new(),
        }
    }
}

/// Mock provider for tests.
///
/// Answers every call with a canned payload, or with the configured failure.
#[derive(Debug, Default)]
pub struct MockHcloudApi {
    calls: Mutex<Vec<RecordedCall>>,
    failure: Option<ApiError>,
    delete_payload: Option<Value>,
    lists: HashMap<Resource, Vec<Value>>,
}

impl MockHcloudApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every call with `error`
    pub fn with_failure(mut self, error: ApiError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Return `payload` from deletes instead of no content
    pub fn with_delete_payload(mut self, payload: Value) -> Self {
        self.delete_payload = Some(payload);
        self
    }

    /// Return `items` when listing `resource`
    pub fn with_list(mut self, resource: Resource, items: Vec<Value>) -> Self {
        self.lists.insert(resource, items);
        self
    }

    /// Every call so far, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().len()
    }

    /// The most recent call
    pub fn last_call(&self) -> Option<RecordedCall> {
        self.lock().last().cloned()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<RecordedCall>> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, call: RecordedCall) -> ApiResult<()> {
        self.lock().push(call);
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl HcloudApi for MockHcloudApi {
    async fn list(&self, resource: Resource, query: Query) -> ApiResult<Vec<Value>> {
        self.record(RecordedCall {
            query,
            ..RecordedCall::new("list", Some(resource))
        })?;
        Ok(self
            .lists
            .get(&resource)
            .cloned()
            .unwrap_or_else(|| vec![json!({"id": 1, "name": "mock"})]))
    }

    async fn get(&self, resource: Resource, id: u64) -> ApiResult<Value> {
        self.record(RecordedCall {
            id: Some(id),
            ..RecordedCall::new("get", Some(resource))
        })?;
        Ok(json!({"id": id}))
    }

    async fn create(&self, resource: Resource, body: Value) -> ApiResult<Value> {
        self.record(RecordedCall {
            body: Some(body.clone()),
            ..RecordedCall::new("create", Some(resource))
        })?;
        Ok(json!({ resource.singular(): body }))
    }

    async fn update(&self, resource: Resource, id: u64, body: Value) -> ApiResult<Value> {
        self.record(RecordedCall {
            id: Some(id),
            body: Some(body.clone()),
            ..RecordedCall::new("update", Some(resource))
        })?;
        Ok(json!({ resource.singular(): body }))
    }

    async fn delete(&self, resource: Resource, id: u64) -> ApiResult<Option<Value>> {
        self.record(RecordedCall {
            id: Some(id),
            ..RecordedCall::new("delete", Some(resource))
        })?;
        Ok(self.delete_payload.clone())
    }

    async fn action(&self, resource: Resource, id: u64, action: &str, body: Option<Value>) -> ApiResult<Value> {
        self.record(RecordedCall {
            id: Some(id),
            action: Some(action.to_string()),
            body,
            ..RecordedCall::new("action", Some(resource))
        })?;
        Ok(json!({"action": {"id": 1, "command": action, "status": "running"}}))
    }

    async fn list_actions(&self, resource: Resource, id: u64, query: Query) -> ApiResult<Vec<Value>> {
        self.record(RecordedCall {
            id: Some(id),
            query,
            ..RecordedCall::new("list_actions", Some(resource))
        })?;
        Ok(vec![json!({"id": 1, "command": "start_server", "status": "success"})])
    }

    async fn pricing(&self) -> ApiResult<Value> {
        self.record(RecordedCall::new("pricing", None))?;
        Ok(json!({"pricing": {"currency": "EUR"}}))
    }
}
