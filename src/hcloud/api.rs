//! Provider capability trait

use async_trait::async_trait;
use serde_json::Value;

use super::error::ApiResult;
use super::resource::Resource;

/// Query string pairs; array arguments repeat their key
pub type Query = Vec<(String, String)>;

/// Access to the Hetzner Cloud API.
///
/// One method per remote operation category. Implementations are shared
/// across concurrent tool invocations.
#[async_trait]
pub trait HcloudApi: Send + Sync {
    /// `GET /{resource}`, returning the collection array
    async fn list(&self, resource: Resource, query: Query) -> ApiResult<Vec<Value>>;

    /// `GET /{resource}/{id}`, returning the unwrapped object
    async fn get(&self, resource: Resource, id: u64) -> ApiResult<Value>;

    /// `POST /{resource}`, returning the full response
    async fn create(&self, resource: Resource, body: Value) -> ApiResult<Value>;

    /// `PUT /{resource}/{id}`, returning the full response
    async fn update(&self, resource: Resource, id: u64, body: Value) -> ApiResult<Value>;

    /// `DELETE /{resource}/{id}`; `None` when the provider sends no payload
    async fn delete(&self, resource: Resource, id: u64) -> ApiResult<Option<Value>>;

    /// `POST /{resource}/{id}/actions/{action}`
    async fn action(&self, resource: Resource, id: u64, action: &str, body: Option<Value>) -> ApiResult<Value>;

    /// `GET /{resource}/{id}/actions`, returning the action array
    async fn list_actions(&self, resource: Resource, id: u64, query: Query) -> ApiResult<Vec<Value>>;

    /// `GET /pricing`
    async fn pricing(&self) -> ApiResult<Value>;
}
