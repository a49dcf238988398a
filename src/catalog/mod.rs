//! Tool catalog
//!
//! Every tool is one row: a name, a description, the resource it targets,
//! the remote operation it performs, and its argument schema. A single
//! generic handler turns a row into one [`HcloudApi`] call.

mod actions;
mod fields;
mod firewalls;
mod floating_ips;
mod info;
mod load_balancers;
mod networks;
mod placement_groups;
mod primary_ips;
mod servers;
mod ssh_keys;
mod volumes;

use std::sync::Arc;

use futures::FutureExt;
use log::{info, warn};
use serde_json::{Map, Value};

use crate::hcloud::{ApiError, ApiResult, HcloudApi, Query, Resource};
use crate::tools::{ObjectSchema, ToolHandler, ToolRegistry, ToolResult};

/// Remote operation behind a tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `GET /{resource}`, arguments become query parameters
    List,
    /// `GET /{resource}/{id}`
    Get,
    /// `POST /{resource}`, arguments become the body
    Create,
    /// `PUT /{resource}/{id}`, arguments other than `id` become the body
    Update,
    /// `DELETE /{resource}/{id}`
    Delete,
    /// `POST /{resource}/{id}/actions/{name}`
    Action(&'static str),
    /// `GET /{resource}/{id}/actions`
    ListActions,
    /// `GET /pricing`
    Pricing,
}

/// One catalog row
#[derive(Debug, Clone)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub resource: Resource,
    pub operation: Operation,
    pub schema: ObjectSchema,
}

impl ToolSpec {
    pub fn new(
        name: &'static str,
        description: &'static str,
        resource: Resource,
        operation: Operation,
        schema: ObjectSchema,
    ) -> Self {
        Self {
            name,
            description,
            resource,
            operation,
            schema,
        }
    }
}

/// Successful outcome of a dispatched call
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Json(Value),
    Message(String),
}

/// The full catalog, in advertisement order
pub fn specs() -> Vec<ToolSpec> {
    let mut all = Vec::new();
    all.extend(servers::specs());
    all.extend(load_balancers::specs());
    all.extend(networks::specs());
    all.extend(volumes::specs());
    all.extend(firewalls::specs());
    all.extend(floating_ips::specs());
    all.extend(primary_ips::specs());
    all.extend(ssh_keys::specs());
    all.extend(placement_groups::specs());
    all.extend(info::specs());
    all.extend(actions::specs());
    all
}

/// Register every catalog tool against `api`
pub fn register_catalog(registry: &mut ToolRegistry, api: Arc<dyn HcloudApi>) {
    for spec in specs() {
        let handler = build_handler(spec.resource, spec.operation, api.clone());
        registry.register(spec.name, spec.description, spec.schema, handler);
    }
}

/// A registry holding exactly the catalog
pub fn build_registry(api: Arc<dyn HcloudApi>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    register_catalog(&mut registry, api);
    info!("Registered {} tools", registry.len());
    registry
}

/// Bind one catalog row to `api`
pub fn build_handler(resource: Resource, operation: Operation, api: Arc<dyn HcloudApi>) -> ToolHandler {
    Arc::new(move |args: Map<String, Value>| {
        let api = api.clone();
        async move {
            match dispatch(api.as_ref(), resource, operation, args).await {
                Ok(Reply::Json(value)) => ToolResult::json(&value),
                Ok(Reply::Message(message)) => ToolResult::text(message),
                Err(e) => {
                    warn!("{:?} on {} failed: {}", operation, resource, e);
                    ToolResult::failure(e.to_string())
                }
            }
        }
        .boxed()
    })
}

/// Perform the remote call for `operation` with validated arguments
pub async fn dispatch(
    api: &dyn HcloudApi,
    resource: Resource,
    operation: Operation,
    mut args: Map<String, Value>,
) -> ApiResult<Reply> {
    let reply = match operation {
        Operation::List => Reply::Json(Value::Array(api.list(resource, to_query(&args)).await?)),
        Operation::Get => Reply::Json(api.get(resource, take_id(&mut args)?).await?),
        Operation::Create => Reply::Json(api.create(resource, Value::Object(args)).await?),
        Operation::Update => {
            let id = take_id(&mut args)?;
            Reply::Json(api.update(resource, id, Value::Object(args)).await?)
        }
        Operation::Delete => match api.delete(resource, take_id(&mut args)?).await? {
            Some(payload) => Reply::Json(payload),
            None => Reply::Message(format!("{} deleted successfully", resource.display_name())),
        },
        Operation::Action(name) => {
            let id = take_id(&mut args)?;
            let body = (!args.is_empty()).then(|| Value::Object(args));
            Reply::Json(api.action(resource, id, name, body).await?)
        }
        Operation::ListActions => {
            let id = take_id(&mut args)?;
            Reply::Json(Value::Array(api.list_actions(resource, id, to_query(&args)).await?))
        }
        Operation::Pricing => Reply::Json(api.pricing().await?),
    };
    Ok(reply)
}

fn take_id(args: &mut Map<String, Value>) -> ApiResult<u64> {
    match args.remove("id") {
        Some(value) => value
            .as_u64()
            .ok_or_else(|| ApiError::InvalidRequest(format!("id must be a non-negative integer, got {}", value))),
        None => Err(ApiError::InvalidRequest("id is required".to_string())),
    }
}

/// Flatten arguments into query pairs; arrays repeat their key
fn to_query(args: &Map<String, Value>) -> Query {
    let mut query = Query::new();
    for (key, value) in args {
        match value {
            Value::Array(items) => {
                for item in items {
                    query.push((key.clone(), query_value(item)));
                }
            }
            Value::Null => {}
            other => query.push((key.clone(), query_value(other))),
        }
    }
    query
}

fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
