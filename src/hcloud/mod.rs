//! Hetzner Cloud provider layer
//!
//! This module provides:
//! - HcloudApi trait for API abstraction
//! - HcloudClient implementation over reqwest
//! - MockHcloudApi for tests
//! - Resource categories and provider errors

pub mod api;
pub mod client;
pub mod error;
pub mod mock;
pub mod resource;

pub use api::{HcloudApi, Query};
pub use client::{DEFAULT_ENDPOINT, HcloudClient};
pub use error::{ApiError, ApiResult};
pub use mock::{MockHcloudApi, RecordedCall};
pub use resource::Resource;
