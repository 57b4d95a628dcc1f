//! `/instances/{instance_id}/pools[/{pool_id}]`

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::HealthStatus;
use crate::client::{Collection, DnsSvcsClient};
use crate::error::{DnsSvcsError, Result};
use crate::types::{ListParams, PaginatedList, RequestOptions, require_id, require_text};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Email,
    Webhook,
}

/// An origin server as reported inside a pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Origin {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub address: String,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub weight: Option<u32>,
    #[serde(default)]
    pub health: Option<HealthStatus>,
    #[serde(default)]
    pub health_failure_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OriginInput {
    pub name: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
}

impl OriginInput {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<()> {
        require_text("origins.name", Some(&self.name))?;
        require_text("origins.address", Some(&self.address))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
    /// Origins that must be healthy for the pool to be healthy.
    #[serde(default, alias = "healthy_origins_threshold")]
    pub minimum_origins: Option<u32>,
    #[serde(default)]
    pub origins: Vec<Origin>,
    #[serde(default)]
    pub monitor: Option<String>,
    #[serde(default)]
    pub notification_type: Option<NotificationType>,
    #[serde(default)]
    pub notification_channel: Option<String>,
    #[serde(default)]
    pub health: Option<HealthStatus>,
    #[serde(default, with = "crate::utils::datetime")]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::utils::datetime")]
    pub modified_on: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreatePoolInput {
    pub name: String,
    pub origins: Vec<OriginInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_origins: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_type: Option<NotificationType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_channel: Option<String>,
}

impl CreatePoolInput {
    pub fn new(name: impl Into<String>, origins: Vec<OriginInput>) -> Self {
        Self {
            name: name.into(),
            origins,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_text("name", Some(&self.name))?;
        if self.origins.is_empty() {
            return Err(DnsSvcsError::validation("origins", "must not be empty"));
        }
        self.origins.iter().try_for_each(OriginInput::validate)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdatePoolInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_origins: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origins: Option<Vec<OriginInput>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_type: Option<NotificationType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_channel: Option<String>,
}

fn pools(instance_id: &str) -> Result<Collection> {
    require_id("instance_id", instance_id)?;
    Ok(Collection::new(&["instances", instance_id, "pools"], "pools"))
}

impl DnsSvcsClient {
    pub async fn list_pools(
        &self,
        instance_id: &str,
        params: &ListParams,
        request: &RequestOptions,
    ) -> Result<PaginatedList<Pool>> {
        self.api.list(&pools(instance_id)?, params, request).await
    }

    pub async fn create_pool(
        &self,
        instance_id: &str,
        input: &CreatePoolInput,
        request: &RequestOptions,
    ) -> Result<Pool> {
        let collection = pools(instance_id)?;
        input.validate()?;
        self.api.create(&collection, input, request).await
    }

    pub async fn get_pool(
        &self,
        instance_id: &str,
        pool_id: &str,
        request: &RequestOptions,
    ) -> Result<Pool> {
        let collection = pools(instance_id)?;
        require_id("pool_id", pool_id)?;
        self.api.get(&collection, pool_id, request).await
    }

    pub async fn update_pool(
        &self,
        instance_id: &str,
        pool_id: &str,
        input: &UpdatePoolInput,
        request: &RequestOptions,
    ) -> Result<Pool> {
        let collection = pools(instance_id)?;
        require_id("pool_id", pool_id)?;
        self.api
            .update(Method::PUT, &collection, pool_id, input, request)
            .await
    }

    pub async fn delete_pool(
        &self,
        instance_id: &str,
        pool_id: &str,
        request: &RequestOptions,
    ) -> Result<()> {
        let collection = pools(instance_id)?;
        require_id("pool_id", pool_id)?;
        self.api.delete(&collection, pool_id, request).await
    }
}
