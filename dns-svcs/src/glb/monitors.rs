//! `/instances/{instance_id}/monitors[/{monitor_id}]`

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::{Collection, DnsSvcsClient};
use crate::error::Result;
use crate::types::{ListParams, PaginatedList, RequestOptions, require_id, require_text};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MonitorType {
    Http,
    Https,
    Tcp,
}

/// Health monitor. Probe settings (`port`, `interval`, `path`, ...) are kept
/// verbatim in [`settings`](Self::settings).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monitor {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub monitor_type: Option<MonitorType>,
    #[serde(default, with = "crate::utils::datetime")]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::utils::datetime")]
    pub modified_on: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub settings: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateMonitorInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub monitor_type: Option<MonitorType>,
    #[serde(flatten)]
    pub settings: Map<String, Value>,
}

impl CreateMonitorInput {
    pub fn new(name: impl Into<String>, monitor_type: MonitorType) -> Self {
        Self {
            name: name.into(),
            monitor_type: Some(monitor_type),
            ..Self::default()
        }
    }

    /// Add a probe setting such as `("port", 8080)`.
    #[must_use]
    pub fn setting(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        require_text("name", Some(&self.name))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateMonitorInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub monitor_type: Option<MonitorType>,
    #[serde(flatten)]
    pub settings: Map<String, Value>,
}

fn monitors(instance_id: &str) -> Result<Collection> {
    require_id("instance_id", instance_id)?;
    Ok(Collection::new(&["instances", instance_id, "monitors"], "monitors"))
}

impl DnsSvcsClient {
    pub async fn list_monitors(
        &self,
        instance_id: &str,
        params: &ListParams,
        request: &RequestOptions,
    ) -> Result<PaginatedList<Monitor>> {
        self.api.list(&monitors(instance_id)?, params, request).await
    }

    pub async fn create_monitor(
        &self,
        instance_id: &str,
        input: &CreateMonitorInput,
        request: &RequestOptions,
    ) -> Result<Monitor> {
        let collection = monitors(instance_id)?;
        input.validate()?;
        self.api.create(&collection, input, request).await
    }

    pub async fn get_monitor(
        &self,
        instance_id: &str,
        monitor_id: &str,
        request: &RequestOptions,
    ) -> Result<Monitor> {
        let collection = monitors(instance_id)?;
        require_id("monitor_id", monitor_id)?;
        self.api.get(&collection, monitor_id, request).await
    }

    pub async fn update_monitor(
        &self,
        instance_id: &str,
        monitor_id: &str,
        input: &UpdateMonitorInput,
        request: &RequestOptions,
    ) -> Result<Monitor> {
        let collection = monitors(instance_id)?;
        require_id("monitor_id", monitor_id)?;
        self.api
            .update(Method::PUT, &collection, monitor_id, input, request)
            .await
    }

    pub async fn delete_monitor(
        &self,
        instance_id: &str,
        monitor_id: &str,
        request: &RequestOptions,
    ) -> Result<()> {
        let collection = monitors(instance_id)?;
        require_id("monitor_id", monitor_id)?;
        self.api.delete(&collection, monitor_id, request).await
    }
}
