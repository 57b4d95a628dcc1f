//! DNS zones
//!
//! `/instances/{instance_id}/dnszones[/{dnszone_id}]`

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::{Collection, DnsSvcsClient};
use crate::error::Result;
use crate::types::{ListParams, PaginatedList, RequestOptions, require_id, require_text};

/// Lifecycle state of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DnszoneState {
    PendingNetworkAdd,
    Active,
    Deleted,
    Disabled,
    Restored,
    Parked,
    /// A state this client does not know yet.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dnszone {
    /// `"<name>:<uuid>"`, e.g. `example.com:2d0f862b-...`
    pub id: String,
    #[serde(default, with = "crate::utils::datetime")]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::utils::datetime")]
    pub modified_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub instance_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub state: DnszoneState,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateDnszoneInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl CreateDnszoneInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_text("name", Some(&self.name))
    }
}

/// PATCH body; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateDnszoneInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

fn dnszones(instance_id: &str) -> Result<Collection> {
    require_id("instance_id", instance_id)?;
    Ok(Collection::new(&["instances", instance_id, "dnszones"], "dnszones"))
}

impl DnsSvcsClient {
    pub async fn list_dnszones(
        &self,
        instance_id: &str,
        params: &ListParams,
        request: &RequestOptions,
    ) -> Result<PaginatedList<Dnszone>> {
        self.api.list(&dnszones(instance_id)?, params, request).await
    }

    pub async fn create_dnszone(
        &self,
        instance_id: &str,
        input: &CreateDnszoneInput,
        request: &RequestOptions,
    ) -> Result<Dnszone> {
        let collection = dnszones(instance_id)?;
        input.validate()?;
        self.api.create(&collection, input, request).await
    }

    pub async fn get_dnszone(
        &self,
        instance_id: &str,
        dnszone_id: &str,
        request: &RequestOptions,
    ) -> Result<Dnszone> {
        let collection = dnszones(instance_id)?;
        require_id("dnszone_id", dnszone_id)?;
        self.api.get(&collection, dnszone_id, request).await
    }

    pub async fn update_dnszone(
        &self,
        instance_id: &str,
        dnszone_id: &str,
        input: &UpdateDnszoneInput,
        request: &RequestOptions,
    ) -> Result<Dnszone> {
        let collection = dnszones(instance_id)?;
        require_id("dnszone_id", dnszone_id)?;
        self.api
            .update(Method::PATCH, &collection, dnszone_id, input, request)
            .await
    }

    pub async fn delete_dnszone(
        &self,
        instance_id: &str,
        dnszone_id: &str,
        request: &RequestOptions,
    ) -> Result<()> {
        let collection = dnszones(instance_id)?;
        require_id("dnszone_id", dnszone_id)?;
        self.api.delete(&collection, dnszone_id, request).await
    }
}
