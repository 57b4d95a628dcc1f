//! Permitted networks: the VPCs allowed to resolve a zone
//!
//! `/instances/{instance_id}/dnszones/{dnszone_id}/permitted_networks[/{permitted_network_id}]`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{Collection, DnsSvcsClient};
use crate::error::Result;
use crate::types::{ListParams, PaginatedList, RequestOptions, require_id, require_text};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermittedNetworkType {
    #[default]
    Vpc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PermittedNetworkState {
    Active,
    RemovalInProgress,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermittedNetworkVpc {
    pub vpc_crn: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermittedNetwork {
    pub id: String,
    #[serde(default, with = "crate::utils::datetime")]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::utils::datetime")]
    pub modified_on: Option<DateTime<Utc>>,
    pub permitted_network: PermittedNetworkVpc,
    #[serde(rename = "type")]
    pub network_type: PermittedNetworkType,
    pub state: PermittedNetworkState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatePermittedNetworkInput {
    #[serde(rename = "type")]
    pub network_type: PermittedNetworkType,
    pub permitted_network: PermittedNetworkVpc,
}

impl CreatePermittedNetworkInput {
    pub fn vpc(vpc_crn: impl Into<String>) -> Self {
        Self {
            network_type: PermittedNetworkType::Vpc,
            permitted_network: PermittedNetworkVpc {
                vpc_crn: vpc_crn.into(),
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_text("vpc_crn", Some(&self.permitted_network.vpc_crn))
    }
}

fn permitted_networks(instance_id: &str, dnszone_id: &str) -> Result<Collection> {
    require_id("instance_id", instance_id)?;
    require_id("dnszone_id", dnszone_id)?;
    Ok(Collection::new(
        &["instances", instance_id, "dnszones", dnszone_id, "permitted_networks"],
        "permitted_networks",
    ))
}

impl DnsSvcsClient {
    pub async fn list_permitted_networks(
        &self,
        instance_id: &str,
        dnszone_id: &str,
        params: &ListParams,
        request: &RequestOptions,
    ) -> Result<PaginatedList<PermittedNetwork>> {
        let collection = permitted_networks(instance_id, dnszone_id)?;
        self.api.list(&collection, params, request).await
    }

    pub async fn create_permitted_network(
        &self,
        instance_id: &str,
        dnszone_id: &str,
        input: &CreatePermittedNetworkInput,
        request: &RequestOptions,
    ) -> Result<PermittedNetwork> {
        let collection = permitted_networks(instance_id, dnszone_id)?;
        input.validate()?;
        self.api.create(&collection, input, request).await
    }

    pub async fn get_permitted_network(
        &self,
        instance_id: &str,
        dnszone_id: &str,
        permitted_network_id: &str,
        request: &RequestOptions,
    ) -> Result<PermittedNetwork> {
        let collection = permitted_networks(instance_id, dnszone_id)?;
        require_id("permitted_network_id", permitted_network_id)?;
        self.api.get(&collection, permitted_network_id, request).await
    }

    /// Removal is asynchronous: the server answers 202 with the network in
    /// [`PermittedNetworkState::RemovalInProgress`].
    pub async fn delete_permitted_network(
        &self,
        instance_id: &str,
        dnszone_id: &str,
        permitted_network_id: &str,
        request: &RequestOptions,
    ) -> Result<PermittedNetwork> {
        let collection = permitted_networks(instance_id, dnszone_id)?;
        require_id("permitted_network_id", permitted_network_id)?;
        self.api
            .delete_returning(&collection, permitted_network_id, request)
            .await
    }
}
