//! `/instances/{instance_id}/dnszones/{dnszone_id}/load_balancers[/{lb_id}]`

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Deserializer, Serialize};

use super::HealthStatus;
use crate::client::{Collection, DnsSvcsClient};
use crate::error::{DnsSvcsError, Result};
use crate::types::{ListParams, PaginatedList, RequestOptions, require_id, require_text};

/// Pools to steer to for clients in one availability zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AzPools {
    pub availability_zone: String,
    pub pools: Vec<String>,
}

impl AzPools {
    pub fn new(availability_zone: impl Into<String>, pools: Vec<String>) -> Self {
        Self {
            availability_zone: availability_zone.into(),
            pools,
        }
    }
}

/// `az_pools` arrives as `[{"availability_zone": .., "pools": [..]}]` or, from
/// older deployments, as `{"us-south-1": [..], ...}`.
fn deserialize_az_pools<'de, D>(deserializer: D) -> std::result::Result<Vec<AzPools>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        List(Vec<AzPools>),
        Map(BTreeMap<String, Vec<String>>),
    }

    Ok(match Option::<Wire>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(Wire::List(list)) => list,
        Some(Wire::Map(map)) => map
            .into_iter()
            .map(|(availability_zone, pools)| AzPools {
                availability_zone,
                pools,
            })
            .collect(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadBalancer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub ttl: Option<u32>,
    #[serde(default)]
    pub health: Option<HealthStatus>,
    #[serde(default)]
    pub fallback_pool: Option<String>,
    #[serde(default)]
    pub default_pools: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_az_pools")]
    pub az_pools: Vec<AzPools>,
    #[serde(default, with = "crate::utils::datetime")]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::utils::datetime")]
    pub modified_on: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateLoadBalancerInput {
    pub name: String,
    pub fallback_pool: String,
    pub default_pools: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub az_pools: Vec<AzPools>,
}

impl CreateLoadBalancerInput {
    pub fn new(
        name: impl Into<String>,
        fallback_pool: impl Into<String>,
        default_pools: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            fallback_pool: fallback_pool.into(),
            default_pools,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_text("name", Some(&self.name))?;
        require_text("fallback_pool", Some(&self.fallback_pool))?;
        if self.default_pools.is_empty() {
            return Err(DnsSvcsError::validation("default_pools", "must not be empty"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateLoadBalancerInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_pool: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_pools: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub az_pools: Option<Vec<AzPools>>,
}

fn load_balancers(instance_id: &str, dnszone_id: &str) -> Result<Collection> {
    require_id("instance_id", instance_id)?;
    require_id("dnszone_id", dnszone_id)?;
    Ok(Collection::new(
        &["instances", instance_id, "dnszones", dnszone_id, "load_balancers"],
        "load_balancers",
    ))
}

impl DnsSvcsClient {
    pub async fn list_load_balancers(
        &self,
        instance_id: &str,
        dnszone_id: &str,
        params: &ListParams,
        request: &RequestOptions,
    ) -> Result<PaginatedList<LoadBalancer>> {
        let collection = load_balancers(instance_id, dnszone_id)?;
        self.api.list(&collection, params, request).await
    }

    pub async fn create_load_balancer(
        &self,
        instance_id: &str,
        dnszone_id: &str,
        input: &CreateLoadBalancerInput,
        request: &RequestOptions,
    ) -> Result<LoadBalancer> {
        let collection = load_balancers(instance_id, dnszone_id)?;
        input.validate()?;
        self.api.create(&collection, input, request).await
    }

    pub async fn get_load_balancer(
        &self,
        instance_id: &str,
        dnszone_id: &str,
        lb_id: &str,
        request: &RequestOptions,
    ) -> Result<LoadBalancer> {
        let collection = load_balancers(instance_id, dnszone_id)?;
        require_id("lb_id", lb_id)?;
        self.api.get(&collection, lb_id, request).await
    }

    pub async fn update_load_balancer(
        &self,
        instance_id: &str,
        dnszone_id: &str,
        lb_id: &str,
        input: &UpdateLoadBalancerInput,
        request: &RequestOptions,
    ) -> Result<LoadBalancer> {
        let collection = load_balancers(instance_id, dnszone_id)?;
        require_id("lb_id", lb_id)?;
        self.api
            .update(Method::PUT, &collection, lb_id, input, request)
            .await
    }

    pub async fn delete_load_balancer(
        &self,
        instance_id: &str,
        dnszone_id: &str,
        lb_id: &str,
        request: &RequestOptions,
    ) -> Result<()> {
        let collection = load_balancers(instance_id, dnszone_id)?;
        require_id("lb_id", lb_id)?;
        self.api.delete(&collection, lb_id, request).await
    }
}
