//! Global load balancing: health monitors, origin pools and load balancers
//!
//! Monitors and pools belong to the instance; load balancers belong to a zone.
//! Health-check configuration on monitors is passed through unmodelled.

mod load_balancers;
mod monitors;
mod pools;

use serde::{Deserialize, Serialize};

pub use load_balancers::{AzPools, CreateLoadBalancerInput, LoadBalancer, UpdateLoadBalancerInput};
pub use monitors::{CreateMonitorInput, Monitor, MonitorType, UpdateMonitorInput};
pub use pools::{CreatePoolInput, NotificationType, Origin, OriginInput, Pool, UpdatePoolInput};

/// Health as reported by the GLB service: a boolean on load balancers of
/// older API versions, a status string (`HEALTHY`, `DEGRADED`, ...) elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HealthStatus {
    Healthy(bool),
    Status(String),
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        match self {
            Self::Healthy(healthy) => *healthy,
            Self::Status(status) => status.eq_ignore_ascii_case("healthy"),
        }
    }
}
