//! # dns-svcs
//!
//! Typed client for the DNS Services REST API: private DNS zones, resource
//! records, permitted networks, global load balancing, and the resource
//! controller endpoints that provision service instances.
//!
//! ## Supported Resources
//!
//! | Resource | Client | Operations |
//! |----------|--------|------------|
//! | DNS zones | [`DnsSvcsClient`] | list, create, get, update, delete |
//! | Resource records (A, AAAA, CNAME, MX, PTR, SRV, TXT) | [`DnsSvcsClient`] | list, create, get, update, delete |
//! | Permitted networks (VPC) | [`DnsSvcsClient`] | list, create, get, delete |
//! | GLB monitors, pools, load balancers | [`DnsSvcsClient`] | list, create, get, update, delete |
//! | Service instances | [`ResourceInstancesClient`] | list, create, get, update, delete |
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: use the platform's native TLS implementation.
//! - **`rustls`**: use rustls. Recommended for cross-compilation and static builds.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dns_svcs::{
//!     ClientConfig, CreateResourceRecordOptions, DnsSvcsClient, ListParams, RdataInput,
//!     RecordType, RequestOptions,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Build a client with a caller-supplied IAM bearer token
//!     let config = ClientConfig::builder().bearer_token("your-token").build()?;
//!     let dns = DnsSvcsClient::new(&config)?;
//!
//!     // 2. List zones of an instance
//!     let zones = dns
//!         .list_dnszones("instance-id", &ListParams::default(), &RequestOptions::default())
//!         .await?;
//!     for zone in &zones.items {
//!         println!("{} ({:?})", zone.name, zone.state);
//!     }
//!
//!     // 3. Create an A record in the first zone
//!     let options = CreateResourceRecordOptions::builder("instance-id", &zones.items[0].id)
//!         .name("www")
//!         .record_type(RecordType::A)
//!         .rdata(RdataInput::a("1.1.1.1")?)
//!         .ttl(120)
//!         .build()?;
//!     let record = dns.create_resource_record(&options).await?;
//!     if let Some(rdata) = &record.rdata {
//!         println!("{} {} -> {}", record.name, record.record_type, rdata.display_value());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Decoding Record Data
//!
//! The API returns `rdata` as a bare object with no type tag. [`Rdata`]
//! recognizes the variant from the set of fields present:
//!
//! ```rust
//! # use dns_svcs::*;
//! # fn example() -> Result<()> {
//! let value = serde_json::json!({"exchange": "mail.example.com", "preference": 10});
//! let rdata = Rdata::from_value(&value)?;
//! assert_eq!(rdata.record_type(), RecordType::Mx);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, DnsSvcsError>`](DnsSvcsError):
//!
//! - [`DnsSvcsError::Validation`]: a required option is missing; no request was sent
//! - [`DnsSvcsError::TypeRdataMismatch`]: record type and rdata variant disagree
//! - [`DnsSvcsError::UnrecognizedRdataShape`]: a returned `rdata` object has unknown fields
//! - [`DnsSvcsError::RequestFailed`]: the API answered non-2xx (status and body kept)
//! - [`DnsSvcsError::RateLimited`], [`DnsSvcsError::NetworkError`]: transient (retryable)
//!
//! Transient errors are retried by [`HttpTransport`] with exponential backoff.

mod client;
mod config;
mod error;
mod glb;
mod http_client;
mod instances;
mod permitted_networks;
mod records;
mod transport;
mod types;
mod utils;
mod zones;

// Re-export error types
pub use error::{DnsSvcsError, Result};

// Re-export clients and configuration
pub use client::{DnsSvcsClient, ResourceInstancesClient};
pub use config::{
    Authenticator, ClientConfig, ClientConfigBuilder, DEFAULT_ENV_PREFIX, DEFAULT_INSTANCES_URL,
    DEFAULT_SERVICE_URL,
};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport};

// Re-export shared request/response types
pub use types::{CORRELATION_ID_HEADER, ListParams, PageLink, PaginatedList, RequestOptions};

// Re-export resource types
pub use glb::{
    AzPools, CreateLoadBalancerInput, CreateMonitorInput, CreatePoolInput, HealthStatus,
    LoadBalancer, Monitor, MonitorType, NotificationType, Origin, OriginInput, Pool,
    UpdateLoadBalancerInput, UpdateMonitorInput, UpdatePoolInput,
};
pub use instances::{
    CreateResourceInstanceInput, ListResourceInstancesOptions, PlanHistoryItem, ResourceInstance,
    ResourceInstanceList, UpdateResourceInstanceInput,
};
pub use permitted_networks::{
    CreatePermittedNetworkInput, PermittedNetwork, PermittedNetworkState, PermittedNetworkType,
    PermittedNetworkVpc,
};
pub use records::{
    AaaaRecord, ARecord, CnameRecord, CreateResourceRecordBody, CreateResourceRecordOptions,
    CreateResourceRecordOptionsBuilder, ListResourceRecordsOptions, MxRecord, PtrRecord, Rdata,
    RdataBuilder, RdataInput, RdataUpdateInput, RecordType, ResourceRecord, SrvRecord, TxtRecord,
    UpdateResourceRecordBody, UpdateResourceRecordOptions, UpdateResourceRecordOptionsBuilder,
};
pub use zones::{CreateDnszoneInput, Dnszone, DnszoneState, UpdateDnszoneInput};

// Re-export utils module
pub use utils::datetime;
