//! Resource record request options
//!
//! Create and update requests are assembled with consuming builders and
//! validated in one pass by `build()`. A built value is immutable and always
//! valid: submitting it can only fail at the transport.

use serde::Serialize;

use super::rdata::{RdataInput, RdataUpdateInput, RecordType};
use crate::error::{DnsSvcsError, Result};
use crate::types::{ListParams, RequestOptions, require_id, require_text};

/// JSON body of a create call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateResourceRecordBody {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    pub rdata: RdataInput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

/// A validated create request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateResourceRecordOptions {
    instance_id: String,
    dnszone_id: String,
    body: CreateResourceRecordBody,
    request: RequestOptions,
}

impl CreateResourceRecordOptions {
    pub fn builder(
        instance_id: impl Into<String>,
        dnszone_id: impl Into<String>,
    ) -> CreateResourceRecordOptionsBuilder {
        CreateResourceRecordOptionsBuilder {
            instance_id: instance_id.into(),
            dnszone_id: dnszone_id.into(),
            ..CreateResourceRecordOptionsBuilder::default()
        }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    pub fn dnszone_id(&self) -> &str {
        &self.dnszone_id
    }

    pub fn body(&self) -> &CreateResourceRecordBody {
        &self.body
    }

    pub fn request_options(&self) -> &RequestOptions {
        &self.request
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreateResourceRecordOptionsBuilder {
    instance_id: String,
    dnszone_id: String,
    name: Option<String>,
    record_type: Option<RecordType>,
    ttl: Option<u32>,
    rdata: Option<RdataInput>,
    service: Option<String>,
    protocol: Option<String>,
    request: RequestOptions,
}

impl CreateResourceRecordOptionsBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn record_type(mut self, record_type: RecordType) -> Self {
        self.record_type = Some(record_type);
        self
    }

    /// Seconds; the server default applies when unset.
    #[must_use]
    pub fn ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self
    }

    #[must_use]
    pub fn rdata(mut self, rdata: impl Into<RdataInput>) -> Self {
        self.rdata = Some(rdata.into());
        self
    }

    /// SRV only, e.g. `_sip`.
    #[must_use]
    pub fn service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    /// SRV only, e.g. `udp`.
    #[must_use]
    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    #[must_use]
    pub fn correlation_id(mut self, id: impl Into<String>) -> Self {
        self.request.correlation_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.headers.push((name.into(), value.into()));
        self
    }

    /// Validate everything at once.
    ///
    /// Checks, in order: path ids, `type`, `rdata`, that the rdata variant
    /// matches `type`, `name`, and `service`/`protocol` for SRV.
    pub fn build(self) -> Result<CreateResourceRecordOptions> {
        require_id("instance_id", &self.instance_id)?;
        require_id("dnszone_id", &self.dnszone_id)?;

        let record_type = self.record_type.ok_or_else(|| DnsSvcsError::missing("type"))?;
        let rdata = self.rdata.ok_or_else(|| DnsSvcsError::missing("rdata"))?;
        if rdata.record_type() != record_type {
            return Err(DnsSvcsError::TypeRdataMismatch {
                record_type: record_type.to_string(),
                rdata_type: rdata.record_type().to_string(),
            });
        }

        require_text("name", self.name.as_deref())?;
        let name = self.name.unwrap_or_default();

        if record_type == RecordType::Srv {
            require_text("service", self.service.as_deref())?;
            require_text("protocol", self.protocol.as_deref())?;
        }

        Ok(CreateResourceRecordOptions {
            instance_id: self.instance_id,
            dnszone_id: self.dnszone_id,
            body: CreateResourceRecordBody {
                name,
                record_type,
                ttl: self.ttl,
                rdata,
                service: self.service,
                protocol: self.protocol,
            },
            request: self.request,
        })
    }
}

/// JSON body of an update call. There is no `type`: it cannot change after creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateResourceRecordBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rdata: Option<RdataUpdateInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

/// A validated update request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateResourceRecordOptions {
    instance_id: String,
    dnszone_id: String,
    record_id: String,
    body: UpdateResourceRecordBody,
    request: RequestOptions,
}

impl UpdateResourceRecordOptions {
    pub fn builder(
        instance_id: impl Into<String>,
        dnszone_id: impl Into<String>,
        record_id: impl Into<String>,
    ) -> UpdateResourceRecordOptionsBuilder {
        UpdateResourceRecordOptionsBuilder {
            instance_id: instance_id.into(),
            dnszone_id: dnszone_id.into(),
            record_id: record_id.into(),
            body: UpdateResourceRecordBody::default(),
            request: RequestOptions::default(),
        }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    pub fn dnszone_id(&self) -> &str {
        &self.dnszone_id
    }

    pub fn record_id(&self) -> &str {
        &self.record_id
    }

    pub fn body(&self) -> &UpdateResourceRecordBody {
        &self.body
    }

    pub fn request_options(&self) -> &RequestOptions {
        &self.request
    }
}

#[derive(Debug, Clone)]
pub struct UpdateResourceRecordOptionsBuilder {
    instance_id: String,
    dnszone_id: String,
    record_id: String,
    body: UpdateResourceRecordBody,
    request: RequestOptions,
}

impl UpdateResourceRecordOptionsBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.body.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn ttl(mut self, ttl: u32) -> Self {
        self.body.ttl = Some(ttl);
        self
    }

    #[must_use]
    pub fn rdata(mut self, rdata: impl Into<RdataUpdateInput>) -> Self {
        self.body.rdata = Some(rdata.into());
        self
    }

    #[must_use]
    pub fn service(mut self, service: impl Into<String>) -> Self {
        self.body.service = Some(service.into());
        self
    }

    #[must_use]
    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.body.protocol = Some(protocol.into());
        self
    }

    #[must_use]
    pub fn correlation_id(mut self, id: impl Into<String>) -> Self {
        self.request.correlation_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.headers.push((name.into(), value.into()));
        self
    }

    pub fn build(self) -> Result<UpdateResourceRecordOptions> {
        require_id("instance_id", &self.instance_id)?;
        require_id("dnszone_id", &self.dnszone_id)?;
        require_id("record_id", &self.record_id)?;
        if let Some(name) = &self.body.name {
            require_text("name", Some(name))?;
        }

        Ok(UpdateResourceRecordOptions {
            instance_id: self.instance_id,
            dnszone_id: self.dnszone_id,
            record_id: self.record_id,
            body: self.body,
            request: self.request,
        })
    }
}

/// Filters and paging for listing records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListResourceRecordsOptions {
    pub paging: ListParams,
    pub record_type: Option<RecordType>,
    pub name: Option<String>,
}
