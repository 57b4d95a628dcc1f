//! DNS resource records
//!
//! `/instances/{instance_id}/dnszones/{dnszone_id}/resource_records[/{record_id}]`

mod discriminator;
mod options;
mod rdata;

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use options::{
    CreateResourceRecordBody, CreateResourceRecordOptions, CreateResourceRecordOptionsBuilder,
    ListResourceRecordsOptions, UpdateResourceRecordBody, UpdateResourceRecordOptions,
    UpdateResourceRecordOptionsBuilder,
};
pub use rdata::{
    AaaaRecord, ARecord, CnameRecord, MxRecord, PtrRecord, Rdata, RdataBuilder, RdataInput,
    RdataUpdateInput, RecordType, SrvRecord, TxtRecord,
};

use crate::client::{Collection, DnsSvcsClient};
use crate::error::{DnsSvcsError, Result};
use crate::http_client::HttpUtils;
use crate::transport::ApiRequest;
use crate::types::{PaginatedList, RequestOptions, parse_list, require_id};

/// A DNS record inside a zone, as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ResourceRecordWire")]
pub struct ResourceRecord {
    /// `"<TYPE>:<uuid>"`
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// Absent in list responses of some API versions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rdata: Option<Rdata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(with = "crate::utils::datetime")]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(with = "crate::utils::datetime")]
    pub modified_on: Option<DateTime<Utc>>,
}

/// Record as it appears on the wire, before the rdata object is discriminated.
#[derive(Deserialize)]
struct ResourceRecordWire {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    record_type: RecordType,
    ttl: Option<u32>,
    rdata: Option<Value>,
    service: Option<String>,
    protocol: Option<String>,
    #[serde(default, with = "crate::utils::datetime")]
    created_on: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::utils::datetime")]
    modified_on: Option<DateTime<Utc>>,
}

impl TryFrom<ResourceRecordWire> for ResourceRecord {
    type Error = DnsSvcsError;

    fn try_from(wire: ResourceRecordWire) -> Result<Self> {
        let rdata = match wire.rdata {
            None | Some(Value::Null) => None,
            Some(raw) => Some(Rdata::from_value(&raw)?),
        };
        Ok(Self {
            id: wire.id,
            name: wire.name,
            record_type: wire.record_type,
            ttl: wire.ttl,
            rdata,
            service: wire.service,
            protocol: wire.protocol,
            created_on: wire.created_on,
            modified_on: wire.modified_on,
        })
    }
}

impl ResourceRecord {
    /// Decode a record from a response body, keeping rdata failures typed
    /// ([`UnrecognizedRdataShape`](DnsSvcsError::UnrecognizedRdataShape),
    /// [`TypeMismatch`](DnsSvcsError::TypeMismatch)).
    pub fn from_json(body: &str) -> Result<Self> {
        HttpUtils::parse_json::<ResourceRecordWire>(body)?.try_into()
    }

    /// Whether the decoded rdata variant agrees with `type`.
    ///
    /// The decoder picks A vs AAAA from the address syntax alone, so a
    /// mismatch here means the server sent an address of the other family.
    pub fn rdata_matches_type(&self) -> bool {
        self.rdata
            .as_ref()
            .is_none_or(|rdata| rdata.record_type() == self.record_type)
    }
}

fn records(instance_id: &str, dnszone_id: &str) -> Result<Collection> {
    require_id("instance_id", instance_id)?;
    require_id("dnszone_id", dnszone_id)?;
    Ok(Collection::new(
        &["instances", instance_id, "dnszones", dnszone_id, "resource_records"],
        "resource_records",
    ))
}

impl DnsSvcsClient {
    pub async fn list_resource_records(
        &self,
        instance_id: &str,
        dnszone_id: &str,
        options: &ListResourceRecordsOptions,
        request: &RequestOptions,
    ) -> Result<PaginatedList<ResourceRecord>> {
        let collection = records(instance_id, dnszone_id)?;
        let api_request = ApiRequest::new(Method::GET, collection.path())
            .paging(&options.paging)
            .query_opt("type", options.record_type)
            .query_opt("name", options.name.as_deref())
            .options(request);
        let body = self.api.fetch(api_request).await?;
        parse_list::<ResourceRecordWire>(&body, "resource_records")?.try_map(TryInto::try_into)
    }

    pub async fn create_resource_record(
        &self,
        options: &CreateResourceRecordOptions,
    ) -> Result<ResourceRecord> {
        let collection = records(options.instance_id(), options.dnszone_id())?;
        let api_request = ApiRequest::new(Method::POST, collection.path())
            .json(options.body())?
            .options(options.request_options());
        ResourceRecord::from_json(&self.api.fetch(api_request).await?)
    }

    pub async fn get_resource_record(
        &self,
        instance_id: &str,
        dnszone_id: &str,
        record_id: &str,
        request: &RequestOptions,
    ) -> Result<ResourceRecord> {
        let collection = records(instance_id, dnszone_id)?;
        require_id("record_id", record_id)?;
        let api_request =
            ApiRequest::new(Method::GET, collection.member(record_id)).options(request);
        ResourceRecord::from_json(&self.api.fetch(api_request).await?)
    }

    pub async fn update_resource_record(
        &self,
        options: &UpdateResourceRecordOptions,
    ) -> Result<ResourceRecord> {
        let collection = records(options.instance_id(), options.dnszone_id())?;
        let api_request = ApiRequest::new(Method::PUT, collection.member(options.record_id()))
            .json(options.body())?
            .options(options.request_options());
        ResourceRecord::from_json(&self.api.fetch(api_request).await?)
    }

    pub async fn delete_resource_record(
        &self,
        instance_id: &str,
        dnszone_id: &str,
        record_id: &str,
        request: &RequestOptions,
    ) -> Result<()> {
        let collection = records(instance_id, dnszone_id)?;
        require_id("record_id", record_id)?;
        self.api.delete(&collection, record_id, request).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::client::test_support::{MockTransport, client};

    const SRV_RECORD: &str = r#"{"created_on": "2019-01-01T05:20:00.12345Z", "id": "SRV:5365b73c-ce6f-4d6f-ad9f-d9c131b26370", "modified_on": "2019-01-01T05:20:00.12345Z", "name": "_sip._udp.test.example.com", "protocol": "udp", "service": "_sip", "ttl": 120, "type": "SRV", "rdata": {"priority": 100, "weight": 100, "port": 8000, "target": "siphost.com"}}"#;

    #[test]
    fn decodes_a_record() {
        let res = ResourceRecord::from_json(
            r#"{"id":"A:abc","type":"A","rdata":{"ip":"1.1.1.1"},"name":"test.example.com"}"#,
        );
        assert!(res.is_ok(), "decode failed: {res:?}");
        let Ok(record) = res else { return };
        assert_eq!(record.id, "A:abc");
        assert_eq!(record.record_type, RecordType::A);
        assert!(
            matches!(&record.rdata, Some(Rdata::A(a)) if a.ip().to_string() == "1.1.1.1"),
            "unexpected rdata: {:?}",
            record.rdata
        );
        assert!(record.rdata_matches_type());
    }

    #[test]
    fn decodes_full_srv_record() {
        let res = ResourceRecord::from_json(SRV_RECORD);
        assert!(res.is_ok(), "decode failed: {res:?}");
        let Ok(record) = res else { return };
        assert_eq!(record.ttl, Some(120));
        assert_eq!(record.service.as_deref(), Some("_sip"));
        assert!(record.created_on.is_some());
        assert!(
            matches!(&record.rdata, Some(Rdata::Srv(srv)) if srv.port() == 8000),
            "unexpected rdata: {:?}",
            record.rdata
        );
    }

    #[test]
    fn record_without_rdata() {
        let res =
            ResourceRecord::from_json(r#"{"id":"TXT:1","type":"TXT","name":"t","rdata":null}"#);
        assert!(
            matches!(&res, Ok(ResourceRecord { rdata: None, .. })),
            "unexpected: {res:?}"
        );
    }

    #[test]
    fn rdata_errors_stay_typed() {
        let shape = ResourceRecord::from_json(r#"{"id":"A:1","type":"A","name":"t","rdata":{}}"#);
        assert!(matches!(shape, Err(DnsSvcsError::UnrecognizedRdataShape { .. })));

        let mismatch = ResourceRecord::from_json(
            r#"{"id":"MX:1","type":"MX","name":"t","rdata":{"exchange":"m.x.com","preference":"10"}}"#,
        );
        assert!(
            matches!(mismatch, Err(DnsSvcsError::TypeMismatch { field, .. }) if field == "preference")
        );
    }

    #[test]
    fn serde_path_also_discriminates() {
        let res = serde_json::from_str::<ResourceRecord>(SRV_RECORD);
        assert!(res.is_ok(), "decode failed: {res:?}");
        let bad = serde_json::from_str::<ResourceRecord>(
            r#"{"id":"A:1","type":"A","rdata":{"foo":"bar"}}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn address_family_disagreeing_with_type_is_reported() {
        let res = ResourceRecord::from_json(
            r#"{"id":"A:1","type":"A","name":"t","rdata":{"ip":"2001::1"}}"#,
        );
        assert!(res.is_ok(), "decode failed: {res:?}");
        let Ok(record) = res else { return };
        assert!(!record.rdata_matches_type());
    }

    #[tokio::test]
    async fn create_sends_body_and_decodes_response() {
        let mock = MockTransport::respond(200, SRV_RECORD);
        let dns = client(&mock);
        let Ok(rdata) = RdataInput::srv(100, 100, 8000, "siphost.com") else {
            return;
        };
        let opts = CreateResourceRecordOptions::builder("inst", "example.com:d04d3a7a")
            .name("testsrv")
            .record_type(RecordType::Srv)
            .rdata(rdata)
            .service("_sip")
            .protocol("udp")
            .correlation_id("abc123")
            .build();
        let Ok(opts) = opts else { return };

        let res = dns.create_resource_record(&opts).await;
        assert!(res.is_ok(), "create failed: {res:?}");

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(
            requests[0].path,
            ["instances", "inst", "dnszones", "example.com:d04d3a7a", "resource_records"]
        );
        assert_eq!(
            requests[0].body.as_ref().and_then(|b| b.get("service")),
            Some(&json!("_sip"))
        );
        assert!(
            requests[0]
                .headers
                .contains(&("X-Correlation-ID".to_string(), "abc123".to_string()))
        );
    }

    #[tokio::test]
    async fn update_uses_put_on_member() {
        let mock = MockTransport::respond(200, SRV_RECORD);
        let dns = client(&mock);
        let opts = UpdateResourceRecordOptions::builder("inst", "zone", "SRV:5365b73c")
            .ttl(300)
            .build();
        let Ok(opts) = opts else { return };
        let res = dns.update_resource_record(&opts).await;
        assert!(res.is_ok(), "update failed: {res:?}");
        let requests = mock.requests();
        assert_eq!(requests[0].method, Method::PUT);
        assert_eq!(requests[0].path.last().map(String::as_str), Some("SRV:5365b73c"));
        assert_eq!(requests[0].body, Some(json!({"ttl": 300})));
    }

    #[tokio::test]
    async fn list_applies_filters() {
        let page =
            r#"{"resource_records": [], "offset": 0, "limit": 50, "count": 0, "total_count": 0}"#;
        let mock = MockTransport::respond(200, page);
        let dns = client(&mock);
        let options = ListResourceRecordsOptions {
            paging: crate::types::ListParams::new(0, 50),
            record_type: Some(RecordType::Aaaa),
            name: Some("www".to_string()),
        };
        let res = dns
            .list_resource_records("inst", "zone", &options, &RequestOptions::default())
            .await;
        assert!(res.is_ok(), "list failed: {res:?}");
        let query = &mock.requests()[0].query;
        assert!(query.contains(&("type".to_string(), "AAAA".to_string())));
        assert!(query.contains(&("name".to_string(), "www".to_string())));
        assert!(query.contains(&("limit".to_string(), "50".to_string())));
    }

    #[tokio::test]
    async fn missing_ids_never_reach_transport() {
        let mock = MockTransport::respond(200, SRV_RECORD);
        let dns = client(&mock);
        let res = dns
            .get_resource_record("inst", "zone", "", &RequestOptions::default())
            .await;
        assert!(
            matches!(&res, Err(DnsSvcsError::Validation { field, .. }) if field == "record_id")
        );
        assert!(mock.requests().is_empty());
    }
}
