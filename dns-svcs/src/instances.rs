//! DNS Services instances, provisioned through the resource controller
//!
//! `/resource_instances[/{id}]` on [`DEFAULT_INSTANCES_URL`](crate::config::DEFAULT_INSTANCES_URL).

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::{Collection, ResourceInstancesClient};
use crate::error::Result;
use crate::transport::ApiRequest;
use crate::types::{RequestOptions, require_id, require_text};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanHistoryItem {
    pub resource_plan_id: String,
    #[serde(default, with = "crate::utils::datetime")]
    pub start_date: Option<DateTime<Utc>>,
}

/// A provisioned service instance. The resource controller omits most
/// fields depending on state and caller permissions, so all are optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceInstance {
    pub id: Option<String>,
    pub guid: Option<String>,
    pub crn: Option<String>,
    pub url: Option<String>,
    pub name: Option<String>,
    pub region_id: Option<String>,
    pub account_id: Option<String>,
    pub resource_group_id: Option<String>,
    pub resource_group_crn: Option<String>,
    pub resource_id: Option<String>,
    pub resource_plan_id: Option<String>,
    pub target_crn: Option<String>,
    pub state: Option<String>,
    #[serde(rename = "type")]
    pub instance_type: Option<String>,
    pub sub_type: Option<String>,
    pub allow_cleanup: Option<bool>,
    pub last_operation: Option<Value>,
    pub dashboard_url: Option<String>,
    pub plan_history: Vec<PlanHistoryItem>,
    pub resource_aliases_url: Option<String>,
    pub resource_bindings_url: Option<String>,
    pub resource_keys_url: Option<String>,
    #[serde(with = "crate::utils::datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(with = "crate::utils::datetime")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(with = "crate::utils::datetime")]
    pub deleted_at: Option<DateTime<Utc>>,
    pub migrated: Option<bool>,
}

/// Resource controller list envelope; paging is by opaque `next_url`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceInstanceList {
    #[serde(default)]
    pub next_url: Option<String>,
    #[serde(default)]
    pub resources: Vec<ResourceInstance>,
    #[serde(default)]
    pub rows_count: u32,
}

impl ResourceInstanceList {
    pub fn has_more(&self) -> bool {
        self.next_url.as_deref().is_some_and(|url| !url.is_empty())
    }
}

/// Query for [`ResourceInstancesClient::list_resource_instances`].
/// `resource_id` and `type` are required by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListResourceInstancesOptions {
    pub resource_id: String,
    pub instance_type: String,
    pub guid: Option<String>,
    pub name: Option<String>,
    pub resource_group_id: Option<String>,
    pub resource_plan_id: Option<String>,
    pub sub_type: Option<String>,
    pub limit: Option<u32>,
    pub updated_from: Option<String>,
    pub updated_to: Option<String>,
}

impl ListResourceInstancesOptions {
    pub fn new(resource_id: impl Into<String>, instance_type: impl Into<String>) -> Self {
        Self {
            resource_id: resource_id.into(),
            instance_type: instance_type.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_text("resource_id", Some(&self.resource_id))?;
        require_text("type", Some(&self.instance_type))
    }

    fn apply(&self, request: ApiRequest) -> ApiRequest {
        request
            .query("resource_id", &self.resource_id)
            .query("type", &self.instance_type)
            .query_opt("guid", self.guid.as_deref())
            .query_opt("name", self.name.as_deref())
            .query_opt("resource_group_id", self.resource_group_id.as_deref())
            .query_opt("resource_plan_id", self.resource_plan_id.as_deref())
            .query_opt("sub_type", self.sub_type.as_deref())
            .query_opt("limit", self.limit)
            .query_opt("updated_from", self.updated_from.as_deref())
            .query_opt("updated_to", self.updated_to.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateResourceInstanceInput {
    pub name: String,
    /// Deployment location, e.g. `bluemix-global`.
    pub target: String,
    pub resource_group: String,
    pub resource_plan_id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_cleanup: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Map<String, Value>>,
}

impl CreateResourceInstanceInput {
    pub fn new(
        name: impl Into<String>,
        target: impl Into<String>,
        resource_group: impl Into<String>,
        resource_plan_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            resource_group: resource_group.into(),
            resource_plan_id: resource_plan_id.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_text("name", Some(&self.name))?;
        require_text("target", Some(&self.target))?;
        require_text("resource_group", Some(&self.resource_group))?;
        require_text("resource_plan_id", Some(&self.resource_plan_id))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateResourceInstanceInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_plan_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_cleanup: Option<bool>,
}

fn resource_instances() -> Collection {
    Collection::new(&["resource_instances"], "resources")
}

impl ResourceInstancesClient {
    pub async fn list_resource_instances(
        &self,
        options: &ListResourceInstancesOptions,
        request: &RequestOptions,
    ) -> Result<ResourceInstanceList> {
        options.validate()?;
        let api_request = options
            .apply(ApiRequest::new(Method::GET, resource_instances().path()))
            .options(request);
        self.api.send(api_request).await
    }

    pub async fn create_resource_instance(
        &self,
        input: &CreateResourceInstanceInput,
        request: &RequestOptions,
    ) -> Result<ResourceInstance> {
        input.validate()?;
        self.api.create(&resource_instances(), input, request).await
    }

    pub async fn get_resource_instance(
        &self,
        id: &str,
        request: &RequestOptions,
    ) -> Result<ResourceInstance> {
        require_id("id", id)?;
        self.api.get(&resource_instances(), id, request).await
    }

    pub async fn update_resource_instance(
        &self,
        id: &str,
        input: &UpdateResourceInstanceInput,
        request: &RequestOptions,
    ) -> Result<ResourceInstance> {
        require_id("id", id)?;
        self.api
            .update(Method::PATCH, &resource_instances(), id, input, request)
            .await
    }

    pub async fn delete_resource_instance(&self, id: &str, request: &RequestOptions) -> Result<()> {
        require_id("id", id)?;
        self.api.delete(&resource_instances(), id, request).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::client::test_support::MockTransport;
    use crate::error::DnsSvcsError;

    const INSTANCE: &str = r#"{"id": "ID", "guid": "Guid", "crn": "Crn", "url": "URL", "name": "Name", "account_id": "AccountID", "resource_group_id": "ResourceGroupID", "resource_group_crn": "ResourceGroupCrn", "resource_id": "ResourceID", "resource_plan_id": "ResourcePlanID", "target_crn": "TargetCrn", "state": "State", "type": "Type", "sub_type": "SubType", "allow_cleanup": true, "last_operation": {}, "dashboard_url": "DashboardURL", "plan_history": [{"resource_plan_id": "ResourcePlanID", "start_date": "2019-01-01T12:00:00"}], "resource_aliases_url": "ResourceAliasesURL", "resource_bindings_url": "ResourceBindingsURL", "resource_keys_url": "ResourceKeysURL", "created_at": "2019-01-01T12:00:00", "updated_at": "2019-01-01T12:00:00", "deleted_at": "2019-01-01T12:00:00"}"#;

    fn controller(mock: &Arc<MockTransport>) -> ResourceInstancesClient {
        ResourceInstancesClient::with_transport(mock.clone())
    }

    #[test]
    fn decodes_instance() {
        let res = serde_json::from_str::<ResourceInstance>(INSTANCE);
        assert!(res.is_ok(), "decode failed: {res:?}");
        let Ok(instance) = res else { return };
        assert_eq!(instance.instance_type.as_deref(), Some("Type"));
        assert_eq!(instance.plan_history.len(), 1);
        assert!(instance.plan_history[0].start_date.is_some());
        assert!(instance.deleted_at.is_some());
        assert_eq!(instance.migrated, None);
    }

    #[tokio::test]
    async fn list_sends_required_and_optional_query() {
        let page =
            format!(r#"{{"next_url": "NextURL", "resources": [{INSTANCE}], "rows_count": 9}}"#);
        let mock = MockTransport::respond(200, &page);
        let rc = controller(&mock);
        let options = ListResourceInstancesOptions {
            name: Some("dns-svcs".to_string()),
            limit: Some(10),
            ..ListResourceInstancesOptions::new(
                "b4ed8a30-936f-11e9-b289-1d079699cbe5",
                "service_instance",
            )
        };
        let res = rc
            .list_resource_instances(&options, &RequestOptions::default())
            .await;
        assert!(res.is_ok(), "list failed: {res:?}");
        let Ok(list) = res else { return };
        assert_eq!(list.rows_count, 9);
        assert!(list.has_more());

        let requests = mock.requests();
        assert_eq!(requests[0].path, ["resource_instances"]);
        let query = &requests[0].query;
        assert!(query.contains(&("type".to_string(), "service_instance".to_string())));
        assert!(query.contains(&("name".to_string(), "dns-svcs".to_string())));
        assert!(query.contains(&("limit".to_string(), "10".to_string())));
        assert!(!query.iter().any(|(k, _)| k == "guid"));
    }

    #[tokio::test]
    async fn list_requires_resource_id_and_type() {
        let mock = MockTransport::respond(200, "{}");
        let rc = controller(&mock);
        let res = rc
            .list_resource_instances(
                &ListResourceInstancesOptions::new("rid", ""),
                &RequestOptions::default(),
            )
            .await;
        assert!(matches!(&res, Err(DnsSvcsError::Validation { field, .. }) if field == "type"));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn create_requires_all_placement_fields() {
        let mock = MockTransport::respond(201, INSTANCE);
        let rc = controller(&mock);
        let input = CreateResourceInstanceInput::new("dns", "bluemix-global", "", "2c8fa097");
        let res = rc
            .create_resource_instance(&input, &RequestOptions::default())
            .await;
        assert!(
            matches!(&res, Err(DnsSvcsError::Validation { field, .. }) if field == "resource_group")
        );
    }

    #[tokio::test]
    async fn create_accepts_201() {
        let mock = MockTransport::respond(201, INSTANCE);
        let rc = controller(&mock);
        let input = CreateResourceInstanceInput {
            tags: vec!["dns".to_string()],
            ..CreateResourceInstanceInput::new("dns", "bluemix-global", "rg", "2c8fa097")
        };
        let res = rc
            .create_resource_instance(&input, &RequestOptions::default())
            .await;
        assert!(res.is_ok(), "create failed: {res:?}");
        assert_eq!(
            mock.requests()[0].body,
            Some(json!({
                "name": "dns",
                "target": "bluemix-global",
                "resource_group": "rg",
                "resource_plan_id": "2c8fa097",
                "tags": ["dns"]
            }))
        );
    }

    #[tokio::test]
    async fn update_is_patch() {
        let mock = MockTransport::respond(200, INSTANCE);
        let rc = controller(&mock);
        let input = UpdateResourceInstanceInput {
            name: Some("renamed".to_string()),
            ..UpdateResourceInstanceInput::default()
        };
        let res = rc
            .update_resource_instance("ID", &input, &RequestOptions::default())
            .await;
        assert!(res.is_ok(), "update failed: {res:?}");
        let requests = mock.requests();
        assert_eq!(requests[0].method, Method::PATCH);
        assert_eq!(requests[0].path, ["resource_instances", "ID"]);
    }
}
