//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;

use dns_svcs::{
    ClientConfig, CreateResourceRecordOptions, DnsSvcsClient, ListParams,
    ListResourceRecordsOptions, RdataInput, RecordType, RequestOptions, ResourceRecord, Result,
};
use wiremock::MockServer;

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Option` 为 `Some`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

pub const INSTANCE_ID: &str = "1407a753-a93f-4bb0-9784-bcfc269ee1b3";
pub const ZONE_ID: &str = "example.com:2d0f862b-67cc-41f3-b6a2-59860d0aa90e";

/// Client pointed at a mock server, no retries.
pub fn mock_client(server: &MockServer) -> Result<DnsSvcsClient> {
    mock_client_with_retries(server, 0)
}

pub fn mock_client_with_retries(server: &MockServer, max_retries: u32) -> Result<DnsSvcsClient> {
    let config = ClientConfig::builder()
        .service_url(server.uri())
        .bearer_token("test-token")
        .max_retries(max_retries)
        .build()?;
    DnsSvcsClient::new(&config)
}

pub fn zone_path(suffix: &str) -> String {
    format!("/instances/{INSTANCE_ID}/dnszones/{ZONE_ID}/{suffix}")
}

/// 生成唯一的测试记录名称
pub fn generate_test_record_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}

/// 测试上下文 - 封装 client 和测试 zone
pub struct TestContext {
    pub client: DnsSvcsClient,
    pub instance_id: String,
    pub zone_id: String,
}

impl TestContext {
    /// 从 `DNS_SVCS_*` 环境变量创建
    pub fn from_env() -> Option<Self> {
        let instance_id = env::var("DNS_SVCS_INSTANCE_ID").ok()?;
        let zone_id = env::var("DNS_SVCS_ZONE_ID").ok()?;
        let client = DnsSvcsClient::from_env().ok()?;

        Some(Self {
            client,
            instance_id,
            zone_id,
        })
    }

    /// 创建 TXT 测试记录并返回创建的记录
    pub async fn create_test_record(&self) -> Option<ResourceRecord> {
        let options = CreateResourceRecordOptions::builder(&self.instance_id, &self.zone_id)
            .name(generate_test_record_name())
            .record_type(RecordType::Txt)
            .rdata(RdataInput::txt("integration-test").ok()?)
            .ttl(120)
            .build()
            .ok()?;

        self.client.create_resource_record(&options).await.ok()
    }

    /// 清理测试记录
    pub async fn cleanup_record(&self, record_id: &str) {
        let _ = self
            .client
            .delete_resource_record(
                &self.instance_id,
                &self.zone_id,
                record_id,
                &RequestOptions::default(),
            )
            .await;
    }

    /// 查找并清理所有测试记录（以 _test- 开头的记录）
    pub async fn cleanup_all_test_records(&self) {
        let options = ListResourceRecordsOptions {
            paging: ListParams::new(0, 200),
            ..ListResourceRecordsOptions::default()
        };
        if let Ok(page) = self
            .client
            .list_resource_records(
                &self.instance_id,
                &self.zone_id,
                &options,
                &RequestOptions::default(),
            )
            .await
        {
            for record in page.items {
                if record.name.starts_with("_test-") {
                    self.cleanup_record(&record.id).await;
                }
            }
        }
    }
}
