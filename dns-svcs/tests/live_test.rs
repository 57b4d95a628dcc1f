//! DNS Services live integration test
//!
//! Operation mode:
//! ```bash
//! DNS_SVCS_BEARER_TOKEN=xxx DNS_SVCS_INSTANCE_ID=xxx DNS_SVCS_ZONE_ID=xxx \
//!     cargo test -p dns-svcs --test live_test -- --ignored --nocapture --test-threads=1
//! ```

mod common;

use common::TestContext;
use dns_svcs::{
    ListParams, ListResourceRecordsOptions, RdataUpdateInput, RecordType, RequestOptions,
    UpdateResourceRecordOptions,
};

#[tokio::test]
#[ignore = "integration test: requires DNS_SVCS_BEARER_TOKEN, DNS_SVCS_INSTANCE_ID and DNS_SVCS_ZONE_ID"]
async fn test_live_list_zones() {
    skip_if_no_credentials!("DNS_SVCS_BEARER_TOKEN", "DNS_SVCS_INSTANCE_ID", "DNS_SVCS_ZONE_ID");

    let ctx = require_some!(TestContext::from_env(), "创建测试上下文失败");
    let page = require_ok!(
        ctx.client
            .list_dnszones(&ctx.instance_id, &ListParams::default(), &RequestOptions::default())
            .await,
        "list_dnszones 调用失败"
    );
    assert!(
        page.items.iter().any(|zone| zone.id == ctx.zone_id),
        "测试 zone 不在列表中"
    );

    println!("✓ list_dnszones 测试通过，共 {} 个 zone", page.items.len());
}

#[tokio::test]
#[ignore = "integration test: requires DNS_SVCS_BEARER_TOKEN, DNS_SVCS_INSTANCE_ID and DNS_SVCS_ZONE_ID"]
async fn test_live_record_lifecycle() {
    skip_if_no_credentials!("DNS_SVCS_BEARER_TOKEN", "DNS_SVCS_INSTANCE_ID", "DNS_SVCS_ZONE_ID");

    let ctx = require_some!(TestContext::from_env(), "创建测试上下文失败");
    ctx.cleanup_all_test_records().await;

    let record = require_some!(ctx.create_test_record().await, "创建测试记录失败");
    assert_eq!(record.record_type, RecordType::Txt);

    let rdata = require_ok!(RdataUpdateInput::txt("integration-test-updated"));
    let options = require_ok!(
        UpdateResourceRecordOptions::builder(&ctx.instance_id, &ctx.zone_id, &record.id)
            .rdata(rdata)
            .ttl(300)
            .build()
    );
    let updated = ctx.client.update_resource_record(&options).await;
    ctx.cleanup_record(&record.id).await;

    let updated = require_ok!(updated, "update_resource_record 调用失败");
    assert_eq!(updated.ttl, Some(300));

    let remaining = require_ok!(
        ctx.client
            .list_resource_records(
                &ctx.instance_id,
                &ctx.zone_id,
                &ListResourceRecordsOptions {
                    record_type: Some(RecordType::Txt),
                    ..ListResourceRecordsOptions::default()
                },
                &RequestOptions::default(),
            )
            .await
    );
    assert!(remaining.items.iter().all(|r| r.id != record.id), "记录未被删除");

    println!("✓ record lifecycle 测试通过: {}", record.name);
}
