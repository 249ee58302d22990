//! End-to-end runs of the sync pipeline against a mocked PDF Otter API
//! and an in-memory store.

mod common;

use common::{client_for, details_for, listing, mount_details, mount_listing};
use pdf_template_sync::{
    AppError, BatchSize, DetailedTemplate, InMemoryTemplateStore, TemplateField, TemplateSync,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn merges_listing_and_details_into_store() {
    let server = MockServer::start().await;
    mount_listing(&server, json!([{ "id": "t1", "name": "Invoice" }])).await;
    mount_details(
        &server,
        "t1",
        json!({ "fields": [{ "page_number": 1, "name": "amount" }] }),
        1,
    )
    .await;

    let client = client_for(&server);
    let store = InMemoryTemplateStore::new();
    let report = TemplateSync::new(&client, &store, BatchSize::default())
        .run()
        .await
        .unwrap();

    assert_eq!(report.listed, 1);
    assert_eq!(report.stored, vec!["t1"]);
    assert_eq!(
        store.get("t1"),
        Some(DetailedTemplate {
            id: "t1".to_string(),
            name: "Invoice".to_string(),
            fields: Some(vec![TemplateField::new(1, "amount")]),
        })
    );
}

#[tokio::test]
async fn invalid_listing_aborts_before_details_and_store() {
    let server = MockServer::start().await;
    mount_listing(
        &server,
        json!([{ "id": "t1", "name": "Invoice" }, { "id": "t2" }]),
    )
    .await;
    mount_details(&server, "t1", details_for("t1"), 0).await;

    let client = client_for(&server);
    let store = InMemoryTemplateStore::new();
    let err = TemplateSync::new(&client, &store, BatchSize::default())
        .run()
        .await
        .unwrap_err();

    assert!(err.is_shape_error(), "unexpected error: {}", err);
    assert_eq!(store.upsert_count(), 0);
}

#[tokio::test]
async fn template_without_fields_is_still_stored() {
    let server = MockServer::start().await;
    mount_listing(&server, listing(2)).await;
    mount_details(&server, "t1", details_for("t1"), 1).await;
    mount_details(&server, "t2", json!({ "id": "t2" }), 1).await;

    let client = client_for(&server);
    let store = InMemoryTemplateStore::new();
    let report = TemplateSync::new(&client, &store, BatchSize::default())
        .run()
        .await
        .unwrap();

    assert_eq!(report.missing_fields, vec!["t2"]);
    assert_eq!(report.stored, vec!["t1", "t2"]);
    assert_eq!(store.get("t2").unwrap().fields, None);
}

#[tokio::test]
async fn seven_templates_run_in_three_batches_and_keep_order() {
    let server = MockServer::start().await;
    mount_listing(&server, listing(7)).await;
    for i in 1..=7 {
        let id = format!("t{}", i);
        mount_details(&server, &id, details_for(&id), 1).await;
    }

    let client = client_for(&server);
    let store = InMemoryTemplateStore::new();
    let report = TemplateSync::new(&client, &store, BatchSize::new(3).unwrap())
        .run()
        .await
        .unwrap();

    assert_eq!(report.batches, 3);
    assert_eq!(
        report.stored,
        vec!["t1", "t2", "t3", "t4", "t5", "t6", "t7"]
    );
    assert_eq!(store.len(), 7);
}

#[tokio::test]
async fn unreadable_detail_body_aborts_the_run() {
    let server = MockServer::start().await;
    mount_listing(&server, listing(2)).await;
    mount_details(&server, "t1", details_for("t1"), 1).await;
    Mock::given(method("GET"))
        .and(path("/pdf_templates/t2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let store = InMemoryTemplateStore::new();
    let err = TemplateSync::new(&client, &store, BatchSize::default())
        .run()
        .await
        .unwrap_err();

    match err {
        AppError::MalformedResponse { url, .. } => assert!(url.ends_with("/pdf_templates/t2")),
        other => panic!("expected MalformedResponse, got {:?}", other),
    }
    assert!(store.is_empty());
}

#[tokio::test]
async fn error_status_on_details_stores_template_without_fields() {
    let server = MockServer::start().await;
    mount_listing(&server, listing(2)).await;
    mount_details(&server, "t1", details_for("t1"), 1).await;
    Mock::given(method("GET"))
        .and(path("/pdf_templates/t2"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "not found" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let store = InMemoryTemplateStore::new();
    let report = TemplateSync::new(&client, &store, BatchSize::default())
        .run()
        .await
        .unwrap();

    assert_eq!(report.stored, vec!["t1", "t2"]);
    assert_eq!(report.missing_fields, vec!["t2"]);
    assert_eq!(store.get("t2").unwrap().fields, None);
}

#[tokio::test]
async fn field_entries_reach_the_store_unchanged() {
    let server = MockServer::start().await;
    mount_listing(&server, json!([{ "id": "t1", "name": "Invoice" }])).await;
    mount_details(
        &server,
        "t1",
        json!({ "fields": [
            { "page_number": 1, "name": "amount", "type": "text", "required": true },
            { "name": "signature" }
        ] }),
        1,
    )
    .await;

    let client = client_for(&server);
    let store = InMemoryTemplateStore::new();
    TemplateSync::new(&client, &store, BatchSize::default())
        .run()
        .await
        .unwrap();

    let stored = store.get_raw("t1").unwrap();
    assert_eq!(
        stored.get("fields"),
        Some(&json!([
            { "page_number": 1, "name": "amount", "type": "text", "required": true },
            { "name": "signature" }
        ]))
    );
    assert_eq!(store.get("t1").unwrap().fields.unwrap()[1].page_number(), None);
}

#[tokio::test]
async fn running_twice_keeps_one_document_per_template() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pdf_templates"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(3)))
        .expect(2)
        .mount(&server)
        .await;
    for i in 1..=3 {
        let id = format!("t{}", i);
        mount_details(&server, &id, details_for(&id), 2).await;
    }

    let client = client_for(&server);
    let store = InMemoryTemplateStore::new();
    let sync = TemplateSync::new(&client, &store, BatchSize::default());
    let first = sync.run().await.unwrap();
    let second = sync.run().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(store.len(), 3);
    assert_eq!(store.upsert_count(), 6);
}

#[tokio::test]
async fn one_failed_upsert_keeps_the_other_two() {
    let server = MockServer::start().await;
    mount_listing(&server, listing(3)).await;
    for i in 1..=3 {
        let id = format!("t{}", i);
        mount_details(&server, &id, details_for(&id), 1).await;
    }

    let client = client_for(&server);
    let store = InMemoryTemplateStore::new().failing_for("t2");
    let err = TemplateSync::new(&client, &store, BatchSize::default())
        .run()
        .await
        .unwrap_err();

    match err {
        AppError::PartialStore {
            failures, stored, ..
        } => {
            assert_eq!(stored, 2);
            assert_eq!(failures[0].template_id, "t2");
        }
        other => panic!("expected PartialStore, got {:?}", other),
    }
    assert!(store.get("t1").is_some());
    assert!(store.get("t2").is_none());
    assert!(store.get("t3").is_some());
}
