//! Shared helpers for integration tests: a mocked PDF Otter API and clients pointed at it.

#![allow(dead_code)]

use pdf_template_sync::{ApiEndpoint, ApiKey, PdfOtterHttpClient};
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_KEY: &str = "pk_test";
/// base64("pk_test:")
pub const BASIC_AUTH: &str = "Basic cGtfdGVzdDo=";

pub fn client_for(server: &MockServer) -> PdfOtterHttpClient {
    PdfOtterHttpClient::new(
        ApiEndpoint::parse(&server.uri()).unwrap(),
        ApiKey::new(API_KEY).unwrap(),
    )
    .unwrap()
}

/// Mounts the listing endpoint with the given body.
pub async fn mount_listing(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path("/pdf_templates"))
        .and(header("authorization", BASIC_AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

/// Mounts the detail endpoint of one template, expecting `calls` requests.
pub async fn mount_details(server: &MockServer, id: &str, body: Value, calls: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/pdf_templates/{}", id)))
        .and(header("authorization", BASIC_AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(calls)
        .mount(server)
        .await;
}

/// A listing of `count` templates named `t1..tN`.
pub fn listing(count: usize) -> Value {
    Value::Array(
        (1..=count)
            .map(|i| json!({ "id": format!("t{}", i), "name": format!("Template {}", i) }))
            .collect(),
    )
}

/// A detail body with a single field named after the template.
pub fn details_for(id: &str) -> Value {
    json!({ "id": id, "fields": [{ "page_number": 1, "name": format!("{}_field", id) }] })
}
