//! Integration tests for the V1 client against a mock server.

use pretty_assertions::assert_eq;
use serde_json::json;
use thoughtspot_client::v1::services::{MetadataListOptions, PdfExportOptions, TmlImportOptions};
use thoughtspot_client::{ThoughtSpotError, TsObjectType, V1Client};
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> V1Client {
    V1Client::from_server_url(server.uri()).expect("client should build")
}

#[tokio::test]
async fn login_sends_form_credentials_and_keeps_the_cookie() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/callosum/v1/tspublic/v1/session/login"))
        .and(header("X-Requested-By", "ThoughtSpot"))
        .and(body_string_contains("username=alice"))
        .and(body_string_contains("password=hunter2"))
        .and(body_string_contains("rememberme=true"))
        .respond_with(
            ResponseTemplate::new(204).insert_header("Set-Cookie", "JSESSIONID=abc123; Path=/"),
        )
        .mount(&server)
        .await;

    // The session cookie from login must ride on every subsequent call.
    Mock::given(method("GET"))
        .and(path("/callosum/v1/tspublic/v1/session/info"))
        .and(header("Cookie", "JSESSIONID=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"userName": "alice"})))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client
        .session()
        .login("alice", "hunter2", true)
        .await
        .expect("login should succeed");

    let info = client.session().info().await.expect("info should succeed");
    assert_eq!(info["userName"], "alice");
}

#[tokio::test]
async fn login_rejection_classifies_as_invalid_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/callosum/v1/tspublic/v1/session/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid username or password"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let error = client
        .session()
        .login("alice", "wrong", true)
        .await
        .expect_err("login should fail");

    match error {
        ThoughtSpotError::Auth { reason, .. } => {
            assert_eq!(
                reason,
                thoughtspot_client::AuthFailureReason::InvalidCredentials
            );
        }
        other => panic!("expected an auth error, got {other}"),
    }
}

#[tokio::test]
async fn listing_twice_sends_identical_requests() {
    let server = MockServer::start().await;

    let listing = json!({"headers": [{"id": "g1", "name": "Sales"}]});
    Mock::given(method("GET"))
        .and(path("/callosum/v1/tspublic/v1/metadata/list"))
        .and(query_param("type", "PINBOARD_ANSWER_BOOK"))
        .and(query_param("batchsize", "-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing.clone()))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let options = MetadataListOptions::new();
    let first = client
        .metadata()
        .list(TsObjectType::Liveboard, &options)
        .await
        .expect("first listing");
    let second = client
        .metadata()
        .list(TsObjectType::Liveboard, &options)
        .await
        .expect("second listing");

    assert_eq!(first, second);
    assert_eq!(first, listing);
}

#[tokio::test]
async fn worksheet_listing_folds_subtype_into_logical_table() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/callosum/v1/tspublic/v1/metadata/listobjectheaders"))
        .and(query_param("type", "LOGICAL_TABLE"))
        .and(query_param("subtypes", r#"["WORKSHEET"]"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client
        .metadata()
        .list_object_headers(TsObjectType::Worksheet, &MetadataListOptions::new())
        .await
        .expect("listing should succeed");
}

#[tokio::test]
async fn assign_tag_sends_parallel_lists_and_maps_204_to_ok() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/callosum/v1/tspublic/v1/metadata/assigntag"))
        .and(body_string_contains("id=%5B%22g1%22%2C%22g2%22%5D"))
        .and(body_string_contains(
            "type=%5B%22PINBOARD_ANSWER_BOOK%22%2C%22PINBOARD_ANSWER_BOOK%22%5D",
        ))
        .and(body_string_contains("tagid=%5B%22t1%22%5D"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let object_guids = vec!["g1".to_string(), "g2".to_string()];
    let object_types = vec![
        "PINBOARD_ANSWER_BOOK".to_string(),
        "PINBOARD_ANSWER_BOOK".to_string(),
    ];
    let tag_guids = vec!["t1".to_string()];

    client
        .metadata()
        .assign_tag(&object_guids, &object_types, Some(&tag_guids), None)
        .await
        .expect("assign_tag should succeed on 204");
}

#[tokio::test]
async fn assign_tag_without_tags_fails_before_dispatch() {
    let server = MockServer::start().await;
    let client = client_for(&server).await;

    let error = client
        .metadata()
        .assign_tag(&["g1".to_string()], &["TAG".to_string()], None, None)
        .await
        .expect_err("no tag guids or names should be rejected");
    assert!(matches!(error, ThoughtSpotError::Config { .. }));
}

#[tokio::test]
async fn pdf_export_returns_bytes_untouched() {
    let server = MockServer::start().await;

    let pdf_bytes: &[u8] = b"%PDF-1.7 fake liveboard export\x00\x01\x02";
    Mock::given(method("POST"))
        .and(path("/callosum/v1/tspublic/v1/export/pinboard/pdf"))
        .and(query_param("id", "lb-1"))
        .and(query_param("layout_type", "PINBOARD"))
        .and(header("Accept", "application/octet-stream"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(pdf_bytes))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let bytes = client
        .exports()
        .liveboard_pdf("lb-1", &PdfExportOptions::default())
        .await
        .expect("export should succeed");

    assert_eq!(bytes.as_ref(), pdf_bytes);
}

#[tokio::test]
async fn tml_export_parses_the_edoc() {
    let server = MockServer::start().await;

    let response = json!({
        "object": [{
            "edoc": "{\"guid\": \"lb-1\", \"liveboard\": {\"name\": \"Sales\"}}",
            "info": {"name": "Sales", "id": "lb-1", "status": {"status_code": "OK"}}
        }]
    });
    Mock::given(method("POST"))
        .and(path("/callosum/v1/tspublic/v1/metadata/tml/export"))
        .and(header("Accept", "text/plain"))
        .and(body_string_contains("export_ids=%5B%22lb-1%22%5D"))
        .and(body_string_contains("formattype=JSON"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let tml = client
        .tml()
        .export("lb-1", true)
        .await
        .expect("export should succeed");

    assert_eq!(tml["guid"], "lb-1");
    assert_eq!(tml["liveboard"]["name"], "Sales");
}

#[tokio::test]
async fn tml_import_embedded_error_is_raised_with_full_payload() {
    let server = MockServer::start().await;

    let response = json!({
        "object": [
            {"response": {"status": {"status_code": "OK"}}},
            {"response": {"status": {
                "status_code": "ERROR",
                "error_message": "Invalid token at line 12"
            }}}
        ]
    });
    Mock::given(method("POST"))
        .and(path("/callosum/v1/tspublic/v1/metadata/tml/import"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let error = client
        .tml()
        .import(
            &["guid: g1".to_string(), "guid: g2".to_string()],
            &TmlImportOptions::default(),
        )
        .await
        .expect_err("embedded error must raise");

    let api = error.api().expect("should carry the API error");
    assert!(api.embedded);
    assert_eq!(api.status, 200);
    assert_eq!(api.message.as_deref(), Some("Invalid token at line 12"));
    // Sibling results stay inspectable.
    let payload = api.payload.as_ref().expect("payload retained");
    assert_eq!(payload["object"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn is_active_answers_false_on_http_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/callosum/v1/session/isactive"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let active = client.session().is_active().await.expect("probe succeeds");
    assert!(!active);
}

#[tokio::test]
async fn http_error_preserves_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/callosum/v1/tspublic/v1/user/list"))
        .respond_with(
            ResponseTemplate::new(500).set_body_string(r#"{"message": "internal error"}"#),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let error = client.users().list().await.expect_err("500 must raise");

    assert_eq!(error.status_code(), Some(500));
    let api = error.api().expect("api error");
    assert!(!api.embedded);
    assert_eq!(api.message.as_deref(), Some("internal error"));
}
