//! Integration tests for the V2 client against a mock server.

use pretty_assertions::assert_eq;
use serde_json::json;
use thoughtspot_client::v2::services::{TmlExportOptions, TmlImportRequest};
use thoughtspot_client::{
    Credential, ImportPolicy, SessionLoginRequest, ThoughtSpotError, TokenRequest, V2Client,
};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> V2Client {
    V2Client::from_server_url(server.uri()).expect("client should build")
}

fn mount_token_endpoint(token: &str) -> Mock {
    Mock::given(method("POST"))
        .and(path("/api/rest/2.0/auth/token/full"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": token,
            "creation_time_in_millis": 1700000000000_i64,
            "expiration_time_in_millis": 1700000300000_i64,
        })))
}

#[tokio::test]
async fn token_round_trip_installs_the_exact_bearer_header() {
    let server = MockServer::start().await;
    mount_token_endpoint("tok-v2-abc123").mount(&server).await;

    // Every call after install_credential must carry the exact token.
    Mock::given(method("POST"))
        .and(path("/api/rest/2.0/users/search"))
        .and(header("Authorization", "Bearer tok-v2-abc123"))
        .and(header("X-Requested-By", "ThoughtSpot"))
        .and(header("Accept-Language", "en_US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"name": "alice"}])))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let request = TokenRequest::with_password("alice", "hunter2").validity_secs(300);
    let response = client
        .auth()
        .token_full(&request)
        .await
        .expect("token issuance should succeed");
    assert_eq!(response.token, "tok-v2-abc123");

    // Acquisition did not install anything: that is the caller's step.
    assert!(client.transport().credential().is_none());

    client
        .install_credential(Credential::bearer(response.token))
        .expect("credential install");
    let users = client
        .users()
        .search(json!({"user_identifier": "alice"}))
        .await
        .expect("search should succeed");
    assert_eq!(users[0]["name"], "alice");
}

#[tokio::test]
async fn trailing_slash_and_no_slash_build_identical_urls() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/rest/2.0/system"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"release": "10.4"})))
        .expect(2)
        .mount(&server)
        .await;

    let plain = V2Client::from_server_url(server.uri()).expect("client");
    let slashed = V2Client::from_server_url(format!("{}/", server.uri())).expect("client");

    let first = plain.system().info().await.expect("plain URL works");
    let second = slashed.system().info().await.expect("slashed URL works");
    assert_eq!(first, second);
}

#[tokio::test]
async fn token_rejection_classifies_as_invalid_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/rest/2.0/auth/token/full"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Username or password is incorrect"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let error = client
        .auth()
        .token_full(&TokenRequest::with_password("alice", "wrong"))
        .await
        .expect_err("bad credentials must fail");

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
async fn session_login_posts_json_and_records_the_cookie_credential() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/rest/2.0/auth/session/login"))
        .and(body_partial_json(json!({
            "username": "alice",
            "password": "hunter2",
            "remember_me": "true"
        })))
        .respond_with(
            ResponseTemplate::new(204).insert_header("Set-Cookie", "JSESSIONID=v2sess; Path=/"),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/rest/2.0/auth/session/user"))
        .and(header("Cookie", "JSESSIONID=v2sess"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "alice"})))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client
        .auth()
        .session_login(&SessionLoginRequest::with_password("alice", "hunter2"))
        .await
        .expect("login should succeed");
    assert!(matches!(
        client.transport().credential(),
        Some(Credential::SessionCookie)
    ));

    let user = client.auth().session_user().await.expect("session user");
    assert_eq!(user["name"], "alice");
}

#[tokio::test]
async fn report_export_returns_bytes_untouched_and_checks_status_first() {
    let server = MockServer::start().await;

    let png_bytes: &[u8] = b"\x89PNG\r\n\x1a\n fake-liveboard-png";
    Mock::given(method("POST"))
        .and(path("/api/rest/2.0/report/liveboard"))
        .and(header("Accept", "application/octet-stream"))
        .and(body_partial_json(json!({"file_format": "PNG"})))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(png_bytes))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/rest/2.0/report/answer"))
        .respond_with(ResponseTemplate::new(500).set_body_string("renderer crashed"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let bytes = client
        .reports()
        .liveboard(json!({
            "metadata_identifier": "lb-1",
            "file_format": "PNG"
        }))
        .await
        .expect("export should succeed");
    assert_eq!(bytes.as_ref(), png_bytes);

    // The status check runs before any bytes come back.
    let error = client
        .reports()
        .answer(json!({"metadata_identifier": "a-1"}))
        .await
        .expect_err("500 must raise, not return bytes");
    assert_eq!(error.status_code(), Some(500));
}

#[tokio::test]
async fn tags_assign_passes_the_documented_lists_through() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/rest/2.0/tags/assign"))
        .and(body_partial_json(json!({
            "metadata": [
                {"identifier": "g1", "type": "LIVEBOARD"},
                {"identifier": "g2", "type": "LIVEBOARD"}
            ],
            "tag_identifiers": ["t1"]
        })))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let result = client
        .tags()
        .assign(json!({
            "metadata": [
                {"identifier": "g1", "type": "LIVEBOARD"},
                {"identifier": "g2", "type": "LIVEBOARD"}
            ],
            "tag_identifiers": ["t1"]
        }))
        .await
        .expect("204 maps to success");

    // Empty body decodes to null, not an error.
    assert!(result.is_null());
}

#[tokio::test]
async fn tml_export_embedded_error_raises() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/rest/2.0/metadata/tml/export"))
        .and(body_partial_json(json!({
            "metadata": [{"identifier": "lb-1"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": [{
                "info": {"id": "lb-1"},
                "response": {"status": {
                    "status_code": "ERROR",
                    "error_message": "Object not found"
                }}
            }]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let error = client
        .metadata()
        .tml_export(&["lb-1".to_string()], &TmlExportOptions::default())
        .await
        .expect_err("embedded error must raise");

    let api = error.api().expect("api payload");
    assert!(api.embedded);
    assert_eq!(api.message.as_deref(), Some("Object not found"));
}

#[tokio::test]
async fn tml_import_request_shape_reaches_the_wire() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/rest/2.0/metadata/tml/import"))
        .and(body_partial_json(json!({
            "metadata_tmls": ["guid: g1"],
            "import_policy": "VALIDATE_ONLY",
            "create_new": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": [{"response": {"status": {"status_code": "OK"}}}]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let request = TmlImportRequest::new(vec!["guid: g1".to_string()], ImportPolicy::ValidateOnly);
    let response = client
        .metadata()
        .tml_import(&request)
        .await
        .expect("validation import should succeed");
    assert_eq!(
        response["object"][0]["response"]["status"]["status_code"],
        "OK"
    );
}

#[tokio::test]
async fn token_revoke_drops_the_local_credential_even_on_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/rest/2.0/auth/token/revoke"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client
        .install_credential(Credential::bearer("tok"))
        .expect("install");
    let result = client.auth().token_revoke().await;

    assert!(result.is_err());
    // Server-side revocation is best effort; local state is gone regardless.
    assert!(client.transport().credential().is_none());
}

#[tokio::test]
async fn generic_post_reaches_unbound_endpoints() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/rest/2.0/some/new/endpoint"))
        .and(body_partial_json(json!({"key": "value"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let response = client
        .post("some/new/endpoint", Some(json!({"key": "value"})))
        .await
        .expect("generic post");
    assert_eq!(response["ok"], true);
}
