//! Embedded-error detection for the TML import/export family.
//!
//! Those endpoints report per-object validation failures inside an HTTP
//! 200 body: each element of the `object` array carries a status block,
//! under `response` on current releases and `info` on older ones. The
//! dispatch layer never interprets bodies, so the TML bindings run their
//! parsed responses through [`check_embedded_status`] after the HTTP
//! status check.

use crate::errors::ApiError;
use serde_json::Value;
use tracing::warn;

/// Scans a parsed TML-family response for an embedded error marker.
///
/// Raises on the *first* `status_code == "ERROR"` found in the `object`
/// array; the full parsed body stays available on the error's `payload`
/// so sibling results are not silently dropped. A body without an
/// `object` array passes through untouched.
pub fn check_embedded_status(body: &Value) -> Result<(), ApiError> {
    let Some(objects) = body.get("object").and_then(|o| o.as_array()) else {
        return Ok(());
    };

    for object in objects {
        // Older releases wrap the status in 'info'; recent ones in 'response'.
        let status = object
            .get("response")
            .or_else(|| object.get("info"))
            .and_then(|r| r.get("status"));
        let Some(status) = status else { continue };

        if status.get("status_code").and_then(|c| c.as_str()) == Some("ERROR") {
            let message = status
                .get("error_message")
                .and_then(|m| m.as_str())
                .map(String::from);
            warn!(?message, "embedded error in 2xx response");
            return Err(ApiError::embedded(message, body.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn clean_response_passes() {
        let body = json!({
            "object": [
                {"response": {"status": {"status_code": "OK"}}, "edoc": "guid: g1"},
                {"response": {"status": {"status_code": "OK"}}, "edoc": "guid: g2"}
            ]
        });
        assert!(check_embedded_status(&body).is_ok());
    }

    #[test]
    fn error_in_any_element_raises() {
        let body = json!({
            "object": [
                {"response": {"status": {"status_code": "OK"}}},
                {"response": {"status": {"status_code": "ERROR", "error_message": "syntax error at line 4"}}}
            ]
        });
        let error = check_embedded_status(&body).unwrap_err();
        assert!(error.embedded);
        assert_eq!(error.message.as_deref(), Some("syntax error at line 4"));
    }

    #[test]
    fn legacy_info_wrapper_is_recognized() {
        let body = json!({
            "object": [
                {"info": {"status": {"status_code": "ERROR", "error_message": "bad edoc"}}}
            ]
        });
        assert!(check_embedded_status(&body).is_err());
    }

    #[test]
    fn first_error_wins_but_payload_keeps_siblings() {
        let body = json!({
            "object": [
                {"response": {"status": {"status_code": "ERROR", "error_message": "first"}}},
                {"response": {"status": {"status_code": "ERROR", "error_message": "second"}}},
                {"response": {"status": {"status_code": "OK"}}}
            ]
        });
        let error = check_embedded_status(&body).unwrap_err();
        assert_eq!(error.message.as_deref(), Some("first"));
        let payload = error.payload.unwrap();
        assert_eq!(payload["object"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn body_without_object_array_passes() {
        assert!(check_embedded_status(&json!({"headers": []})).is_ok());
        assert!(check_embedded_status(&json!([1, 2, 3])).is_ok());
    }
}
