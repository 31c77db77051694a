//! Security Test Suite
//!
//! Validates the hardening of the chord search web interface: input
//! validation of path segments, oversized queries, hostile query text, and
//! response headers.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use std::sync::Arc;
use tower::ServiceExt;

use chord_search::utils::validation::{
    validate_instrument, validate_query, ValidationError, MAX_QUERY_LENGTH,
};
use chord_search::web::server::{create_app, AppState};
use chord_search::ChordCatalog;

async fn request(uri: &str) -> Response {
    let catalog = ChordCatalog::load_embedded().expect("embedded catalog loads");
    let app = create_app(Arc::new(AppState::new(catalog, "http://chords.test")));
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Test instrument name validation
#[test]
fn test_instrument_validation_security() {
    let traversal_attempts = vec!["..", "guitar/..", "..\\guitar", "guitar%2e%2e", "gui tar"];

    for attempt in traversal_attempts {
        match validate_instrument(attempt) {
            Err(ValidationError::InvalidInstrument) => {}
            Ok(_) => panic!("Instrument '{attempt}' should have been rejected"),
            Err(e) => panic!("Unexpected error for '{attempt}': {e:?}"),
        }
    }

    let control_char_attempts = vec!["guitar\0", "gui\x01tar", "guitar\n"];
    for attempt in control_char_attempts {
        assert!(
            validate_instrument(attempt).is_err(),
            "Control character in '{attempt:?}' should be blocked"
        );
    }
}

/// Test query length limit
#[test]
fn test_query_length_limit() {
    let at_limit = "b".repeat(MAX_QUERY_LENGTH);
    assert!(validate_query(&at_limit).is_ok());

    let over_limit = "b".repeat(MAX_QUERY_LENGTH + 1);
    assert_eq!(
        validate_query(&over_limit),
        Err(ValidationError::QueryTooLong)
    );
}

/// Oversized queries are rejected before any lookup
#[tokio::test]
async fn test_oversized_query_rejected() {
    let uri = format!("/guitar/{}.json", "b2".repeat(MAX_QUERY_LENGTH));
    let response = request(&uri).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["error_type"], "validation_error");
    assert!(error["details"].is_null());
}

/// Invalid instrument names never reach the search engine
#[tokio::test]
async fn test_invalid_instrument_rejected() {
    let response = request("/gui-tar/b2.json").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = request("/gui.tar").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Hostile query text is ignored by the decoder and escaped in HTML
#[tokio::test]
async fn test_script_injection_escaped() {
    let response = request("/guitar/%3Cscript%3Ealert(1)%3C%2Fscript%3E").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(!html.contains("<script>alert(1)</script>"));
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    // alert(1) has no letter directly followed by digits, so nothing is filtered
    assert!(html.contains("Showing all chords."));
}

/// Test security headers are set on every response
#[tokio::test]
async fn test_security_headers() {
    for uri in ["/", "/guitar/", "/guitar/b2.json", "/banjo/all.json"] {
        let response = request(uri).await;
        let headers = response.headers();
        assert_eq!(
            headers.get("x-content-type-options").unwrap(),
            "nosniff",
            "missing nosniff on {uri}"
        );
        assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
        assert_eq!(
            headers.get("referrer-policy").unwrap(),
            "strict-origin-when-cross-origin"
        );
    }
}
