//! Tests for HTTP error rendering.

use actix_web::body::to_bytes;
use actix_web::test::TestRequest;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;

const TRACE: &str = "00000000-0000-0000-0000-00000000abcd";

async fn render(error: &Error) -> (StatusCode, Option<String>, Value) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("ascii header").to_owned());
    let bytes = to_bytes(response.into_body()).await.expect("body");
    let body = serde_json::from_slice(&bytes).expect("json body");
    (status, header, body)
}

#[rstest]
#[case(Error::invalid_request("x"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("x"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("x"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("x"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("x"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("x"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("x"), StatusCode::INTERNAL_SERVER_ERROR)]
fn codes_map_to_statuses(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(error.status_code(), status);
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_message_and_details() {
    let error = Error::conflict("username already registered")
        .with_trace_id(TRACE)
        .with_details(json!({ "field": "username" }));

    let (status, header, body) = render(&error).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(header.as_deref(), Some(TRACE));
    assert_eq!(
        body,
        json!({
            "code": "conflict",
            "message": "username already registered",
            "traceId": TRACE,
            "details": { "field": "username" }
        })
    );
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_but_traceable() {
    let error = Error::internal("no such table: comments")
        .with_trace_id(TRACE)
        .with_details(json!({ "sql": "SELECT *" }));

    let (status, header, body) = render(&error).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(TRACE));
    assert_eq!(
        body,
        json!({
            "code": "internal_error",
            "message": "Internal server error",
            "traceId": TRACE
        })
    );
}

#[rstest]
#[actix_web::test]
async fn errors_without_trace_omit_the_header() {
    let (_, header, body) = render(&Error::not_found("no comment")).await;
    assert_eq!(header, None);
    assert!(body.get("traceId").is_none());
}

#[rstest]
fn framework_errors_become_internal() {
    let actix = actix_web::error::ErrorBadGateway("upstream exploded");
    let error = Error::from(actix);
    assert_eq!(error.code(), ErrorCode::InternalError);
    assert_eq!(error.message(), REDACTED_MESSAGE);
}

#[rstest]
#[case(JsonPayloadError::ContentType, "expected an application/json body")]
#[case(
    JsonPayloadError::Overflow { limit: 16 },
    "request body is too large"
)]
#[actix_web::test]
async fn json_payload_errors_render_as_invalid_requests(
    #[case] payload_error: JsonPayloadError,
    #[case] reason: &str,
) {
    let request = TestRequest::default().to_http_request();
    let response = json_error_handler(payload_error, &request).error_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body()).await.expect("body");
    let body: Value = serde_json::from_slice(&bytes).expect("json body");
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["reason"], reason);
}
