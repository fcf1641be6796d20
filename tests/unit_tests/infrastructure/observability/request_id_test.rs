use axum::http::HeaderValue;
use echoscribe::infrastructure::observability::{REQUEST_ID_HEADER, RequestId};

#[test]
fn given_request_id_header_constant_when_accessed_then_returns_correct_value() {
    assert_eq!(REQUEST_ID_HEADER, "x-request-id");
}

#[test]
fn given_caller_supplied_header_when_resolving_then_reuses_it() {
    let header = HeaderValue::from_static("abc-123");

    let request_id = RequestId::from_header(Some(&header));

    assert_eq!(request_id, RequestId("abc-123".to_string()));
}

#[test]
fn given_no_header_when_resolving_then_generates_uuid() {
    let request_id = RequestId::from_header(None);

    assert!(uuid::Uuid::parse_str(&request_id.0).is_ok());
}

#[test]
fn given_blank_header_when_resolving_then_generates_uuid() {
    let header = HeaderValue::from_static("   ");

    let request_id = RequestId::from_header(Some(&header));

    assert!(uuid::Uuid::parse_str(&request_id.0).is_ok());
}
