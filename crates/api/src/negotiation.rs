//! Content negotiation between JSON and the binary protobuf representation.

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Media type selecting the binary representation.
pub const PROTOBUF_MIME: &str = "application/x-protobuf";

/// Whether an Accept header value negotiates the binary representation.
///
/// Only the first comma-separated preference counts, with media-type
/// parameters stripped; it must equal `application/x-protobuf` exactly.
/// This is a strict first-preference rule, not best-match: a request whose
/// first preference is `application/json, application/x-protobuf` gets JSON.
pub fn wants_protobuf(accept: Option<&str>) -> bool {
    let Some(accept) = accept else {
        return false;
    };
    let first = accept.split(',').next().unwrap_or("");
    let media_type = first.split(';').next().unwrap_or("").trim();
    media_type == PROTOBUF_MIME
}

/// Whether the request headers negotiate the binary representation.
pub fn binary_negotiated(headers: &HeaderMap) -> bool {
    wants_protobuf(
        headers
            .get(header::ACCEPT)
            .and_then(|v| v.to_str().ok()),
    )
}

/// Encodes a protobuf message as a response body.
pub fn protobuf_response<M: prost::Message>(status: StatusCode, message: &M) -> Response {
    let mut buf = Vec::with_capacity(message.encoded_len());
    message
        .encode(&mut buf)
        .expect("encoding into a Vec cannot fail");
    (status, [(header::CONTENT_TYPE, PROTOBUF_MIME)], buf).into_response()
}

/// Responds with either representation, per the negotiation rule.
pub fn respond<J, M>(headers: &HeaderMap, status: StatusCode, json: J, binary: M) -> Response
where
    J: Serialize,
    M: prost::Message,
{
    if binary_negotiated(headers) {
        protobuf_response(status, &binary)
    } else {
        (status, Json(json)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_exact_match_selects_protobuf() {
        assert!(wants_protobuf(Some("application/x-protobuf")));
    }

    #[test]
    fn test_parameters_are_stripped() {
        assert!(wants_protobuf(Some("application/x-protobuf; q=0.9")));
        assert!(wants_protobuf(Some("application/x-protobuf;q=1.0, */*")));
    }

    #[test]
    fn test_first_preference_only() {
        // Binary second means JSON wins, regardless of q-values.
        assert!(!wants_protobuf(Some(
            "application/json, application/x-protobuf"
        )));
        assert!(wants_protobuf(Some(
            "application/x-protobuf, application/json"
        )));
    }

    #[test]
    fn test_non_matching_values_select_json() {
        assert!(!wants_protobuf(None));
        assert!(!wants_protobuf(Some("")));
        assert!(!wants_protobuf(Some("application/json")));
        assert!(!wants_protobuf(Some("*/*")));
        assert!(!wants_protobuf(Some("application/x-protobuf-extended")));
    }

    #[test]
    fn test_surrounding_whitespace_is_tolerated() {
        assert!(wants_protobuf(Some("  application/x-protobuf  ")));
    }

    #[test]
    fn test_binary_negotiated_reads_accept_header() {
        let mut headers = HeaderMap::new();
        assert!(!binary_negotiated(&headers));

        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/x-protobuf"),
        );
        assert!(binary_negotiated(&headers));
    }
}
