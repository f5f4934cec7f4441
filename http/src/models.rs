use serde::{Deserialize, Serialize};

/// Key lookup request for the future JSON query endpoint.
///
/// No route consumes these yet; the wire contract is fixed here so clients
/// can be written against it before the endpoint lands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub key: String,
}

/// Query reply: the key echoed back with either a value or an error,
/// never both. Absent fields stay off the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QueryResponse {
    pub fn ok(key: &str, value: &str) -> Self {
        Self { key: Some(key.to_string()), value: Some(value.to_string()), error: None }
    }

    pub fn error(key: &str, msg: &str) -> Self {
        Self { key: Some(key.to_string()), value: None, error: Some(msg.to_string()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_request_wire_shape() {
        let request: QueryRequest = serde_json::from_str(r#"{"key":"balance"}"#).unwrap();
        assert_eq!(request.key, "balance");
        assert_eq!(serde_json::to_string(&request).unwrap(), r#"{"key":"balance"}"#);
    }

    #[test]
    fn test_query_response_omits_absent_fields() {
        let ok = QueryResponse::ok("balance", "42");
        assert_eq!(serde_json::to_string(&ok).unwrap(), r#"{"key":"balance","value":"42"}"#);

        let err = QueryResponse::error("balance", "no such key");
        assert_eq!(serde_json::to_string(&err).unwrap(), r#"{"key":"balance","error":"no such key"}"#);
    }

    #[test]
    fn test_query_response_never_carries_value_and_error() {
        for response in [QueryResponse::ok("k", "v"), QueryResponse::error("k", "boom")] {
            assert!(response.value.is_none() || response.error.is_none());
        }
    }

    #[test]
    fn test_query_response_roundtrip_with_missing_fields() {
        let response: QueryResponse = serde_json::from_str(r#"{"error":"bad request"}"#).unwrap();
        assert!(response.key.is_none());
        assert!(response.value.is_none());
        assert_eq!(response.error.as_deref(), Some("bad request"));
    }
}
