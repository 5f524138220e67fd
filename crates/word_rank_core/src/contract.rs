use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const SUCCESS_MESSAGE: &str = "Success!";
pub const SUCCESS_STATUS_CODE: u16 = 200;
pub const FAILURE_STATUS_CODE: u16 = 500;

/// Decoded JSON body of an invocation. Only `text` is read; other fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextRequest {
    pub text: String,
}

/// Proxy-style response returned to the invoker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InvocationResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl InvocationResponse {
    pub fn success(download_url: &str) -> Self {
        Self {
            status_code: SUCCESS_STATUS_CODE,
            body: json!({
                "message": SUCCESS_MESSAGE,
                "download_url": download_url,
            })
            .to_string(),
        }
    }

    pub fn failure(message: &str) -> Self {
        Self {
            status_code: FAILURE_STATUS_CODE,
            body: json!({ "error": message }).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Invocation envelope. Only `body` is read; a missing `body` and `null` both decode to `None`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct InvocationEvent {
    #[serde(default)]
    pub body: Option<Value>,
}

/// Extracts the `text` field from an event whose `body` is a JSON-encoded string.
///
/// The body must be a string holding a JSON object with a string `text`. An
/// already-decoded object, an array, or a scalar is rejected. Duplicate keys
/// resolve to the last occurrence.
pub fn decode_text_request(event: &Value) -> Result<TextRequest, ValidationError> {
    if !event.is_object() {
        return Err(ValidationError::new("Request payload must be a JSON object"));
    }

    let envelope = InvocationEvent::deserialize(event)
        .map_err(|error| ValidationError::new(format!("Malformed request payload: {error}")))?;

    let Some(body) = envelope.body else {
        return Err(ValidationError::new("Request payload is missing body"));
    };

    let Value::String(raw_body) = body else {
        return Err(ValidationError::new(
            "Request body must be a JSON-encoded string",
        ));
    };

    let decoded: Value = serde_json::from_str(&raw_body)
        .map_err(|error| ValidationError::new(format!("Malformed request body: {error}")))?;

    let Value::Object(fields) = decoded else {
        return Err(ValidationError::new(
            "Request body must decode to a JSON object",
        ));
    };

    serde_json::from_value::<TextRequest>(Value::Object(fields))
        .map_err(|error| ValidationError::new(format!("Malformed request body: {error}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_text_from_string_body() {
        let event = json!({"body": "{\"text\": \"Hello world\", \"lang\": \"en\"}"});
        let request = decode_text_request(&event).expect("request should decode");
        assert_eq!(request.text, "Hello world");
    }

    #[test]
    fn rejects_missing_body() {
        let error = decode_text_request(&json!({"headers": {}})).expect_err("should fail");
        assert_eq!(error.message(), "Request payload is missing body");
    }

    #[test]
    fn rejects_pre_decoded_object_body() {
        let event = json!({"body": {"text": "already decoded"}});
        let error = decode_text_request(&event).expect_err("object body should fail");
        assert!(error.message().contains("JSON-encoded string"));
    }

    #[test]
    fn rejects_non_json_body() {
        let error = decode_text_request(&json!({"body": "not json"})).expect_err("should fail");
        assert!(error.message().starts_with("Malformed request body"));
    }

    #[test]
    fn rejects_body_without_text() {
        let error =
            decode_text_request(&json!({"body": "{\"words\": \"x\"}"})).expect_err("should fail");
        assert!(error.message().contains("missing field `text`"));
    }

    #[test]
    fn rejects_non_string_text() {
        let error =
            decode_text_request(&json!({"body": "{\"text\": 42}"})).expect_err("should fail");
        assert!(error.message().starts_with("Malformed request body"));
    }

    #[test]
    fn rejects_array_body() {
        let event = json!({"body": "[\"hello world\"]"});
        let error = decode_text_request(&event).expect_err("array body should fail");
        assert_eq!(error.message(), "Request body must decode to a JSON object");
    }

    #[test]
    fn rejects_scalar_body() {
        let error = decode_text_request(&json!({"body": "42"})).expect_err("should fail");
        assert_eq!(error.message(), "Request body must decode to a JSON object");
    }

    #[test]
    fn rejects_null_body() {
        let error = decode_text_request(&json!({"body": null})).expect_err("should fail");
        assert_eq!(error.message(), "Request payload is missing body");
    }

    #[test]
    fn duplicate_text_keys_keep_the_last_value() {
        let event = json!({"body": "{\"text\": \"first\", \"text\": \"second\"}"});
        let request = decode_text_request(&event).expect("duplicate keys should decode");
        assert_eq!(request.text, "second");
    }

    #[test]
    fn rejects_non_object_event() {
        for event in [json!("body"), json!(["{\"text\": \"x\"}"])] {
            let error = decode_text_request(&event).expect_err("should fail");
            assert_eq!(error.message(), "Request payload must be a JSON object");
        }
    }

    #[test]
    fn success_response_carries_message_and_url() {
        let response = InvocationResponse::success("https://example.test/object?sig=1");
        assert_eq!(response.status_code, 200);
        let body: Value = serde_json::from_str(&response.body).expect("body should parse");
        assert_eq!(body["message"], "Success!");
        assert_eq!(body["download_url"], "https://example.test/object?sig=1");
    }

    #[test]
    fn failure_response_serializes_with_status_code_field() {
        let response = InvocationResponse::failure("boom");
        let encoded = serde_json::to_value(&response).expect("response should serialize");
        assert_eq!(encoded["statusCode"], 500);
        let body: Value = serde_json::from_str(&response.body).expect("body should parse");
        assert_eq!(body, json!({"error": "boom"}));
    }
}
