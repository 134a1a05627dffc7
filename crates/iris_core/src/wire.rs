use serde::{Deserialize, Serialize};

use crate::types::{InferenceResult, QueryRequest};

/// Events a client may send over the channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum ClientEvent {
    Query(QueryRequest),
}

/// Events the server emits back to a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum ServerEvent {
    Response(InferenceResult),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_event_deserializes_inline_fields() {
        let raw = r#"{"event":"query","question":"What color is this?","image":"data:image/png;base64,AAAA"}"#;
        let event: ClientEvent = serde_json::from_str(raw).unwrap();
        let ClientEvent::Query(request) = event;
        assert_eq!(request.question, "What color is this?");
        assert!(request.image.starts_with("data:image/png"));
    }

    #[test]
    fn query_event_without_image_is_rejected() {
        let raw = r#"{"event":"query","question":"hi"}"#;
        assert!(serde_json::from_str::<ClientEvent>(raw).is_err());
    }

    #[test]
    fn response_event_serializes_with_tag() {
        let event = ServerEvent::Response(InferenceResult {
            answer: "blue".to_string(),
        });
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"event":"response","answer":"blue"}"#);
    }
}
