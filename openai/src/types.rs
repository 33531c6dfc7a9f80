//! Wire types for the chat-completions endpoint.

use docfields_agent::{Message, Role};
use serde::{Deserialize, Serialize};

/// Request body for `POST /chat/completions`.
#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub model: &'a str,
    pub temperature: f32,
    pub messages: Vec<WireMessage<'a>>,
}

/// One chat message in OpenAI wire form.
#[derive(Debug, Serialize)]
pub(crate) struct WireMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

impl<'a> From<&'a Message> for WireMessage<'a> {
    fn from(message: &'a Message) -> Self {
        Self {
            role: wire_role(message.role),
            content: &message.content,
        }
    }
}

/// Maps the session-log role to the OpenAI role string.
///
/// `Human` becomes `"user"`; the other roles match by name.
pub(crate) const fn wire_role(role: Role) -> &'static str {
    match role {
        Role::System => "system",
        Role::Human => "user",
        Role::Assistant => "assistant",
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoice {
    pub message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssistantMessage {
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_role_mapping() {
        assert_eq!(wire_role(Role::System), "system");
        assert_eq!(wire_role(Role::Human), "user");
        assert_eq!(wire_role(Role::Assistant), "assistant");
    }

    #[test]
    fn test_request_serializes_to_openai_shape() {
        let messages = vec![Message::system("be precise"), Message::human("extract")];
        let request = ChatRequest {
            model: "gpt-4o",
            temperature: 0.1,
            messages: messages.iter().map(WireMessage::from).collect(),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-4o");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(value["messages"][1]["content"], "extract");
    }

    #[test]
    fn test_response_deserializes_content() {
        let body = json!({
            "id": "cmpl-1",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "{}"}}]
        });
        let response: ChatResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.choices[0].message.content.as_deref(), Some("{}"));
    }

    #[test]
    fn test_response_tolerates_null_content() {
        let body = json!({
            "choices": [{"message": {"role": "assistant", "content": null}}]
        });
        let response: ChatResponse = serde_json::from_value(body).unwrap();
        assert!(response.choices[0].message.content.is_none());
    }
}
