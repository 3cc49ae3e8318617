pub mod openai;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to get a reply out of the chat endpoint.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("OpenAI API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("{0}")]
    Request(String),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A chat message body: either plain text or a list of typed parts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageUrl {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Inline JPEG as a data URL.
    pub fn jpeg_base64(base64_image: &str) -> Self {
        Self::ImageUrl {
            image_url: ImageUrl {
                url: format!("data:image/jpeg;base64,{}", base64_image),
                detail: None,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: MessageContent,
}

impl ChatMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn user_parts(parts: Vec<ContentPart>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Parts(parts),
        }
    }
}

/// Sampling settings shared by every request a client issues.
#[derive(Debug, Clone, PartialEq)]
pub struct Sampling {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Body of a chat-completion call, serialized as-is on the wire.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl ChatRequest {
    pub fn new(sampling: &Sampling, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: sampling.model.clone(),
            messages,
            max_tokens: sampling.max_tokens,
            temperature: sampling.temperature,
        }
    }
}

/// Something that can turn a chat request into the model's text reply.
///
/// `Ok(None)` means the endpoint answered but carried no text payload.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> Result<Option<String>, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_message_serializes_as_string_content() {
        let value = serde_json::to_value(ChatMessage::user("hello")).unwrap();
        assert_eq!(value, serde_json::json!({"role": "user", "content": "hello"}));
    }

    #[test]
    fn multipart_message_matches_openai_shape() {
        let message = ChatMessage::user_parts(vec![
            ContentPart::text("look"),
            ContentPart::jpeg_base64("QUJD"),
        ]);
        let value = serde_json::to_value(message).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "role": "user",
                "content": [
                    {"type": "text", "text": "look"},
                    {"type": "image_url", "image_url": {"url": "data:image/jpeg;base64,QUJD"}}
                ]
            })
        );
    }

    #[test]
    fn request_copies_sampling() {
        let sampling = Sampling {
            model: "gpt-4o".to_string(),
            max_tokens: 500,
            temperature: 0.3,
        };
        let request = ChatRequest::new(&sampling, vec![ChatMessage::system("s")]);
        assert_eq!(request.model, "gpt-4o");
        assert_eq!(request.max_tokens, 500);
        assert_eq!(request.messages.len(), 1);
    }
}
