use serde::de::DeserializeOwned;
use std::fmt;

use super::fallback;
use super::parse::ParseOptions;
use super::prompt;
use super::types::{ImageDescriptionAnalysis, SymptomAnalysis, Validate};
use crate::ai::{ChatMessage, ContentPart};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Symptoms,
    Image,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Symptoms => f.write_str("symptoms"),
            Operation::Image => f.write_str("image"),
        }
    }
}

/// One kind of analysis: its prompt, its output schema and how forgiving
/// the reply parsing is.
pub trait AnalysisRequest: Sync {
    type Output: DeserializeOwned + Validate + Send;

    const OPERATION: Operation;
    const PARSE: ParseOptions;

    /// User-supplied payload; blank payloads are rejected before sending.
    fn input(&self) -> &str;

    fn messages(&self) -> Vec<ChatMessage>;

    fn canned(&self) -> Self::Output;
}

/// Free-text symptom description.
pub struct SymptomRequest<'a> {
    pub symptoms: &'a str,
}

impl AnalysisRequest for SymptomRequest<'_> {
    type Output = SymptomAnalysis;

    const OPERATION: Operation = Operation::Symptoms;
    const PARSE: ParseOptions = ParseOptions {
        allow_fence: false,
        include_raw: false,
    };

    fn input(&self) -> &str {
        self.symptoms
    }

    fn messages(&self) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(prompt::SYMPTOM_SYSTEM_PROMPT),
            ChatMessage::user(prompt::symptom_prompt(self.symptoms)),
        ]
    }

    fn canned(&self) -> SymptomAnalysis {
        fallback::canned_symptom_analysis()
    }
}

/// Base64-encoded JPEG photo.
pub struct ImageRequest<'a> {
    pub base64_image: &'a str,
}

impl AnalysisRequest for ImageRequest<'_> {
    type Output = ImageDescriptionAnalysis;

    const OPERATION: Operation = Operation::Image;
    const PARSE: ParseOptions = ParseOptions {
        allow_fence: true,
        include_raw: true,
    };

    fn input(&self) -> &str {
        self.base64_image
    }

    fn messages(&self) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(prompt::IMAGE_SYSTEM_PROMPT),
            ChatMessage::user_parts(vec![
                ContentPart::text(prompt::image_prompt()),
                ContentPart::jpeg_base64(self.base64_image.trim()),
            ]),
        ]
    }

    fn canned(&self) -> ImageDescriptionAnalysis {
        fallback::canned_image_analysis()
    }
}
