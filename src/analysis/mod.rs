//! Symptom and photo analysis against a chat-completion model.
//!
//! Every call is one request and one reply. The reply is parsed and
//! validated against the schema of the request kind before it is returned;
//! any failure along the way surfaces as a single [`AnalysisError`].

pub mod fallback;
pub mod parse;
pub mod prompt;
pub mod request;
pub mod types;

use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

use crate::ai::openai::OpenAITransport;
use crate::ai::{ChatRequest, ChatTransport, Sampling, TransportError};
use crate::config::AppConfig;

pub use request::{AnalysisRequest, ImageRequest, Operation, SymptomRequest};
pub use types::{ImageDescriptionAnalysis, SymptomAnalysis, Urgency, Validate, VisionAnalysis};

#[derive(Debug, Error)]
pub enum ResponseError {
    #[error("Input is empty")]
    EmptyInput,

    #[error("No response from AI")]
    NoResponse,

    #[error("Invalid JSON in response{}", raw_suffix(.raw))]
    MalformedJson { raw: Option<String> },

    #[error("Invalid response structure: {detail}{}", raw_suffix(.raw))]
    InvalidStructure { detail: String, raw: Option<String> },

    #[error(transparent)]
    Transport(#[from] TransportError),
}

fn raw_suffix(raw: &Option<String>) -> String {
    match raw {
        Some(raw) => format!(": {}", raw),
        None => String::new(),
    }
}

/// The one failure shape callers see.
#[derive(Debug, Error)]
#[error("Failed to analyze {operation}: {cause}")]
pub struct AnalysisError {
    pub operation: Operation,
    #[source]
    pub cause: ResponseError,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ClientMode {
    Live,
    Canned,
}

#[derive(Clone)]
enum Backend {
    Live(Arc<dyn ChatTransport>),
    Canned,
}

/// Validated result plus where it came from.
#[derive(Debug, Clone, Serialize)]
pub struct Assessment<T> {
    pub id: String,
    pub created_at: String,
    pub mode: ClientMode,
    pub model: String,
    pub result: T,
}

/// Entry point for analyses. Cheap to clone; holds no per-call state.
#[derive(Clone)]
pub struct AnalysisClient {
    backend: Backend,
    sampling: Sampling,
}

impl AnalysisClient {
    /// Picks live or canned mode once, based on whether a usable key exists.
    pub fn from_config(config: &AppConfig) -> Self {
        let sampling = Sampling {
            model: config.openai_model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        };

        match config.credential() {
            Some(key) => {
                log::info!("Analysis client using {} at {}", sampling.model, config.api_base_url);
                let transport = OpenAITransport::new(&config.api_base_url, key);
                Self::with_transport(Arc::new(transport), sampling)
            }
            None => {
                log::info!("No API key configured; analysis client returns canned results");
                Self::canned(sampling)
            }
        }
    }

    pub fn with_transport(transport: Arc<dyn ChatTransport>, sampling: Sampling) -> Self {
        Self {
            backend: Backend::Live(transport),
            sampling,
        }
    }

    pub fn canned(sampling: Sampling) -> Self {
        Self {
            backend: Backend::Canned,
            sampling,
        }
    }

    pub fn mode(&self) -> ClientMode {
        match self.backend {
            Backend::Live(_) => ClientMode::Live,
            Backend::Canned => ClientMode::Canned,
        }
    }

    /// Model name reported in assessments.
    pub fn model(&self) -> &str {
        match self.backend {
            Backend::Live(_) => &self.sampling.model,
            Backend::Canned => "canned",
        }
    }

    pub async fn analyze_symptoms(&self, symptoms: &str) -> Result<SymptomAnalysis, AnalysisError> {
        self.run(&SymptomRequest { symptoms }).await
    }

    pub async fn analyze_image(
        &self,
        base64_image: &str,
    ) -> Result<ImageDescriptionAnalysis, AnalysisError> {
        self.run(&ImageRequest { base64_image }).await
    }

    pub async fn assess_symptoms(
        &self,
        symptoms: &str,
    ) -> Result<Assessment<SymptomAnalysis>, AnalysisError> {
        let result = self.analyze_symptoms(symptoms).await?;
        Ok(self.wrap(result))
    }

    pub async fn assess_image(
        &self,
        base64_image: &str,
    ) -> Result<Assessment<ImageDescriptionAnalysis>, AnalysisError> {
        let result = self.analyze_image(base64_image).await?;
        Ok(self.wrap(result))
    }

    /// Send → text → extract → parse → validate, shared by every request kind.
    pub async fn run<R: AnalysisRequest>(&self, request: &R) -> Result<R::Output, AnalysisError> {
        let transport = match &self.backend {
            Backend::Canned => return Ok(request.canned()),
            Backend::Live(transport) => transport,
        };

        let fail = |cause: ResponseError| AnalysisError {
            operation: R::OPERATION,
            cause,
        };

        if request.input().trim().is_empty() {
            return Err(fail(ResponseError::EmptyInput));
        }

        log::debug!("Requesting {} analysis from {}", R::OPERATION, self.sampling.model);
        let chat = ChatRequest::new(&self.sampling, request.messages());
        let text = transport
            .complete(&chat)
            .await
            .map_err(|e| fail(e.into()))?
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| fail(ResponseError::NoResponse))?;

        parse::parse_response(&text, R::PARSE).map_err(fail)
    }

    fn wrap<T>(&self, result: T) -> Assessment<T> {
        Assessment {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            mode: self.mode(),
            model: self.model().to_string(),
            result,
        }
    }
}
