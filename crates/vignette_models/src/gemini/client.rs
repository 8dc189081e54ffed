//! Gemini text driver.

use async_trait::async_trait;
use gemini_rust::{Gemini, client::Model};
use tracing::{debug, instrument};

use vignette_core::{GenerateRequest, GenerateResponse};
use vignette_error::{GeminiError, GeminiErrorKind, VignetteResult};
use vignette_interface::TextDriver;

use super::{GeminiResult, api_key_from_env, require_key};

/// Appended to the system prompt when the caller wants bare JSON back.
const JSON_ONLY_INSTRUCTION: &str =
    "Respond with a single JSON object only. Do not wrap it in markdown or add commentary.";

/// Client for Gemini text generation.
///
/// Requests may override the model; a fresh SDK client is built for any
/// model other than the default.
#[derive(Clone)]
pub struct GeminiClient {
    client: Gemini,
    api_key: String,
    model_name: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model_name", &self.model_name)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create a client using `GEMINI_API_KEY` from the environment.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the key is missing or the SDK
    /// client cannot be built.
    #[instrument(name = "gemini_client_new", skip(model_name))]
    pub fn new(model_name: impl Into<String>) -> VignetteResult<Self> {
        let api_key = api_key_from_env()?;
        Self::with_api_key(api_key, model_name)
    }

    /// Create a client with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the key is empty or the SDK client
    /// cannot be built.
    #[instrument(name = "gemini_client_with_api_key", skip_all)]
    pub fn with_api_key(
        api_key: impl Into<String>,
        model_name: impl Into<String>,
    ) -> VignetteResult<Self> {
        let api_key = require_key(api_key.into())?;
        let model_name = model_name.into();
        let client = Self::build_client(&api_key, &model_name)?;
        Ok(Self {
            client,
            api_key,
            model_name,
        })
    }

    /// Map a model name onto the SDK enum.
    ///
    /// Unknown names become `Model::Custom` with the `models/` prefix the
    /// API expects.
    fn model_name_to_enum(name: &str) -> Model {
        match name {
            "gemini-2.5-flash" => Model::Gemini25Flash,
            "gemini-2.5-flash-lite" => Model::Gemini25FlashLite,
            "gemini-2.5-pro" => Model::Gemini25Pro,
            other if other.starts_with("models/") => Model::Custom(other.to_string()),
            other => Model::Custom(format!("models/{}", other)),
        }
    }

    fn build_client(api_key: &str, model_name: &str) -> GeminiResult<Gemini> {
        Gemini::with_model(api_key, Self::model_name_to_enum(model_name))
            .map_err(|e| GeminiError::new(GeminiErrorKind::ClientCreation(e.to_string())))
    }

    async fn generate_internal(&self, req: &GenerateRequest) -> GeminiResult<GenerateResponse> {
        let model_name = req.model.as_deref().unwrap_or(&self.model_name);
        let client = if model_name == self.model_name {
            self.client.clone()
        } else {
            Self::build_client(&self.api_key, model_name)?
        };

        let system_prompt = match (&req.system, req.json_output) {
            (Some(system), true) => Some(format!("{}\n\n{}", system, JSON_ONLY_INSTRUCTION)),
            (Some(system), false) => Some(system.clone()),
            (None, true) => Some(JSON_ONLY_INSTRUCTION.to_string()),
            (None, false) => None,
        };

        let mut builder = client.generate_content().with_user_message(&req.prompt);
        if let Some(prompt) = system_prompt {
            builder = builder.with_system_prompt(&prompt);
        }
        if let Some(temp) = req.temperature {
            builder = builder.with_temperature(temp);
        }
        if let Some(max_tokens) = req.max_tokens {
            builder = builder.with_max_output_tokens(max_tokens as i32);
        }

        debug!(model = model_name, "Sending Gemini text request");
        let response = builder.execute().await.map_err(Self::parse_gemini_error)?;

        let text = response.text();
        if text.trim().is_empty() {
            return Err(GeminiError::new(GeminiErrorKind::EmptyResponse));
        }
        Ok(GenerateResponse { text })
    }

    /// Turn an SDK error into a structured error, keeping the HTTP status
    /// when the message carries one.
    fn parse_gemini_error(err: impl std::fmt::Display) -> GeminiError {
        let err_msg = err.to_string();

        // e.g. "bad response from server; code 503; description: ..."
        if let Some(status_code) = Self::extract_status_code(&err_msg) {
            GeminiError::new(GeminiErrorKind::HttpError {
                status_code,
                message: err_msg,
            })
        } else {
            GeminiError::new(GeminiErrorKind::ApiRequest(err_msg))
        }
    }

    fn extract_status_code(error_msg: &str) -> Option<u16> {
        let code_start = error_msg.find("code ")?;
        let code_str = &error_msg[code_start + 5..];
        let end = code_str
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(code_str.len());
        code_str[..end].parse().ok()
    }
}

#[async_trait]
impl TextDriver for GeminiClient {
    #[instrument(skip(self, req), fields(model = req.model.as_deref().unwrap_or(&self.model_name)))]
    async fn generate(&self, req: &GenerateRequest) -> VignetteResult<GenerateResponse> {
        self.generate_internal(req).await.map_err(Into::into)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
