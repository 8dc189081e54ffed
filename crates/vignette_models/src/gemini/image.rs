//! Gemini image driver over the REST API.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use vignette_core::{RenderRequest, RenderedImage};
use vignette_error::{GeminiError, GeminiErrorKind, VignetteResult};
use vignette_interface::ImageDriver;

use super::dto::{GenerateContentRequest, GenerateContentResponse};
use super::{GeminiResult, api_key_from_env, require_key};

/// Gemini image generation client.
#[derive(Debug, Clone)]
pub struct GeminiImageClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiImageClient {
    /// Create a client using `GEMINI_API_KEY` from the environment.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the key is missing.
    #[instrument(skip_all)]
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> VignetteResult<Self> {
        let api_key = api_key_from_env()?;
        Self::with_api_key(api_key, base_url, model)
    }

    /// Create a client with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the key is empty.
    #[instrument(skip_all)]
    pub fn with_api_key(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> VignetteResult<Self> {
        let api_key = require_key(api_key.into())?;
        Ok(Self {
            client: Client::new(),
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    async fn render_internal(&self, req: &RenderRequest) -> GeminiResult<Option<RenderedImage>> {
        let model = req.model.as_deref().unwrap_or(&self.model);
        let url = self.endpoint(model);
        let body = GenerateContentRequest::image_prompt(&req.prompt);

        debug!(url = %url, "Sending Gemini image request");
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GeminiError::new(GeminiErrorKind::Transport(e.to_string())))?;

        if !response.status().is_success() {
            let status_code = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(GeminiError::new(GeminiErrorKind::HttpError {
                status_code,
                message,
            }));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            GeminiError::new(GeminiErrorKind::MalformedResponse(format!(
                "Failed to parse response: {}",
                e
            )))
        })?;

        decode_image(&parsed)
    }
}

/// Decode the first inline image of a response.
///
/// A response without inline data yields `Ok(None)`.
fn decode_image(response: &GenerateContentResponse) -> GeminiResult<Option<RenderedImage>> {
    let Some(inline) = response.first_inline_data() else {
        warn!(
            candidates = response.candidates.len(),
            "Gemini response carried no image part"
        );
        return Ok(None);
    };

    let data = STANDARD
        .decode(inline.data.as_bytes())
        .map_err(|e| GeminiError::new(GeminiErrorKind::Base64Decode(e.to_string())))?;

    Ok(Some(RenderedImage {
        mime_type: inline.mime_type.clone(),
        data,
    }))
}

#[async_trait]
impl ImageDriver for GeminiImageClient {
    #[instrument(skip(self, req), fields(model = req.model.as_deref().unwrap_or(&self.model)))]
    async fn render(&self, req: &RenderRequest) -> VignetteResult<Option<RenderedImage>> {
        self.render_internal(req).await.map_err(Into::into)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> GenerateContentResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn decodes_first_inline_image() {
        let response = parse(
            r#"{
                "candidates": [{
                    "content": {
                        "role": "model",
                        "parts": [
                            {"text": "Here is your image"},
                            {"inlineData": {"mimeType": "image/png", "data": "aGVsbG8="}}
                        ]
                    },
                    "finishReason": "STOP"
                }]
            }"#,
        );

        let image = decode_image(&response).unwrap().unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.data, b"hello");
    }

    #[test]
    fn text_only_response_has_no_image() {
        let response = parse(
            r#"{"candidates": [{"content": {"parts": [{"text": "I cannot draw that"}]}}]}"#,
        );
        assert!(decode_image(&response).unwrap().is_none());
    }

    #[test]
    fn blocked_candidate_has_no_image() {
        let response = parse(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#);
        assert!(decode_image(&response).unwrap().is_none());
        assert!(decode_image(&parse("{}")).unwrap().is_none());
    }

    #[test]
    fn unknown_parts_are_skipped() {
        let response = parse(
            r#"{"candidates": [{"content": {"parts": [
                {"thoughtSignature": "abc"},
                {"inlineData": {"mimeType": "image/jpeg", "data": "AAEC"}}
            ]}}]}"#,
        );
        let image = decode_image(&response).unwrap().unwrap();
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(image.data, vec![0, 1, 2]);
    }

    #[test]
    fn invalid_base64_is_retryable() {
        let response = parse(
            r#"{"candidates": [{"content": {"parts": [
                {"inlineData": {"mimeType": "image/png", "data": "%%%"}}
            ]}}]}"#,
        );
        let err = decode_image(&response).unwrap_err();
        assert!(matches!(err.kind, GeminiErrorKind::Base64Decode(_)));
        assert!(err.kind.is_retryable());
    }

    #[test]
    fn request_asks_for_image_modality() {
        let body = serde_json::to_value(GenerateContentRequest::image_prompt("a pier")).unwrap();
        assert_eq!(body["contents"][0]["parts"][0]["text"], "a pier");
        assert_eq!(
            body["generationConfig"]["responseModalities"],
            serde_json::json!(["TEXT", "IMAGE"])
        );
    }

    #[test]
    fn endpoint_uses_model_path() {
        let client = GeminiImageClient::with_api_key(
            "key",
            "https://example.test/v1beta/",
            "gemini-2.5-flash-image",
        )
        .unwrap();
        assert_eq!(
            client.endpoint("gemini-2.5-flash-image"),
            "https://example.test/v1beta/models/gemini-2.5-flash-image:generateContent"
        );
    }
}
