//! Live Gemini tests.
//!
//! Run with `cargo test -p vignette_models --features api` and a
//! `GEMINI_API_KEY` in the environment or `.env`.

#![cfg(feature = "api")]

use vignette_core::{GenerateRequest, RenderRequest};
use vignette_interface::{ImageDriver, TextDriver};
use vignette_models::{GeminiClient, GeminiImageClient};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[tokio::test]
async fn test_text_generation_returns_json() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let client = GeminiClient::new("gemini-2.5-flash-lite")?;

    let request = GenerateRequest::builder()
        .prompt(r#"Return {"ok": true}"#)
        .max_tokens(Some(50))
        .build()?;
    let response = client.generate(&request).await?;

    assert!(response.text.contains("ok"));
    Ok(())
}

#[tokio::test]
async fn test_image_generation_returns_bytes() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let client = GeminiImageClient::new(API_BASE, "gemini-2.5-flash-image")?;

    let image = client
        .render(&RenderRequest::new("A small red lighthouse on a rock, watercolor"))
        .await?;

    let image = image.ok_or_else(|| anyhow::anyhow!("no image returned"))?;
    assert!(!image.is_empty());
    assert!(image.mime_type.starts_with("image/"));
    Ok(())
}
