//! Backend adapter for OpenAI-compatible APIs.
//!
//! Speaks three endpoints: `/chat/completions` for text,
//! `/images/generations` for images (the API returns a hosted URL,
//! which this adapter downloads to bytes), and `/audio/speech` for
//! TTS. No retries: a failed call surfaces to the caller as-is.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::trait_def::Backend;
use super::types::BackendConfig;

/// Per-call timeout. Image generation is the slowest of the three
/// endpoints and can take tens of seconds.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

const IMAGE_SIZE: &str = "1024x1024";
const IMAGE_QUALITY: &str = "standard";
const IMAGE_STYLE: &str = "natural";

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u32,
    size: &'a str,
    quality: &'a str,
    style: &'a str,
}

#[derive(Deserialize)]
struct ImageResponse {
    data: Vec<ImageDatum>,
}

#[derive(Deserialize)]
struct ImageDatum {
    url: String,
}

#[derive(Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    voice: &'a str,
    input: &'a str,
}

// ---------------------------------------------------------------------------
// Adapter
// ---------------------------------------------------------------------------

/// Generation adapter for OpenAI-compatible APIs.
pub struct OpenAiBackend {
    http: Client,
    config: BackendConfig,
}

impl OpenAiBackend {
    /// Build an adapter with its own HTTP client.
    pub fn new(config: BackendConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { http, config })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.config.api_url.trim_end_matches('/'))
    }

    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<reqwest::Response> {
        let response = self
            .http
            .post(self.endpoint(path))
            .bearer_auth(&self.config.api_key)
            .json(body)
            .send()
            .await
            .with_context(|| format!("request to {path} failed"))?;
        check_status(response, path).await
    }
}

/// Map non-success statuses to descriptive errors.
async fn check_status(response: reqwest::Response, path: &str) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    match status.as_u16() {
        401 => bail!("{path}: authentication failed (check the API key)"),
        403 => bail!("{path}: access forbidden"),
        429 => bail!("{path}: rate limit exceeded"),
        500..=599 => bail!("{path}: backend server error ({status}): {body}"),
        _ => bail!("{path}: unexpected HTTP {status}: {body}"),
    }
}

#[async_trait]
impl Backend for OpenAiBackend {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate_text(&self, system: &str, prompt: &str) -> Result<String> {
        let mut messages = Vec::with_capacity(2);
        if !system.is_empty() {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: prompt,
        });

        let body = ChatRequest {
            model: &self.config.text_model,
            messages,
            temperature: 1.0,
        };

        let response = self.post_json("chat/completions", &body).await?;
        let parsed: ChatResponse = response
            .json()
            .await
            .context("failed to parse chat completion response")?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .context("chat completion returned no choices")?;
        Ok(choice.message.content)
    }

    async fn generate_image(&self, prompt: &str) -> Result<Bytes> {
        let body = ImageRequest {
            model: &self.config.image_model,
            prompt,
            n: 1,
            size: IMAGE_SIZE,
            quality: IMAGE_QUALITY,
            style: IMAGE_STYLE,
        };

        let response = self.post_json("images/generations", &body).await?;
        let parsed: ImageResponse = response
            .json()
            .await
            .context("failed to parse image generation response")?;
        let datum = parsed
            .data
            .into_iter()
            .next()
            .context("image generation returned no data")?;

        // The API hosts the image at a short-lived URL; fetch it now.
        tracing::debug!(url = %datum.url, "downloading generated image");
        let download = self
            .http
            .get(&datum.url)
            .send()
            .await
            .with_context(|| format!("failed to download image from {}", datum.url))?;
        if !download.status().is_success() {
            bail!(
                "image download from {} returned HTTP {}",
                datum.url,
                download.status()
            );
        }
        download
            .bytes()
            .await
            .context("failed to read downloaded image bytes")
    }

    async fn synthesize_speech(&self, text: &str) -> Result<Bytes> {
        let body = SpeechRequest {
            model: &self.config.speech_model,
            voice: &self.config.voice,
            input: text,
        };

        let response = self.post_json("audio/speech", &body).await?;
        response
            .bytes()
            .await
            .context("failed to read synthesized audio bytes")
    }
}
