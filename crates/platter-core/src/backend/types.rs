//! Configuration for generation adapters.

/// Default base URL for OpenAI-compatible APIs.
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1";
/// Default chat model for plan and spoken-rewrite generation.
pub const DEFAULT_TEXT_MODEL: &str = "gpt-3.5-turbo";
/// Default image generation model.
pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";
/// Default speech synthesis model.
pub const DEFAULT_SPEECH_MODEL: &str = "tts-1";
/// Default speech synthesis voice.
pub const DEFAULT_VOICE: &str = "onyx";

/// Connection and model settings for [`super::OpenAiBackend`].
///
/// Built by the CLI's config resolution chain and passed in
/// explicitly; the adapter holds no process-wide state.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the OpenAI-compatible API, without a trailing path.
    pub api_url: String,
    pub api_key: String,
    pub text_model: String,
    pub image_model: String,
    pub speech_model: String,
    pub voice: String,
}

impl BackendConfig {
    /// Config with all defaults and the given API key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: api_key.into(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            speech_model: DEFAULT_SPEECH_MODEL.to_string(),
            voice: DEFAULT_VOICE.to_string(),
        }
    }
}
