//! The `Backend` trait -- the adapter interface for generative services.
//!
//! The trait is intentionally object-safe so it can be stored as
//! `Arc<dyn Backend>` and injected into the orchestrator; tests swap
//! in a scripted fake.

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;

/// Adapter interface for the generative text/image/speech collaborator.
///
/// Every call is one blocking request/response round trip from the
/// caller's point of view: no streaming, no retries, no cancellation.
/// A failed call is terminal for the request that made it.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Human-readable adapter name (e.g. "openai").
    fn name(&self) -> &str;

    /// Generate free text for a prompt.
    ///
    /// An empty `system` string sends no system message. The returned
    /// text is opaque; callers own any structural interpretation.
    async fn generate_text(&self, system: &str, prompt: &str) -> Result<String>;

    /// Generate an image for a prompt and return the image bytes.
    ///
    /// Adapters that receive a hosted URL from their API are expected
    /// to download it and return the bytes; a failed download is an
    /// error, not an empty result.
    async fn generate_image(&self, prompt: &str) -> Result<Bytes>;

    /// Synthesize spoken audio (MP3) for the given text.
    async fn synthesize_speech(&self, text: &str) -> Result<Bytes>;
}

// Compile-time assertion: Backend must be object-safe.
// If this line compiles, the trait can be used as `dyn Backend`.
const _: () = {
    fn _assert_object_safe(_: &dyn Backend) {}
};

#[cfg(test)]
mod tests {
    use super::*;

    /// A trivial backend that returns fixed values, used only to prove
    /// the trait can be implemented and used as `dyn Backend`.
    struct NoopBackend;

    #[async_trait]
    impl Backend for NoopBackend {
        fn name(&self) -> &str {
            "noop"
        }

        async fn generate_text(&self, _system: &str, _prompt: &str) -> Result<String> {
            Ok(String::new())
        }

        async fn generate_image(&self, _prompt: &str) -> Result<Bytes> {
            Ok(Bytes::new())
        }

        async fn synthesize_speech(&self, _text: &str) -> Result<Bytes> {
            Ok(Bytes::new())
        }
    }

    #[test]
    fn backend_is_object_safe() {
        // If this compiles, the trait is object-safe.
        let backend: Box<dyn Backend> = Box::new(NoopBackend);
        assert_eq!(backend.name(), "noop");
    }

    #[tokio::test]
    async fn noop_backend_round_trips() {
        let backend: Box<dyn Backend> = Box::new(NoopBackend);
        assert_eq!(backend.generate_text("", "hi").await.unwrap(), "");
        assert!(backend.generate_image("a dish").await.unwrap().is_empty());
        assert!(backend.synthesize_speech("read me").await.unwrap().is_empty());
    }
}
