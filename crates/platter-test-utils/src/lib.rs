//! Shared test fixtures for the platter crates.
//!
//! Provides [`ScriptedBackend`], a deterministic stand-in for the
//! generative backend, plus canned plan-text builders matching the
//! formatting contract the real backend is prompted to follow.

use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Result, bail};
use async_trait::async_trait;
use bytes::Bytes;

use platter_core::backend::Backend;

/// Bytes the scripted backend returns for every generated image.
pub const FAKE_PNG: &[u8] = b"\x89PNG fake image bytes";
/// Bytes the scripted backend returns for every synthesized clip.
pub const FAKE_MP3: &[u8] = b"ID3 fake audio bytes";

/// A deterministic [`Backend`] for tests.
///
/// The first `generate_text` call returns the scripted plan text;
/// every later call returns the spoken-rewrite text. Image and speech
/// calls return fixed byte blobs, or fail when the corresponding
/// `failing_*` switch is set.
pub struct ScriptedBackend {
    plan_text: String,
    spoken_text: String,
    fail_images: bool,
    fail_speech: bool,
    text_calls: AtomicUsize,
    image_calls: AtomicUsize,
}

impl ScriptedBackend {
    /// Backend that answers the day-plan call with `plan_text`.
    pub fn with_plan(plan_text: impl Into<String>) -> Self {
        Self {
            plan_text: plan_text.into(),
            spoken_text: "Here is the recipe, read aloud.".to_string(),
            fail_images: false,
            fail_speech: false,
            text_calls: AtomicUsize::new(0),
            image_calls: AtomicUsize::new(0),
        }
    }

    /// Make every image generation call fail.
    pub fn failing_images(mut self) -> Self {
        self.fail_images = true;
        self
    }

    /// Make every speech synthesis call fail.
    pub fn failing_speech(mut self) -> Self {
        self.fail_speech = true;
        self
    }

    /// Number of `generate_text` calls observed so far.
    pub fn text_calls(&self) -> usize {
        self.text_calls.load(Ordering::SeqCst)
    }

    /// Number of `generate_image` calls observed so far.
    pub fn image_calls(&self) -> usize {
        self.image_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Backend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate_text(&self, _system: &str, _prompt: &str) -> Result<String> {
        let call = self.text_calls.fetch_add(1, Ordering::SeqCst);
        if call == 0 {
            Ok(self.plan_text.clone())
        } else {
            Ok(self.spoken_text.clone())
        }
    }

    async fn generate_image(&self, _prompt: &str) -> Result<Bytes> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_images {
            bail!("scripted image backend is down");
        }
        Ok(Bytes::from_static(FAKE_PNG))
    }

    async fn synthesize_speech(&self, _text: &str) -> Result<Bytes> {
        if self.fail_speech {
            bail!("scripted speech backend is down");
        }
        Ok(Bytes::from_static(FAKE_MP3))
    }
}

/// Build plan text from explicit sections and titles, separated by the
/// 50-dash runs the real prompt asks for, with the comma-separated
/// title line last.
pub fn plan_text_with(sections: &[&str], titles: &[&str]) -> String {
    let separator = "-".repeat(50);
    let mut text = sections.join(&format!("\n{separator}\n"));
    text.push('\n');
    text.push_str(&titles.join(", "));
    text
}

/// A well-formed three-meal plan: three dash-separated sections and a
/// final title line.
pub fn sample_plan_text() -> String {
    plan_text_with(
        &[
            "Breakfast: Oatmeal Bowl\n- 1 cup oats\n- 2 cups water\nSimmer the oats. \
             About 350 calories, 1 serving. Prep 5 min, cook 10 min.",
            "Lunch: Chicken Salad\n- 150 g chicken\n- mixed greens\nGrill and toss. \
             About 550 calories, 1 serving. Prep 10 min, cook 12 min.",
            "Dinner: Veggie Stir Fry\n- assorted vegetables\n- soy sauce\nStir fry hot. \
             About 600 calories, 2 servings. Prep 10 min, cook 8 min.",
        ],
        &["Oatmeal Bowl", "Chicken Salad", "Veggie Stir Fry"],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_plan_has_two_separators_and_a_title_line() {
        let text = sample_plan_text();
        let separators = text
            .lines()
            .filter(|l| l.trim().len() >= 10 && l.trim().chars().all(|c| c == '-'))
            .count();
        assert_eq!(separators, 2);
        assert!(
            text.lines().last().unwrap().contains("Oatmeal Bowl, Chicken Salad"),
            "title line must be last"
        );
    }

    #[test]
    fn plan_text_with_places_titles_last() {
        let text = plan_text_with(&["a", "b"], &["T1", "T2"]);
        assert_eq!(text.lines().last().unwrap(), "T1, T2");
    }
}
