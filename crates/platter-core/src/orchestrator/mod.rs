//! End-to-end pipeline for one planning request.
//!
//! The run is a small state machine with terminal Success / Failed
//! states:
//!
//! 1. RequestingPlan -- ask the backend for the full day's plan text.
//! 2. Segmenting -- segment the text, extract titles, reconcile.
//! 3. BuildingMeals -- per reconciled pair, in slot order: persist the
//!    recipe text, generate and persist the image, rewrite the recipe
//!    for speech and persist the synthesized audio, resolve URLs,
//!    assemble the record.
//! 4. Success -- the ordered records plus the raw plan text.
//!
//! Strictly sequential: one meal's assets are fully persisted before
//! the next meal begins, and there is no retry anywhere. Any failure
//! in step 3 aborts the whole request; a partial plan is never
//! returned.

use thiserror::Error;

use crate::assets::AssetStore;
use crate::backend::Backend;
use crate::models::{MealPlan, MealRecord, MealSlot, PlanRequest};
use crate::plan::{
    SYSTEM_ROLE, build_image_prompt, build_plan_prompt, build_spoken_prompt, extract_titles,
    reconcile, segment,
};

type Source = Box<dyn std::error::Error + Send + Sync>;

/// Terminal failure kinds for one planning run.
///
/// An explicit result the caller can branch on, rather than an
/// exception type to catch. Everything recoverable (section/title
/// count mismatches) is resolved inside the pipeline and never
/// surfaces here.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The day-plan generation call failed or returned blank content.
    #[error("meal plan generation returned no usable text")]
    GenerationFailure {
        #[source]
        source: Option<Source>,
    },

    /// Segmentation and title extraction recovered zero usable pairs.
    #[error("meal plan text was empty or badly formatted")]
    EmptyOrMalformedPlan,

    /// Building one meal's assets failed; the request is aborted.
    #[error("asset generation failed for {slot}")]
    AssetGeneration {
        slot: MealSlot,
        #[source]
        source: Source,
    },
}

impl PlanError {
    fn generation(err: anyhow::Error) -> Self {
        Self::GenerationFailure {
            source: Some(err.into()),
        }
    }

    fn asset(slot: MealSlot, err: anyhow::Error) -> Self {
        Self::AssetGeneration {
            slot,
            source: err.into(),
        }
    }
}

/// Run the full pipeline for one request.
///
/// `base_url` is the public base of the current deployment (e.g.
/// `http://localhost:8000/`); generated asset and HTML-view URLs are
/// resolved against it so links stay correct regardless of host and
/// port. Returns up to three records -- fewer when the backend
/// under-produced sections or titles and the best-effort reconcile
/// policy degraded the plan.
pub async fn run_plan(
    backend: &dyn Backend,
    store: &AssetStore,
    request: &PlanRequest,
    base_url: &str,
) -> Result<MealPlan, PlanError> {
    // 1. RequestingPlan.
    tracing::info!(
        backend = backend.name(),
        kcal = request.kcal,
        exact_ingredients = request.exact_ingredients,
        "requesting day plan"
    );
    let raw_plan = backend
        .generate_text(SYSTEM_ROLE, &build_plan_prompt(request))
        .await
        .map_err(PlanError::generation)?;
    if raw_plan.trim().is_empty() {
        return Err(PlanError::GenerationFailure { source: None });
    }

    // 2. Segmenting.
    let sections = segment(&raw_plan);
    let titles = extract_titles(&raw_plan);
    tracing::debug!(
        sections = sections.len(),
        titles = titles.len(),
        "segmented day plan"
    );
    let pairs = reconcile(sections, titles).map_err(|_| PlanError::EmptyOrMalformedPlan)?;

    // 3. BuildingMeals, one slot at a time.
    let mut meals = Vec::with_capacity(pairs.len());
    for (index, (body, title)) in pairs.into_iter().enumerate() {
        let slot = MealSlot::from_index(index).expect("reconcile caps pairs at three");
        tracing::info!(%slot, title = %title, "building meal");

        store
            .write_recipe(slot, &body)
            .map_err(|e| PlanError::asset(slot, e))?;

        let image = backend
            .generate_image(&build_image_prompt(&title))
            .await
            .map_err(|e| PlanError::asset(slot, e))?;
        let image_path = store
            .write_image(slot, &image)
            .map_err(|e| PlanError::asset(slot, e))?;

        // Two-step audio: rewrite for reading aloud, then synthesize.
        let spoken = backend
            .generate_text("", &build_spoken_prompt(&body))
            .await
            .map_err(|e| PlanError::asset(slot, e))?;
        let audio = backend
            .synthesize_speech(&spoken)
            .await
            .map_err(|e| PlanError::asset(slot, e))?;
        let audio_path = store
            .write_audio(slot, &audio)
            .map_err(|e| PlanError::asset(slot, e))?;

        let image_url = store
            .public_url(&image_path, base_url)
            .map_err(|e| PlanError::asset(slot, anyhow::Error::new(e)))?;
        let audio_url = store
            .public_url(&audio_path, base_url)
            .map_err(|e| PlanError::asset(slot, anyhow::Error::new(e)))?;
        let html_url = format!("{}/meal_plan_html/{slot}", base_url.trim_end_matches('/'));

        meals.push(MealRecord {
            slot,
            title,
            text: body,
            image_url,
            audio_url,
            html_url,
        });
    }

    tracing::info!(meals = meals.len(), "meal plan complete");
    Ok(MealPlan { raw_plan, meals })
}
