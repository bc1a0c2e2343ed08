//! End-to-end tests for the planning pipeline against a scripted
//! backend and a temp-dir asset store.

use platter_core::assets::AssetStore;
use platter_core::models::{MealSlot, PlanRequest};
use platter_core::orchestrator::{PlanError, run_plan};
use platter_test_utils::{FAKE_MP3, FAKE_PNG, ScriptedBackend, plan_text_with, sample_plan_text};

const BASE_URL: &str = "http://localhost:8000/";

fn request() -> PlanRequest {
    PlanRequest {
        ingredients: "oats, chicken, vegetables".to_string(),
        kcal: 2000,
        exact_ingredients: false,
        extra: None,
    }
}

fn store() -> (tempfile::TempDir, AssetStore) {
    let dir = tempfile::TempDir::new().expect("failed to create temp asset root");
    let store = AssetStore::new(dir.path());
    (dir, store)
}

#[tokio::test]
async fn full_pipeline_builds_three_meals_in_slot_order() {
    let backend = ScriptedBackend::with_plan(sample_plan_text());
    let (_dir, store) = store();

    let plan = run_plan(&backend, &store, &request(), BASE_URL)
        .await
        .expect("pipeline should succeed");

    assert_eq!(plan.raw_plan, sample_plan_text());
    assert_eq!(plan.meals.len(), 3);

    let titles: Vec<&str> = plan.meals.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["Oatmeal Bowl", "Chicken Salad", "Veggie Stir Fry"]);

    let slots: Vec<MealSlot> = plan.meals.iter().map(|m| m.slot).collect();
    assert_eq!(slots, vec![MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner]);

    // One day-plan call plus one spoken rewrite per meal.
    assert_eq!(backend.text_calls(), 4);
    assert_eq!(backend.image_calls(), 3);
}

#[tokio::test]
async fn pipeline_persists_all_artifacts_at_canonical_paths() {
    let backend = ScriptedBackend::with_plan(sample_plan_text());
    let (_dir, store) = store();

    run_plan(&backend, &store, &request(), BASE_URL)
        .await
        .expect("pipeline should succeed");

    for slot in MealSlot::ALL {
        let paths = store.paths_for(slot);
        assert_eq!(std::fs::read(&paths.image).unwrap(), FAKE_PNG, "{slot} image");
        assert_eq!(std::fs::read(&paths.audio).unwrap(), FAKE_MP3, "{slot} audio");
        assert!(
            !std::fs::read_to_string(&paths.recipe_text).unwrap().is_empty(),
            "{slot} recipe text should be persisted"
        );
    }
}

#[tokio::test]
async fn pipeline_resolves_request_relative_urls() {
    let backend = ScriptedBackend::with_plan(sample_plan_text());
    let (_dir, store) = store();

    let plan = run_plan(&backend, &store, &request(), "http://example.com:9090/")
        .await
        .expect("pipeline should succeed");

    let breakfast = &plan.meals[0];
    assert_eq!(
        breakfast.image_url,
        "http://example.com:9090/static/images/breakfast.png"
    );
    assert_eq!(
        breakfast.audio_url,
        "http://example.com:9090/static/audio/breakfast.mp3"
    );
    assert_eq!(
        breakfast.html_url,
        "http://example.com:9090/meal_plan_html/breakfast"
    );
}

#[tokio::test]
async fn two_sections_and_three_titles_degrade_to_two_meals() {
    let text = plan_text_with(
        &["Breakfast recipe body", "Lunch recipe body"],
        &["Oatmeal Bowl", "Chicken Salad", "Veggie Stir Fry"],
    );
    let backend = ScriptedBackend::with_plan(text);
    let (_dir, store) = store();

    let plan = run_plan(&backend, &store, &request(), BASE_URL)
        .await
        .expect("degraded plan should still succeed");

    assert_eq!(plan.meals.len(), 2);
    assert_eq!(plan.meals[0].slot, MealSlot::Breakfast);
    assert_eq!(plan.meals[1].slot, MealSlot::Lunch);
    assert_eq!(plan.meals[1].title, "Chicken Salad");

    // The dinner slot was never reached.
    assert!(store.read_recipe(MealSlot::Dinner).unwrap().is_none());
}

#[tokio::test]
async fn excess_sections_beyond_titles_are_discarded() {
    let text = plan_text_with(&["s0", "s1", "s2", "s3"], &["t0", "t1"]);
    let backend = ScriptedBackend::with_plan(text);
    let (_dir, store) = store();

    let plan = run_plan(&backend, &store, &request(), BASE_URL)
        .await
        .expect("pipeline should succeed");
    assert_eq!(plan.meals.len(), 2);
}

#[tokio::test]
async fn repeated_runs_overwrite_the_same_files() {
    let backend = ScriptedBackend::with_plan(sample_plan_text());
    let (_dir, store) = store();

    run_plan(&backend, &store, &request(), BASE_URL).await.unwrap();

    let count_files = |sub: &str| std::fs::read_dir(store.root().join(sub)).unwrap().count();
    let first = (count_files("images"), count_files("audio"), count_files("recipes"));
    assert_eq!(first, (3, 3, 3));

    // Second identical run: same backend scripting, fresh call counter.
    let backend = ScriptedBackend::with_plan(sample_plan_text());
    run_plan(&backend, &store, &request(), BASE_URL).await.unwrap();

    let second = (count_files("images"), count_files("audio"), count_files("recipes"));
    assert_eq!(second, first, "reruns must not accumulate files");
}

#[tokio::test]
async fn blank_plan_text_is_a_generation_failure() {
    let backend = ScriptedBackend::with_plan("   \n  \n");
    let (_dir, store) = store();

    let err = run_plan(&backend, &store, &request(), BASE_URL)
        .await
        .unwrap_err();
    assert!(
        matches!(err, PlanError::GenerationFailure { .. }),
        "expected GenerationFailure, got: {err}"
    );
}

#[tokio::test]
async fn separator_only_plan_is_empty_or_malformed() {
    // Non-blank text, but every line is a separator: no sections survive.
    let backend = ScriptedBackend::with_plan("-".repeat(50));
    let (_dir, store) = store();

    let err = run_plan(&backend, &store, &request(), BASE_URL)
        .await
        .unwrap_err();
    assert!(
        matches!(err, PlanError::EmptyOrMalformedPlan),
        "expected EmptyOrMalformedPlan, got: {err}"
    );
}

#[tokio::test]
async fn failing_image_backend_aborts_the_whole_request() {
    let backend = ScriptedBackend::with_plan(sample_plan_text()).failing_images();
    let (_dir, store) = store();

    let err = run_plan(&backend, &store, &request(), BASE_URL)
        .await
        .unwrap_err();
    assert!(
        matches!(
            err,
            PlanError::AssetGeneration {
                slot: MealSlot::Breakfast,
                ..
            }
        ),
        "expected AssetGeneration for breakfast, got: {err}"
    );
}

#[tokio::test]
async fn failing_speech_backend_aborts_the_whole_request() {
    let backend = ScriptedBackend::with_plan(sample_plan_text()).failing_speech();
    let (_dir, store) = store();

    let err = run_plan(&backend, &store, &request(), BASE_URL)
        .await
        .unwrap_err();
    assert!(
        matches!(
            err,
            PlanError::AssetGeneration {
                slot: MealSlot::Breakfast,
                ..
            }
        ),
        "expected AssetGeneration for breakfast, got: {err}"
    );
}
