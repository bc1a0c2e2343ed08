//! Prompt construction for the three generative calls.
//!
//! The day-plan prompt carries the two formatting contracts the
//! parsing pipeline depends on: recipes separated by a run of 50
//! dashes, and a final line containing only the comma-separated
//! titles. Pure string assembly, no I/O.

use crate::models::PlanRequest;

/// System role for the day-plan and spoken-rewrite calls.
pub const SYSTEM_ROLE: &str = "You are a skilled cook with the expertise of a chef.";

/// Fixed framing appended to every image prompt so the three meal
/// images come out visually consistent.
const IMAGE_FRAMING: &str = "hd quality, top-down view of the entire dish, fully visible, \
     centered in the image, on a plain white background, no cropping";

/// Build the day-plan prompt from one planning request.
pub fn build_plan_prompt(request: &PlanRequest) -> String {
    let mut prompt = String::with_capacity(2048);

    prompt.push_str(&format!(
        "Create a healthy daily meal plan for breakfast, lunch, and dinner \
         based on the following ingredients: {}.\n",
        request.ingredients.trim()
    ));
    prompt.push_str("Follow the instructions below carefully.\n\n");
    prompt.push_str("### Instructions:\n");

    if request.exact_ingredients {
        prompt.push_str(
            "1. Use ONLY the provided ingredients, plus salt, pepper, and spices.\n",
        );
    } else {
        prompt.push_str(
            "1. Use the provided ingredients as a base and add other ingredients \
             if they improve the flavor, nutritional value, or overall appeal of \
             the recipes.\n",
        );
    }
    prompt.push_str("2. Specify the exact amount of each ingredient.\n");
    prompt.push_str(&format!(
        "3. Ensure that the total daily calorie intake is below {}.\n",
        request.kcal
    ));
    prompt.push_str(
        "4. For each meal, explain the recipe step by step in clear and simple \
         sentences. Use bullet points or numbers to organize the steps.\n",
    );
    prompt.push_str(
        "5. For each meal, specify the total number of calories and the number \
         of servings.\n",
    );
    prompt.push_str(
        "6. For each meal, provide a concise and descriptive title that \
         summarizes the main ingredients and flavors. The title must also work \
         as a prompt for generating an image of the meal.\n",
    );
    prompt.push_str("7. For each recipe, indicate the prep, cook, and total time.\n");
    if let Some(extra) = request.extra.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
        prompt.push_str(&format!("8. If possible the meals should be: {extra}.\n"));
    }
    prompt.push_str("9. Separate the recipes with 50 dashes (-).\n");
    prompt.push_str(
        "10. Do NOT use any backticks (`) or code fences anywhere in your \
         answer.\n\n",
    );

    prompt.push_str(
        "Before answering, make sure you have followed every instruction above. \
         The last line of your answer must be a single line containing ONLY the \
         recipe titles, separated by commas, and nothing else.\n",
    );
    prompt.push_str(
        "Example of the last line: 'Broccoli and Egg Scramble, Grilled Chicken \
         and Vegetable, Baked Fish with Cabbage Slaw'\n",
    );

    prompt
}

/// Build the image prompt for one meal title.
pub fn build_image_prompt(title: &str) -> String {
    format!("{}, {IMAGE_FRAMING}", title.trim())
}

/// Build the rewrite prompt that turns a recipe into something that
/// reads well when spoken aloud.
pub fn build_spoken_prompt(recipe: &str) -> String {
    format!(
        "I will provide a recipe that will be spoken aloud.\n\
         If necessary, adjust the recipe to make it more readable.\n\
         You may add a short introduction and summary, but do not change the \
         ingredients, instructions, or other key elements of the recipe.\n\n\
         Recipe:\n{recipe}"
    )
}
