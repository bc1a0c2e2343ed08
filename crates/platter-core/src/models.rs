//! Domain types shared across the pipeline and the HTTP layer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Meal slots
// ---------------------------------------------------------------------------

/// The three canonical meal slots of a daily plan.
///
/// A slot is assigned strictly by position in the reconciled plan
/// (breakfast = 0, lunch = 1, dinner = 2), never by inspecting the
/// generated content. Asset filenames are keyed by the slot name, not
/// by the meal title, so repeated runs overwrite the same three files
/// instead of accumulating new ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealSlot {
    /// All slots in position order.
    pub const ALL: [MealSlot; 3] = [Self::Breakfast, Self::Lunch, Self::Dinner];

    /// Slot for a zero-based position in the reconciled plan, or
    /// `None` when the index is past the third meal.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Zero-based position of this slot.
    pub fn index(self) -> usize {
        match self {
            Self::Breakfast => 0,
            Self::Lunch => 1,
            Self::Dinner => 2,
        }
    }

    /// Canonical lowercase identifier used in filenames and URLs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
        }
    }

    /// Capitalized name for page headings.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::Lunch => "Lunch",
            Self::Dinner => "Dinner",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealSlot {
    type Err = MealSlotParseError;

    /// Case-insensitive parse of the canonical slot names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "breakfast" => Ok(Self::Breakfast),
            "lunch" => Ok(Self::Lunch),
            "dinner" => Ok(Self::Dinner),
            other => Err(MealSlotParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`MealSlot`] name.
#[derive(Debug, Clone)]
pub struct MealSlotParseError(pub String);

impl fmt::Display for MealSlotParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown meal name {:?} (expected breakfast, lunch, or dinner)",
            self.0
        )
    }
}

impl std::error::Error for MealSlotParseError {}

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

fn default_kcal() -> u32 {
    2000
}

/// One planning run's immutable input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Comma-separated free text listing the base ingredients.
    pub ingredients: String,
    /// Maximum total calories for the day.
    #[serde(default = "default_kcal")]
    pub kcal: u32,
    /// Use only the provided ingredients (plus salt, pepper, spices).
    #[serde(default)]
    pub exact_ingredients: bool,
    /// Extra preference, e.g. "spicy" or "high protein".
    #[serde(default)]
    pub extra: Option<String>,
}

/// One fully built meal: text plus the URLs of its generated assets.
///
/// Constructed only after all three artifacts (recipe text, image,
/// audio) have been persisted; a record with a missing asset URL is an
/// invalid response shape.
#[derive(Debug, Clone, Serialize)]
pub struct MealRecord {
    /// Canonical slot this meal occupies. Not part of the wire shape;
    /// the position in the `meals` array carries the same information.
    #[serde(skip)]
    pub slot: MealSlot,
    pub title: String,
    pub text: String,
    pub image_url: String,
    pub audio_url: String,
    pub html_url: String,
}

/// The structured result of one planning run.
#[derive(Debug, Clone, Serialize)]
pub struct MealPlan {
    /// The backend's full unstructured answer, echoed for reference.
    pub raw_plan: String,
    /// Up to three meals in slot order.
    pub meals: Vec<MealRecord>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
