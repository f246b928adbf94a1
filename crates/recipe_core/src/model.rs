use scraper::Html;
use serde::{Deserialize, Serialize};

pub type RecipeId = u64;

/// Number of recipes requested per page.
pub const PAGE_SIZE: u32 = 12;

/// Lightweight projection used by grid views.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipePreview {
    pub id: RecipeId,
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub image_type: Option<String>,
    #[serde(default)]
    pub ready_in_minutes: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub cuisines: Vec<String>,
    #[serde(default)]
    pub dish_types: Vec<String>,
    #[serde(default)]
    pub diets: Vec<String>,
    #[serde(default)]
    pub health_score: Option<f64>,
    #[serde(default)]
    pub vegetarian: Option<bool>,
    #[serde(default)]
    pub vegan: Option<bool>,
    #[serde(default)]
    pub gluten_free: Option<bool>,
}

/// Full recipe as returned by the detail and random endpoints.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub image_type: Option<String>,
    #[serde(default)]
    pub servings: u32,
    #[serde(default)]
    pub ready_in_minutes: u32,
    #[serde(default)]
    pub cooking_minutes: Option<u32>,
    #[serde(default)]
    pub preparation_minutes: Option<u32>,
    #[serde(default)]
    pub source_name: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub spoonacular_source_url: Option<String>,
    #[serde(default)]
    pub credits_text: Option<String>,
    #[serde(default)]
    pub health_score: f64,
    #[serde(default)]
    pub price_per_serving: f64,
    #[serde(default)]
    pub cheap: bool,
    #[serde(default)]
    pub dairy_free: bool,
    #[serde(default)]
    pub gluten_free: bool,
    #[serde(default)]
    pub vegan: bool,
    #[serde(default)]
    pub vegetarian: bool,
    #[serde(default)]
    pub very_healthy: bool,
    #[serde(default)]
    pub very_popular: bool,
    #[serde(default)]
    pub sustainable: bool,
    #[serde(default)]
    pub ketogenic: Option<bool>,
    #[serde(default)]
    pub low_fodmap: Option<bool>,
    #[serde(default)]
    pub whole30: Option<bool>,
    #[serde(default)]
    pub gaps: Option<String>,
    #[serde(default)]
    pub weight_watcher_smart_points: u32,
    #[serde(default)]
    pub dish_types: Vec<String>,
    #[serde(default)]
    pub cuisines: Vec<String>,
    #[serde(default)]
    pub diets: Vec<String>,
    #[serde(default)]
    pub occasions: Vec<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub extended_ingredients: Vec<ExtendedIngredient>,
    #[serde(default)]
    pub analyzed_instructions: Vec<AnalyzedInstruction>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedIngredient {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub name_clean: Option<String>,
    #[serde(default)]
    pub aisle: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub consistency: Option<String>,
    #[serde(default)]
    pub original: String,
    #[serde(default)]
    pub original_name: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub meta: Vec<String>,
    #[serde(default)]
    pub measures: Option<Measures>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Measures {
    pub us: Measure,
    pub metric: Measure,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measure {
    pub amount: f64,
    pub unit_short: String,
    pub unit_long: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalyzedInstruction {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub steps: Vec<InstructionStep>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InstructionStep {
    pub number: u32,
    pub step: String,
    #[serde(default)]
    pub ingredients: Vec<StepItem>,
    #[serde(default)]
    pub equipment: Vec<StepItem>,
    #[serde(default)]
    pub length: Option<StepLength>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StepItem {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StepLength {
    pub number: u32,
    pub unit: String,
}

/// Ingredient flattened for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Ingredient {
    pub name: String,
    pub amount: f64,
    pub unit: String,
    pub original: String,
}

impl Recipe {
    /// Projects a full recipe onto the grid preview shape.
    pub fn preview(&self) -> RecipePreview {
        RecipePreview {
            id: self.id,
            title: self.title.clone(),
            image: self.image.clone(),
            image_type: self.image_type.clone(),
            ready_in_minutes: Some(self.ready_in_minutes),
            servings: Some(self.servings),
            cuisines: self.cuisines.clone(),
            dish_types: self.dish_types.clone(),
            diets: self.diets.clone(),
            health_score: Some(self.health_score),
            vegetarian: Some(self.vegetarian),
            vegan: Some(self.vegan),
            gluten_free: Some(self.gluten_free),
        }
    }

    /// Summary as one line of plain text.
    pub fn summary_text(&self) -> String {
        html_text(&self.summary)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Badge labels: cuisines first, then the diet flags.
    pub fn tags(&self) -> Vec<String> {
        let mut tags = self.cuisines.clone();
        for (flag, label) in [
            (self.vegetarian, "Vegetarian"),
            (self.vegan, "Vegan"),
            (self.gluten_free, "Gluten-Free"),
        ] {
            if flag {
                tags.push(label.to_string());
            }
        }
        tags
    }

    pub fn ingredients(&self) -> Vec<Ingredient> {
        self.extended_ingredients
            .iter()
            .map(|ing| Ingredient {
                name: ing
                    .name_clean
                    .clone()
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| ing.name.clone()),
                amount: ing.amount,
                unit: ing.unit.clone(),
                original: ing.original.clone(),
            })
            .collect()
    }

    /// Step texts, preferring the structured instructions over the raw markup.
    pub fn instruction_steps(&self) -> Vec<String> {
        if let Some(block) = self.analyzed_instructions.first() {
            return block.steps.iter().map(|step| step.step.clone()).collect();
        }

        let Some(raw) = self.instructions.as_deref() else {
            return Vec::new();
        };

        let text = html_text(raw);
        split_sentences(&text)
            .into_iter()
            .map(str::trim)
            .filter(|step| !step.is_empty())
            .map(|step| {
                if step.ends_with('.') {
                    step.to_string()
                } else {
                    format!("{step}.")
                }
            })
            .collect()
    }
}

/// Text content of a provider HTML fragment, with entities decoded.
fn html_text(raw: &str) -> String {
    Html::parse_fragment(raw).root_element().text().collect()
}

/// Splits on a period followed by whitespace, dropping the period.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((idx, ch)) = chars.next() {
        if ch != '.' {
            continue;
        }
        let Some(&(next_idx, next)) = chars.peek() else {
            break;
        };
        if !next.is_whitespace() {
            continue;
        }
        pieces.push(&text[start..idx]);
        let mut resume = next_idx;
        while let Some(&(ws_idx, ws)) = chars.peek() {
            if !ws.is_whitespace() {
                resume = ws_idx;
                break;
            }
            chars.next();
            resume = ws_idx + ws.len_utf8();
        }
        start = resume;
    }
    pieces.push(&text[start..]);
    pieces
}

/// Cuisine category shown in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub image: String,
}

/// Either shape of a recipe, tagged at construction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecipeCard {
    Preview(RecipePreview),
    Full(Box<Recipe>),
}

impl RecipeCard {
    pub fn id(&self) -> RecipeId {
        match self {
            RecipeCard::Preview(preview) => preview.id,
            RecipeCard::Full(recipe) => recipe.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            RecipeCard::Preview(preview) => &preview.title,
            RecipeCard::Full(recipe) => &recipe.title,
        }
    }

    pub fn image(&self) -> &str {
        match self {
            RecipeCard::Preview(preview) => &preview.image,
            RecipeCard::Full(recipe) => &recipe.image,
        }
    }

    pub fn is_full(&self) -> bool {
        matches!(self, RecipeCard::Full(_))
    }

    pub fn to_preview(&self) -> RecipePreview {
        match self {
            RecipeCard::Preview(preview) => preview.clone(),
            RecipeCard::Full(recipe) => recipe.preview(),
        }
    }
}

impl From<RecipePreview> for RecipeCard {
    fn from(preview: RecipePreview) -> Self {
        RecipeCard::Preview(preview)
    }
}

impl From<Recipe> for RecipeCard {
    fn from(recipe: Recipe) -> Self {
        RecipeCard::Full(Box::new(recipe))
    }
}

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchPage {
    pub recipes: Vec<RecipePreview>,
    pub total_results: u32,
    pub has_more: bool,
}

impl SearchPage {
    /// Builds a page fetched at `offset`, deriving `has_more` from the totals.
    pub fn at_offset(recipes: Vec<RecipePreview>, offset: u32, total_results: u32) -> Self {
        let seen = u64::from(offset) + recipes.len() as u64;
        Self {
            has_more: seen < u64::from(total_results),
            recipes,
            total_results,
        }
    }
}
