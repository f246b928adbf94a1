//! Recipe core: domain model and the pure feed state machine.
mod categories;
mod effect;
mod model;
mod msg;
mod state;
mod update;
mod view_model;

pub use categories::cuisine_categories;
pub use effect::{Effect, PageSource};
pub use model::{
    AnalyzedInstruction, Category, ExtendedIngredient, Ingredient, InstructionStep, Measure,
    Measures, Recipe, RecipeCard, RecipeId, RecipePreview, SearchPage, StepItem, StepLength,
    PAGE_SIZE,
};
pub use msg::Msg;
pub use state::{
    DetailSource, DetailState, FeedQuery, FeedState, FeedStatus, RequestId, MIN_SEARCH_LEN,
};
pub use update::{
    update, CATEGORY_ERROR, MORE_ERROR, RANDOM_ERROR, SEARCH_DEBOUNCE, SEARCH_ERROR,
};
pub use view_model::{CategoryView, DetailView, FeedViewModel, RecipeDetailView};
