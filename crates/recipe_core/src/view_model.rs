use crate::{
    Category, DetailSource, DetailState, FeedQuery, FeedState, FeedStatus, Ingredient, Recipe,
    RecipeCard, MIN_SEARCH_LEN,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeedViewModel {
    pub status: FeedStatus,
    pub title: String,
    pub empty_message: String,
    pub recipes: Vec<RecipeCard>,
    pub is_loading_more: bool,
    pub has_more: bool,
    pub total_results: u32,
    pub error: Option<String>,
    pub categories: Vec<CategoryView>,
    pub search_input: String,
    /// Validation hint shown under the search box.
    pub search_hint: Option<String>,
    pub favorites: Vec<RecipeCard>,
    pub detail: DetailView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryView {
    pub id: String,
    pub name: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DetailView {
    #[default]
    Hidden,
    Loading,
    Ready(Box<RecipeDetailView>),
    NotFound,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDetailView {
    pub recipe: Recipe,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<String>,
    pub is_favorite: bool,
    /// Served from the local favorites copy rather than the network.
    pub offline: bool,
}

pub(crate) fn build(state: &FeedState) -> FeedViewModel {
    let selected = state.selected_category();
    let title = match state.query() {
        FeedQuery::Search(text) => format!("Results for \"{text}\""),
        FeedQuery::Category(slug) => category_name(state.categories(), slug),
        FeedQuery::Random | FeedQuery::None => "Discover Recipes".to_string(),
    };
    let empty_message = if state.search_query().is_empty() {
        "No recipes found in this category"
    } else {
        "No recipes found matching your search"
    };

    let input_len = state.search_input().trim().chars().count();
    let search_hint = (input_len > 0 && input_len < MIN_SEARCH_LEN)
        .then(|| format!("Enter at least {MIN_SEARCH_LEN} characters"));

    FeedViewModel {
        status: state.status(),
        title,
        empty_message: empty_message.to_string(),
        recipes: state
            .recipes()
            .iter()
            .cloned()
            .map(RecipeCard::Preview)
            .collect(),
        is_loading_more: state.is_loading_more(),
        has_more: state.has_more(),
        total_results: state.total_results(),
        error: state.error().map(ToOwned::to_owned),
        categories: state
            .categories()
            .iter()
            .map(|c| CategoryView {
                id: c.id.clone(),
                name: c.name.clone(),
                selected: selected == Some(c.id.as_str()),
            })
            .collect(),
        search_input: state.search_input().to_string(),
        search_hint,
        favorites: state
            .favorites()
            .iter()
            .cloned()
            .map(RecipeCard::from)
            .collect(),
        detail: detail_view(state),
    }
}

fn category_name(categories: &[Category], slug: &str) -> String {
    categories
        .iter()
        .find(|c| c.id == slug)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| slug.to_string())
}

fn detail_view(state: &FeedState) -> DetailView {
    match state.detail() {
        DetailState::Idle => DetailView::Hidden,
        DetailState::Loading(_) => DetailView::Loading,
        DetailState::NotFound(_) => DetailView::NotFound,
        DetailState::Loaded { recipe, source } => DetailView::Ready(Box::new(RecipeDetailView {
            ingredients: recipe.ingredients(),
            steps: recipe.instruction_steps(),
            is_favorite: state.is_favorite(recipe.id),
            offline: *source == DetailSource::Favorites,
            recipe: recipe.clone(),
        })),
    }
}
