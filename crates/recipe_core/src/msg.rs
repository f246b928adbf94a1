use crate::{Category, Recipe, RecipeId, RequestId, SearchPage};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Favorites read back from durable storage at start-up.
    FavoritesRestored(Vec<Recipe>),
    /// Fetch the cuisine list; the first cuisine is shown once it arrives.
    LoadCategories,
    CategoriesLoaded {
        request: RequestId,
        result: Result<Vec<Category>, String>,
    },
    /// User picked a cuisine.
    CategorySelected(String),
    /// User edited the search box; fires a search after the debounce delay.
    SearchInputChanged(String),
    DebounceElapsed { generation: u64 },
    /// User submitted the search box.
    SearchSubmitted(String),
    /// User cleared the search box.
    SearchCleared,
    /// The list was scrolled near its end.
    LoadMoreRequested,
    /// User asked to retry after an error banner.
    RetryRequested,
    PageLoaded {
        request: RequestId,
        result: Result<SearchPage, String>,
    },
    RandomLoaded {
        request: RequestId,
        result: Result<Vec<Recipe>, String>,
    },
    /// User opened a recipe.
    DetailRequested(RecipeId),
    DetailLoaded {
        request: RequestId,
        result: Result<Recipe, String>,
    },
    /// User left the recipe screen.
    DetailClosed,
    /// Heart button on the open recipe.
    DetailFavoriteToggled,
    FavoriteAdded(Recipe),
    FavoriteRemoved(RecipeId),
    NoOp,
}
