use std::time::Duration;

use recipe_logging::{recipe_debug, recipe_warn};

use crate::state::ResponseSlot;
use crate::{
    DetailSource, DetailState, Effect, FeedQuery, FeedState, FeedStatus, Msg, PageSource,
    Recipe, RecipeId, MIN_SEARCH_LEN, PAGE_SIZE,
};

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

pub const CATEGORY_ERROR: &str = "Failed to load recipes. Please try again.";
pub const SEARCH_ERROR: &str = "Search failed. Please try again.";
pub const MORE_ERROR: &str = "Failed to load more recipes.";
pub const RANDOM_ERROR: &str = "Failed to load recipes.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: FeedState, msg: Msg) -> (FeedState, Vec<Effect>) {
    let effects = match msg {
        Msg::FavoritesRestored(favorites) => {
            state.restore_favorites(favorites);
            Vec::new()
        }
        Msg::LoadCategories => {
            let request = state.begin_categories();
            vec![Effect::FetchCategories { request }]
        }
        Msg::CategoriesLoaded { request, result } => {
            if state.classify(request) != ResponseSlot::Categories {
                recipe_debug!("Dropping stale category list response {}", request);
                return (state, Vec::new());
            }
            match result {
                Ok(categories) => {
                    let first = categories.first().map(|c| c.id.clone());
                    state.apply_categories(categories);
                    match first {
                        // An active search keeps the screen.
                        Some(slug) if state.search_query().is_empty() => {
                            select_category(&mut state, slug)
                        }
                        _ => Vec::new(),
                    }
                }
                Err(message) => {
                    recipe_warn!("Category list failed, using random recipes: {}", message);
                    state.fail_categories();
                    if state.search_query().is_empty() {
                        load_random(&mut state)
                    } else {
                        Vec::new()
                    }
                }
            }
        }
        Msg::CategorySelected(slug) => select_category(&mut state, slug),
        Msg::SearchInputChanged(text) => {
            let wants_search = qualifies(&state, &text);
            let generation = state.set_search_input(text);
            if wants_search {
                vec![Effect::ScheduleDebounce {
                    generation,
                    delay: SEARCH_DEBOUNCE,
                }]
            } else {
                Vec::new()
            }
        }
        Msg::DebounceElapsed { generation } => {
            if generation != state.input_generation() {
                return (state, Vec::new());
            }
            let text = state.search_input().to_string();
            search(&mut state, &text)
        }
        Msg::SearchSubmitted(text) => {
            state.set_search_input(text.clone());
            search(&mut state, &text)
        }
        Msg::SearchCleared => clear_search(&mut state),
        Msg::LoadMoreRequested => load_more(&mut state),
        Msg::RetryRequested => retry(&mut state),
        Msg::PageLoaded { request, result } => match state.classify(request) {
            ResponseSlot::Feed => {
                match result {
                    Ok(page) => state.apply_first_page(page),
                    Err(message) => {
                        recipe_warn!("Feed request {} failed: {}", request, message);
                        let text = match state.query() {
                            FeedQuery::Search(_) => SEARCH_ERROR,
                            _ => CATEGORY_ERROR,
                        };
                        state.fail_feed(text);
                    }
                }
                Vec::new()
            }
            ResponseSlot::More => {
                match result {
                    Ok(page) => state.apply_more_page(page),
                    Err(message) => {
                        recipe_warn!("Load-more request {} failed: {}", request, message);
                        state.fail_more(MORE_ERROR);
                    }
                }
                Vec::new()
            }
            _ => {
                recipe_debug!("Dropping stale page response {}", request);
                Vec::new()
            }
        },
        Msg::RandomLoaded { request, result } => {
            if state.classify(request) != ResponseSlot::Feed {
                recipe_debug!("Dropping stale random response {}", request);
                return (state, Vec::new());
            }
            match result {
                Ok(recipes) => state.apply_random(&recipes),
                Err(message) => {
                    recipe_warn!("Random recipes failed: {}", message);
                    state.fail_feed(RANDOM_ERROR);
                }
            }
            Vec::new()
        }
        Msg::DetailRequested(id) => load_detail(&mut state, id),
        Msg::DetailLoaded { request, result } => {
            if state.classify(request) != ResponseSlot::Detail {
                recipe_debug!("Dropping stale detail response {}", request);
                return (state, Vec::new());
            }
            let loading = match state.detail() {
                DetailState::Loading(id) => Some(*id),
                _ => None,
            };
            let Some(id) = loading else {
                return (state, Vec::new());
            };
            match result {
                Ok(recipe) => state.show_detail(recipe, DetailSource::Network),
                Err(message) => {
                    recipe_debug!("Detail {} failed: {}", id, message);
                    // Offline fallback.
                    match state.favorite(id).cloned() {
                        Some(recipe) => state.show_detail(recipe, DetailSource::Favorites),
                        None => state.detail_not_found(id),
                    }
                }
            }
            Vec::new()
        }
        Msg::DetailClosed => {
            state.close_detail();
            Vec::new()
        }
        Msg::DetailFavoriteToggled => {
            let shown = match state.detail() {
                DetailState::Loaded { recipe, .. } => Some(recipe.clone()),
                _ => None,
            };
            let Some(recipe) = shown else {
                return (state, Vec::new());
            };
            if state.is_favorite(recipe.id) {
                remove_favorite(&mut state, recipe.id)
            } else {
                add_favorite(&mut state, recipe)
            }
        }
        Msg::FavoriteAdded(recipe) => add_favorite(&mut state, recipe),
        Msg::FavoriteRemoved(id) => remove_favorite(&mut state, id),
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn select_category(state: &mut FeedState, slug: String) -> Vec<Effect> {
    let slug = slug.trim().to_string();
    if slug.is_empty() {
        return Vec::new();
    }
    // Also invalidates a pending debounce.
    state.set_search_input(String::new());
    let request = state.begin_feed(FeedQuery::Category(slug.clone()));
    vec![Effect::FetchPage {
        request,
        source: PageSource::Category(slug),
        offset: 0,
    }]
}

/// Whether `text` would start a new search right now.
fn qualifies(state: &FeedState, text: &str) -> bool {
    let text = text.trim();
    text.chars().count() >= MIN_SEARCH_LEN && text != state.search_query()
}

fn search(state: &mut FeedState, text: &str) -> Vec<Effect> {
    if !qualifies(state, text) {
        return Vec::new();
    }
    let query = text.trim().to_string();
    let request = state.begin_feed(FeedQuery::Search(query.clone()));
    vec![Effect::FetchPage {
        request,
        source: PageSource::Search(query),
        offset: 0,
    }]
}

fn clear_search(state: &mut FeedState) -> Vec<Effect> {
    state.set_search_input(String::new());
    let fallback = state
        .last_category()
        .map(ToOwned::to_owned)
        .or_else(|| state.categories().first().map(|c| c.id.clone()));
    match fallback {
        Some(slug) => select_category(state, slug),
        None => {
            if !state.search_query().is_empty() {
                state.deactivate_query();
            }
            Vec::new()
        }
    }
}

fn load_random(state: &mut FeedState) -> Vec<Effect> {
    let request = state.begin_feed(FeedQuery::Random);
    vec![Effect::FetchRandom {
        request,
        count: PAGE_SIZE,
    }]
}

fn load_more(state: &mut FeedState) -> Vec<Effect> {
    if state.is_loading() || state.is_loading_more() || !state.has_more() {
        return Vec::new();
    }
    let source = match state.query() {
        FeedQuery::Search(text) => PageSource::Search(text.clone()),
        FeedQuery::Category(slug) => PageSource::Category(slug.clone()),
        FeedQuery::Random | FeedQuery::None => return Vec::new(),
    };
    let offset = state.next_offset();
    let request = state.begin_more();
    vec![Effect::FetchPage {
        request,
        source,
        offset,
    }]
}

fn retry(state: &mut FeedState) -> Vec<Effect> {
    if state.status() == FeedStatus::Error {
        return match state.query().clone() {
            FeedQuery::Category(slug) => select_category(state, slug),
            FeedQuery::Search(text) => {
                let request = state.begin_feed(FeedQuery::Search(text.clone()));
                vec![Effect::FetchPage {
                    request,
                    source: PageSource::Search(text),
                    offset: 0,
                }]
            }
            FeedQuery::Random => load_random(state),
            FeedQuery::None => Vec::new(),
        };
    }
    if state.error().is_some() {
        return load_more(state);
    }
    if state.categories().is_empty() && *state.query() == FeedQuery::None {
        let request = state.begin_categories();
        return vec![Effect::FetchCategories { request }];
    }
    Vec::new()
}

fn load_detail(state: &mut FeedState, id: RecipeId) -> Vec<Effect> {
    if let Some(recipe) = state.favorite(id).cloned() {
        state.show_detail(recipe, DetailSource::Favorites);
        return Vec::new();
    }
    let request = state.begin_detail(id);
    vec![Effect::FetchDetail { request, id }]
}

fn add_favorite(state: &mut FeedState, recipe: Recipe) -> Vec<Effect> {
    if !state.insert_favorite(recipe) {
        return Vec::new();
    }
    vec![Effect::PersistFavorites(state.favorites().to_vec())]
}

fn remove_favorite(state: &mut FeedState, id: RecipeId) -> Vec<Effect> {
    if !state.remove_favorite(id) {
        return Vec::new();
    }
    vec![Effect::PersistFavorites(state.favorites().to_vec())]
}
