#![allow(dead_code)]

use std::sync::Once;

use recipe_core::{
    update, Effect, FeedState, Msg, Recipe, RecipeId, RecipePreview, RequestId, SearchPage,
};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(recipe_logging::initialize_for_tests);
}

pub fn preview(id: RecipeId) -> RecipePreview {
    RecipePreview {
        id,
        title: format!("Recipe {id}"),
        image: format!("https://img.example.com/{id}.jpg"),
        ..RecipePreview::default()
    }
}

pub fn recipe(id: RecipeId) -> Recipe {
    Recipe {
        id,
        title: format!("Recipe {id}"),
        servings: 2,
        ready_in_minutes: 30,
        ..Recipe::default()
    }
}

/// A page holding `ids`, as fetched at `offset` out of `total` results.
pub fn page(ids: impl IntoIterator<Item = RecipeId>, offset: u32, total: u32) -> SearchPage {
    SearchPage::at_offset(ids.into_iter().map(preview).collect(), offset, total)
}

pub fn only_request(effects: &[Effect]) -> RequestId {
    match effects {
        [Effect::FetchPage { request, .. }]
        | [Effect::FetchRandom { request, .. }]
        | [Effect::FetchDetail { request, .. }]
        | [Effect::FetchCategories { request }] => *request,
        other => panic!("expected a single fetch effect, got {other:?}"),
    }
}

pub fn ids(state: &FeedState) -> Vec<RecipeId> {
    state.recipes().iter().map(|r| r.id).collect()
}

/// Selects `slug` and answers the first page with `ids` out of `total`.
pub fn loaded_category(
    slug: &str,
    first: impl IntoIterator<Item = RecipeId>,
    total: u32,
) -> FeedState {
    let (state, effects) = update(FeedState::new(), Msg::CategorySelected(slug.to_string()));
    let request = only_request(&effects);
    let (state, _) = update(
        state,
        Msg::PageLoaded {
            request,
            result: Ok(page(first, 0, total)),
        },
    );
    state
}
