use std::collections::HashSet;

use crate::view_model::{self, FeedViewModel};
use crate::{Category, Recipe, RecipeId, RecipePreview, SearchPage, PAGE_SIZE};

/// Token attached to every outgoing request; responses carrying an older
/// token than the one recorded for their slot are discarded.
pub type RequestId = u64;

/// Shortest search text that reaches the network.
pub const MIN_SEARCH_LEN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error,
}

/// What the feed is currently listing. Category and search are exclusive by
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FeedQuery {
    #[default]
    None,
    Category(String),
    Search(String),
    /// Degraded, unpaginated listing used when categories are unavailable.
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailSource {
    Favorites,
    Network,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DetailState {
    #[default]
    Idle,
    Loading(RecipeId),
    Loaded {
        recipe: Recipe,
        source: DetailSource,
    },
    NotFound(RecipeId),
}

/// Which in-flight request a response belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ResponseSlot {
    Feed,
    More,
    Detail,
    Categories,
    Stale,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedState {
    recipes: Vec<RecipePreview>,
    status: FeedStatus,
    error: Option<String>,
    page: u32,
    has_more: bool,
    total_results: u32,
    is_loading_more: bool,
    query: FeedQuery,
    last_category: Option<String>,
    categories: Vec<Category>,
    favorites: Vec<Recipe>,
    detail: DetailState,
    search_input: String,
    input_generation: u64,
    next_request: RequestId,
    feed_request: Option<RequestId>,
    more_request: Option<RequestId>,
    detail_request: Option<RequestId>,
    categories_request: Option<RequestId>,
    dirty: bool,
}

impl Default for FeedState {
    fn default() -> Self {
        Self {
            recipes: Vec::new(),
            status: FeedStatus::Idle,
            error: None,
            page: 0,
            has_more: true,
            total_results: 0,
            is_loading_more: false,
            query: FeedQuery::None,
            last_category: None,
            categories: Vec::new(),
            favorites: Vec::new(),
            detail: DetailState::Idle,
            search_input: String::new(),
            input_generation: 0,
            next_request: 0,
            feed_request: None,
            more_request: None,
            detail_request: None,
            categories_request: None,
            dirty: false,
        }
    }
}

impl FeedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> FeedViewModel {
        view_model::build(self)
    }

    pub fn recipes(&self) -> &[RecipePreview] {
        &self.recipes
    }

    pub fn status(&self) -> FeedStatus {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Zero-based count of pages already consumed for the active feed.
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn total_results(&self) -> u32 {
        self.total_results
    }

    pub fn is_loading(&self) -> bool {
        self.status == FeedStatus::Loading
    }

    pub fn is_loading_more(&self) -> bool {
        self.is_loading_more
    }

    pub fn query(&self) -> &FeedQuery {
        &self.query
    }

    pub fn selected_category(&self) -> Option<&str> {
        match &self.query {
            FeedQuery::Category(slug) => Some(slug),
            _ => None,
        }
    }

    /// Active search text, empty when no search is active.
    pub fn search_query(&self) -> &str {
        match &self.query {
            FeedQuery::Search(text) => text,
            _ => "",
        }
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn favorites(&self) -> &[Recipe] {
        &self.favorites
    }

    pub fn favorite(&self, id: RecipeId) -> Option<&Recipe> {
        self.favorites.iter().find(|recipe| recipe.id == id)
    }

    pub fn is_favorite(&self, id: RecipeId) -> bool {
        self.favorite(id).is_some()
    }

    pub fn detail(&self) -> &DetailState {
        &self.detail
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn last_category(&self) -> Option<&str> {
        self.last_category.as_deref()
    }

    fn issue_request(&mut self) -> RequestId {
        self.next_request += 1;
        self.next_request
    }

    pub(crate) fn classify(&self, request: RequestId) -> ResponseSlot {
        if self.feed_request == Some(request) {
            ResponseSlot::Feed
        } else if self.more_request == Some(request) {
            ResponseSlot::More
        } else if self.detail_request == Some(request) {
            ResponseSlot::Detail
        } else if self.categories_request == Some(request) {
            ResponseSlot::Categories
        } else {
            ResponseSlot::Stale
        }
    }

    /// Starts a feed-replacing request. Any outstanding page append is
    /// abandoned since it belongs to the previous feed.
    pub(crate) fn begin_feed(&mut self, query: FeedQuery) -> RequestId {
        if let FeedQuery::Category(slug) = &query {
            self.last_category = Some(slug.clone());
        }
        self.query = query;
        self.status = FeedStatus::Loading;
        self.error = None;
        self.page = 0;
        self.has_more = true;
        self.total_results = 0;
        self.is_loading_more = false;
        self.more_request = None;
        let request = self.issue_request();
        self.feed_request = Some(request);
        self.mark_dirty();
        request
    }

    pub(crate) fn apply_first_page(&mut self, page: SearchPage) {
        self.feed_request = None;
        self.recipes.clear();
        self.append_unique(page.recipes);
        self.total_results = page.total_results;
        self.has_more = page.has_more;
        self.page = 1;
        self.status = FeedStatus::Loaded;
        self.mark_dirty();
    }

    pub(crate) fn fail_feed(&mut self, message: &str) {
        self.feed_request = None;
        self.recipes.clear();
        self.has_more = false;
        self.status = FeedStatus::Error;
        self.error = Some(message.to_string());
        self.mark_dirty();
    }

    /// Random fallback results: no pagination context survives.
    pub(crate) fn apply_random(&mut self, recipes: &[Recipe]) {
        self.feed_request = None;
        self.recipes.clear();
        self.append_unique(recipes.iter().map(Recipe::preview).collect());
        self.total_results = self.recipes.len() as u32;
        self.has_more = false;
        self.page = 0;
        self.status = FeedStatus::Loaded;
        self.mark_dirty();
    }

    pub(crate) fn begin_more(&mut self) -> RequestId {
        let request = self.issue_request();
        self.more_request = Some(request);
        self.is_loading_more = true;
        self.mark_dirty();
        request
    }

    pub(crate) fn next_offset(&self) -> u32 {
        self.page * PAGE_SIZE
    }

    pub(crate) fn apply_more_page(&mut self, page: SearchPage) {
        self.more_request = None;
        self.is_loading_more = false;
        self.append_unique(page.recipes);
        self.page += 1;
        self.has_more = page.has_more;
        self.total_results = page.total_results;
        self.error = None;
        self.mark_dirty();
    }

    pub(crate) fn fail_more(&mut self, message: &str) {
        self.more_request = None;
        self.is_loading_more = false;
        self.error = Some(message.to_string());
        self.mark_dirty();
    }

    /// Appends items whose id is not already listed, keeping arrival order.
    fn append_unique(&mut self, incoming: Vec<RecipePreview>) {
        let mut seen: HashSet<RecipeId> = self.recipes.iter().map(|r| r.id).collect();
        self.recipes
            .extend(incoming.into_iter().filter(|recipe| seen.insert(recipe.id)));
    }

    /// Leaves search mode without starting a new request.
    pub(crate) fn deactivate_query(&mut self) {
        self.query = FeedQuery::None;
        self.feed_request = None;
        self.more_request = None;
        self.is_loading_more = false;
        self.page = 0;
        self.has_more = true;
        self.total_results = 0;
        if self.status == FeedStatus::Loading {
            self.status = FeedStatus::Idle;
        }
        self.mark_dirty();
    }

    pub(crate) fn begin_categories(&mut self) -> RequestId {
        let request = self.issue_request();
        self.categories_request = Some(request);
        request
    }

    pub(crate) fn apply_categories(&mut self, categories: Vec<Category>) {
        self.categories_request = None;
        self.categories = categories;
        self.mark_dirty();
    }

    pub(crate) fn fail_categories(&mut self) {
        self.categories_request = None;
    }

    pub(crate) fn set_search_input(&mut self, text: String) -> u64 {
        self.search_input = text;
        self.input_generation += 1;
        self.mark_dirty();
        self.input_generation
    }

    pub(crate) fn input_generation(&self) -> u64 {
        self.input_generation
    }

    pub(crate) fn restore_favorites(&mut self, favorites: Vec<Recipe>) {
        let mut seen = HashSet::new();
        self.favorites = favorites
            .into_iter()
            .filter(|recipe| seen.insert(recipe.id))
            .collect();
        self.mark_dirty();
    }

    /// Returns false when the id is already present.
    pub(crate) fn insert_favorite(&mut self, recipe: Recipe) -> bool {
        if self.is_favorite(recipe.id) {
            return false;
        }
        self.favorites.push(recipe);
        self.mark_dirty();
        true
    }

    /// Returns false when nothing was removed.
    pub(crate) fn remove_favorite(&mut self, id: RecipeId) -> bool {
        let before = self.favorites.len();
        self.favorites.retain(|recipe| recipe.id != id);
        let removed = self.favorites.len() != before;
        if removed {
            self.mark_dirty();
        }
        removed
    }

    pub(crate) fn show_detail(&mut self, recipe: Recipe, source: DetailSource) {
        self.detail_request = None;
        self.detail = DetailState::Loaded { recipe, source };
        self.mark_dirty();
    }

    pub(crate) fn begin_detail(&mut self, id: RecipeId) -> RequestId {
        let request = self.issue_request();
        self.detail_request = Some(request);
        self.detail = DetailState::Loading(id);
        self.mark_dirty();
        request
    }

    /// Abandons any detail request in flight.
    pub(crate) fn close_detail(&mut self) {
        self.detail_request = None;
        if self.detail != DetailState::Idle {
            self.detail = DetailState::Idle;
            self.mark_dirty();
        }
    }

    pub(crate) fn detail_not_found(&mut self, id: RecipeId) {
        self.detail_request = None;
        self.detail = DetailState::NotFound(id);
        self.mark_dirty();
    }
}
