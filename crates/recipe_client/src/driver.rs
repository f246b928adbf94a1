use std::sync::Arc;

use recipe_core::{update, Effect, FeedState, FeedViewModel, Msg, PageSource};
use recipe_logging::{recipe_debug, recipe_error, recipe_info, recipe_warn};
use tokio::task::JoinSet;

use crate::{FavoritesStore, RecipeApi};

/// Owns the feed state and executes the effects `update` asks for.
///
/// Network effects run as tokio tasks; each finishes with exactly one
/// message, which is applied on the next call to [`FeedDriver::next`].
/// A task that panics is dropped from the count without a message.
/// State changes only inside [`FeedDriver::dispatch`].
pub struct FeedDriver {
    state: FeedState,
    api: Arc<dyn RecipeApi>,
    store: Arc<dyn FavoritesStore>,
    tasks: JoinSet<Msg>,
}

impl FeedDriver {
    pub fn new(api: Arc<dyn RecipeApi>, store: Arc<dyn FavoritesStore>) -> Self {
        Self {
            state: FeedState::new(),
            api,
            store,
            tasks: JoinSet::new(),
        }
    }

    /// Restores favorites and requests the category list.
    pub fn start(&mut self) {
        let favorites = match self.store.load() {
            Ok(favorites) => favorites,
            Err(err) => {
                recipe_warn!("Could not restore favorites, starting empty: {}", err);
                Vec::new()
            }
        };
        recipe_info!("Restored {} favorites", favorites.len());
        self.dispatch(Msg::FavoritesRestored(favorites));
        self.dispatch(Msg::LoadCategories);
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        for effect in effects {
            self.run(effect);
        }
    }

    /// Waits for one background completion and applies it. Returns false
    /// when nothing is in flight. Cancel-safe.
    pub async fn next(&mut self) -> bool {
        match self.tasks.join_next().await {
            Some(Ok(msg)) => {
                self.dispatch(msg);
                true
            }
            Some(Err(err)) => {
                recipe_error!("Background task failed: {}", err);
                true
            }
            None => false,
        }
    }

    /// Applies completions until no request or timer is outstanding.
    pub async fn settle(&mut self) {
        while self.next().await {}
    }

    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    /// Whether the view changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        self.state.consume_dirty()
    }

    pub fn view(&self) -> FeedViewModel {
        self.state.view()
    }

    fn run(&mut self, effect: Effect) {
        match effect {
            Effect::PersistFavorites(favorites) => {
                if let Err(err) = self.store.save(&favorites) {
                    recipe_error!("Failed to save {} favorites: {}", favorites.len(), err);
                }
            }
            Effect::ScheduleDebounce { generation, delay } => {
                self.spawn(async move {
                    tokio::time::sleep(delay).await;
                    Msg::DebounceElapsed { generation }
                });
            }
            Effect::FetchCategories { request } => {
                recipe_debug!("FetchCategories request={}", request);
                let api = self.api.clone();
                self.spawn(async move {
                    let result = api.categories().await.map_err(|err| err.to_string());
                    Msg::CategoriesLoaded { request, result }
                });
            }
            Effect::FetchPage {
                request,
                source,
                offset,
            } => {
                recipe_debug!(
                    "FetchPage request={} source={:?} offset={}",
                    request,
                    source,
                    offset
                );
                let api = self.api.clone();
                self.spawn(async move {
                    let result = match &source {
                        PageSource::Search(query) => api.search(query, offset).await,
                        PageSource::Category(slug) => api.by_category(slug, offset).await,
                    };
                    Msg::PageLoaded {
                        request,
                        result: result.map_err(|err| err.to_string()),
                    }
                });
            }
            Effect::FetchRandom { request, count } => {
                recipe_debug!("FetchRandom request={} count={}", request, count);
                let api = self.api.clone();
                self.spawn(async move {
                    let result = api.random_recipes(count).await.map_err(|err| err.to_string());
                    Msg::RandomLoaded { request, result }
                });
            }
            Effect::FetchDetail { request, id } => {
                recipe_debug!("FetchDetail request={} id={}", request, id);
                let api = self.api.clone();
                self.spawn(async move {
                    let result = api.detail(id).await.map_err(|err| err.to_string());
                    Msg::DetailLoaded { request, result }
                });
            }
        }
    }

    fn spawn<F>(&mut self, task: F)
    where
        F: std::future::Future<Output = Msg> + Send + 'static,
    {
        self.tasks.spawn(task);
    }
}
