use std::time::Duration;

use crate::{Recipe, RecipeId, RequestId};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchCategories {
        request: RequestId,
    },
    FetchPage {
        request: RequestId,
        source: PageSource,
        offset: u32,
    },
    FetchRandom {
        request: RequestId,
        count: u32,
    },
    FetchDetail {
        request: RequestId,
        id: RecipeId,
    },
    /// Write the whole favorites collection to durable storage.
    PersistFavorites(Vec<Recipe>),
    /// Deliver `Msg::DebounceElapsed { generation }` after `delay`.
    ScheduleDebounce {
        generation: u64,
        delay: Duration,
    },
}

/// Listing a page is fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSource {
    Search(String),
    Category(String),
}
