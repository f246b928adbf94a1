//! Recipe client: provider access, favorites storage and effect execution.
mod api;
mod driver;
mod persist;
mod provider;
mod settings;
mod types;

pub use api::{RecipeApi, ReqwestRecipeApi};
pub use driver::FeedDriver;
pub use persist::{
    ensure_storage_dir, AtomicFileWriter, FavoritesStore, JsonFileStore, MemoryStore,
    PersistError, FAVORITES_KEY,
};
pub use provider::{
    forwarded_categories_url, CategoriesResponse, ErrorBody, ProviderRequest, RandomResponse,
    SearchResponse, PROVIDER_BASE_URL,
};
pub use settings::{ApiMode, ClientSettings};
pub use types::{ApiError, FailureKind};
