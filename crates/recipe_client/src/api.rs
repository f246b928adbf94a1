use futures_util::StreamExt;
use recipe_core::{cuisine_categories, Category, Recipe, RecipeId, SearchPage, PAGE_SIZE};
use recipe_logging::{recipe_debug, recipe_warn};
use serde::de::DeserializeOwned;
use url::Url;

use crate::provider::{
    forwarded_categories_url, CategoriesResponse, ErrorBody, ProviderRequest, RandomResponse,
    SearchResponse,
};
use crate::{ApiError, ApiMode, ClientSettings, FailureKind};

/// The four provider queries plus the category list.
#[async_trait::async_trait]
pub trait RecipeApi: Send + Sync {
    async fn search(&self, query: &str, offset: u32) -> Result<SearchPage, ApiError>;

    async fn by_category(&self, category: &str, offset: u32) -> Result<SearchPage, ApiError>;

    async fn detail(&self, id: RecipeId) -> Result<Recipe, ApiError>;

    /// Up to `count` unfiltered recipes.
    async fn random_recipes(&self, count: u32) -> Result<Vec<Recipe>, ApiError>;

    async fn categories(&self) -> Result<Vec<Category>, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestRecipeApi {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestRecipeApi {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn url_for(&self, request: &ProviderRequest) -> Result<Url, ApiError> {
        match &self.settings.mode {
            ApiMode::Direct { base_url, api_key } => request.provider_url(base_url, api_key),
            ApiMode::Forwarded { endpoint } => Ok(request.forwarded_url(endpoint)),
        }
    }

    async fn fetch_page(
        &self,
        request: ProviderRequest,
        offset: u32,
    ) -> Result<SearchPage, ApiError> {
        let url = self.url_for(&request)?;
        let mut response: SearchResponse = self.get_json(request.action(), url).await?;
        response.results.truncate(PAGE_SIZE as usize);
        Ok(response.into_page(offset))
    }

    async fn get_json<T: DeserializeOwned>(&self, action: &str, url: Url) -> Result<T, ApiError> {
        let bytes = self.get_bytes(action, url).await?;
        serde_json::from_slice(&bytes)
            .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))
    }

    async fn get_bytes(&self, action: &str, url: Url) -> Result<Vec<u8>, ApiError> {
        // The URL may carry the key; log the action only.
        recipe_debug!("GET action={}", action);
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = self.read_body(response).await.unwrap_or_default();
            let message = ErrorBody::parse(&body)
                .text()
                .map(ToOwned::to_owned)
                .unwrap_or_else(|| status.to_string());
            recipe_warn!("Provider answered {} for action={}: {}", status, action, message);
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                message,
            ));
        }

        self.read_body(response).await
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, ApiError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(ApiError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(ApiError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl RecipeApi for ReqwestRecipeApi {
    async fn search(&self, query: &str, offset: u32) -> Result<SearchPage, ApiError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ApiError::new(
                FailureKind::InvalidRequest,
                "search query must not be empty",
            ));
        }
        let request = ProviderRequest::Search {
            query: query.to_string(),
            number: PAGE_SIZE,
            offset,
        };
        self.fetch_page(request, offset).await
    }

    async fn by_category(&self, category: &str, offset: u32) -> Result<SearchPage, ApiError> {
        let request = ProviderRequest::ByCuisine {
            cuisine: category.to_string(),
            number: PAGE_SIZE,
            offset,
        };
        self.fetch_page(request, offset).await
    }

    async fn detail(&self, id: RecipeId) -> Result<Recipe, ApiError> {
        let request = ProviderRequest::Detail { id: id.to_string() };
        let url = self.url_for(&request)?;
        self.get_json(request.action(), url)
            .await
            .map_err(|err| match err.kind {
                FailureKind::HttpStatus(404) => ApiError::new(FailureKind::NotFound, err.message),
                _ => err,
            })
    }

    async fn random_recipes(&self, count: u32) -> Result<Vec<Recipe>, ApiError> {
        let request = ProviderRequest::Random { number: count };
        let url = self.url_for(&request)?;
        let response: RandomResponse = self.get_json(request.action(), url).await?;
        let mut recipes = response.recipes;
        recipes.truncate(count as usize);
        Ok(recipes)
    }

    async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        match &self.settings.mode {
            // The provider has no category endpoint.
            ApiMode::Direct { .. } => Ok(cuisine_categories()),
            ApiMode::Forwarded { endpoint } => {
                let url = forwarded_categories_url(endpoint);
                let response: CategoriesResponse = self.get_json("categories", url).await?;
                Ok(response.categories)
            }
        }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    // Direct-mode URLs carry the key.
    let err = err.without_url();
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
