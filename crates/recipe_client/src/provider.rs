//! Remote recipe provider: endpoint layout and wire payloads.
use recipe_core::{Category, Recipe, RecipePreview, SearchPage};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{ApiError, FailureKind};

pub const PROVIDER_BASE_URL: &str = "https://api.spoonacular.com";

/// One provider call, independent of who attaches the credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderRequest {
    Search {
        query: String,
        number: u32,
        offset: u32,
    },
    ByCuisine {
        cuisine: String,
        number: u32,
        offset: u32,
    },
    Detail {
        id: String,
    },
    Random {
        number: u32,
    },
}

impl ProviderRequest {
    /// Forwarder action name for this request.
    pub fn action(&self) -> &'static str {
        match self {
            ProviderRequest::Search { .. } => "search",
            ProviderRequest::ByCuisine { .. } => "byCategory",
            ProviderRequest::Detail { .. } => "detail",
            ProviderRequest::Random { .. } => "random",
        }
    }

    /// Direct provider URL with `api_key` attached.
    pub fn provider_url(&self, base: &Url, api_key: &str) -> Result<Url, ApiError> {
        let mut url = base.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                ApiError::new(FailureKind::InvalidRequest, format!("unusable base url {base}"))
            })?;
            segments.pop_if_empty();
            match self {
                ProviderRequest::Search { .. } | ProviderRequest::ByCuisine { .. } => {
                    segments.extend(["recipes", "complexSearch"]);
                }
                ProviderRequest::Detail { id } => {
                    segments.extend(["recipes", id.as_str(), "information"]);
                }
                ProviderRequest::Random { .. } => {
                    segments.extend(["recipes", "random"]);
                }
            }
        }

        {
            let mut pairs = url.query_pairs_mut();
            pairs.clear().append_pair("apiKey", api_key);
            match self {
                ProviderRequest::Search {
                    query,
                    number,
                    offset,
                } => {
                    pairs
                        .append_pair("query", query)
                        .append_pair("number", &number.to_string())
                        .append_pair("offset", &offset.to_string())
                        .append_pair("addRecipeInformation", "true")
                        .append_pair("fillIngredients", "true");
                }
                ProviderRequest::ByCuisine {
                    cuisine,
                    number,
                    offset,
                } => {
                    pairs
                        .append_pair("cuisine", cuisine)
                        .append_pair("number", &number.to_string())
                        .append_pair("offset", &offset.to_string())
                        .append_pair("addRecipeInformation", "true");
                }
                ProviderRequest::Detail { .. } => {
                    pairs.append_pair("includeNutrition", "false");
                }
                ProviderRequest::Random { number } => {
                    pairs.append_pair("number", &number.to_string());
                }
            }
        }
        Ok(url)
    }

    /// URL on the request forwarder, which attaches the credential itself.
    pub fn forwarded_url(&self, endpoint: &Url) -> Url {
        let mut url = endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.clear().append_pair("action", self.action());
            match self {
                ProviderRequest::Search {
                    query,
                    number,
                    offset,
                } => {
                    pairs
                        .append_pair("query", query)
                        .append_pair("number", &number.to_string())
                        .append_pair("offset", &offset.to_string());
                }
                ProviderRequest::ByCuisine {
                    cuisine,
                    number,
                    offset,
                } => {
                    pairs
                        .append_pair("cuisine", cuisine)
                        .append_pair("number", &number.to_string())
                        .append_pair("offset", &offset.to_string());
                }
                ProviderRequest::Detail { id } => {
                    pairs.append_pair("id", id);
                }
                ProviderRequest::Random { number } => {
                    pairs.append_pair("number", &number.to_string());
                }
            }
        }
        url
    }
}

/// Forwarder URL for the locally generated category list.
pub fn forwarded_categories_url(endpoint: &Url) -> Url {
    let mut url = endpoint.clone();
    url.query_pairs_mut()
        .clear()
        .append_pair("action", "categories");
    url
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<RecipePreview>,
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub total_results: u32,
}

impl SearchResponse {
    /// Maps onto a page; `has_more` is judged against the offset we asked for.
    pub fn into_page(self, requested_offset: u32) -> SearchPage {
        SearchPage::at_offset(self.results, requested_offset, self.total_results)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RandomResponse {
    #[serde(default)]
    pub recipes: Vec<Recipe>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesResponse {
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// Error payload: the provider uses `message`, the forwarder `error`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn parse(bytes: &[u8]) -> Self {
        serde_json::from_slice(bytes).unwrap_or_default()
    }

    pub fn text(&self) -> Option<&str> {
        self.message.as_deref().or(self.error.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse(PROVIDER_BASE_URL).unwrap()
    }

    #[test]
    fn search_url_carries_pagination_and_flags() {
        let request = ProviderRequest::Search {
            query: "mac & cheese".into(),
            number: 12,
            offset: 24,
        };
        let url = request.provider_url(&base(), "k3y").unwrap();
        assert_eq!(url.path(), "/recipes/complexSearch");
        assert_eq!(
            url.query(),
            Some(
                "apiKey=k3y&query=mac+%26+cheese&number=12&offset=24\
                 &addRecipeInformation=true&fillIngredients=true"
            )
        );
    }

    #[test]
    fn detail_url_places_id_in_path() {
        let request = ProviderRequest::Detail { id: "716429".into() };
        let url = request.provider_url(&base(), "k").unwrap();
        assert_eq!(url.path(), "/recipes/716429/information");
        assert_eq!(url.query(), Some("apiKey=k&includeNutrition=false"));
    }

    #[test]
    fn base_with_trailing_slash_is_normalised() {
        let base = Url::parse("http://127.0.0.1:9000/").unwrap();
        let url = ProviderRequest::Random { number: 3 }
            .provider_url(&base, "k")
            .unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/recipes/random?apiKey=k&number=3");
    }

    #[test]
    fn forwarded_url_uses_action_parameter() {
        let endpoint = Url::parse("http://localhost:8888/api/recipes").unwrap();
        let url = ProviderRequest::ByCuisine {
            cuisine: "thai".into(),
            number: 12,
            offset: 0,
        }
        .forwarded_url(&endpoint);
        assert_eq!(
            url.as_str(),
            "http://localhost:8888/api/recipes?action=byCategory&cuisine=thai&number=12&offset=0"
        );
        assert_eq!(
            forwarded_categories_url(&endpoint).query(),
            Some("action=categories")
        );
    }

    #[test]
    fn error_body_prefers_provider_message() {
        let body = ErrorBody::parse(br#"{"status":"failure","message":"quota used"}"#);
        assert_eq!(body.text(), Some("quota used"));
        assert_eq!(ErrorBody::parse(b"not json").text(), None);
    }
}
