use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use recipe_client::{CategoriesResponse, ErrorBody, ProviderRequest};
use recipe_core::{cuisine_categories, PAGE_SIZE};
use recipe_logging::{recipe_info, recipe_warn};
use url::Url;

use crate::error::ForwardError;
use crate::state::ForwarderState;

/// Query string accepted by `/api/recipes`.
#[derive(Debug, Default)]
pub struct RecipeParams {
    pub action: Option<String>,
    pub query: Option<String>,
    pub id: Option<String>,
    pub category: Option<String>,
    pub cuisine: Option<String>,
    pub number: Option<String>,
    pub offset: Option<String>,
}

impl RecipeParams {
    /// Repeated keys keep their last value; unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "action" => &mut params.action,
                "query" => &mut params.query,
                "id" => &mut params.id,
                "category" => &mut params.category,
                "cuisine" => &mut params.cuisine,
                "number" => &mut params.number,
                "offset" => &mut params.offset,
                _ => continue,
            };
            *slot = Some(value);
        }
        params
    }

    /// Builds the upstream call for every action except `categories`.
    pub fn provider_request(&self) -> Result<ProviderRequest, ForwardError> {
        let number = || parse_count("number", self.number.as_deref(), PAGE_SIZE);
        let offset = || parse_count("offset", self.offset.as_deref(), 0);
        match self.action.as_deref() {
            Some("search") => Ok(ProviderRequest::Search {
                query: self.query.clone().unwrap_or_default(),
                number: number()?,
                offset: offset()?,
            }),
            Some("random") => Ok(ProviderRequest::Random { number: number()? }),
            Some("detail") => {
                let id = self
                    .id
                    .as_deref()
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .ok_or(ForwardError::MissingRecipeId)?;
                if !id.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(ForwardError::InvalidParameter {
                        name: "id",
                        value: id.to_string(),
                    });
                }
                Ok(ProviderRequest::Detail { id: id.to_string() })
            }
            Some("byCategory") => Ok(ProviderRequest::ByCuisine {
                cuisine: self
                    .cuisine
                    .clone()
                    .or_else(|| self.category.clone())
                    .unwrap_or_default(),
                number: number()?,
                offset: offset()?,
            }),
            _ => Err(ForwardError::InvalidAction),
        }
    }
}

fn parse_count(name: &'static str, raw: Option<&str>, default: u32) -> Result<u32, ForwardError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ForwardError::InvalidParameter {
                name,
                value: value.to_string(),
            }),
    }
}

pub async fn recipes_handler(
    State(state): State<Arc<ForwarderState>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Response, ForwardError> {
    let api_key = state
        .config
        .api_key
        .as_deref()
        .ok_or(ForwardError::MissingApiKey)?;
    let Query(pairs) = query.map_err(|rejection| ForwardError::InvalidParameter {
        name: "query string",
        value: rejection.body_text(),
    })?;
    let params = RecipeParams::from_pairs(pairs);

    let action = params.action.as_deref().unwrap_or("");
    recipe_info!("action={}", action);

    if action == "categories" {
        let body = CategoriesResponse {
            categories: cuisine_categories(),
        };
        return Ok(Json(body).into_response());
    }

    let request = params.provider_request()?;
    let url = request
        .provider_url(&state.config.base_url, api_key)
        .map_err(|err| ForwardError::Internal(err.to_string()))?;
    forward(&state.client, url, action).await
}

/// Preflight: always answered, even without a credential.
pub async fn preflight_handler() -> StatusCode {
    StatusCode::OK
}

async fn forward(client: &reqwest::Client, url: Url, action: &str) -> Result<Response, ForwardError> {
    // The URL carries the key; errors are logged without it.
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|err| ForwardError::Internal(err.without_url().to_string()))?;

    let status = response.status().as_u16();
    let body = response
        .bytes()
        .await
        .map_err(|err| ForwardError::Internal(err.without_url().to_string()))?;

    if !(200..300).contains(&status) {
        let message = ErrorBody::parse(&body)
            .message
            .unwrap_or_else(|| "API request failed".to_string());
        recipe_warn!("Provider answered {} for action={}: {}", status, action, message);
        return Err(ForwardError::Upstream { status, message });
    }

    if let Err(err) = serde_json::from_slice::<serde_json::Value>(&body) {
        return Err(ForwardError::Internal(format!(
            "provider returned malformed JSON for action={action}: {err}"
        )));
    }

    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::OK);
    Ok((status, [(CONTENT_TYPE, "application/json")], body).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> RecipeParams {
        RecipeParams::from_pairs(
            pairs
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        )
    }

    #[test]
    fn repeated_keys_keep_last_value() {
        let request = params(&[
            ("action", "search"),
            ("query", "a"),
            ("query", "b"),
            ("utm_source", "mail"),
        ])
        .provider_request()
        .unwrap();
        assert_eq!(
            request,
            ProviderRequest::Search {
                query: "b".into(),
                number: 12,
                offset: 0,
            }
        );
    }

    #[test]
    fn defaults_number_and_offset() {
        let request = params(&[("action", "search"), ("query", "soup")])
            .provider_request()
            .unwrap();
        assert_eq!(
            request,
            ProviderRequest::Search {
                query: "soup".into(),
                number: 12,
                offset: 0,
            }
        );
    }

    #[test]
    fn by_category_falls_back_to_category_param() {
        let request = params(&[("action", "byCategory"), ("category", "thai"), ("offset", "24")])
            .provider_request()
            .unwrap();
        assert_eq!(
            request,
            ProviderRequest::ByCuisine {
                cuisine: "thai".into(),
                number: 12,
                offset: 24,
            }
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            params(&[("action", "detail")]).provider_request(),
            Err(ForwardError::MissingRecipeId)
        ));
        assert!(matches!(
            params(&[("action", "detail"), ("id", "../admin")]).provider_request(),
            Err(ForwardError::InvalidParameter { name: "id", .. })
        ));
        assert!(matches!(
            params(&[("action", "random"), ("number", "many")]).provider_request(),
            Err(ForwardError::InvalidParameter { name: "number", .. })
        ));
        assert!(matches!(
            params(&[("action", "nutrition")]).provider_request(),
            Err(ForwardError::InvalidAction)
        ));
        assert!(matches!(
            params(&[]).provider_request(),
            Err(ForwardError::InvalidAction)
        ));
    }
}
