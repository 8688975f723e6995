use crate::catalog::Provider;
use crate::server::error::ApiError;
use crate::server::response::SearchResponse;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use std::sync::Arc;

/// Query parameters of a search request
///
/// A repeated parameter keeps its first value.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub query: Option<String>,
    pub author: Option<String>,
}

impl SearchParams {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "query" => &mut params.query,
                "author" => &mut params.author,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }
}

/// `GET /search?query=...&author=...`
pub async fn handle_search(
    State(provider): State<Arc<Provider>>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let params = match pairs {
        Ok(Query(pairs)) => SearchParams::from_pairs(pairs),
        Err(rejection) => {
            tracing::debug!("Unreadable query string: {}", rejection);
            SearchParams::default()
        }
    };
    tracing::info!("Received search request: {:?}", params);

    let query = params
        .query
        .as_deref()
        .filter(|query| !query.is_empty())
        .ok_or(ApiError::MissingQuery)?;
    let author = params.author.as_deref().filter(|author| !author.is_empty());

    let records = provider.lookup(query, author).await;
    let response = SearchResponse::from_records(&records);

    tracing::debug!("Sending {} matches", response.matches.len());

    Ok(Json(response))
}

/// Fallback for every other route
pub async fn handle_not_found() -> ApiError {
    ApiError::NotFound
}
