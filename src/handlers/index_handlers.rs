//! `GET /` — list products and embed a freshly signed banner link.

use crate::{
    errors::AppError, services::link_service::LINK_TTL, state::AppState,
    views::product_page,
};
use axum::{extract::State, response::Html};

/// Fetch products, then sign the banner key, then render.
///
/// Signing only starts after the query succeeded; either failure aborts the
/// request with its own generic 500 body and nothing is rendered.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let products = state.catalog.list_products().await?;
    let banner = state.links.issue(&state.banner_key, LINK_TTL).await?;

    Ok(Html(product_page::render(&products, &banner)))
}
