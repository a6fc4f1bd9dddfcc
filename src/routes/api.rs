//! Read-only JSON listing for programmatic consumers.

use axum::{Json, extract::State};

use crate::{error::AppResult, models::Product, services::catalog_service, state::AppState};

/// Every product as-is; ids serialize as strings.
#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "All products", body = Vec<Product>)
    ),
    tag = "Products"
)]
pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let products = catalog_service::all_products(&state.pool).await?;
    Ok(Json(products))
}
