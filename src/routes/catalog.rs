//! Landing page, product listing and product detail.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Category, Product, Review},
    services::catalog_service,
    session::{self, PageContext},
    state::AppState,
};

#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub ctx: PageContext,
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
}

#[derive(Template, WebTemplate)]
#[template(path = "products.html")]
pub struct ProductsTemplate {
    pub ctx: PageContext,
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub q: String,
    pub selected_category: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "product.html")]
pub struct ProductDetailTemplate {
    pub ctx: PageContext,
    pub product: Product,
    pub reviews: Vec<Review>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
    pub category: Option<String>,
}

pub async fn index(State(state): State<AppState>, session: Session) -> AppResult<IndexTemplate> {
    let categories = catalog_service::list_categories(&state.pool).await?;
    let products = catalog_service::featured_products(&state.pool).await?;
    Ok(IndexTemplate {
        ctx: session::page_context(&session).await?,
        categories,
        products,
    })
}

pub async fn list(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ListQuery>,
) -> AppResult<ProductsTemplate> {
    // Empty query-string values mean "no filter", same as absent ones.
    let q = query.q.clone().filter(|s| !s.is_empty());
    let category = query.category.clone().filter(|s| !s.is_empty());

    let products = catalog_service::search_products(&state.pool, q, category).await?;
    let categories = catalog_service::list_categories(&state.pool).await?;

    Ok(ProductsTemplate {
        ctx: session::page_context(&session).await?,
        products,
        categories,
        q: query.q.unwrap_or_default(),
        selected_category: query.category.unwrap_or_default(),
    })
}

pub async fn detail(
    State(state): State<AppState>,
    session: Session,
    Path(product_id): Path<String>,
) -> AppResult<ProductDetailTemplate> {
    // An unparsable id is indistinguishable from an unknown one.
    let id: Uuid = product_id.parse().map_err(|_| AppError::NotFound)?;

    let product = catalog_service::get_product(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    let reviews = catalog_service::product_reviews(&state.pool, id).await?;

    Ok(ProductDetailTemplate {
        ctx: session::page_context(&session).await?,
        product,
        reviews,
    })
}
