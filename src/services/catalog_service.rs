use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppResult,
    models::{Category, Product, Review},
};

/// How many insertion-order products the landing page shows.
pub const FEATURED_LIMIT: i64 = 8;

pub async fn list_categories(pool: &DbPool) -> AppResult<Vec<Category>> {
    let categories = sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name")
        .fetch_all(pool)
        .await?;
    Ok(categories)
}

pub async fn featured_products(pool: &DbPool) -> AppResult<Vec<Product>> {
    let products =
        sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY created_at LIMIT $1")
            .bind(FEATURED_LIMIT)
            .fetch_all(pool)
            .await?;
    Ok(products)
}

pub async fn all_products(pool: &DbPool) -> AppResult<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY created_at")
        .fetch_all(pool)
        .await?;
    Ok(products)
}

/// Filtered listing: free-text search against the name/description
/// search index, exact category match, both combined with AND. Either
/// filter may be absent.
pub async fn search_products(
    pool: &DbPool,
    q: Option<String>,
    category: Option<String>,
) -> AppResult<Vec<Product>> {
    let mut builder: sqlx::QueryBuilder<sqlx::Postgres> =
        sqlx::QueryBuilder::new("SELECT * FROM products");
    let mut sep = " WHERE ";

    if let Some(q) = q {
        builder
            .push(sep)
            .push("to_tsvector('english', name || ' ' || coalesce(description, '')) @@ plainto_tsquery('english', ")
            .push_bind(q)
            .push(")");
        sep = " AND ";
    }
    if let Some(category) = category {
        builder.push(sep).push("category = ").push_bind(category);
    }
    builder.push(" ORDER BY created_at");

    let products = builder
        .build_query_as::<Product>()
        .fetch_all(pool)
        .await?;
    Ok(products)
}

pub async fn get_product(pool: &DbPool, id: Uuid) -> AppResult<Option<Product>> {
    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(product)
}

pub async fn product_reviews(pool: &DbPool, product_id: Uuid) -> AppResult<Vec<Review>> {
    let reviews = sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE product_id = $1")
        .bind(product_id)
        .fetch_all(pool)
        .await?;
    Ok(reviews)
}
