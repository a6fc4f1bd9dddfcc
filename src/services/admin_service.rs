use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppResult,
    models::{Order, Product},
};

/// How many recent orders the dashboard shows.
pub const RECENT_ORDER_LIMIT: i64 = 20;

pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub category: String,
    pub images: Vec<String>,
}

pub async fn recent_orders(pool: &DbPool) -> AppResult<Vec<Order>> {
    let orders =
        sqlx::query_as::<_, Order>("SELECT * FROM orders ORDER BY created_at DESC LIMIT $1")
            .bind(RECENT_ORDER_LIMIT)
            .fetch_all(pool)
            .await?;
    Ok(orders)
}

pub async fn create_product(pool: &DbPool, new: NewProduct) -> AppResult<Product> {
    let product = sqlx::query_as::<_, Product>(
        r#"
        INSERT INTO products (id, name, description, price, stock, category, images)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(new.name)
    .bind(new.description)
    .bind(new.price)
    .bind(new.stock)
    .bind(new.category)
    .bind(new.images)
    .fetch_one(pool)
    .await?;

    tracing::info!(product_id = %product.id, "product created");
    Ok(product)
}

/// Removes the product row only. Reviews and order snapshots that
/// reference it stay behind; orders hold copies, reviews dangle.
pub async fn delete_product(pool: &DbPool, id: Uuid) -> AppResult<()> {
    sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    tracing::info!(product_id = %id, "product deleted");
    Ok(())
}
