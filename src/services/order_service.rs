use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppResult,
    models::{Order, OrderItem, Product},
    services::catalog_service,
    session::Cart,
};

pub struct PlacedOrder {
    pub order_id: Uuid,
    pub total: Decimal,
}

/// Turn the session cart into a persisted order.
///
/// Each entry is resolved against the current catalog; entries whose
/// product is gone are dropped rather than aborting the whole
/// checkout. The surviving lines are snapshotted (id, name, price,
/// quantity) so later catalog edits never affect the order. Stock is
/// not adjusted.
pub async fn place_order(pool: &DbPool, user_id: Uuid, cart: &Cart) -> AppResult<PlacedOrder> {
    let mut items: Vec<(Product, i64)> = Vec::new();
    let mut total = Decimal::ZERO;

    for (raw_id, &quantity) in cart {
        let Ok(id) = raw_id.parse() else {
            continue;
        };
        let Some(product) = catalog_service::get_product(pool, id).await? else {
            continue;
        };
        total += product.price * Decimal::from(quantity);
        items.push((product, quantity));
    }

    let order_id = Uuid::new_v4();
    sqlx::query("INSERT INTO orders (id, user_id, total, status) VALUES ($1, $2, $3, 'placed')")
        .bind(order_id)
        .bind(user_id)
        .bind(total)
        .execute(pool)
        .await?;

    for (line_no, (product, quantity)) in items.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO order_items (id, order_id, product_id, name, price, quantity, line_no)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(order_id)
        .bind(product.id)
        .bind(&product.name)
        .bind(product.price)
        .bind(*quantity)
        .bind(line_no as i32)
        .execute(pool)
        .await?;
    }

    tracing::info!(order_id = %order_id, %total, "order placed");

    Ok(PlacedOrder { order_id, total })
}

pub async fn get_order(pool: &DbPool, id: Uuid) -> AppResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(order)
}

pub async fn order_items(pool: &DbPool, order_id: Uuid) -> AppResult<Vec<OrderItem>> {
    let items =
        sqlx::query_as::<_, OrderItem>("SELECT * FROM order_items WHERE order_id = $1 ORDER BY line_no")
            .bind(order_id)
            .fetch_all(pool)
            .await?;
    Ok(items)
}
