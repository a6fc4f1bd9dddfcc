use rust_decimal::Decimal;

use crate::{
    db::DbPool,
    error::AppResult,
    models::Product,
    services::catalog_service,
    session::Cart,
};

pub struct CartLine {
    pub product: Product,
    pub quantity: i64,
    pub subtotal: Decimal,
}

pub struct CartView {
    pub lines: Vec<CartLine>,
    pub total: Decimal,
}

/// Resolve every cart entry against the current catalog. Entries whose
/// id fails to parse or whose product is gone are skipped without
/// touching the stored cart. Subtotals use the live catalog price, so
/// a price change between add-to-cart and viewing shows up here.
pub async fn price_cart(pool: &DbPool, cart: &Cart) -> AppResult<CartView> {
    let mut lines = Vec::new();
    let mut total = Decimal::ZERO;

    for (raw_id, &quantity) in cart {
        let Ok(id) = raw_id.parse() else {
            continue;
        };
        let Some(product) = catalog_service::get_product(pool, id).await? else {
            continue;
        };
        let subtotal = product.price * Decimal::from(quantity);
        total += subtotal;
        lines.push(CartLine {
            product,
            quantity,
            subtotal,
        });
    }

    Ok(CartView { lines, total })
}
