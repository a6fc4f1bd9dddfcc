use std::str::FromStr;

use rust_decimal::Decimal;
use uuid::Uuid;

use axum_storefront::{
    db::{DbPool, create_pool},
    services::{
        admin_service::{self, NewProduct},
        auth_service::{self, RegisterOutcome},
        cart_service, catalog_service, order_service,
    },
    session::Cart,
};

// Integration flow: register/login, fill a cart, checkout, then verify
// that order snapshots survive price changes and product deletion, and
// that the filtered listing behaves. Single test so the shared
// database is truncated exactly once.
#[tokio::test]
async fn storefront_flow() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let pool = setup_pool(&database_url).await?;

    // Registration is first-come-first-served; a second attempt with
    // the same username must not create a second row.
    assert_eq!(
        auth_service::register(&pool, "shopper", "secret").await?,
        RegisterOutcome::Registered
    );
    assert_eq!(
        auth_service::register(&pool, "shopper", "other-secret").await?,
        RegisterOutcome::UsernameTaken
    );
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE username = $1")
        .bind("shopper")
        .fetch_one(&pool)
        .await?;
    assert_eq!(count.0, 1);

    // Wrong password never yields a user; the right one does.
    assert!(auth_service::login(&pool, "shopper", "wrong").await?.is_none());
    let user = auth_service::login(&pool, "shopper", "secret")
        .await?
        .expect("valid credentials");

    let widget = admin_service::create_product(
        &pool,
        NewProduct {
            name: "Test Widget".into(),
            description: Some("A widget for testing".into()),
            price: Decimal::from_str("10.00")?,
            stock: 5,
            category: "Gadgets".into(),
            images: vec![],
        },
    )
    .await?;
    let jacket = admin_service::create_product(
        &pool,
        NewProduct {
            name: "Denim Jacket".into(),
            description: Some("Classic fit".into()),
            price: Decimal::from_str("59.99")?,
            stock: 50,
            category: "Fashion".into(),
            images: vec![],
        },
    )
    .await?;

    // Text search hits name/description; category filter ANDs with it.
    let hits = catalog_service::search_products(&pool, Some("widget".into()), None).await?;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, widget.id);

    let hits =
        catalog_service::search_products(&pool, Some("widget".into()), Some("Fashion".into()))
            .await?;
    assert!(hits.is_empty());

    let hits = catalog_service::search_products(&pool, None, Some("Fashion".into())).await?;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, jacket.id);

    let all = catalog_service::search_products(&pool, None, None).await?;
    assert_eq!(all.len(), 2);

    // Cart entries with unparsable ids or missing products are skipped
    // in both the priced view and the checkout.
    let mut cart = Cart::new();
    cart.insert(widget.id.to_string(), 2);
    cart.insert("not-a-uuid".to_string(), 3);
    cart.insert(Uuid::new_v4().to_string(), 1);

    let view = cart_service::price_cart(&pool, &cart).await?;
    assert_eq!(view.lines.len(), 1);
    assert_eq!(view.lines[0].quantity, 2);
    assert_eq!(view.lines[0].subtotal, Decimal::from_str("20.00")?);
    assert_eq!(view.total, Decimal::from_str("20.00")?);

    let placed = order_service::place_order(&pool, user.id, &cart).await?;
    assert_eq!(placed.total, Decimal::from_str("20.00")?);

    let order = order_service::get_order(&pool, placed.order_id)
        .await?
        .expect("order persisted");
    assert_eq!(order.status, "placed");
    assert_eq!(order.total, Decimal::from_str("20.00")?);

    let items = order_service::order_items(&pool, placed.order_id).await?;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].product_id, widget.id);
    assert_eq!(items[0].name, "Test Widget");
    assert_eq!(items[0].price, Decimal::from_str("10.00")?);
    assert_eq!(items[0].quantity, 2);

    // Stock is never decremented at checkout.
    let live = catalog_service::get_product(&pool, widget.id)
        .await?
        .expect("product still listed");
    assert_eq!(live.stock, 5);

    // A later price change shows up in the live cart view but never in
    // the snapshotted order.
    sqlx::query("UPDATE products SET price = $1 WHERE id = $2")
        .bind(Decimal::from_str("15.00")?)
        .bind(widget.id)
        .execute(&pool)
        .await?;

    let repriced = cart_service::price_cart(&pool, &cart).await?;
    assert_eq!(repriced.total, Decimal::from_str("30.00")?);

    let items = order_service::order_items(&pool, placed.order_id).await?;
    assert_eq!(items[0].price, Decimal::from_str("10.00")?);

    // Deleting the product removes it from the catalog but leaves the
    // prior order untouched; the cart view just drops the line.
    admin_service::delete_product(&pool, widget.id).await?;
    assert!(catalog_service::get_product(&pool, widget.id).await?.is_none());
    assert!(
        catalog_service::all_products(&pool)
            .await?
            .iter()
            .all(|p| p.id != widget.id)
    );

    let after_delete = cart_service::price_cart(&pool, &cart).await?;
    assert!(after_delete.lines.is_empty());
    assert_eq!(after_delete.total, Decimal::ZERO);

    let order = order_service::get_order(&pool, placed.order_id)
        .await?
        .expect("order survives product deletion");
    assert_eq!(order.total, Decimal::from_str("20.00")?);
    let items = order_service::order_items(&pool, placed.order_id).await?;
    assert_eq!(items.len(), 1);

    Ok(())
}

async fn setup_pool(database_url: &str) -> anyhow::Result<DbPool> {
    let pool = create_pool(database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    // Clean tables between runs.
    sqlx::query("TRUNCATE TABLE reviews, order_items, orders, users, products, categories")
        .execute(&pool)
        .await?;

    Ok(pool)
}
