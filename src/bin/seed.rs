//! Destructive reseed: wipes all five collections and repopulates them
//! with fixed sample data, then re-ensures the product search index.
//! Not part of the running service.

use std::str::FromStr;

use rust_decimal::Decimal;
use uuid::Uuid;

use axum_storefront::{config::AppConfig, db::create_pool};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure the schema exists before wiping data.
    sqlx::migrate!("./migrations").run(&pool).await?;

    sqlx::query("TRUNCATE TABLE reviews, order_items, orders, users, products, categories")
        .execute(&pool)
        .await?;

    seed_categories(&pool).await?;
    seed_products(&pool).await?;
    let user1_id = seed_users(&pool).await?;
    seed_review(&pool, user1_id).await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS products_search_idx ON products
        USING GIN (to_tsvector('english', name || ' ' || coalesce(description, '')))
        "#,
    )
    .execute(&pool)
    .await?;

    println!("Sample data inserted.");
    Ok(())
}

async fn seed_categories(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let categories = [
        ("Electronics", "Phones, laptops and accessories"),
        ("Fashion", "Clothing and accessories"),
        ("Home", "Home & kitchen"),
        ("Books", "Fiction & non-fiction"),
    ];

    for (name, description) in categories {
        sqlx::query("INSERT INTO categories (id, name, description) VALUES ($1, $2, $3)")
            .bind(Uuid::new_v4())
            .bind(name)
            .bind(description)
            .execute(pool)
            .await?;
    }

    println!("Seeded categories");
    Ok(())
}

async fn seed_products(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let products = [
        (
            "Wireless Headphones",
            "Noise-cancelling over-ear headphones",
            "129.99",
            30,
            "Electronics",
            "/static/images/headphones.jpg",
        ),
        (
            "Smartphone X",
            "6.5 inch display smartphone with 128GB storage",
            "699.00",
            15,
            "Electronics",
            "/static/images/smartphone.jpg",
        ),
        (
            "Men's Denim Jacket",
            "Classic fit denim jacket",
            "59.99",
            50,
            "Fashion",
            "/static/images/denim_jacket.jpg",
        ),
        (
            "Cooking Pan Set",
            "Non-stick 3-piece cooking pan set",
            "79.50",
            20,
            "Home",
            "/static/images/pan_set.jpg",
        ),
        (
            "Learning Rust (Book)",
            "A modern introduction to Rust.",
            "39.00",
            100,
            "Books",
            "/static/images/rust_book.jpg",
        ),
    ];

    for (name, description, price, stock, category, image) in products {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, description, price, stock, category, images)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(description)
        .bind(Decimal::from_str(price)?)
        .bind(stock)
        .bind(category)
        .bind(vec![image.to_string()])
        .execute(pool)
        .await?;
    }

    println!("Seeded products");
    Ok(())
}

async fn seed_users(pool: &sqlx::PgPool) -> anyhow::Result<Uuid> {
    let admin_id = Uuid::new_v4();
    let user1_id = Uuid::new_v4();

    sqlx::query("INSERT INTO users (id, username, password) VALUES ($1, $2, $3)")
        .bind(admin_id)
        .bind("admin")
        .bind("adminpass")
        .execute(pool)
        .await?;
    sqlx::query("INSERT INTO users (id, username, password) VALUES ($1, $2, $3)")
        .bind(user1_id)
        .bind("user1")
        .bind("user1pass")
        .execute(pool)
        .await?;

    println!("Seeded users admin, user1");
    Ok(user1_id)
}

async fn seed_review(pool: &sqlx::PgPool, user1_id: Uuid) -> anyhow::Result<()> {
    let product: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM products ORDER BY created_at LIMIT 1")
            .fetch_optional(pool)
            .await?;

    if let Some((product_id,)) = product {
        sqlx::query(
            r#"
            INSERT INTO reviews (id, product_id, user_id, username, rating, body)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(product_id)
        .bind(user1_id)
        .bind("user1")
        .bind(5)
        .bind("Excellent product, highly recommended!")
        .execute(pool)
        .await?;
        println!("Seeded review");
    }

    Ok(())
}
