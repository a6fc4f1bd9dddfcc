use uuid::Uuid;

use crate::{db::DbPool, error::AppResult};

pub struct NewReview {
    pub product_id: Uuid,
    pub user_id: Uuid,
    /// Captured from the session at post time.
    pub username: String,
    pub rating: i32,
    pub body: String,
}

/// Append-only; a user may review the same product any number of
/// times, and the rating is stored exactly as given.
pub async fn create_review(pool: &DbPool, new: NewReview) -> AppResult<()> {
    sqlx::query(
        r#"
        INSERT INTO reviews (id, product_id, user_id, username, rating, body)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(new.product_id)
    .bind(new.user_id)
    .bind(new.username)
    .bind(new.rating)
    .bind(new.body)
    .execute(pool)
    .await?;

    Ok(())
}
