use uuid::Uuid;

use crate::{db::DbPool, error::AppResult, models::User};

#[derive(Debug, PartialEq, Eq)]
pub enum RegisterOutcome {
    Registered,
    UsernameTaken,
}

/// Lookup-then-insert uniqueness check. Two concurrent registrations
/// of the same username can both pass the lookup; the store does not
/// enforce uniqueness.
pub async fn register(pool: &DbPool, username: &str, password: &str) -> AppResult<RegisterOutcome> {
    let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    if existing.is_some() {
        return Ok(RegisterOutcome::UsernameTaken);
    }

    sqlx::query("INSERT INTO users (id, username, password) VALUES ($1, $2, $3)")
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(password)
        .execute(pool)
        .await?;

    Ok(RegisterOutcome::Registered)
}

/// Exact match on username and password. The caller gets no signal
/// about which of the two was wrong.
pub async fn login(pool: &DbPool, username: &str, password: &str) -> AppResult<Option<User>> {
    let user =
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1 AND password = $2")
            .bind(username)
            .bind(password)
            .fetch_optional(pool)
            .await?;
    Ok(user)
}
