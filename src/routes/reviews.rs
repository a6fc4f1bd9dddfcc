//! Product reviews.

use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use serde::Deserialize;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    services::review_service,
    session,
    state::AppState,
};

/// Missing rating defaults to 5; out-of-range values are stored as
/// given.
const DEFAULT_RATING: i32 = 5;

#[derive(Debug, Deserialize)]
pub struct ReviewForm {
    pub review: Option<String>,
    pub rating: Option<String>,
}

pub async fn create(
    State(state): State<AppState>,
    session: Session,
    user: AuthUser,
    Path(product_id): Path<String>,
    Form(form): Form<ReviewForm>,
) -> AppResult<Redirect> {
    let id: Uuid = product_id.parse().map_err(|_| AppError::NotFound)?;

    let rating = form
        .rating
        .as_deref()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(DEFAULT_RATING);

    review_service::create_review(
        &state.pool,
        review_service::NewReview {
            product_id: id,
            user_id: user.user_id,
            username: user.username,
            rating,
            body: form.review.unwrap_or_default(),
        },
    )
    .await?;

    session::flash(&session, "Review posted").await?;
    Ok(Redirect::to(&format!("/product/{product_id}")))
}
