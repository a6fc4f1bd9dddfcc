//! Checkout.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{
    error::AppResult,
    middleware::auth::AuthUser,
    services::order_service,
    session::{self, Cart, PageContext},
    state::AppState,
};

#[derive(Template, WebTemplate)]
#[template(path = "order_success.html")]
pub struct OrderSuccessTemplate {
    pub ctx: PageContext,
    pub order_id: Uuid,
    pub total: Decimal,
}

/// Place an order from the session cart. Requires a signed-in user
/// (the extractor redirects to login otherwise) and a non-empty cart.
/// On success the cart is cleared; stock is deliberately untouched.
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
    user: AuthUser,
) -> AppResult<Response> {
    let cart = session::cart(&session).await?;
    if cart.is_empty() {
        session::flash(&session, "Cart is empty").await?;
        return Ok(Redirect::to("/cart").into_response());
    }

    let placed = order_service::place_order(&state.pool, user.user_id, &cart).await?;

    session::set_cart(&session, &Cart::new()).await?;
    session::flash(&session, "Order placed successfully").await?;

    Ok(OrderSuccessTemplate {
        ctx: session::page_context(&session).await?,
        order_id: placed.order_id,
        total: placed.total,
    }
    .into_response())
}
