//! Session cart: add, view, bulk update, remove.

use std::collections::HashMap;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    http::{HeaderMap, header},
    response::Redirect,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    error::AppResult,
    services::cart_service::{self, CartLine},
    session::{self, PageContext},
    state::AppState,
};

#[derive(Template, WebTemplate)]
#[template(path = "cart.html")]
pub struct CartTemplate {
    pub ctx: PageContext,
    pub lines: Vec<CartLine>,
    pub total: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    /// Raw form value; parsing happens in [`session::parse_quantity`]
    /// so garbage coerces instead of failing deserialization.
    pub quantity: Option<String>,
}

/// Add increments an existing entry or inserts a new one. The product
/// id is not validated here; unknown ids sit in the cart until a read
/// path skips them.
pub async fn add(
    session: Session,
    Path(product_id): Path<String>,
    headers: HeaderMap,
    Form(form): Form<AddToCartForm>,
) -> AppResult<Redirect> {
    let quantity = session::parse_quantity(form.quantity.as_deref());

    let mut cart = session::cart(&session).await?;
    session::add_item(&mut cart, &product_id, quantity);
    session::set_cart(&session, &cart).await?;
    session::flash(&session, "Added to cart").await?;

    let back = headers
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("/products")
        .to_string();
    Ok(Redirect::to(&back))
}

pub async fn show(State(state): State<AppState>, session: Session) -> AppResult<CartTemplate> {
    let cart = session::cart(&session).await?;
    let view = cart_service::price_cart(&state.pool, &cart).await?;

    Ok(CartTemplate {
        ctx: session::page_context(&session).await?,
        lines: view.lines,
        total: view.total,
    })
}

/// Full replacement: the submitted form is the new cart.
pub async fn update(
    session: Session,
    Form(form): Form<HashMap<String, String>>,
) -> AppResult<Redirect> {
    let cart = session::replace_from_form(&form);
    session::set_cart(&session, &cart).await?;
    session::flash(&session, "Cart updated").await?;
    Ok(Redirect::to("/cart"))
}

pub async fn remove(session: Session, Path(product_id): Path<String>) -> AppResult<Redirect> {
    let mut cart = session::cart(&session).await?;
    cart.remove(&product_id);
    session::set_cart(&session, &cart).await?;
    Ok(Redirect::to("/cart"))
}
