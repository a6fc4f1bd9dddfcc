use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

pub mod admin;
pub mod api;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod doc;
pub mod health;
pub mod orders;
pub mod reviews;

// Build the router without binding state; it is provided at the top level.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::index))
        .route("/products", get(catalog::list))
        .route("/product/{id}", get(catalog::detail))
        .route("/product/{id}/review", post(reviews::create))
        .route("/add-to-cart/{id}", post(cart::add))
        .route("/cart", get(cart::show))
        .route("/cart/update", post(cart::update))
        .route("/cart/remove/{id}", post(cart::remove))
        .route("/checkout", post(orders::checkout))
        .route("/register", get(auth::register_form).post(auth::register))
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/admin", get(admin::dashboard))
        .route("/admin/delete/{id}", post(admin::delete_product))
        .route(
            "/admin/add-product",
            get(admin::add_product_form).post(admin::add_product),
        )
        .route("/api/products", get(api::list_products))
}
