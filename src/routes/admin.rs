//! Admin panel: dashboard, product add (with image upload), delete.
//!
//! Every handler takes [`AdminUser`]; non-admins never reach the body
//! and get bounced to the home page by the extractor.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, Path, State},
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::AdminUser,
    models::{Order, Product},
    services::{admin_service, catalog_service},
    session::{self, PageContext},
    state::AppState,
    uploads,
};

#[derive(Template, WebTemplate)]
#[template(path = "admin.html")]
pub struct AdminTemplate {
    pub ctx: PageContext,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
}

#[derive(Template, WebTemplate)]
#[template(path = "admin_add_product.html")]
pub struct AddProductTemplate {
    pub ctx: PageContext,
    pub categories: Vec<String>,
}

pub async fn dashboard(
    State(state): State<AppState>,
    _admin: AdminUser,
    session: Session,
) -> AppResult<AdminTemplate> {
    let products = catalog_service::all_products(&state.pool).await?;
    let orders = admin_service::recent_orders(&state.pool).await?;

    Ok(AdminTemplate {
        ctx: session::page_context(&session).await?,
        products,
        orders,
    })
}

/// Delete does not cascade: reviews and order snapshots that point at
/// the product are left in place.
pub async fn delete_product(
    State(state): State<AppState>,
    _admin: AdminUser,
    session: Session,
    Path(product_id): Path<String>,
) -> AppResult<Redirect> {
    let id: Uuid = product_id.parse().map_err(|_| AppError::NotFound)?;

    admin_service::delete_product(&state.pool, id).await?;
    session::flash(&session, "Product deleted successfully").await?;
    Ok(Redirect::to("/admin"))
}

pub async fn add_product_form(
    State(state): State<AppState>,
    _admin: AdminUser,
    session: Session,
) -> AppResult<AddProductTemplate> {
    let categories = catalog_service::list_categories(&state.pool)
        .await?
        .into_iter()
        .map(|c| c.name)
        .collect();

    Ok(AddProductTemplate {
        ctx: session::page_context(&session).await?,
        categories,
    })
}

pub async fn add_product(
    State(state): State<AppState>,
    _admin: AdminUser,
    session: Session,
    mut multipart: Multipart,
) -> AppResult<Response> {
    let mut name = None;
    let mut description = None;
    let mut price_raw = None;
    let mut stock_raw = None;
    let mut category = None;
    let mut images = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("name") => name = Some(field.text().await?),
            Some("description") => description = Some(field.text().await?),
            Some("price") => price_raw = Some(field.text().await?),
            Some("stock") => stock_raw = Some(field.text().await?),
            Some("category") => category = Some(field.text().await?),
            Some("image") => {
                // Browsers submit the field with an empty filename when
                // no file was chosen.
                let file_name = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await?;
                if !file_name.is_empty() && uploads::allowed_file(&file_name) {
                    if let Some(path) = uploads::save_image(&file_name, &data).await? {
                        images.push(path);
                    }
                }
            }
            _ => {}
        }
    }

    let (Some(name), Some(price_raw), Some(stock_raw), Some(category)) =
        (name, price_raw, stock_raw, category)
    else {
        return Err(AppError::BadRequest("missing product fields".into()));
    };

    let parsed = (
        price_raw.trim().parse::<Decimal>(),
        stock_raw.trim().parse::<i32>(),
    );
    let (Ok(price), Ok(stock)) = parsed else {
        session::flash(&session, "Invalid price or stock value").await?;
        return Ok(Redirect::to("/admin/add-product").into_response());
    };

    admin_service::create_product(
        &state.pool,
        admin_service::NewProduct {
            name,
            description: description.filter(|d| !d.is_empty()),
            price,
            stock,
            category,
            images,
        },
    )
    .await?;

    session::flash(&session, "Product added successfully").await?;
    Ok(Redirect::to("/admin").into_response())
}
