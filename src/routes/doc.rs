use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{models::Product, routes::api};

#[derive(OpenApi)]
#[openapi(
    paths(api::list_products),
    components(schemas(Product)),
    tags(
        (name = "Products", description = "Read-only product API"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
