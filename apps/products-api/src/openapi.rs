//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Products API",
        version = "0.1.0",
        description = "Product catalogue with image uploads, served on two surfaces",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/v1/product", api = domain_products::ControllerApiDoc),
        (path = "/api/v2/products", api = domain_products::FunctionalApiDoc)
    )
)]
pub struct ApiDoc;
