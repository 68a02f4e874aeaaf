use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    routing::{delete, get, patch},
    Json, Router,
};

use storefront_catalog::ProductDto;
use storefront_core::ProductId;

use crate::app::dto::{
    AddProductRequest, BrandAndNameQuery, BrandQuery, CategoryAndBrandQuery, CategoryQuery,
    CountQuery, NameQuery, UpdateProductRequest,
};
use crate::app::errors::{api_response, catalog_error_to_response, error_response};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(add_product))
        .route("/id/:id", get(get_product_by_id))
        .route("/id/:id/update", patch(update_product))
        .route("/:id", delete(delete_product))
        .route("/brand-and-name", get(get_products_by_brand_and_name))
        .route("/category-and-brand", get(get_products_by_category_and_brand))
        .route("/name", get(get_products_by_name))
        .route("/brand", get(get_products_by_brand))
        .route("/category", get(get_products_by_category))
        .route("/count", get(count_products_by_brand_and_name))
}

fn parse_product_id(raw: &str) -> Result<ProductId, axum::response::Response> {
    raw.parse()
        .map_err(|_| error_response(StatusCode::BAD_REQUEST, "invalid product id"))
}

fn to_dtos(products: Vec<storefront_catalog::Product>) -> Vec<ProductDto> {
    products.into_iter().map(ProductDto::from).collect()
}

async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.get_all_products().await {
        Ok(products) => api_response(StatusCode::OK, "Products:", to_dtos(products)),
        Err(e) => catalog_error_to_response(e),
    }
}

async fn get_product_by_id(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_product_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.get_product_by_id(id).await {
        Ok(product) => api_response(StatusCode::OK, "Product:", ProductDto::from(product)),
        Err(e) => catalog_error_to_response(e),
    }
}

async fn add_product(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<AddProductRequest>,
) -> axum::response::Response {
    match services.add_product(body.into()).await {
        Ok(product) => api_response(StatusCode::OK, "Product added", ProductDto::from(product)),
        Err(e) => catalog_error_to_response(e),
    }
}

async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<UpdateProductRequest>,
) -> axum::response::Response {
    let id = match parse_product_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.update_product(id, body.into()).await {
        Ok(product) => api_response(StatusCode::OK, "Product updated", ProductDto::from(product)),
        Err(e) => catalog_error_to_response(e),
    }
}

async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_product_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.delete_product_by_id(id).await {
        Ok(()) => api_response(StatusCode::OK, "Product deleted", serde_json::Value::Null),
        Err(e) => catalog_error_to_response(e),
    }
}

// Filter endpoints: empty results are a valid answer and return 200 with an
// empty list, same as the full listing.

async fn get_products_by_brand_and_name(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<BrandAndNameQuery>,
) -> axum::response::Response {
    match services
        .get_products_by_brand_and_name(&query.brand_name, &query.product_name)
        .await
    {
        Ok(products) => api_response(StatusCode::OK, "Products:", to_dtos(products)),
        Err(e) => catalog_error_to_response(e),
    }
}

async fn get_products_by_category_and_brand(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<CategoryAndBrandQuery>,
) -> axum::response::Response {
    match services
        .get_products_by_category_and_brand(&query.category, &query.brand_name)
        .await
    {
        Ok(products) => api_response(StatusCode::OK, "Products:", to_dtos(products)),
        Err(e) => catalog_error_to_response(e),
    }
}

async fn get_products_by_name(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<NameQuery>,
) -> axum::response::Response {
    match services.get_products_by_name(&query.name).await {
        Ok(products) => api_response(StatusCode::OK, "Products:", to_dtos(products)),
        Err(e) => catalog_error_to_response(e),
    }
}

async fn get_products_by_brand(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<BrandQuery>,
) -> axum::response::Response {
    match services.get_products_by_brand(&query.brand).await {
        Ok(products) => api_response(StatusCode::OK, "Products:", to_dtos(products)),
        Err(e) => catalog_error_to_response(e),
    }
}

async fn get_products_by_category(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<CategoryQuery>,
) -> axum::response::Response {
    match services.get_products_by_category(&query.category).await {
        Ok(products) => api_response(StatusCode::OK, "Products:", to_dtos(products)),
        Err(e) => catalog_error_to_response(e),
    }
}

async fn count_products_by_brand_and_name(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<CountQuery>,
) -> axum::response::Response {
    match services
        .count_products_by_brand_and_name(&query.brand, &query.name)
        .await
    {
        Ok(count) => api_response(StatusCode::OK, "Total products:", count),
        Err(e) => catalog_error_to_response(e),
    }
}
