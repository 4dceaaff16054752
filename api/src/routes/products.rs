use actix_web::{HttpResponse, get, web};
use payloads::{TOTAL_COUNT_HEADER, requests::ListProducts};

use super::APIError;
use crate::store::{self, Catalog};

/// One page of products. The window may be given as `limit`/`skip` or as
/// `_page`/`_limit`; the number of matching products is also reported in
/// the total-count header.
#[tracing::instrument(skip(catalog))]
#[get("/products")]
pub async fn list_products(
    query: web::Query<ListProducts>,
    catalog: web::Data<Catalog>,
) -> Result<HttpResponse, APIError> {
    let list = store::list_products(&query, &catalog)?;
    Ok(HttpResponse::Ok()
        .insert_header((TOTAL_COUNT_HEADER, list.total.to_string()))
        .json(list))
}

#[tracing::instrument(skip(catalog), ret)]
#[get("/products/categories")]
pub async fn list_categories(
    catalog: web::Data<Catalog>,
) -> Result<HttpResponse, APIError> {
    let categories = store::list_categories(&catalog);
    Ok(HttpResponse::Ok().json(categories))
}
