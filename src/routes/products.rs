use actix_web::{HttpRequest, HttpResponse, Responder, get, web};
use serde::Deserialize;
use serde_json::json;

use crate::forms::product::ProductsQueryParams;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::product as product_service;

#[get("/products")]
/// Filtered, sorted and paged catalog listing.
pub async fn list_products(req: HttpRequest, repo: web::Data<DieselRepository>) -> impl Responder {
    // Decoded by hand so that `color` and `size` may repeat.
    let params = match serde_html_form::from_str::<ProductsQueryParams>(req.query_string()) {
        Ok(params) => params,
        Err(err) => {
            return HttpResponse::BadRequest().json(json!({ "error": err.to_string() }));
        }
    };

    match product_service::list_products(repo.get_ref(), params) {
        Ok(page) => HttpResponse::Accepted().json(page),
        Err(err) => error_response(err),
    }
}

#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

#[get("/products/search")]
pub async fn search_products(
    params: web::Query<SearchParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match product_service::search_products(repo.get_ref(), &params.q) {
        Ok(products) => HttpResponse::Ok().json(products),
        Err(err) => error_response(err),
    }
}

#[get("/products/id/{id}")]
pub async fn find_product_by_id(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match product_service::find_product_by_id(repo.get_ref(), path.into_inner()) {
        Ok(product) => HttpResponse::Accepted().json(product),
        Err(err) => error_response(err),
    }
}
