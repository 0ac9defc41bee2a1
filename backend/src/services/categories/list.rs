//! `GET /api/categories`.

use crate::error::ProxyError;
use crate::services::{decode_list, read_or_fallback};
use crate::upstream::Upstream;
use actix_web::{web, HttpResponse};
use common::requests::Category;

pub async fn process(upstream: web::Data<Upstream>) -> HttpResponse {
    read_or_fallback(list_categories(&upstream).await, Vec::new, "categories")
}

pub async fn list_categories(upstream: &Upstream) -> Result<Vec<Category>, ProxyError> {
    decode_list(upstream.get("categories").await?, "category")
}
