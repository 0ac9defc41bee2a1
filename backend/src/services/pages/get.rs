//! # Page Retrieval
//!
//! `GET /api/pages/{page_id}`. There is no sensible default for a specific page, so a missing
//! page or an unreachable platform is reported to the editor as an error.

use super::inline_content;
use crate::error::ProxyError;
use crate::services::failure;
use crate::upstream::Upstream;
use actix_web::{web, HttpResponse};
use common::model::page::PageDocument;
use common::requests::ApiResponse;

pub async fn process(upstream: web::Data<Upstream>, page_id: web::Path<String>) -> HttpResponse {
    match get_page(&upstream, &page_id).await {
        Ok(page) => HttpResponse::Ok().json(ApiResponse::ok(page)),
        Err(e) => failure(&e),
    }
}

pub async fn get_page(upstream: &Upstream, page_id: &str) -> Result<PageDocument, ProxyError> {
    let record = upstream.get(&format!("pages/{}", page_id)).await?;
    Ok(serde_json::from_value(inline_content(record))?)
}
