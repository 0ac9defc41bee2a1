//! # Page Removal
//!
//! `DELETE /api/pages/{page_id}`. Answers with the id that was removed.

use crate::error::ProxyError;
use crate::services::write_outcome;
use crate::upstream::Upstream;
use actix_web::{web, HttpResponse};
use log::info;
use serde_json::{json, Value};

pub async fn process(upstream: web::Data<Upstream>, page_id: web::Path<String>) -> HttpResponse {
    write_outcome(delete_page(&upstream, &page_id).await, "Page deleted")
}

pub async fn delete_page(upstream: &Upstream, page_id: &str) -> Result<Value, ProxyError> {
    upstream.delete(&format!("pages/{}", page_id)).await?;
    info!("Deleted page {}", page_id);
    Ok(json!({ "id": page_id }))
}
