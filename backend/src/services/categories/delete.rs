//! `DELETE /api/categories/{category_id}`.

use crate::error::ProxyError;
use crate::services::write_outcome;
use crate::upstream::Upstream;
use actix_web::{web, HttpResponse};
use serde_json::{json, Value};

pub async fn process(upstream: web::Data<Upstream>, category_id: web::Path<String>) -> HttpResponse {
    write_outcome(
        delete_category(&upstream, &category_id).await,
        "Category deleted",
    )
}

pub async fn delete_category(upstream: &Upstream, category_id: &str) -> Result<Value, ProxyError> {
    upstream.delete(&format!("categories/{}", category_id)).await?;
    Ok(json!({ "id": category_id }))
}
