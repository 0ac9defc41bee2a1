//! `GET /api/templates`.

use crate::error::ProxyError;
use crate::services::{decode_list, read_or_fallback};
use crate::upstream::Upstream;
use actix_web::{web, HttpResponse};
use common::model::catalog::{blank_template, TemplateEntry};

pub async fn process(upstream: web::Data<Upstream>) -> HttpResponse {
    read_or_fallback(
        list_templates(&upstream).await,
        || vec![blank_template()],
        "templates",
    )
}

pub async fn list_templates(upstream: &Upstream) -> Result<Vec<TemplateEntry>, ProxyError> {
    decode_list(upstream.get("templates").await?, "template")
}
