//! # Page Listing
//!
//! `GET /api/pages`. Returns every page known to the platform; when the platform cannot be
//! reached the list is empty and `message` says why.

use super::inline_content;
use crate::error::ProxyError;
use crate::services::{decode_list, read_or_fallback};
use crate::upstream::Upstream;
use actix_web::{web, HttpResponse};
use common::model::page::PageDocument;
use serde_json::Value;

pub async fn process(upstream: web::Data<Upstream>) -> HttpResponse {
    read_or_fallback(list_pages(&upstream).await, Vec::new, "pages")
}

pub async fn list_pages(upstream: &Upstream) -> Result<Vec<PageDocument>, ProxyError> {
    let records = match upstream.get("pages").await? {
        Value::Array(items) => Value::Array(items.into_iter().map(inline_content).collect()),
        other => other,
    };
    decode_list(records, "page")
}
