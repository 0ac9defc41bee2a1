//! `GET /api/components`.

use crate::error::ProxyError;
use crate::services::{decode_list, read_or_fallback};
use crate::upstream::Upstream;
use actix_web::{web, HttpResponse};
use common::model::catalog::{builtin_components, ComponentEntry};

pub async fn process(upstream: web::Data<Upstream>) -> HttpResponse {
    read_or_fallback(list_components(&upstream).await, builtin_components, "components")
}

pub async fn list_components(upstream: &Upstream) -> Result<Vec<ComponentEntry>, ProxyError> {
    decode_list(upstream.get("components").await?, "component")
}
