//! # Page Persistence
//!
//! `POST /api/pages` creates a page and `PUT /api/pages/{page_id}` replaces one.
//!
//! The document is validated first (title, slug format, unique section ids); an invalid page
//! never reaches the platform. The platform may answer with the full stored record or with
//! only the fields it generated (`id`, timestamps), so its answer is laid over the submitted
//! document before it is returned.

use super::inline_content;
use crate::error::ProxyError;
use crate::services::write_outcome;
use crate::upstream::Upstream;
use actix_web::{web, HttpResponse};
use common::model::page::PageDocument;
use log::info;
use reqwest::Method;
use serde_json::Value;

pub async fn create(upstream: web::Data<Upstream>, page: web::Json<PageDocument>) -> HttpResponse {
    let mut page = page.into_inner();
    page.id = None;
    write_outcome(save_page(&upstream, page).await, "Page created")
}

pub async fn update(
    upstream: web::Data<Upstream>,
    page_id: web::Path<String>,
    page: web::Json<PageDocument>,
) -> HttpResponse {
    let mut page = page.into_inner();
    page.id = Some(page_id.into_inner());
    write_outcome(save_page(&upstream, page).await, "Page updated")
}

/// Validates and forwards `page`. A page without an id is created, otherwise it is replaced.
pub async fn save_page(upstream: &Upstream, page: PageDocument) -> Result<PageDocument, ProxyError> {
    page.validate()?;

    let (method, path) = match &page.id {
        Some(id) => (Method::PUT, format!("pages/{}", id)),
        None => (Method::POST, "pages".to_string()),
    };
    let submitted = serde_json::to_value(&page)?;
    let answer = upstream.send(method, &path, submitted.clone()).await?;
    let saved = merge_saved(submitted, answer)?;
    info!(
        "Saved page '{}' ({} sections) as {}",
        saved.slug,
        saved.content.len(),
        saved.id.as_deref().unwrap_or("<no id>")
    );
    Ok(saved)
}

fn merge_saved(submitted: Value, answer: Value) -> Result<PageDocument, ProxyError> {
    let mut merged = submitted;
    if let (Value::Object(base), Value::Object(returned)) = (&mut merged, inline_content(answer)) {
        for (key, value) in returned {
            if !value.is_null() {
                base.insert(key, value);
            }
        }
    }
    Ok(serde_json::from_value(merged)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_keeps_submitted_fields_and_adds_generated_ones() {
        let submitted = json!({"title": "Pricing", "slug": "pricing", "content": {"sections": []}});
        let saved = merge_saved(submitted, json!({"id": 8, "updatedAt": "2026-10-16"})).unwrap();
        assert_eq!(saved.id.as_deref(), Some("8"));
        assert_eq!(saved.title, "Pricing");
        assert_eq!(saved.updated_at.as_deref(), Some("2026-10-16"));
    }

    #[test]
    fn test_merge_ignores_empty_answer() {
        let submitted = json!({"id": "5", "title": "Pricing", "slug": "pricing"});
        let saved = merge_saved(submitted, Value::Null).unwrap();
        assert_eq!(saved.id.as_deref(), Some("5"));
    }
}
