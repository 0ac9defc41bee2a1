//! `POST /api/categories`.

use crate::error::ProxyError;
use crate::services::write_outcome;
use crate::upstream::Upstream;
use actix_web::{web, HttpResponse};
use common::requests::Category;
use log::info;
use reqwest::Method;

pub async fn process(upstream: web::Data<Upstream>, category: web::Json<Category>) -> HttpResponse {
    write_outcome(
        create_category(&upstream, category.into_inner()).await,
        "Category created",
    )
}

pub async fn create_category(upstream: &Upstream, category: Category) -> Result<Category, ProxyError> {
    category.validate()?;
    let answer = upstream
        .send(Method::POST, "categories", serde_json::to_value(&category)?)
        .await?;
    let created = if answer.is_null() {
        category
    } else {
        serde_json::from_value(answer)?
    };
    info!("Created category '{}'", created.name);
    Ok(created)
}
