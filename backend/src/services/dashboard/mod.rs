//! # Dashboard Service Module
//!
//! `GET /api/dashboard/{section}` serves one dashboard widget's record. The admin UI fetches
//! all six sections concurrently and settles each one on its own, so this route deals with a
//! single section per request.
//!
//! `{section}` accepts the endpoint form (`monthly-progress`) or the data key
//! (`monthlyProgress`). Unknown sections are a 404. Upstream records are checked against the
//! section's shape and completed with zero values; an unreachable or malformed upstream yields
//! the zeroed record.

use crate::error::ProxyError;
use crate::services::{failure, read_or_fallback};
use crate::upstream::Upstream;
use actix_web::web::{get, scope};
use actix_web::{web, HttpResponse, Scope};
use common::model::dashboard::{DashboardData, DashboardSection};
use serde_json::Value;

/// The base path for dashboard endpoints.
const API_PATH: &str = "/api/dashboard";

/// *   **`GET /{section}`**: `process`
pub fn configure_routes() -> Scope {
    scope(API_PATH).route("/{section}", get().to(process))
}

pub async fn process(upstream: web::Data<Upstream>, section: web::Path<String>) -> HttpResponse {
    let section = match section.parse::<DashboardSection>() {
        Ok(section) => section,
        Err(e) => return failure(&ProxyError::NotFound(e.to_string())),
    };
    read_or_fallback(
        fetch_section(&upstream, section).await,
        || DashboardData::empty_record(section),
        section.title(),
    )
}

pub async fn fetch_section(
    upstream: &Upstream,
    section: DashboardSection,
) -> Result<Value, ProxyError> {
    let record = upstream
        .get(&format!("dashboard/{}", section.endpoint()))
        .await?;
    Ok(DashboardData::normalize(section, record)?)
}

#[cfg(test)]
mod tests {
    use crate::services::test_support::{config_for, proxy_app, spawn_platform, unreachable_config};
    use actix_web::{test, web, HttpResponse};
    use serde_json::{json, Value};

    fn platform_routes(cfg: &mut web::ServiceConfig) {
        cfg.route(
            "/api/dashboard/overview",
            web::get().to(|| async {
                HttpResponse::Ok().json(json!({
                    "success": true,
                    "data": {"total_users": 1520, "total_courses": 34}
                }))
            }),
        )
        .route(
            "/api/dashboard/earnings",
            web::get().to(|| async {
                HttpResponse::Ok().json(json!({"success": true, "data": {"this_month": "a lot"}}))
            }),
        )
        .route(
            "/api/dashboard/monthly-report",
            web::get().to(|| async { HttpResponse::Ok().json(json!({"success": true, "data": [1, 2]})) }),
        )
        .route(
            "/api/dashboard/analytics",
            web::get().to(|| async { HttpResponse::InternalServerError().body("boom") }),
        );
    }

    #[actix_web::test]
    async fn test_section_is_translated_and_completed() {
        let app = proxy_app!(config_for(spawn_platform(platform_routes)));
        let req = test::TestRequest::get().uri("/api/dashboard/overview").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["data"]["totalUsers"], json!(1520));
        assert_eq!(body["data"]["totalCourses"], json!(34));
        assert_eq!(body["data"]["activeSubscriptions"], json!(0));
        assert!(body.get("message").is_none());
    }

    #[actix_web::test]
    async fn test_malformed_or_failing_sections_fall_back_to_zeroes() {
        let app = proxy_app!(config_for(spawn_platform(platform_routes)));
        for uri in [
            "/api/dashboard/earnings",
            "/api/dashboard/monthly-report",
            "/api/dashboard/analytics",
        ] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert!(resp.status().is_success(), "{uri}");
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["success"], json!(true));
            assert!(body["message"].is_string(), "{uri}");
        }

        let req = test::TestRequest::get()
            .uri("/api/dashboard/monthly-report")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["newUsers"], json!(0));
        assert_eq!(body["data"]["month"], json!(""));
    }

    #[actix_web::test]
    async fn test_key_form_is_accepted_offline() {
        let app = proxy_app!(unreachable_config());
        let req = test::TestRequest::get()
            .uri("/api/dashboard/monthlyProgress")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"], json!({"months": []}));
    }

    #[actix_web::test]
    async fn test_unknown_section_is_not_found() {
        let app = proxy_app!(unreachable_config());
        let req = test::TestRequest::get().uri("/api/dashboard/revenue").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], json!(false));
    }
}
