//! # Catalog Service Module
//!
//! Read-only catalogs for the page editor. Both lists are fetched whole; searching and
//! category filtering happen in the admin UI.
//!
//! ## Sub-modules:
//! - `components`: single-section components (`/api/components`).
//! - `templates`: whole-page templates (`/api/templates`).
//!
//! When the platform is unavailable the components route serves one built-in entry per
//! native section type and the templates route serves the blank page, so the editor stays
//! usable offline.

mod components;
mod templates;

use actix_web::web::{get, scope};
use actix_web::Scope;

const COMPONENTS_PATH: &str = "/api/components";
const TEMPLATES_PATH: &str = "/api/templates";

/// *   **`GET /api/components`**: `components::process`
pub fn configure_component_routes() -> Scope {
    scope(COMPONENTS_PATH).route("", get().to(components::process))
}

/// *   **`GET /api/templates`**: `templates::process`
pub fn configure_template_routes() -> Scope {
    scope(TEMPLATES_PATH).route("", get().to(templates::process))
}

#[cfg(test)]
mod tests {
    use crate::services::test_support::{config_for, proxy_app, spawn_platform, unreachable_config};
    use actix_web::{test, web, HttpResponse};
    use serde_json::{json, Value};

    fn platform_routes(cfg: &mut web::ServiceConfig) {
        cfg.route(
            "/api/components",
            web::get().to(|| async {
                HttpResponse::Ok().json(json!([
                    {"id": 11, "name": "Pricing Hero", "description": "Hero with price tag",
                     "component_type": "hero", "default_render_code": "", "category": "marketing"}
                ]))
            }),
        )
        .route(
            "/api/templates",
            web::get().to(|| async {
                HttpResponse::Ok().json(json!({
                    "success": true,
                    "data": [{
                        "id": "t-1", "name": "Course Landing", "template_type": "course",
                        "category": "education",
                        "template_content": {"sections": [
                            {"id": "h", "type": "hero", "props": {"buttonText": "Enroll"}}
                        ]}
                    }, {
                        "id": 2, "name": "Legacy About", "template_type": "about",
                        "category": "company",
                        "template_content": {"sections": [
                            {"id": 41, "type": "content", "props": {"title": "Who we are"}}
                        ]}
                    }]
                }))
            }),
        );
    }

    #[actix_web::test]
    async fn test_components_are_translated() {
        let app = proxy_app!(config_for(spawn_platform(platform_routes)));
        let req = test::TestRequest::get().uri("/api/components").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["data"][0]["id"], json!("11"));
        assert_eq!(body["data"][0]["componentType"], json!("hero"));
        assert!(body.get("message").is_none());
    }

    #[actix_web::test]
    async fn test_templates_keep_section_props_literal() {
        let app = proxy_app!(config_for(spawn_platform(platform_routes)));
        let req = test::TestRequest::get().uri("/api/templates").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let template = &body["data"][0];
        assert_eq!(template["templateType"], json!("course"));
        assert_eq!(
            template["templateContent"]["sections"][0]["props"]["buttonText"],
            json!("Enroll")
        );
    }

    #[actix_web::test]
    async fn test_templates_with_numeric_section_ids_are_kept() {
        let app = proxy_app!(config_for(spawn_platform(platform_routes)));
        let req = test::TestRequest::get().uri("/api/templates").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["data"].as_array().unwrap().len(), 2);
        assert_eq!(body["data"][1]["id"], json!("2"));
        assert_eq!(body["data"][1]["templateContent"]["sections"][0]["id"], json!("41"));
    }

    #[actix_web::test]
    async fn test_offline_catalogs_fall_back_to_builtins() {
        let app = proxy_app!(unreachable_config());

        let req = test::TestRequest::get().uri("/api/components").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], json!(true));
        let types: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|c| c["componentType"].as_str())
            .collect();
        assert_eq!(types, ["hero", "features", "content", "contact", "cta"]);

        let req = test::TestRequest::get().uri("/api/templates").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"][0]["templateType"], json!("blank"));
        assert_eq!(body["data"][0]["templateContent"], json!({"sections": []}));
    }
}
