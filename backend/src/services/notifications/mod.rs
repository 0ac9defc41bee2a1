//! # Notification Service Module
//!
//! `POST /api/notifications/broadcast` pushes one message to an audience of platform users.
//! The message is validated here; delivery is the platform's job.

use crate::error::ProxyError;
use crate::services::write_outcome;
use crate::upstream::Upstream;
use actix_web::web::{post, scope};
use actix_web::{web, HttpResponse, Scope};
use common::requests::NotificationBroadcast;
use log::info;
use reqwest::Method;
use serde_json::Value;

const API_PATH: &str = "/api/notifications";

/// *   **`POST /broadcast`**: `process`
pub fn configure_routes() -> Scope {
    scope(API_PATH).route("/broadcast", post().to(process))
}

pub async fn process(
    upstream: web::Data<Upstream>,
    broadcast: web::Json<NotificationBroadcast>,
) -> HttpResponse {
    write_outcome(
        send_broadcast(&upstream, broadcast.into_inner()).await,
        "Notification sent",
    )
}

pub async fn send_broadcast(
    upstream: &Upstream,
    broadcast: NotificationBroadcast,
) -> Result<Value, ProxyError> {
    broadcast.validate()?;
    let answer = upstream
        .send(
            Method::POST,
            "notifications/broadcast",
            serde_json::to_value(&broadcast)?,
        )
        .await?;
    info!("Broadcast '{}' to {:?}", broadcast.title, broadcast.audience);
    Ok(answer)
}

#[cfg(test)]
mod tests {
    use crate::services::test_support::{config_for, proxy_app, spawn_platform, unreachable_config};
    use actix_web::{test, web, HttpResponse};
    use serde_json::{json, Value};

    fn platform_routes(cfg: &mut web::ServiceConfig) {
        cfg.route(
            "/api/notifications/broadcast",
            web::post().to(|body: web::Json<Value>| async move {
                HttpResponse::Ok().json(json!({
                    "success": true,
                    "data": {"recipients": 42, "audience": body["audience"].clone()}
                }))
            }),
        );
    }

    #[actix_web::test]
    async fn test_broadcast_is_forwarded() {
        let app = proxy_app!(config_for(spawn_platform(platform_routes)));
        let req = test::TestRequest::post()
            .uri("/api/notifications/broadcast")
            .set_json(json!({"title": "New course", "message": "Zero Trust 101 is live", "audience": "subscribers"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"], json!({"recipients": 42, "audience": "subscribers"}));
        assert_eq!(body["message"], json!("Notification sent"));
    }

    #[actix_web::test]
    async fn test_empty_message_is_rejected() {
        let app = proxy_app!(unreachable_config());
        let req = test::TestRequest::post()
            .uri("/api/notifications/broadcast")
            .set_json(json!({"title": "New course", "message": ""}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], json!("Field 'message' is required"));
    }
}
