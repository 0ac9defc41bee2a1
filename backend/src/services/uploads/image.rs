//! # Image Upload
//!
//! `POST /api/upload/image`. The multipart body is read field by field; the `file` field is
//! buffered (bounded by `max_upload_bytes`) and must carry an `image/*` content type. The
//! buffered file is re-sent to the platform as multipart and the platform's answer is reduced
//! to the URL of the stored image.

use crate::config::Config;
use crate::error::ProxyError;
use crate::services::write_outcome;
use crate::upstream::Upstream;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use common::requests::ImageUpload;
use futures_util::StreamExt;
use log::info;
use serde_json::Value;

struct ReceivedImage {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

pub async fn process(
    upstream: web::Data<Upstream>,
    config: web::Data<Config>,
    payload: Multipart,
) -> HttpResponse {
    let result = match receive_image(payload, config.max_upload_bytes).await {
        Ok(image) => upload_image(&upstream, image).await,
        Err(e) => Err(e),
    };
    write_outcome(result, "Image uploaded")
}

async fn receive_image(mut payload: Multipart, max_bytes: usize) -> Result<ReceivedImage, ProxyError> {
    let mut received: Option<ReceivedImage> = None;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| ProxyError::BadRequest(e.to_string()))?;
        let field_name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));
        if field_name.as_deref() != Some("file") {
            continue;
        }

        let content_type = field
            .content_type()
            .map(|mime| mime.essence_str().to_string())
            .unwrap_or_default();
        if !content_type.starts_with("image/") {
            return Err(ProxyError::BadRequest(format!(
                "Only image files can be uploaded, got '{}'",
                if content_type.is_empty() { "unknown" } else { &content_type }
            )));
        }
        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| "image".to_string());

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| ProxyError::BadRequest(e.to_string()))?;
            if bytes.len() + chunk.len() > max_bytes {
                return Err(ProxyError::BadRequest(format!(
                    "Image is larger than {} bytes",
                    max_bytes
                )));
            }
            bytes.extend_from_slice(&chunk);
        }
        if bytes.is_empty() {
            return Err(ProxyError::BadRequest("Uploaded image is empty".to_string()));
        }

        received = Some(ReceivedImage {
            file_name,
            content_type,
            bytes,
        });
    }

    received.ok_or_else(|| ProxyError::BadRequest("Missing 'file' field".to_string()))
}

async fn upload_image(upstream: &Upstream, image: ReceivedImage) -> Result<ImageUpload, ProxyError> {
    let size = image.bytes.len();
    let answer = upstream
        .upload(
            "upload/image",
            image.file_name.clone(),
            &image.content_type,
            image.bytes,
        )
        .await?;
    let url = image_url(&answer)
        .ok_or_else(|| ProxyError::Rejected("upload answer carried no image URL".to_string()))?;
    info!("Uploaded {} ({} bytes) to {}", image.file_name, size, url);
    Ok(ImageUpload { url })
}

/// The platform answers with `"<url>"`, `{url}` or `{imageUrl}` depending on its version.
fn image_url(answer: &Value) -> Option<String> {
    match answer {
        Value::String(url) => Some(url.clone()),
        Value::Object(map) => ["url", "imageUrl", "location"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::to_string),
        _ => None,
    }
    .filter(|url| !url.is_empty())
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{config_for, proxy_app, spawn_platform, unreachable_config};
    use actix_web::{test, HttpResponse};
    use serde_json::json;

    const BOUNDARY: &str = "----thinkcyber-test";

    fn multipart_body(field: &str, file_name: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn upload_request(body: Vec<u8>) -> actix_web::test::TestRequest {
        test::TestRequest::post()
            .uri("/api/upload/image")
            .insert_header((
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(body)
    }

    fn platform_routes(cfg: &mut web::ServiceConfig) {
        cfg.route(
            "/api/upload/image",
            web::post().to(|| async {
                HttpResponse::Ok().json(json!({
                    "success": true,
                    "data": {"image_url": "https://cdn.thinkcyber.example/uploads/banner.png"}
                }))
            }),
        );
    }

    #[actix_web::test]
    async fn test_upload_returns_platform_url() {
        let app = proxy_app!(config_for(spawn_platform(platform_routes)));
        let req = upload_request(multipart_body("file", "banner.png", "image/png", b"\x89PNG....")).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["success"], json!(true));
        assert_eq!(
            body["data"]["url"],
            json!("https://cdn.thinkcyber.example/uploads/banner.png")
        );
    }

    #[actix_web::test]
    async fn test_non_image_is_rejected_before_forwarding() {
        let app = proxy_app!(unreachable_config());
        let req = upload_request(multipart_body("file", "notes.txt", "text/plain", b"hello")).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn test_missing_file_field_is_rejected() {
        let app = proxy_app!(unreachable_config());
        let req = upload_request(multipart_body("avatar", "a.png", "image/png", b"data")).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], json!("Invalid request: Missing 'file' field"));
    }

    #[actix_web::test]
    async fn test_oversized_image_is_rejected() {
        let mut config = unreachable_config();
        config.max_upload_bytes = 8;
        let app = proxy_app!(config);
        let req = upload_request(multipart_body("file", "big.png", "image/png", &[0u8; 64])).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }
}
