//! Typed calls to the proxy's `/api` routes.
//!
//! Every call resolves to `Result<_, String>`: transport failures, error envelopes and
//! unreadable bodies all become a message the caller can put in a toast. Reads that the proxy
//! served from its fallback data carry that explanation in [`Reply::message`].

use common::model::catalog::{ComponentEntry, TemplateEntry};
use common::model::dashboard::DashboardSection;
use common::model::page::PageDocument;
use common::requests::{ApiResponse, ImageUpload, NotificationBroadcast};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use web_sys::{File, FormData};

/// Payload of a successful call plus the proxy's informational message, if any.
pub struct Reply<T> {
    pub data: T,
    pub message: Option<String>,
}

async fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<Reply<T>, String> {
    let status = response.status();
    let envelope: ApiResponse<T> = response
        .json()
        .await
        .map_err(|e| format!("Unreadable response (HTTP {}): {}", status, e))?;
    let message = envelope.message.clone();
    envelope.into_result().map(|data| Reply { data, message })
}

async fn get<T: DeserializeOwned>(path: &str) -> Result<Reply<T>, String> {
    let response = Request::get(path).send().await.map_err(|e| e.to_string())?;
    read_envelope(response).await
}

async fn send_json<B: Serialize, T: DeserializeOwned>(
    builder: RequestBuilder,
    body: &B,
) -> Result<Reply<T>, String> {
    let response = builder
        .json(body)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    read_envelope(response).await
}

pub async fn list_pages() -> Result<Reply<Vec<PageDocument>>, String> {
    get("/api/pages").await
}

pub async fn get_page(page_id: &str) -> Result<PageDocument, String> {
    get(&format!("/api/pages/{}", page_id)).await.map(|r| r.data)
}

/// Creates the page when it has no id yet, replaces it otherwise.
pub async fn save_page(page: &PageDocument) -> Result<PageDocument, String> {
    let builder = match page.id.as_deref().filter(|id| !id.is_empty()) {
        Some(id) => Request::put(&format!("/api/pages/{}", id)),
        None => Request::post("/api/pages"),
    };
    send_json(builder, page).await.map(|r| r.data)
}

pub async fn delete_page(page_id: &str) -> Result<(), String> {
    let response = Request::delete(&format!("/api/pages/{}", page_id))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    read_envelope::<Value>(response).await.map(|_| ())
}

pub async fn list_components() -> Result<Reply<Vec<ComponentEntry>>, String> {
    get("/api/components").await
}

pub async fn list_templates() -> Result<Reply<Vec<TemplateEntry>>, String> {
    get("/api/templates").await
}

pub async fn dashboard_section(section: DashboardSection) -> Result<Reply<Value>, String> {
    get(&format!("/api/dashboard/{}", section.endpoint())).await
}

pub async fn broadcast(notification: &NotificationBroadcast) -> Result<Reply<Value>, String> {
    send_json(Request::post("/api/notifications/broadcast"), notification).await
}

/// Uploads one image as the multipart field `file` and returns its URL.
pub async fn upload_image(file: File) -> Result<String, String> {
    let form = FormData::new().map_err(|_| "Cannot build upload form".to_string())?;
    form.append_with_blob_and_filename("file", &file, &file.name())
        .map_err(|_| "Cannot attach file".to_string())?;
    let response = Request::post("/api/upload/image")
        .body(form)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    read_envelope::<ImageUpload>(response)
        .await
        .map(|reply| reply.data.url)
}
