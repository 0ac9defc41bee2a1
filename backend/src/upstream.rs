//! Client for the platform REST API that the `/api` routes forward to.
//!
//! Every call translates keys (camelCase out, snake_case in), unwraps the platform's
//! `{success, data | error}` envelope and turns any failure into a [`ProxyError`].

use crate::case::{keys_to_camel, keys_to_snake};
use crate::config::Config;
use crate::error::ProxyError;
use log::debug;
use reqwest::{multipart, Client, Method, Response};
use serde_json::Value;

#[derive(Clone)]
pub struct Upstream {
    client: Client,
    base_url: String,
}

impl Upstream {
    pub fn new(config: &Config) -> Result<Self, ProxyError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            client,
            base_url: config.backend_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get(&self, path: &str) -> Result<Value, ProxyError> {
        debug!("GET {}", self.url(path));
        let response = self.client.get(self.url(path)).send().await?;
        decode(response).await
    }

    /// Sends `body` (admin UI casing) with `method` and returns the decoded answer.
    pub async fn send(&self, method: Method, path: &str, body: Value) -> Result<Value, ProxyError> {
        debug!("{} {}", method, self.url(path));
        let response = self
            .client
            .request(method, self.url(path))
            .json(&keys_to_snake(body))
            .send()
            .await?;
        decode(response).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, ProxyError> {
        debug!("DELETE {}", self.url(path));
        let response = self.client.delete(self.url(path)).send().await?;
        decode(response).await
    }

    /// Forwards one file as the multipart field `file`.
    pub async fn upload(
        &self,
        path: &str,
        file_name: String,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Value, ProxyError> {
        debug!("POST {} ({} bytes, {})", self.url(path), bytes.len(), content_type);
        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(content_type)?;
        let form = multipart::Form::new().part("file", part);
        let response = self
            .client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await?;
        decode(response).await
    }
}

async fn decode(response: Response) -> Result<Value, ProxyError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .as_ref()
            .and_then(error_message)
            .unwrap_or_else(|| body.chars().take(200).collect());
        return Err(ProxyError::Status {
            status: status.as_u16(),
            message,
        });
    }

    let value = if body.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&body)?
    };
    unwrap_envelope(value).map(keys_to_camel)
}

fn error_message(value: &Value) -> Option<String> {
    ["error", "message"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

/// Accepts both enveloped (`{success, data}`) and bare payloads.
fn unwrap_envelope(value: Value) -> Result<Value, ProxyError> {
    let Some(success) = value.get("success").and_then(Value::as_bool) else {
        return Ok(value);
    };
    if !success {
        return Err(ProxyError::Rejected(
            error_message(&value).unwrap_or_else(|| "unknown error".to_string()),
        ));
    }
    match value {
        Value::Object(mut map) => Ok(map.remove("data").unwrap_or(Value::Null)),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_is_unwrapped() {
        let value = unwrap_envelope(json!({"success": true, "data": [1, 2]})).unwrap();
        assert_eq!(value, json!([1, 2]));
    }

    #[test]
    fn test_bare_payload_passes_through() {
        let value = unwrap_envelope(json!({"url": "/uploads/a.png"})).unwrap();
        assert_eq!(value, json!({"url": "/uploads/a.png"}));
    }

    #[test]
    fn test_unsuccessful_envelope_is_rejected() {
        let err = unwrap_envelope(json!({"success": false, "error": "slug taken"})).unwrap_err();
        assert_eq!(err.to_string(), "Backend rejected the request: slug taken");
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let config = Config {
            backend_url: "http://localhost:8081/api/".into(),
            ..Config::default()
        };
        let upstream = Upstream::new(&config).unwrap();
        assert_eq!(upstream.url("/pages/3"), "http://localhost:8081/api/pages/3");
        assert_eq!(upstream.url("components"), "http://localhost:8081/api/components");
    }
}
