//! # API Services
//!
//! Every `/api` route forwards to the platform REST API through [`Upstream`] and answers with
//! an [`ApiResponse`] envelope. Two response policies apply:
//!
//! - **Reads** (lists, catalogs, dashboard sections) never fail towards the admin UI. When the
//!   platform is unreachable or answers with something unusable, the route logs a warning and
//!   serves a local fallback with `success: true` and an explanatory `message`.
//! - **Writes** (saves, deletes, uploads, broadcasts) report the failure: the status code comes
//!   from [`ProxyError::status_code`] and the body is `{success: false, error}`.

pub mod catalog;
pub mod categories;
pub mod dashboard;
pub mod notifications;
pub mod pages;
pub mod uploads;

use crate::error::ProxyError;
use actix_web::error::InternalError;
use actix_web::{web, HttpResponse};
use common::requests::ApiResponse;
use log::{error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Registers every `/api` scope.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(pages::configure_routes())
        .service(catalog::configure_component_routes())
        .service(catalog::configure_template_routes())
        .service(uploads::configure_routes())
        .service(dashboard::configure_routes())
        .service(categories::configure_routes())
        .service(notifications::configure_routes());
}

/// JSON extractor settings shared by all routes: a body size cap and enveloped 400 errors.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            let response =
                HttpResponse::BadRequest().json(ApiResponse::<()>::failure(err.to_string()));
            InternalError::from_response(err, response).into()
        })
}

/// Answers a read with upstream data, or with `fallback` when the upstream call failed.
pub(crate) fn read_or_fallback<T: Serialize>(
    result: Result<T, ProxyError>,
    fallback: impl FnOnce() -> T,
    what: &str,
) -> HttpResponse {
    match result {
        Ok(data) => HttpResponse::Ok().json(ApiResponse::ok(data)),
        Err(e) => {
            warn!("Serving fallback {}: {}", what, e);
            HttpResponse::Ok().json(ApiResponse::fallback(
                fallback(),
                format!("Platform API unavailable, showing default {}", what),
            ))
        }
    }
}

/// Answers a write: the upstream result on success, an error envelope otherwise.
pub(crate) fn write_outcome<T: Serialize>(
    result: Result<T, ProxyError>,
    done: &str,
) -> HttpResponse {
    match result {
        Ok(data) => HttpResponse::Ok().json(ApiResponse::ok_with_message(data, done)),
        Err(e) => failure(&e),
    }
}

pub(crate) fn failure(err: &ProxyError) -> HttpResponse {
    let status = err.status_code();
    if status.is_server_error() {
        error!("{}", err);
    } else {
        warn!("{}", err);
    }
    HttpResponse::build(status).json(ApiResponse::<()>::failure(err.to_string()))
}

/// Decodes an upstream list item by item. Items that do not match `T` are skipped.
pub(crate) fn decode_list<T: DeserializeOwned>(value: Value, what: &str) -> Result<Vec<T>, ProxyError> {
    let Value::Array(items) = value else {
        return Err(ProxyError::Rejected(format!("expected a list of {}", what)));
    };
    let total = items.len();
    let decoded: Vec<T> = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping malformed {} entry: {}", what, e);
                None
            }
        })
        .collect();
    if decoded.len() < total {
        warn!("{} of {} {} entries were skipped", total - decoded.len(), total, what);
    }
    Ok(decoded)
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Helpers for route tests: an in-process fake platform API and an unreachable one.

    use crate::config::Config;
    use crate::upstream::Upstream;
    use actix_web::{web, App, HttpServer};

    pub fn config_for(backend_url: String) -> Config {
        Config {
            backend_url,
            request_timeout_secs: 5,
            open_browser: false,
            ..Config::default()
        }
    }

    /// A base URL whose port has nothing listening on it.
    pub fn unreachable_config() -> Config {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        config_for(format!("http://127.0.0.1:{}/api", port))
    }

    /// Starts a fake platform API configured by `routes` and returns its `/api` base URL.
    pub fn spawn_platform(routes: fn(&mut web::ServiceConfig)) -> String {
        let server = HttpServer::new(move || App::new().configure(routes))
            .workers(1)
            .disable_signals()
            .bind(("127.0.0.1", 0))
            .unwrap();
        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());
        format!("http://{}/api", addr)
    }

    pub fn upstream(config: &Config) -> Upstream {
        Upstream::new(config).unwrap()
    }

    /// Builds the full `/api` app under test against the platform named in `config`.
    macro_rules! proxy_app {
        ($config:expr) => {{
            let config: $crate::config::Config = $config;
            ::actix_web::test::init_service(
                ::actix_web::App::new()
                    .app_data(::actix_web::web::Data::new(
                        $crate::services::test_support::upstream(&config),
                    ))
                    .app_data($crate::services::json_config(config.json_limit_bytes))
                    .app_data(::actix_web::web::Data::new(config))
                    .configure($crate::services::configure_api),
            )
            .await
        }};
    }

    pub(crate) use proxy_app;
}
