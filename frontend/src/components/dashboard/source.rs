//! Browser side of the dashboard: the HTTP source and the context handle views share.

use std::future::Future;
use std::rc::Rc;

use common::dashboard::{DashboardAggregator, DashboardSource};
use common::model::dashboard::DashboardSection;
use gloo_console::warn;
use serde_json::Value;

use crate::api;

/// Fetches sections from `/api/dashboard/{section}`.
pub struct HttpDashboardSource;

impl DashboardSource for HttpDashboardSource {
    fn fetch(&self, section: DashboardSection) -> impl Future<Output = Result<Value, String>> {
        async move {
            let reply = api::dashboard_section(section).await?;
            if let Some(message) = reply.message {
                warn!(format!("{}: {}", section.title(), message));
            }
            Ok(reply.data)
        }
    }
}

/// The one aggregator instance of the app, provided through a Yew context.
#[derive(Clone)]
pub struct DashboardHandle(pub Rc<DashboardAggregator<HttpDashboardSource>>);

impl DashboardHandle {
    pub fn new() -> Self {
        Self(Rc::new(DashboardAggregator::new(HttpDashboardSource)))
    }
}

impl PartialEq for DashboardHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
