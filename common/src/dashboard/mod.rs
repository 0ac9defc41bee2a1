//! Dashboard aggregation: fans out one request per reporting section, tracks loading and
//! error state per section, and merges the results into a single [`DashboardData`].
//!
//! [`DashboardData`]: crate::model::dashboard::DashboardData

mod aggregator;
mod state;

pub use aggregator::{DashboardAggregator, DashboardSource, SubscriptionId};
pub use state::{DashboardState, LoadStatus, SectionState};
