//! Reporting records shown on the admin dashboard. Each section is fetched from its own
//! endpoint and every record tolerates missing fields.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DashboardSection {
    Overview,
    Earnings,
    MonthlyProgress,
    MonthlyReport,
    Updates,
    Analytics,
}

impl DashboardSection {
    pub const ALL: [DashboardSection; 6] = [
        DashboardSection::Overview,
        DashboardSection::Earnings,
        DashboardSection::MonthlyProgress,
        DashboardSection::MonthlyReport,
        DashboardSection::Updates,
        DashboardSection::Analytics,
    ];

    /// Field name inside [`DashboardData`].
    pub fn key(self) -> &'static str {
        match self {
            DashboardSection::Overview => "overview",
            DashboardSection::Earnings => "earnings",
            DashboardSection::MonthlyProgress => "monthlyProgress",
            DashboardSection::MonthlyReport => "monthlyReport",
            DashboardSection::Updates => "updates",
            DashboardSection::Analytics => "analytics",
        }
    }

    /// Path segment used by `/api/dashboard/{endpoint}` and by the reporting backend.
    pub fn endpoint(self) -> &'static str {
        match self {
            DashboardSection::Overview => "overview",
            DashboardSection::Earnings => "earnings",
            DashboardSection::MonthlyProgress => "monthly-progress",
            DashboardSection::MonthlyReport => "monthly-report",
            DashboardSection::Updates => "updates",
            DashboardSection::Analytics => "analytics",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            DashboardSection::Overview => "Overview",
            DashboardSection::Earnings => "Earnings",
            DashboardSection::MonthlyProgress => "Monthly Progress",
            DashboardSection::MonthlyReport => "Monthly Report",
            DashboardSection::Updates => "Recent Updates",
            DashboardSection::Analytics => "Analytics",
        }
    }
}

impl fmt::Display for DashboardSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSection(pub String);

impl fmt::Display for UnknownSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown dashboard section '{}'", self.0)
    }
}

impl FromStr for DashboardSection {
    type Err = UnknownSection;

    /// Accepts either the endpoint slug or the field key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DashboardSection::ALL
            .into_iter()
            .find(|section| section.endpoint() == s || section.key() == s)
            .ok_or_else(|| UnknownSection(s.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Overview {
    pub total_users: u64,
    pub total_courses: u64,
    pub total_categories: u64,
    pub active_subscriptions: u64,
    pub total_revenue: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Earnings {
    pub total_earnings: f64,
    pub this_month: f64,
    pub last_month: f64,
    pub growth_percentage: f64,
    pub currency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MonthlyPoint {
    pub month: String,
    pub new_users: u64,
    pub enrollments: u64,
    pub revenue: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MonthlyProgress {
    pub months: Vec<MonthlyPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MonthlyReport {
    pub month: String,
    pub new_users: u64,
    pub new_subscriptions: u64,
    pub completed_courses: u64,
    pub revenue: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub kind: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecentUpdates {
    pub items: Vec<UpdateItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TopCourse {
    pub title: String,
    pub enrollments: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Analytics {
    pub page_views: u64,
    pub unique_visitors: u64,
    pub bounce_rate: f64,
    pub average_session_seconds: f64,
    pub top_courses: Vec<TopCourse>,
}

/// Everything the dashboard widgets read. Each field is loaded independently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardData {
    pub overview: Option<Overview>,
    pub earnings: Option<Earnings>,
    pub monthly_progress: Option<MonthlyProgress>,
    pub monthly_report: Option<MonthlyReport>,
    pub updates: Option<RecentUpdates>,
    pub analytics: Option<Analytics>,
}

impl DashboardData {
    pub fn has(&self, section: DashboardSection) -> bool {
        match section {
            DashboardSection::Overview => self.overview.is_some(),
            DashboardSection::Earnings => self.earnings.is_some(),
            DashboardSection::MonthlyProgress => self.monthly_progress.is_some(),
            DashboardSection::MonthlyReport => self.monthly_report.is_some(),
            DashboardSection::Updates => self.updates.is_some(),
            DashboardSection::Analytics => self.analytics.is_some(),
        }
    }

    /// Decodes `payload` into the record for `section` and stores it.
    pub fn set_from_value(
        &mut self,
        section: DashboardSection,
        payload: serde_json::Value,
    ) -> Result<(), serde_json::Error> {
        // Records are structs, which serde would otherwise also read from a positional array.
        if !payload.is_object() {
            return Err(serde::de::Error::custom(format!(
                "expected a JSON object for {}",
                section.key()
            )));
        }
        match section {
            DashboardSection::Overview => self.overview = Some(serde_json::from_value(payload)?),
            DashboardSection::Earnings => self.earnings = Some(serde_json::from_value(payload)?),
            DashboardSection::MonthlyProgress => {
                self.monthly_progress = Some(serde_json::from_value(payload)?)
            }
            DashboardSection::MonthlyReport => {
                self.monthly_report = Some(serde_json::from_value(payload)?)
            }
            DashboardSection::Updates => self.updates = Some(serde_json::from_value(payload)?),
            DashboardSection::Analytics => self.analytics = Some(serde_json::from_value(payload)?),
        }
        Ok(())
    }

    /// The stored record for `section`, `null` when it has never loaded.
    pub fn record(&self, section: DashboardSection) -> Result<serde_json::Value, serde_json::Error> {
        match section {
            DashboardSection::Overview => serde_json::to_value(&self.overview),
            DashboardSection::Earnings => serde_json::to_value(&self.earnings),
            DashboardSection::MonthlyProgress => serde_json::to_value(&self.monthly_progress),
            DashboardSection::MonthlyReport => serde_json::to_value(&self.monthly_report),
            DashboardSection::Updates => serde_json::to_value(&self.updates),
            DashboardSection::Analytics => serde_json::to_value(&self.analytics),
        }
    }

    /// Checks `payload` against the record shape for `section` and fills in missing fields.
    pub fn normalize(
        section: DashboardSection,
        payload: serde_json::Value,
    ) -> Result<serde_json::Value, serde_json::Error> {
        let mut scratch = DashboardData::default();
        scratch.set_from_value(section, payload)?;
        scratch.record(section)
    }

    /// A zeroed record for `section`, used as the proxy's fallback payload.
    pub fn empty_record(section: DashboardSection) -> serde_json::Value {
        let value = match section {
            DashboardSection::Overview => serde_json::to_value(Overview::default()),
            DashboardSection::Earnings => serde_json::to_value(Earnings::default()),
            DashboardSection::MonthlyProgress => serde_json::to_value(MonthlyProgress::default()),
            DashboardSection::MonthlyReport => serde_json::to_value(MonthlyReport::default()),
            DashboardSection::Updates => serde_json::to_value(RecentUpdates::default()),
            DashboardSection::Analytics => serde_json::to_value(Analytics::default()),
        };
        value.unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_section_parses_from_endpoint_and_key() {
        assert_eq!(
            "monthly-progress".parse::<DashboardSection>(),
            Ok(DashboardSection::MonthlyProgress)
        );
        assert_eq!(
            "monthlyReport".parse::<DashboardSection>(),
            Ok(DashboardSection::MonthlyReport)
        );
        assert!("revenue".parse::<DashboardSection>().is_err());
    }

    #[test]
    fn test_partial_payload_fills_defaults() {
        let mut data = DashboardData::default();
        data.set_from_value(DashboardSection::Overview, json!({"totalUsers": 1200}))
            .unwrap();
        let overview = data.overview.unwrap();
        assert_eq!(overview.total_users, 1200);
        assert_eq!(overview.total_courses, 0);
    }

    #[test]
    fn test_mistyped_payload_is_rejected_and_keeps_previous() {
        let mut data = DashboardData::default();
        data.set_from_value(DashboardSection::Earnings, json!({"thisMonth": 10.5}))
            .unwrap();
        assert!(data
            .set_from_value(DashboardSection::Earnings, json!({"thisMonth": "lots"}))
            .is_err());
        assert_eq!(data.earnings.unwrap().this_month, 10.5);
    }

    #[test]
    fn test_non_object_payloads_are_rejected() {
        let mut data = DashboardData::default();
        for payload in [json!([1, 2]), json!(null), json!(3), json!("text")] {
            assert!(data
                .set_from_value(DashboardSection::Earnings, payload)
                .is_err());
        }
        assert!(data.earnings.is_none());
    }

    #[test]
    fn test_normalize_fills_missing_fields() {
        let value =
            DashboardData::normalize(DashboardSection::Earnings, json!({"totalEarnings": 99.0}))
                .unwrap();
        assert_eq!(value["totalEarnings"], json!(99.0));
        assert_eq!(value["thisMonth"], json!(0.0));
        assert!(DashboardData::normalize(DashboardSection::Earnings, json!([1, 2])).is_err());
        assert_eq!(
            DashboardData::default()
                .record(DashboardSection::Overview)
                .unwrap(),
            serde_json::Value::Null
        );
    }

    #[test]
    fn test_empty_records_decode_for_every_section() {
        let mut data = DashboardData::default();
        for section in DashboardSection::ALL {
            data.set_from_value(section, DashboardData::empty_record(section))
                .unwrap();
            assert!(data.has(section));
        }
    }
}
