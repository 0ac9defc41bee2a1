use std::collections::BTreeMap;

use serde_json::Value;

use crate::model::dashboard::{DashboardData, DashboardSection};

/// `Idle -> Loading -> (Success | Error)`, and back to `Loading` on refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionState {
    pub status: LoadStatus,
    pub error: Option<String>,
    /// Incremented each time a request for this section starts.
    pub generation: u64,
}

impl SectionState {
    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }
}

/// Merged data plus per-section request state. Sections never touch each other's entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub data: DashboardData,
    sections: BTreeMap<DashboardSection, SectionState>,
}

impl DashboardState {
    pub fn section(&self, section: DashboardSection) -> SectionState {
        self.sections.get(&section).cloned().unwrap_or_default()
    }

    /// Marks `section` as loading and returns the generation the eventual result must carry.
    /// The previous error is kept until the new request settles.
    pub fn begin(&mut self, section: DashboardSection) -> u64 {
        let entry = self.sections.entry(section).or_default();
        entry.generation += 1;
        entry.status = LoadStatus::Loading;
        entry.generation
    }

    /// Applies a finished request. Results from superseded requests are dropped and `false`
    /// is returned. On error the previous data is kept (stale-if-error).
    pub fn settle(
        &mut self,
        section: DashboardSection,
        generation: u64,
        outcome: Result<Value, String>,
    ) -> bool {
        let entry = self.sections.entry(section).or_default();
        if entry.generation != generation {
            return false;
        }
        let decoded = outcome.and_then(|payload| {
            self.data
                .set_from_value(section, payload)
                .map_err(|e| format!("Invalid {} payload: {e}", section.key()))
        });
        match decoded {
            Ok(()) => {
                entry.status = LoadStatus::Success;
                entry.error = None;
            }
            Err(message) => {
                entry.status = LoadStatus::Error;
                entry.error = Some(message);
            }
        }
        true
    }

    pub fn is_loading(&self) -> bool {
        self.sections.values().any(SectionState::is_loading)
    }

    pub fn has_errors(&self) -> bool {
        self.sections.values().any(|s| s.error.is_some())
    }

    pub fn errors(&self) -> Vec<(DashboardSection, String)> {
        self.sections
            .iter()
            .filter_map(|(section, state)| state.error.clone().map(|e| (*section, e)))
            .collect()
    }
}
