use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle stage of a project. Drives bar color and icon selection
/// only; the timeline engine is otherwise indifferent to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Planning,
    Active,
    Completed,
}

impl ProjectStatus {
    pub fn icon(&self) -> &'static str {
        match self {
            ProjectStatus::Planning => "◌",
            ProjectStatus::Active => "●",
            ProjectStatus::Completed => "✔",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Planning => "planning",
            ProjectStatus::Active => "active",
            ProjectStatus::Completed => "completed",
        }
    }

    /// Next status in the planning → active → completed cycle.
    pub fn cycled(&self) -> Self {
        match self {
            ProjectStatus::Planning => ProjectStatus::Active,
            ProjectStatus::Active => ProjectStatus::Completed,
            ProjectStatus::Completed => ProjectStatus::Planning,
        }
    }
}

/// A date-ranged entity displayed and manipulated on the timeline.
///
/// Dates are plain local calendar days; they serialize as `YYYY-MM-DD`
/// strings with no time-of-day or UTC offset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ProjectStatus,
}

impl Project {
    /// Creates a new planning-stage project. Callers pass a normalized
    /// range (`start <= end`); the gesture engine guarantees this for
    /// ranges arriving from a create-selection commit.
    pub fn new(title: String, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            start_date,
            end_date,
            status: ProjectStatus::Planning,
        }
    }

    /// Inclusive span length in days.
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}
