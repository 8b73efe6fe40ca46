use serde::{Deserialize, Serialize};

/// Filter object posted to the metrics endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faculty_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub career_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedCount {
    pub name: String,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSummary {
    #[serde(default)]
    pub total_events: u64,
    #[serde(default)]
    pub total_attendances: u64,
    #[serde(default)]
    pub average_attendance: f64,
    #[serde(default)]
    pub by_faculty: Vec<NamedCount>,
    #[serde(default)]
    pub by_category: Vec<NamedCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventAttendanceMetric {
    #[serde(default, deserialize_with = "super::flexible_id::option::deserialize")]
    pub event_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub registered: u64,
    #[serde(default)]
    pub attended: u64,
}

impl EventAttendanceMetric {
    /// Share of registered people that checked in, 0–100.
    pub fn turnout(&self) -> Option<f64> {
        (self.registered > 0).then(|| self.attended as f64 * 100.0 / self.registered as f64)
    }
}
