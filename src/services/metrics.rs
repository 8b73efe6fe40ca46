use super::authorize;
use crate::api::{ApiBody, ApiClient, Request, call};
use crate::errors::AppResult;
use crate::models::envelope::decode_payload;
use crate::models::metrics::{EventAttendanceMetric, MetricsFilter, MetricsSummary};
use crate::session::SessionContext;
use crate::utils::range::parse_range;
use serde_json::Value;

struct Summary<'a> {
    filter: &'a MetricsFilter,
}

impl Request for Summary<'_> {
    type Output = MetricsSummary;
    const PATH: &'static str = "/metrics/summary";

    fn body(&self) -> AppResult<Option<Value>> {
        Ok(Some(serde_json::to_value(self.filter)?))
    }

    fn parse(&self, body: ApiBody) -> AppResult<Self::Output> {
        decode_payload(body)
    }
}

struct AttendanceByEvent<'a> {
    filter: &'a MetricsFilter,
}

impl Request for AttendanceByEvent<'_> {
    type Output = Vec<EventAttendanceMetric>;
    const PATH: &'static str = "/metrics/attendancebyevent";

    fn body(&self) -> AppResult<Option<Value>> {
        Ok(Some(serde_json::to_value(self.filter)?))
    }

    fn parse(&self, body: ApiBody) -> AppResult<Self::Output> {
        decode_payload(body)
    }
}

impl MetricsFilter {
    /// Builds a filter from the CLI range syntax (`2025`, `2025-03`,
    /// `2025-03-01:2025-03-15`) plus optional faculty / career ids.
    pub fn from_args(
        range: Option<&str>,
        faculty_id: Option<String>,
        career_id: Option<String>,
    ) -> AppResult<Self> {
        let (start_date, end_date) = match range {
            Some(r) => {
                let (start, end) = parse_range(r)?;
                (
                    Some(start.format("%Y-%m-%d").to_string()),
                    Some(end.format("%Y-%m-%d").to_string()),
                )
            }
            None => (None, None),
        };

        Ok(Self {
            start_date,
            end_date,
            faculty_id,
            career_id,
        })
    }
}

pub struct MetricsService<'a> {
    api: &'a ApiClient,
    session: &'a SessionContext,
}

impl<'a> MetricsService<'a> {
    pub fn new(api: &'a ApiClient, session: &'a SessionContext) -> Self {
        Self { api, session }
    }

    pub async fn summary(&self, filter: &MetricsFilter) -> AppResult<MetricsSummary> {
        authorize(self.api, self.session)?;
        call(&Summary { filter }, self.api).await
    }

    pub async fn attendance_by_event(
        &self,
        filter: &MetricsFilter,
    ) -> AppResult<Vec<EventAttendanceMetric>> {
        authorize(self.api, self.session)?;
        call(&AttendanceByEvent { filter }, self.api).await
    }
}
