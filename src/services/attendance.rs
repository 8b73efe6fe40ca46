use super::authorize;
use crate::api::{ApiBody, ApiClient, Request, call};
use crate::errors::{AppError, AppResult};
use crate::models::attendance::{AttendanceListRequest, AttendanceRecord};
use crate::models::envelope::decode_payload;
use crate::session::SessionContext;
use serde_json::Value;
use tracing::debug;

struct AttendanceList<'a> {
    request: &'a AttendanceListRequest,
}

impl Request for AttendanceList<'_> {
    type Output = Vec<AttendanceRecord>;
    const PATH: &'static str = "/attendance/attendancelist";

    fn body(&self) -> AppResult<Option<Value>> {
        Ok(Some(serde_json::to_value(self.request)?))
    }

    fn parse(&self, body: ApiBody) -> AppResult<Self::Output> {
        decode_payload(body)
    }
}

pub struct AttendanceService<'a> {
    api: &'a ApiClient,
    session: &'a SessionContext,
}

impl<'a> AttendanceService<'a> {
    pub fn new(api: &'a ApiClient, session: &'a SessionContext) -> Self {
        Self { api, session }
    }

    pub async fn list(&self, event_id: &str) -> AppResult<Vec<AttendanceRecord>> {
        if event_id.trim().is_empty() {
            return Err(AppError::validation("event id is required"));
        }
        authorize(self.api, self.session)?;

        let request = AttendanceListRequest {
            event_id: event_id.trim().to_string(),
        };
        let records = call(&AttendanceList { request: &request }, self.api).await?;
        debug!(event_id, count = records.len(), "attendance loaded");
        Ok(records)
    }
}

/// Case-insensitive match over name and identification number.
pub fn matches_search(record: &AttendanceRecord, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    record.full_name().to_lowercase().contains(&term)
        || record
            .id_number
            .as_deref()
            .is_some_and(|n| n.to_lowercase().contains(&term))
}
