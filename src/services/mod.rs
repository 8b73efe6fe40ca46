//! Per-resource façades over the gateway.
//!
//! Services validate input locally, make sure the session carries a token
//! before authenticated calls, and reshape wire payloads. No retries and no
//! caching: every call is a fresh round trip.

pub mod attendance;
pub mod auth;
pub mod catalog;
pub mod events;
pub mod metrics;
pub mod staff;
pub mod upload;

pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use catalog::CatalogService;
pub use events::EventService;
pub use metrics::MetricsService;
pub use staff::StaffService;
pub use upload::{ImageUploader, ObjectStorageUploader};

use crate::api::ApiClient;
use crate::errors::AppResult;
use crate::session::SessionContext;

/// Loads the session token into the gateway, or fails with
/// `NotAuthenticated` without touching the network.
pub(crate) fn authorize(api: &ApiClient, session: &SessionContext) -> AppResult<()> {
    let token = session.require_token()?;
    api.set_token(token);
    Ok(())
}
