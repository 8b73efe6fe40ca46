//! Per-invocation wiring: configuration, gateway and session.

use crate::api::ApiClient;
use crate::config::Config;
use crate::errors::AppResult;
use crate::services::{
    AttendanceService, AuthService, CatalogService, EventService, MetricsService, StaffService,
};
use crate::session::SessionContext;
use chrono::FixedOffset;
use tracing::warn;

pub struct AppContext {
    pub config: Config,
    pub api: ApiClient,
    pub session: SessionContext,
    pub offset: FixedOffset,
}

impl AppContext {
    /// Builds the context from a loaded config. The session file comes from
    /// `config.session_file`.
    pub fn new(config: Config) -> AppResult<Self> {
        let session = SessionContext::file(&config.session_file);
        Self::with_session(config, session)
    }

    pub fn with_session(config: Config, session: SessionContext) -> AppResult<Self> {
        let api = ApiClient::from_config(&config)?;
        let offset = config.offset()?;

        // Restore the token of a previous login. A damaged session file must
        // not block `login` (which overwrites it) or `logout` (which removes it).
        match session.access_token() {
            Ok(Some(token)) => api.set_token(token),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "ignoring unreadable session"),
        }

        Ok(Self {
            config,
            api,
            session,
            offset,
        })
    }

    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(&self.api, &self.session)
    }

    pub fn events(&self) -> EventService<'_> {
        EventService::new(&self.api, &self.session, self.offset)
    }

    pub fn attendance(&self) -> AttendanceService<'_> {
        AttendanceService::new(&self.api, &self.session)
    }

    pub fn staff(&self) -> StaffService<'_> {
        StaffService::new(&self.api, &self.session)
    }

    pub fn catalog(&self) -> CatalogService<'_> {
        CatalogService::new(&self.api, &self.session)
    }

    pub fn metrics(&self) -> MetricsService<'_> {
        MetricsService::new(&self.api, &self.session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn corrupt_session_file_starts_logged_out() {
        let path = std::env::temp_dir().join("campusctl_ctx_corrupt_session.json");
        fs::write(&path, "{not json").unwrap();

        let ctx = AppContext::with_session(Config::default(), SessionContext::file(&path)).unwrap();
        assert!(!ctx.api.has_token());
        assert!(!ctx.session.is_authenticated());

        ctx.auth().logout().unwrap();
        assert!(!path.exists());
    }
}
