use crate::api::{ApiBody, ApiClient, Request, call};
use crate::errors::{AppError, AppResult};
use crate::models::envelope::Envelope;
use crate::models::user::{LoginData, LoginRequest, User};
use crate::session::SessionContext;
use serde_json::Value;
use tracing::{info, warn};

struct Login<'a> {
    request: &'a LoginRequest,
}

impl Request for Login<'_> {
    type Output = LoginData;
    const PATH: &'static str = "/user/loginapp";
    const REQUIRES_AUTH: bool = false;

    fn body(&self) -> AppResult<Option<Value>> {
        Ok(Some(serde_json::to_value(self.request)?))
    }

    fn parse(&self, body: ApiBody) -> AppResult<Self::Output> {
        let envelope: Envelope<LoginData> = body.decode()?;
        envelope.into_data()
    }
}

pub struct AuthService<'a> {
    api: &'a ApiClient,
    session: &'a SessionContext,
}

impl<'a> AuthService<'a> {
    pub fn new(api: &'a ApiClient, session: &'a SessionContext) -> Self {
        Self { api, session }
    }

    /// Authenticates and persists the session. On failure nothing is stored
    /// and the gateway keeps no token.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<User> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AppError::validation("email and password are required"));
        }

        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };

        let data = match call(&Login { request: &request }, self.api).await {
            Ok(data) => data,
            Err(e) => {
                warn!(email = %request.email, "login failed");
                return Err(e);
            }
        };

        if data.access_token.trim().is_empty() {
            return Err(AppError::UnexpectedResponse(
                "login response carries no access token".into(),
            ));
        }

        self.session.establish(&data)?;
        self.api.set_token(data.access_token.clone());
        info!(user = %data.name, role = %data.role, "logged in");
        Ok(data.user())
    }

    pub fn logout(&self) -> AppResult<()> {
        self.api.clear_token();
        self.session.clear()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn current_user(&self) -> AppResult<Option<User>> {
        self.session.current_user()
    }
}
