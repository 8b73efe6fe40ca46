use super::authorize;
use crate::api::{ApiBody, ApiClient, Request, call};
use crate::errors::{AppError, AppResult};
use crate::models::envelope::expect_success;
use crate::models::staff::StaffRegistration;
use crate::session::SessionContext;
use regex::Regex;
use serde_json::Value;
use tracing::info;

const MIN_PASSWORD_LEN: usize = 8;

struct RegisterStaff<'a> {
    registration: &'a StaffRegistration,
}

impl Request for RegisterStaff<'_> {
    type Output = ();
    const PATH: &'static str = "/user/registerstaffmember";

    fn body(&self) -> AppResult<Option<Value>> {
        Ok(Some(serde_json::to_value(self.registration)?))
    }

    fn parse(&self, body: ApiBody) -> AppResult<Self::Output> {
        expect_success(body).map(|_| ())
    }
}

fn email_regex() -> AppResult<Regex> {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").map_err(|e| AppError::Other(e.to_string()))
}

/// Local checks run before the registration call.
pub fn validate_registration(reg: &StaffRegistration) -> AppResult<()> {
    let required = [
        ("name", &reg.name),
        ("email", &reg.email),
        ("phone", &reg.phone),
        ("profession", &reg.profession),
        ("department", &reg.department),
        ("position", &reg.position),
        ("faculty", &reg.faculty_id),
    ];
    if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
        return Err(AppError::validation(format!("{field} is required")));
    }

    if !email_regex()?.is_match(reg.email.trim()) {
        return Err(AppError::validation(format!(
            "invalid email address: {}",
            reg.email
        )));
    }

    if reg.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    if !reg
        .phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-'))
    {
        return Err(AppError::validation(format!("invalid phone number: {}", reg.phone)));
    }

    Ok(())
}

pub struct StaffService<'a> {
    api: &'a ApiClient,
    session: &'a SessionContext,
}

impl<'a> StaffService<'a> {
    pub fn new(api: &'a ApiClient, session: &'a SessionContext) -> Self {
        Self { api, session }
    }

    pub async fn register(&self, registration: &StaffRegistration) -> AppResult<()> {
        validate_registration(registration)?;
        authorize(self.api, self.session)?;

        call(&RegisterStaff { registration }, self.api).await?;
        info!(email = %registration.email, "staff member registered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> StaffRegistration {
        StaffRegistration {
            name: "Laura Gómez".into(),
            email: "laura@uni.edu".into(),
            password: "supersecret".into(),
            phone: "+57 300 123 4567".into(),
            profession: "Engineer".into(),
            department: "IT".into(),
            position: "Coordinator".into(),
            faculty_id: "2".into(),
            ..Default::default()
        }
    }

    #[test]
    fn accepts_complete_registration() {
        assert!(validate_registration(&valid()).is_ok());
    }

    #[test]
    fn rejects_bad_fields() {
        let mut r = valid();
        r.email = "not-an-email".into();
        assert!(validate_registration(&r).is_err());

        let mut r = valid();
        r.password = "short".into();
        assert!(validate_registration(&r).is_err());

        let mut r = valid();
        r.department = " ".into();
        match validate_registration(&r) {
            Err(AppError::Validation(msg)) => assert!(msg.contains("department")),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
