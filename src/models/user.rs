use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `data` of a successful `/user/loginapp` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub profile_picture: Option<String>,
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
}

impl LoginData {
    pub fn user(&self) -> User {
        User {
            name: self.name.clone(),
            role: self.role.clone(),
            profile_picture: self.profile_picture.clone(),
        }
    }
}
