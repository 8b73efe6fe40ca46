use crate::api::ApiBody;
use crate::errors::{AppError, AppResult};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// `{ "isSuccess": .., "message": .., "data": .. }` wrapper used by every
/// backend endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    #[serde(default)]
    pub is_success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Turns `isSuccess: false` into [`AppError::Rejected`].
    pub fn into_result(self) -> AppResult<Option<T>> {
        if self.is_success {
            Ok(self.data)
        } else {
            Err(AppError::Rejected(
                self.message
                    .unwrap_or_else(|| "operation not completed".to_string()),
            ))
        }
    }

    pub fn into_data(self) -> AppResult<T> {
        self.into_result()?
            .ok_or_else(|| AppError::UnexpectedResponse("response carries no data".into()))
    }
}

fn is_envelope(value: &Value) -> bool {
    value
        .as_object()
        .map(|o| o.contains_key("isSuccess"))
        .unwrap_or(false)
}

/// Decodes a payload that may or may not be wrapped in an [`Envelope`].
pub fn decode_payload<T: DeserializeOwned>(body: ApiBody) -> AppResult<T> {
    let value = body.into_json()?;
    if is_envelope(&value) {
        serde_json::from_value::<Envelope<T>>(value)?.into_data()
    } else {
        Ok(serde_json::from_value(value)?)
    }
}

/// Checks the success flag of an acknowledgement-only response and returns
/// whatever `data` it carried.
pub fn expect_success(body: ApiBody) -> AppResult<Value> {
    let value = body.into_json()?;
    if is_envelope(&value) {
        Ok(serde_json::from_value::<Envelope<Value>>(value)?
            .into_result()?
            .unwrap_or(Value::Null))
    } else {
        Ok(value)
    }
}
