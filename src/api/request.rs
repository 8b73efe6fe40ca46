use super::{ApiBody, ApiClient};
use crate::errors::AppResult;
use reqwest::Method;
use serde_json::Value;

/// A typed backend endpoint.
///
/// Implementors declare where they live and how they are shaped; [`call`]
/// runs them through the gateway.
pub trait Request {
    type Output;

    const PATH: &'static str;
    const METHOD: Method = Method::POST;
    const REQUIRES_AUTH: bool = true;

    /// JSON body to send, if any.
    fn body(&self) -> AppResult<Option<Value>> {
        Ok(None)
    }

    fn parse(&self, body: ApiBody) -> AppResult<Self::Output>;
}

/// Calls a [`Request`] and returns its output.
pub async fn call<T: Request>(req: &T, api: &ApiClient) -> AppResult<T::Output> {
    let body = req.body()?;
    let response = api
        .request(T::METHOD, T::PATH, body.as_ref(), None, T::REQUIRES_AUTH)
        .await?;

    req.parse(response)
}
