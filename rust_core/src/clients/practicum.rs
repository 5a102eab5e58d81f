use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::errors::PollError;
use crate::models::RawHomework;

/// Default homework-status endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Client for the homework-review API.
///
/// Authenticates with `Authorization: OAuth <token>` and fetches submissions
/// newer than a given Unix timestamp. The body is returned as untyped JSON so
/// the validation pass can report exactly what is wrong with a bad response.
#[derive(Clone)]
pub struct PracticumClient {
    client: Client,
    endpoint: String,
    token: String,
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl PracticumClient {
    pub fn new(endpoint: String, token: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| Client::new()),
            endpoint,
            token,
        }
    }

    /// Fetch homework statuses changed since `from_date`.
    ///
    /// - non-success HTTP status -> `PollError::Endpoint`
    /// - transport failure -> `PollError::Connection`
    /// - body that is not JSON -> `PollError::Decode`
    pub async fn homework_statuses(&self, from_date: i64) -> Result<Value, PollError> {
        let resp = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(PollError::Endpoint(status.as_u16()));
        }

        let text = resp.text().await?;
        let value: Value = serde_json::from_str(&text)?;
        debug!("fetched homework statuses (from_date={})", from_date);
        Ok(value)
    }
}

/// Validate the shape of an API response and pull out the first homework.
///
/// Check order matches the API's failure modes: an access error reported in
/// the body wins over any shape complaint.
pub fn check_response(resp: &Value) -> Result<RawHomework, PollError> {
    if let Some(code) = resp.get("code") {
        let code = code.as_str().map(str::to_string).unwrap_or_else(|| code.to_string());
        return Err(PollError::Access(code));
    }

    if !resp.is_object() {
        return Err(PollError::Shape(
            "response is not a JSON object".to_string(),
        ));
    }

    let homeworks = resp
        .get("homeworks")
        .ok_or_else(|| PollError::Shape("missing \"homeworks\" key".to_string()))?;

    let list = homeworks
        .as_array()
        .ok_or_else(|| PollError::Shape("\"homeworks\" is not a list".to_string()))?;

    let first = list.first().ok_or(PollError::EmptyList)?;

    serde_json::from_value(first.clone())
        .map_err(|_| PollError::Shape("homework entry is not a JSON object".to_string()))
}

/// Extract the `current_date` watermark from a response.
pub fn response_timestamp(resp: &Value) -> Result<i64, PollError> {
    resp.get("current_date")
        .and_then(Value::as_i64)
        .ok_or_else(|| PollError::Shape("missing or non-integer \"current_date\"".to_string()))
}
