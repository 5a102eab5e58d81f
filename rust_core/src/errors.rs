// Error taxonomy for the homework status bot.
//
// Every failure the poll loop can see is one of these variants. The poller
// translates them into user-facing notifications at a single boundary;
// `Delivery` is the one exception, logged and swallowed by the sender.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PollError {
    /// The homework API answered with a non-success HTTP status.
    #[error("endpoint returned HTTP status {0}")]
    Endpoint(u16),

    /// The API reported an access failure in the response body.
    #[error("API access denied (code: {0})")]
    Access(String),

    /// Transport failure talking to the homework API.
    #[error("connection failure: {0}")]
    Connection(#[from] reqwest::Error),

    /// The response body was not valid JSON.
    #[error("failed to decode API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The response decoded, but its shape is not what the API promises
    /// (wrong type, missing key).
    #[error("malformed API response: {0}")]
    Shape(String),

    /// The homework list came back empty. Not a fault: there is simply
    /// nothing new to report.
    #[error("homework list is empty")]
    EmptyList,

    /// A homework record carried a status outside the documented set.
    #[error("unknown homework status: {0:?}")]
    UnknownStatus(String),

    /// The notification provider rejected or dropped the message.
    #[error("message delivery failed: {0}")]
    Delivery(String),
}
