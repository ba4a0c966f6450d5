//! Typed endpoint wrappers over the session client.
//!
//! Page code works with these services instead of raw paths and JSON
//! probing. Every method resolves to `Ok(None)` when the underlying request
//! was aborted by an authorization failure, mirroring the session client's
//! contract.

pub mod auth;
pub mod cart;
pub mod models;
pub mod orders;
pub mod products;
pub mod syslog;
pub mod users;

pub use auth::AuthApi;
pub use cart::CartApi;
pub use orders::OrderApi;
pub use products::ProductApi;
pub use syslog::SysLogApi;
pub use users::UserApi;

use crate::errors::{ClientError, ClientResult};
use crate::net::envelope::unwrap_envelope_with;
use crate::net::{RequestOptions, SessionClient};
use serde::Serialize;
use serde::de::DeserializeOwned;
use validator::Validate;

/// Envelope keys for endpoints whose payload is the whole body (possibly
/// under `data`): details, paged listings, creation responses.
const DATA_ENVELOPE: [&str; 1] = ["data"];

/// Issues a request and deserializes the (envelope-stripped) JSON body.
async fn fetch<T: DeserializeOwned>(
    client: &SessionClient,
    path: &str,
    options: RequestOptions,
    envelope_keys: &[&str],
) -> ClientResult<Option<T>> {
    let Some(payload) = client.request(path, options).await? else {
        return Ok(None);
    };
    let value = payload
        .into_json()
        .ok_or_else(|| ClientError::invalid_body("expected a JSON response"))?;
    let value = unwrap_envelope_with(value, envelope_keys);
    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| ClientError::invalid_body(e.to_string()))
}

/// Issues a request where only completion matters. `Some(())` on success,
/// `None` on auth abort.
async fn execute(
    client: &SessionClient,
    path: &str,
    options: RequestOptions,
) -> ClientResult<Option<()>> {
    Ok(client.request(path, options).await?.map(|_| ()))
}

/// Validates an outbound payload, flattening field errors into one message.
fn validated<T: Validate>(payload: &T) -> ClientResult<()> {
    payload.validate().map_err(|validation_errors| {
        let messages: Vec<String> = validation_errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    format!(
                        "{}: {}",
                        field,
                        error.message.as_ref().unwrap_or(&"Invalid value".into())
                    )
                })
            })
            .collect();
        ClientError::validation(messages.join(", "))
    })
}

fn json_body<T: Serialize>(payload: &T) -> ClientResult<serde_json::Value> {
    serde_json::to_value(payload)
        .map_err(|e| ClientError::validation(format!("payload could not be serialized: {}", e)))
}
