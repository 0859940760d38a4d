// Client-side error taxonomy for all backend communication

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

/// Fixed user-facing message when the server cannot be reached at all.
pub const NETWORK_ERROR_MESSAGE: &str =
    "Kan inte ansluta till servern. Kontrollera din internetanslutning.";

/// Errors surfaced by the HTTP client and the validation layer.
///
/// Services never let these cross their public boundary; they are folded
/// into a `ServiceResponse` envelope instead.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Client-side validation failed before any request was sent.
    #[error("Valideringsfel")]
    Validation { errors: HashMap<String, String> },

    /// No response was received (connection refused, DNS failure, timeout).
    #[error("{}", NETWORK_ERROR_MESSAGE)]
    Network,

    /// The server responded with a non-success status.
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        /// Raw response payload, when the body was parseable JSON.
        data: Option<Value>,
    },

    /// Anything else, e.g. a request that could not be constructed.
    #[error("{0}")]
    Unknown(String),
}

impl ClientError {
    pub fn api(status: u16, message: impl Into<String>, data: Option<Value>) -> Self {
        ClientError::Api { status, message: message.into(), data }
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.is_empty() {
            ClientError::Unknown("Ett oväntat fel uppstod".to_string())
        } else {
            ClientError::Unknown(message)
        }
    }

    /// HTTP status, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Server-supplied message from the response payload, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { data: Some(data), .. } => {
                data.get("message").and_then(Value::as_str)
            }
            _ => None,
        }
    }

    /// Server-supplied field error map from the response payload, if any.
    pub fn server_errors(&self) -> HashMap<String, String> {
        match self {
            ClientError::Api { data: Some(data), .. } => data
                .get("errors")
                .and_then(Value::as_object)
                .map(|map| {
                    map.iter()
                        .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                        .collect()
                })
                .unwrap_or_default(),
            _ => HashMap::new(),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::unknown(err.to_string())
    }
}
