// Domain services: endpoint-specific methods over the HTTP client, with
// client-side validation mirroring the backend rules and response reshaping
// for display. Every public method returns a `ServiceResponse` envelope;
// nothing here returns `Err` across the service boundary.

pub mod checklists;
pub mod posts;
pub mod progress;
pub mod projects;
pub mod users;
pub mod validation;

pub use checklists::ChecklistService;
pub use posts::PostService;
pub use progress::ProgressService;
pub use projects::ProjectService;
pub use users::UserService;

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::ClientError;

pub const VALIDATION_FAILED: &str = "Valideringsfel";

/// Uniform success/failure envelope used instead of raised errors.
/// Callers branch on `success`; `errors` is a field -> message map from
/// client-side validation or the server payload.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub message: String,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub errors: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl<T> ServiceResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
            errors: HashMap::new(),
            status: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: message.into(),
            errors: HashMap::new(),
            status: None,
        }
    }

    pub fn validation(errors: HashMap<String, String>) -> Self {
        Self {
            success: false,
            data: None,
            message: VALIDATION_FAILED.to_string(),
            errors,
            status: None,
        }
    }

    /// Fold a client error into an envelope. A server-supplied message wins
    /// over the per-status table, which wins over the operation fallback.
    pub fn from_error(
        err: ClientError,
        fallback: &str,
        status_messages: &[(u16, &str)],
    ) -> Self {
        let server_message = err.server_message().map(str::to_string);
        let server_errors = err.server_errors();

        match err {
            ClientError::Validation { errors } => Self::validation(errors),
            ClientError::Network => Self::fail(ClientError::Network.to_string()),
            ClientError::Api { status, .. } => {
                let table_message = status_messages
                    .iter()
                    .find(|(code, _)| *code == status)
                    .map(|(_, message)| message.to_string());
                let message = server_message
                    .or(table_message)
                    .unwrap_or_else(|| fallback.to_string());

                Self {
                    success: false,
                    data: None,
                    message,
                    errors: server_errors,
                    status: Some(status),
                }
            }
            ClientError::Unknown(message) => Self::fail(message),
        }
    }
}

/// Normalize the list envelopes the backend has been observed to produce.
///
/// Precedence, first match wins: bare array, then `{"posts": [...]}`,
/// then `{"data": [...]}`. Anything else yields an empty list.
pub fn normalize_list(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            for key in ["posts", "data"] {
                if let Some(Value::Array(items)) = map.remove(key) {
                    return items;
                }
            }
            Vec::new()
        }
        _ => Vec::new(),
    }
}

pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ClientError> {
    serde_json::from_value(value).map_err(ClientError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalize_list_precedence() {
        assert_eq!(normalize_list(json!([1, 2])).len(), 2);
        assert_eq!(normalize_list(json!({ "posts": [1] })).len(), 1);
        assert_eq!(normalize_list(json!({ "data": [1, 2, 3] })).len(), 3);
        // posts wins over data
        assert_eq!(
            normalize_list(json!({ "data": [1, 2], "posts": [1] })).len(),
            1
        );
        // a non-array posts key falls through to data
        assert_eq!(
            normalize_list(json!({ "posts": "x", "data": [1, 2] })).len(),
            2
        );
        assert!(normalize_list(json!(null)).is_empty());
        assert!(normalize_list(json!({ "items": [1] })).is_empty());
    }

    #[test]
    fn from_error_prefers_server_message_over_table() {
        let err = ClientError::api(
            404,
            "HTTP-fel 404",
            Some(json!({ "message": "Projektet är arkiverat" })),
        );
        let resp: ServiceResponse<()> =
            ServiceResponse::from_error(err, "Kunde inte hämta projekt", &[(404, "Projektet hittades inte")]);
        assert!(!resp.success);
        assert_eq!(resp.message, "Projektet är arkiverat");
        assert_eq!(resp.status, Some(404));
    }

    #[test]
    fn from_error_uses_status_table_then_fallback() {
        let err = ClientError::api(404, "HTTP-fel 404", Some(json!({})));
        let resp: ServiceResponse<()> =
            ServiceResponse::from_error(err, "Kunde inte hämta projekt", &[(404, "Projektet hittades inte")]);
        assert_eq!(resp.message, "Projektet hittades inte");

        let err = ClientError::api(418, "HTTP-fel 418", Some(json!({})));
        let resp: ServiceResponse<()> =
            ServiceResponse::from_error(err, "Kunde inte hämta projekt", &[(404, "Projektet hittades inte")]);
        assert_eq!(resp.message, "Kunde inte hämta projekt");
    }
}
