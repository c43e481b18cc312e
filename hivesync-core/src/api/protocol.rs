//! Wire contract for the records API
//!
//! Covers both dialects of the endpoint: the JSONP-padded GET responses and
//! the JSON envelopes returned by POST (when the deployment allows reading
//! them at all).

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::Collection;

/// Actions understood by the remote endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Get,
    Health,
    Add,
    Update,
    Delete,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Get => "get",
            Action::Health => "health",
            Action::Add => "add",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }

    /// Reads go through the GET/JSONP path; everything else is a POST.
    pub fn is_read(&self) -> bool {
        matches!(self, Action::Get | Action::Health)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Response envelope returned by the endpoint.
///
/// Reads answer `{success: true, data: [...]}`; writes answer either
/// `{success: true, data: {...}}` or `{success: false, error: {message}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorBody>,
}

/// Error payload carried by a `success: false` envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
}

impl ApiEnvelope {
    /// Synthetic success envelope echoing a written record.
    ///
    /// Used by the opaque write mode, where the response body is unreadable
    /// and delivery is all the client can observe.
    pub fn assumed_success(record: serde_json::Value) -> Self {
        Self {
            success: true,
            data: Some(record),
            error: None,
        }
    }

    /// Convert a `success: false` envelope into a server error.
    pub fn into_result(self) -> Result<Self> {
        if self.success {
            Ok(self)
        } else {
            let message = self
                .error
                .map(|e| e.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "request rejected by server".to_string());
            Err(Error::Server { message })
        }
    }

    /// The `data` payload as a record array (reads), empty when absent.
    pub fn into_rows(self) -> Vec<serde_json::Value> {
        match self.data {
            Some(serde_json::Value::Array(rows)) => rows,
            _ => Vec::new(),
        }
    }
}

/// POST body for write actions.
#[derive(Debug, Clone, Serialize)]
pub struct WriteRequest<'a> {
    pub action: &'static str,
    pub sheet: &'static str,
    pub record: &'a serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl<'a> WriteRequest<'a> {
    pub fn new(action: Action, collection: Collection, record: &'a serde_json::Value) -> Self {
        Self {
            action: action.as_str(),
            sheet: collection.as_str(),
            record,
            id: None,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

/// Request correlation identifier, sent as the `callback` query parameter.
///
/// The web client registered a fresh global callback per call, named with a
/// timestamp plus random suffix, so concurrent calls could never collide.
/// Here a call is correlated by awaiting its own response future, but the
/// endpoint still pads its reply with this identifier, so we keep the same
/// recipe: unique across concurrent calls, usable as a cache-buster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    pub fn generate() -> Self {
        let millis = Utc::now().timestamp_millis();
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        RequestId(format!("cb_{}_{}", millis, &suffix[..8]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Remove JSONP padding from a GET response body.
///
/// The endpoint may answer either plain JSON (`{...}`) or padded JSON
/// (`cb_123_ab(...)`, optionally with a trailing `;`). Returns the inner
/// JSON slice, or an error if the body is padded with someone else's
/// identifier.
pub fn strip_jsonp<'a>(body: &'a str, id: &RequestId) -> Result<&'a str> {
    let trimmed = body.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return Ok(trimmed);
    }

    let rest = trimmed.strip_prefix(id.as_str()).ok_or_else(|| {
        Error::Network(format!(
            "response padded with unexpected callback (wanted {})",
            id
        ))
    })?;

    let rest = rest.trim_start();
    let inner = rest
        .strip_prefix('(')
        .and_then(|r| r.trim_end().trim_end_matches(';').trim_end().strip_suffix(')'))
        .ok_or_else(|| Error::Network("malformed JSONP padding in response".to_string()))?;

    Ok(inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_ids_are_unique() {
        let ids: Vec<RequestId> = (0..100).map(|_| RequestId::generate()).collect();
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_request_id_shape() {
        let id = RequestId::generate();
        assert!(id.as_str().starts_with("cb_"));
        assert_eq!(id.as_str().split('_').count(), 3);
    }

    #[test]
    fn test_strip_jsonp_plain_json() {
        let id = RequestId("cb_1_deadbeef".to_string());
        let body = r#"{"success":true,"data":[]}"#;
        assert_eq!(strip_jsonp(body, &id).unwrap(), body);
    }

    #[test]
    fn test_strip_jsonp_padded() {
        let id = RequestId("cb_1_deadbeef".to_string());
        let body = r#"cb_1_deadbeef({"success":true,"data":[1,2]});"#;
        assert_eq!(
            strip_jsonp(body, &id).unwrap(),
            r#"{"success":true,"data":[1,2]}"#
        );
    }

    #[test]
    fn test_strip_jsonp_wrong_callback() {
        let id = RequestId("cb_1_deadbeef".to_string());
        let body = r#"cb_2_feedface({"success":true});"#;
        assert!(strip_jsonp(body, &id).is_err());
    }

    #[test]
    fn test_strip_jsonp_malformed() {
        let id = RequestId("cb_1_deadbeef".to_string());
        assert!(strip_jsonp("cb_1_deadbeef{oops}", &id).is_err());
    }

    #[test]
    fn test_envelope_error_into_result() {
        let envelope: ApiEnvelope =
            serde_json::from_str(r#"{"success":false,"error":{"message":"Sheet not found"}}"#)
                .unwrap();
        let err = envelope.into_result().unwrap_err();
        assert!(err.to_string().contains("Sheet not found"));
    }

    #[test]
    fn test_envelope_missing_data_is_empty_rows() {
        let envelope: ApiEnvelope = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(envelope.into_rows().is_empty());
    }

    #[test]
    fn test_write_request_body_shape() {
        let record = serde_json::json!({"Name": "Hive Alpha"});
        let request = WriteRequest::new(Action::Update, Collection::Hives, &record).with_id(7);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["action"], "update");
        assert_eq!(value["sheet"], "Hives");
        assert_eq!(value["record"]["Name"], "Hive Alpha");
        assert_eq!(value["id"], 7);
    }
}
