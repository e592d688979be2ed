use serde::{Deserialize, Serialize};

/// Status value of a successful call.
const STATUS_SUCCESS: &str = "Success";

/// Result of a call that does not return data of its own.
///
/// Failed calls never produce a `StatusResult`; they surface as
/// [`ErrorKind::ApiInvocation`](crate::ErrorKind::ApiInvocation) instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResult {
    /// `"Success"` for completed calls.
    #[serde(default)]
    pub status: String,
    /// Human readable description.
    #[serde(
        default,
        rename = "statusDescription",
        skip_serializing_if = "Option::is_none"
    )]
    pub status_description: Option<String>,
    /// Alternative message field used by some endpoints.
    #[serde(
        default,
        rename = "statusMessage",
        skip_serializing_if = "Option::is_none"
    )]
    pub status_message: Option<String>,
    /// Extra data, e.g. the id of a created record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<StatusData>,
}

/// Payload attached to some status results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusData {
    /// Id of the created object.
    #[serde(default, deserialize_with = "crate::utils::lenient::number")]
    pub id: u64,
}

impl StatusResult {
    /// Whether the API reported success.
    pub fn is_success(&self) -> bool {
        self.status.eq_ignore_ascii_case(STATUS_SUCCESS)
    }

    /// Id carried in `data`, if any.
    pub fn id(&self) -> Option<u64> {
        self.data.as_ref().map(|d| d.id).filter(|id| *id != 0)
    }

    /// The description, falling back to the message.
    pub fn message(&self) -> Option<&str> {
        self.status_description
            .as_deref()
            .or(self.status_message.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_with_data() {
        let r: StatusResult = serde_json::from_str(
            r#"{"status":"Success","statusDescription":"The record was added successfully.","data":{"id":"1234"}}"#,
        )
        .unwrap();
        assert!(r.is_success());
        assert_eq!(r.id(), Some(1234));
        assert_eq!(r.message(), Some("The record was added successfully."));
    }

    #[test]
    fn decode_without_data() {
        let r: StatusResult =
            serde_json::from_str(r#"{"status":"Success","statusMessage":"ok"}"#).unwrap();
        assert!(r.is_success());
        assert_eq!(r.id(), None);
        assert_eq!(r.message(), Some("ok"));
    }

    #[test]
    fn other_status_is_not_success() {
        let r: StatusResult = serde_json::from_str(r#"{"status":"Pending"}"#).unwrap();
        assert!(!r.is_success());
    }
}
