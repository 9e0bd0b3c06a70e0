use serde::Deserialize;

use crate::domain::field;

#[derive(Debug, Clone, Deserialize)]
struct RevokeJsonResponse {
    #[serde(default)]
    result: Option<serde_json::Value>,
}

pub fn encode_revoke_form(request_id: &str) -> Vec<(String, String)> {
    vec![(field::REQUEST_ID.to_owned(), request_id.to_owned())]
}

/// Pull the decoded `result` object out of a revoke body, if it is there.
pub fn decode_result_value(json: &str) -> Option<serde_json::Value> {
    let parsed: RevokeJsonResponse = serde_json::from_str(json).ok()?;
    parsed.result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_revoke_form_params() {
        assert_eq!(
            encode_revoke_form("req-1"),
            vec![("request_id".to_owned(), "req-1".to_owned())]
        );
    }

    #[test]
    fn decode_returns_result_object() {
        let json = r#"{"ok":true,"result":{"request_id":"req-1","delivery_status":{"status":"Revoked"}}}"#;
        let value = decode_result_value(json).unwrap();
        assert_eq!(value["request_id"], "req-1");
        assert_eq!(value["delivery_status"]["status"], "Revoked");
    }

    #[test]
    fn decode_degrades_to_none() {
        assert_eq!(decode_result_value(r#"{"ok":false}"#), None);
        assert_eq!(decode_result_value("{ not json }"), None);
    }
}
