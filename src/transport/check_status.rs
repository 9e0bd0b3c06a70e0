use serde::Deserialize;

use crate::domain::field;

#[derive(Debug, Clone, Deserialize)]
struct CheckStatusJsonResponse {
    #[serde(default)]
    result: Option<CheckStatusJsonResult>,
}

#[derive(Debug, Clone, Deserialize)]
struct CheckStatusJsonResult {
    #[serde(default)]
    verification_status: Option<VerificationStatusJson>,
}

#[derive(Debug, Clone, Deserialize)]
struct VerificationStatusJson {
    #[serde(default)]
    status: Option<String>,
}

pub fn encode_check_status_form(request_id: &str, code: Option<&str>) -> Vec<(String, String)> {
    let mut form = vec![(field::REQUEST_ID.to_owned(), request_id.to_owned())];
    if let Some(code) = code {
        form.push((field::CODE.to_owned(), code.to_owned()));
    }
    form
}

/// Pull `result.verification_status.status` out of a status-check body.
pub fn decode_verification_status(json: &str) -> Option<String> {
    let parsed: CheckStatusJsonResponse = serde_json::from_str(json).ok()?;
    parsed.result?.verification_status?.status
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_check_status_form_params() {
        assert_eq!(
            encode_check_status_form("req-1", None),
            vec![("request_id".to_owned(), "req-1".to_owned())]
        );

        assert_eq!(
            encode_check_status_form("req-1", Some("123456")),
            vec![
                ("request_id".to_owned(), "req-1".to_owned()),
                ("code".to_owned(), "123456".to_owned()),
            ]
        );
    }

    #[test]
    fn decode_finds_verification_status() {
        let json = r#"
        {
          "ok": true,
          "result": {
            "request_id": "req-1",
            "verification_status": {
              "status": "code_valid",
              "updated_at": 1700000000
            }
          }
        }
        "#;

        assert_eq!(
            decode_verification_status(json).as_deref(),
            Some("code_valid")
        );
    }

    #[test]
    fn decode_degrades_to_none() {
        assert_eq!(decode_verification_status(r#"{"ok":true}"#), None);
        assert_eq!(
            decode_verification_status(r#"{"ok":true,"result":{}}"#),
            None
        );
        assert_eq!(
            decode_verification_status(r#"{"ok":true,"result":{"verification_status":{}}}"#),
            None
        );
        assert_eq!(decode_verification_status("{ not json }"), None);
    }
}
