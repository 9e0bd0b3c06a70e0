use serde::Deserialize;

use crate::domain::PhoneNumber;

#[derive(Debug, Clone, Deserialize)]
struct CheckAbilityJsonResponse {
    #[serde(default)]
    result: Option<CheckAbilityJsonResult>,
}

#[derive(Debug, Clone, Deserialize)]
struct CheckAbilityJsonResult {
    #[serde(default)]
    request_id: Option<String>,
}

pub fn encode_check_ability_form(phone_number: &str) -> Vec<(String, String)> {
    vec![(PhoneNumber::FIELD.to_owned(), phone_number.to_owned())]
}

/// Pull `result.request_id` out of an ability-check body, if it is there.
pub fn decode_request_id(json: &str) -> Option<String> {
    let parsed: CheckAbilityJsonResponse = serde_json::from_str(json).ok()?;
    parsed.result?.request_id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_check_ability_form_params() {
        assert_eq!(
            encode_check_ability_form("+12015550123"),
            vec![("phone_number".to_owned(), "+12015550123".to_owned())]
        );
    }

    #[test]
    fn decode_finds_request_id() {
        let json = r#"{"ok":true,"result":{"request_id":"req-42"}}"#;
        assert_eq!(decode_request_id(json).as_deref(), Some("req-42"));
    }

    #[test]
    fn decode_degrades_to_none() {
        assert_eq!(decode_request_id(r#"{"ok":false}"#), None);
        assert_eq!(decode_request_id(r#"{"ok":true,"result":{}}"#), None);
        assert_eq!(decode_request_id("{ not json }"), None);
        assert_eq!(decode_request_id(""), None);
    }
}
