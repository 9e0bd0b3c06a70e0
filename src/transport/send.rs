use serde::Deserialize;

use crate::domain::{VerificationParams, field};

#[derive(Debug, Clone, Deserialize)]
struct SendJsonResponse {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    result: Option<SendJsonResult>,
}

#[derive(Debug, Clone, Deserialize)]
struct SendJsonResult {
    #[serde(default)]
    request_id: Option<String>,
    #[serde(default)]
    phone_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// The slice of a send response the client acts on.
pub struct SendReceipt {
    pub ok: bool,
    pub request_id: Option<String>,
    pub phone_number: Option<String>,
}

/// Encode the send request: the resolved number plus the whole parameter bag.
///
/// The resolved number wins over any `phone_number` entry in the bag; what
/// was validated is what is sent.
pub fn encode_send_form(
    phone_number: &str,
    params: &VerificationParams,
) -> Vec<(String, String)> {
    let mut form = vec![(field::PHONE_NUMBER.to_owned(), phone_number.to_owned())];
    for (key, value) in params.iter() {
        if key == field::PHONE_NUMBER {
            continue;
        }
        form.push((key.to_owned(), value.to_string()));
    }
    form
}

pub fn decode_send_receipt(json: &str) -> Option<SendReceipt> {
    let parsed: SendJsonResponse = serde_json::from_str(json).ok()?;
    let result = parsed.result;
    Some(SendReceipt {
        ok: parsed.ok,
        request_id: result.as_ref().and_then(|r| r.request_id.clone()),
        phone_number: result.and_then(|r| r.phone_number),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_send_form_leads_with_phone_number() {
        let mut params = VerificationParams::new();
        params.set(field::SENDER_USERNAME, "acme_bot");
        params.set("ttl", 300u32);

        assert_eq!(
            encode_send_form("+12015550123", &params),
            vec![
                ("phone_number".to_owned(), "+12015550123".to_owned()),
                ("code_length".to_owned(), "6".to_owned()),
                ("sender_username".to_owned(), "acme_bot".to_owned()),
                ("ttl".to_owned(), "300".to_owned()),
            ]
        );
    }

    #[test]
    fn encode_send_form_skips_stale_phone_number_param() {
        let mut params = VerificationParams::new();
        params.set(field::PHONE_NUMBER, "+19998887777");

        let form = encode_send_form("+12015550123", &params);
        let numbers: Vec<_> = form
            .iter()
            .filter(|(key, _)| key == "phone_number")
            .collect();
        assert_eq!(
            numbers,
            vec![&("phone_number".to_owned(), "+12015550123".to_owned())]
        );
    }

    #[test]
    fn decode_send_receipt_maps_success_payload() {
        let json = r#"
        {
          "ok": true,
          "result": {
            "request_id": "req-1",
            "phone_number": "+12015550123",
            "request_cost": 0.2
          }
        }
        "#;

        let receipt = decode_send_receipt(json).unwrap();
        assert!(receipt.ok);
        assert_eq!(receipt.request_id.as_deref(), Some("req-1"));
        assert_eq!(receipt.phone_number.as_deref(), Some("+12015550123"));
    }

    #[test]
    fn decode_send_receipt_tolerates_error_payload() {
        let json = r#"{"ok":false,"error":"PHONE_NUMBER_INVALID"}"#;
        let receipt = decode_send_receipt(json).unwrap();
        assert!(!receipt.ok);
        assert_eq!(receipt.request_id, None);
        assert_eq!(receipt.phone_number, None);
    }

    #[test]
    fn decode_send_receipt_degrades_to_none_on_bad_json() {
        assert_eq!(decode_send_receipt("{ not json }"), None);
        assert_eq!(decode_send_receipt(""), None);
    }
}
