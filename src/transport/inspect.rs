use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
struct InspectJsonResponse {
    #[serde(default)]
    result: Option<InspectJsonResult>,
}

#[derive(Debug, Clone, Deserialize)]
struct InspectJsonResult {
    #[serde(default)]
    request_cost: Option<TransportNumber>,
    #[serde(default)]
    remaining_balance: Option<TransportNumber>,
    #[serde(default)]
    delivery_status: Option<DeliveryStatusJson>,
}

#[derive(Debug, Clone, Deserialize)]
struct DeliveryStatusJson {
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
// Money fields arrive as JSON numbers in practice, but string renditions show
// up in provider payloads often enough to tolerate both.
enum TransportNumber {
    Number(f64),
    String(String),
}

impl TransportNumber {
    fn into_f64(self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(value),
            Self::String(value) => value.trim().parse::<f64>().ok(),
        }
    }
}

/// Decode a stored body into a generic JSON value.
pub fn decode_json(body: &str) -> Option<serde_json::Value> {
    serde_json::from_str(body).ok()
}

fn decode_result(body: &str) -> Option<InspectJsonResult> {
    let parsed: InspectJsonResponse = serde_json::from_str(body).ok()?;
    parsed.result
}

/// `result.request_cost`, if present and numeric.
pub fn decode_request_cost(body: &str) -> Option<f64> {
    decode_result(body)?.request_cost?.into_f64()
}

/// `result.remaining_balance`, if present and numeric.
pub fn decode_remaining_balance(body: &str) -> Option<f64> {
    decode_result(body)?.remaining_balance?.into_f64()
}

/// The raw `result.delivery_status.status` string, if present.
pub fn decode_delivery_status(body: &str) -> Option<String> {
    decode_result(body)?.delivery_status?.status
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"
    {
      "ok": true,
      "result": {
        "request_id": "req-1",
        "request_cost": 0.25,
        "remaining_balance": 41.75,
        "delivery_status": {
          "status": "read",
          "updated_at": 1700000000
        }
      }
    }
    "#;

    #[test]
    fn decode_json_yields_generic_value() {
        let value = decode_json(BODY).unwrap();
        assert_eq!(value["result"]["request_id"], "req-1");
        assert_eq!(decode_json("{ not json }"), None);
    }

    #[test]
    fn cost_and_balance_accept_numbers() {
        assert_eq!(decode_request_cost(BODY), Some(0.25));
        assert_eq!(decode_remaining_balance(BODY), Some(41.75));
    }

    #[test]
    fn cost_and_balance_accept_numeric_strings() {
        let body = r#"{"ok":true,"result":{"request_cost":"0.50","remaining_balance":"10.00"}}"#;
        assert_eq!(decode_request_cost(body), Some(0.5));
        assert_eq!(decode_remaining_balance(body), Some(10.0));
    }

    #[test]
    fn missing_fields_degrade_to_none() {
        let body = r#"{"ok":true,"result":{}}"#;
        assert_eq!(decode_request_cost(body), None);
        assert_eq!(decode_remaining_balance(body), None);
        assert_eq!(decode_delivery_status(body), None);
        assert_eq!(decode_delivery_status(r#"{"ok":false}"#), None);
        assert_eq!(decode_delivery_status("{ not json }"), None);
    }

    #[test]
    fn delivery_status_is_returned_verbatim() {
        assert_eq!(decode_delivery_status(BODY).as_deref(), Some("read"));

        let revoked = r#"{"ok":true,"result":{"delivery_status":{"status":"Revoked"}}}"#;
        assert_eq!(decode_delivery_status(revoked).as_deref(), Some("Revoked"));
    }
}
