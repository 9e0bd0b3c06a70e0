use std::collections::BTreeMap;

use crate::domain::value::{CodeLength, ParamValue};

/// Form field names the gateway recognizes beyond the validated ones.
pub mod field {
    pub const PHONE_NUMBER: &str = "phone_number";
    pub const REQUEST_ID: &str = "request_id";
    pub const CODE: &str = "code";
    pub const SENDER_USERNAME: &str = "sender_username";
    pub const CALLBACK_URL: &str = "callback_url";
    pub const PAYLOAD: &str = "payload";
}

#[derive(Debug, Clone, PartialEq)]
/// Verification parameters forwarded with every send request.
///
/// This is deliberately a loose bag: the gateway itself is loosely typed and
/// whatever the caller stores here is forwarded verbatim. Only `code_length`
/// and `ttl` have validated setters, on [`crate::GatewayClient`]. Iteration
/// order is the key order, so encoded request bodies are deterministic.
pub struct VerificationParams(BTreeMap<String, ParamValue>);

impl VerificationParams {
    /// Create the parameter bag with the default `code_length` of 6.
    pub fn new() -> Self {
        let mut params = BTreeMap::new();
        params.insert(
            CodeLength::FIELD.to_owned(),
            ParamValue::Integer(i64::from(CodeLength::DEFAULT)),
        );
        Self(params)
    }

    /// Store a value under `key`, replacing any previous one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Look up the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    /// String value stored under `key`, if any.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ParamValue::as_str)
    }

    /// Integer value stored under `key`, if any.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(ParamValue::as_i64)
    }

    /// Remove the value stored under `key`.
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.0.remove(key)
    }

    /// Iterate over the stored parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Render every parameter as a form pair, in key order.
    pub fn to_form(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|(key, value)| (key.clone(), value.to_string()))
            .collect()
    }
}

impl Default for VerificationParams {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_bag_carries_default_code_length() {
        let params = VerificationParams::new();
        assert_eq!(params.get_i64(CodeLength::FIELD), Some(6));
    }

    #[test]
    fn set_get_remove_round_trip() {
        let mut params = VerificationParams::new();
        params.set(field::CODE, "12345");
        assert_eq!(params.get_str(field::CODE), Some("12345"));

        params.set(field::CODE, "54321");
        assert_eq!(params.get_str(field::CODE), Some("54321"));

        assert_eq!(
            params.remove(field::CODE),
            Some(ParamValue::String("54321".to_owned()))
        );
        assert_eq!(params.get(field::CODE), None);
    }

    #[test]
    fn to_form_renders_in_key_order() {
        let mut params = VerificationParams::new();
        params.set(field::SENDER_USERNAME, "acme_bot");
        params.set(field::CALLBACK_URL, "https://example.invalid/hook");

        assert_eq!(
            params.to_form(),
            vec![
                (
                    "callback_url".to_owned(),
                    "https://example.invalid/hook".to_owned()
                ),
                ("code_length".to_owned(), "6".to_owned()),
                ("sender_username".to_owned(), "acme_bot".to_owned()),
            ]
        );
    }

    #[test]
    fn payload_is_opaque() {
        let mut params = VerificationParams::new();
        params.set(field::PAYLOAD, "order=17;retry");
        assert_eq!(
            params.get(field::PAYLOAD),
            Some(&ParamValue::String("order=17;retry".to_owned()))
        );

        params.set(field::PAYLOAD, 99i64);
        assert_eq!(params.get_i64(field::PAYLOAD), Some(99));
    }
}
