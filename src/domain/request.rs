#[derive(Debug, Clone, Default)]
/// Arguments for a verification-status check.
///
/// Both fields are optional: a missing `request_id` falls back to the id
/// remembered from the last successful send, and `code` is only needed when
/// the caller collected one from the user.
pub struct StatusQuery {
    pub request_id: Option<String>,
    pub code: Option<String>,
}

impl StatusQuery {
    /// Query the remembered request id, submitting `code` for validation.
    pub fn with_code(code: impl Into<String>) -> Self {
        Self {
            request_id: None,
            code: Some(code.into()),
        }
    }

    /// Query an explicit request id.
    pub fn for_request(request_id: impl Into<String>) -> Self {
        Self {
            request_id: Some(request_id.into()),
            code: None,
        }
    }

    /// Attach a user-supplied code to this query.
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_fill_the_right_fields() {
        let query = StatusQuery::with_code("123456");
        assert_eq!(query.request_id, None);
        assert_eq!(query.code.as_deref(), Some("123456"));

        let query = StatusQuery::for_request("req-1").code("654321");
        assert_eq!(query.request_id.as_deref(), Some("req-1"));
        assert_eq!(query.code.as_deref(), Some("654321"));
    }
}
