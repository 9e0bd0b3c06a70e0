use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Outcome of a verification-status check.
///
/// Unknown status strings are preserved in [`VerificationOutcome::Other`];
/// bodies that carried no status at all (or did not decode) are preserved in
/// [`VerificationOutcome::Raw`] so callers can inspect them.
pub enum VerificationOutcome {
    /// The user entered the correct code (`code_valid`).
    Valid,
    /// The user entered a wrong code (`code_invalid`).
    Invalid,
    /// The code expired before it was checked (`expired`).
    Expired,
    /// Too many wrong attempts (`code_max_attempts_exceeded`).
    AttemptsExceeded,
    /// A status string this crate does not recognize.
    Other(String),
    /// The response body, returned untouched when no status could be read.
    Raw(String),
}

impl VerificationOutcome {
    const CODE_VALID: &'static str = "code_valid";
    const CODE_INVALID: &'static str = "code_invalid";
    const EXPIRED: &'static str = "expired";
    const CODE_MAX_ATTEMPTS_EXCEEDED: &'static str = "code_max_attempts_exceeded";

    /// Map a gateway status string to an outcome.
    pub fn from_status(status: &str) -> Self {
        match status {
            Self::CODE_VALID => Self::Valid,
            Self::CODE_INVALID => Self::Invalid,
            Self::EXPIRED => Self::Expired,
            Self::CODE_MAX_ATTEMPTS_EXCEEDED => Self::AttemptsExceeded,
            other => Self::Other(other.to_owned()),
        }
    }

    /// `true` only for a confirmed correct code.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// `true` when no further check of the same request can succeed.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Valid | Self::Expired | Self::AttemptsExceeded)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Delivery state of the last sent verification message.
///
/// The mapping is a literal comparison: the gateway reports `sent` and `read`
/// in lowercase but `Revoked` capitalized, and a lowercase `revoked` is *not*
/// recognized. That asymmetry is part of the wire contract and is preserved.
pub enum DeliveryStatus {
    Sent,
    Read,
    Revoked,
    /// A status string this crate does not recognize.
    Other(String),
    /// The stored response carried no delivery status.
    NotFound,
}

impl DeliveryStatus {
    const SENT: &'static str = "sent";
    const READ: &'static str = "read";
    const REVOKED: &'static str = "Revoked";

    /// Map the raw `delivery_status.status` field, or its absence.
    pub fn from_raw(status: Option<&str>) -> Self {
        match status {
            Some(Self::SENT) => Self::Sent,
            Some(Self::READ) => Self::Read,
            Some(Self::REVOKED) => Self::Revoked,
            Some(other) => Self::Other(other.to_owned()),
            None => Self::NotFound,
        }
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sent => f.write_str("OTP Sent"),
            Self::Read => f.write_str("OTP Read"),
            Self::Revoked => f.write_str("OTP Revoked"),
            Self::Other(value) => write!(f, "Unknown Status: {value}"),
            Self::NotFound => f.write_str("Delivery status not found"),
        }
    }
}
