//! Domain layer: validated types and invariants, no I/O.

mod params;
mod request;
mod response;
mod validation;
mod value;

pub use params::{VerificationParams, field};
pub use request::StatusQuery;
pub use response::{DeliveryStatus, VerificationOutcome};
pub use validation::ValidationError;
pub use value::{CodeLength, ParamValue, PhoneNumber, Ttl};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_length_rejects_out_of_range() {
        assert!(CodeLength::new(3).is_err());
        assert!(CodeLength::new(4).is_ok());
        assert!(CodeLength::new(8).is_ok());
        assert!(CodeLength::new(9).is_err());
    }

    #[test]
    fn ttl_range_is_enforced() {
        assert!(Ttl::new(59).is_err());
        assert!(Ttl::new(60).is_ok());
        assert!(Ttl::new(86_400).is_ok());
        assert!(Ttl::new(86_401).is_err());
    }

    #[test]
    fn phone_number_parses_with_region_and_trims() {
        let pn = PhoneNumber::parse(Some(phonenumber::country::Id::US), " 2015550123 ").unwrap();
        assert_eq!(pn.raw(), "2015550123");
        assert_eq!(pn.e164(), "+12015550123");
    }

    #[test]
    fn params_forward_arbitrary_values_verbatim() {
        let mut params = VerificationParams::new();
        params.set("anything_at_all", "kept as-is");
        assert_eq!(params.get_str("anything_at_all"), Some("kept as-is"));
    }
}
