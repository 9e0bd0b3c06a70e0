//! Typed Rust client for the Telegram Gateway verification API.
//!
//! The gateway delivers one-time codes to Telegram users: check that a number
//! can receive one, send it, check what the user entered, revoke it early.
//! The design is three layers: a domain layer of strong types, a transport
//! layer for wire-format quirks, and a small client layer orchestrating the
//! four remote operations.
//!
//! Misuse (no phone number, no request id, a parameter out of range) fails
//! fast with [`GatewayError`]; anything the remote side does (network
//! failures, unexpected statuses, malformed bodies) degrades into `false`,
//! `None`, or a raw-body fallback instead of an error, so a flaky gateway
//! never breaks a caller's control flow.
//!
//! ```rust,no_run
//! use telegram_gateway::{GatewayClient, StatusQuery, VerificationOutcome};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), telegram_gateway::GatewayError> {
//!     let mut client = GatewayClient::new("<api-token>");
//!     client.set_phone_number("+12015550123");
//!
//!     if client.check_send_ability(None).await? {
//!         client.send_verification_message(None).await?;
//!     }
//!
//!     // ...later, with the code the user typed in:
//!     let outcome = client
//!         .check_verification_status(StatusQuery::with_code("123456"))
//!         .await?;
//!     if let Some(VerificationOutcome::Valid) = outcome {
//!         println!("verified");
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
pub mod session;
mod transport;

pub use client::{BASE_URL, GatewayClient, GatewayClientBuilder, GatewayError, endpoint};
pub use domain::{
    CodeLength, DeliveryStatus, ParamValue, PhoneNumber, StatusQuery, Ttl, ValidationError,
    VerificationOutcome, VerificationParams, field,
};
pub use session::{MemorySessionStore, REQUEST_ID_KEY, SessionStore};
