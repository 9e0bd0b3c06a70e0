//! Transport layer: wire-format details (form encoding, JSON decoding).
//!
//! Decoders return `Option` rather than an error: the gateway contract treats
//! any undecodable or incomplete body as an absent value, never as a fault.

mod check_ability;
mod check_status;
mod inspect;
mod revoke;
mod send;

pub use check_ability::{decode_request_id, encode_check_ability_form};
pub use check_status::{decode_verification_status, encode_check_status_form};
pub use inspect::{
    decode_delivery_status, decode_json, decode_remaining_balance, decode_request_cost,
};
pub use revoke::{decode_result_value, encode_revoke_form};
pub use send::{SendReceipt, decode_send_receipt, encode_send_form};
