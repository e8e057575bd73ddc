//! Structured logging for applications embedding fieldcrypt.
//!
//! The library itself only emits `tracing` events; installing a subscriber is
//! the embedding application's choice, and [`init`] is the stock one.
//!
//! # Telemetry invariants
//!
//! - **No plaintext, token or key material** appears in any log field. Field
//!   names, byte lengths and error codes may.

pub mod init;

pub use init::init;
