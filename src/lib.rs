//! Session and state controller for the YubiKey OATH and challenge-response
//! OTP applications.
//!
//! The crate is organised hexagonally: [`model`] holds the value types,
//! [`ports`] the traits a hardware or platform integration implements,
//! [`use_cases`] the orchestration over those traits, and [`api`] the
//! [`Controller`](api::Controller) facade tying them together. [`adapters`]
//! carries the concrete pieces that need no hardware: the persisted key
//! store and the JSON interchange layer.

pub mod adapters;
pub mod api;
pub mod error;
pub mod logic;
pub mod model;
pub mod ports;
pub mod use_cases;

pub use api::Controller;
pub use error::{YkauthError, YkauthResult};
