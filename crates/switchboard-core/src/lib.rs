//! Switchboard Core - Shared types for the switchboard dispatch layer.
//!
//! This crate provides the value model and error types used by every
//! switchboard component.

pub mod error;
pub mod values;

pub use error::{BoxError, DispatchError, DispatchResult};
pub use values::{Args, Number, Value, ValueError};
