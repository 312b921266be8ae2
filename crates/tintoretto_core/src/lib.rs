//! Core data types for the Tintoretto narrative transposition library.
//!
//! This crate provides the provider-neutral conversation types used across
//! all Tintoretto interfaces.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod message;
mod request;
mod role;

pub use message::Message;
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse};
pub use role::Role;
