//! # CyberPrep Core
//!
//! The domain layer of the CyberPrep submission gateway.
//! Submitted records, their validation rules, and the ports the
//! infrastructure layer has to provide. No I/O happens in this crate.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, StoreError};
