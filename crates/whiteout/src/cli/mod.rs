//! Command handlers.

pub mod convert;
