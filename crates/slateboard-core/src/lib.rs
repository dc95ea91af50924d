//! # Slateboard Core
//!
//! Shared foundational types for the Slateboard school administration API.
//!
//! - [`errors`]: application error type with HTTP response conversion

pub mod errors;

pub use errors::AppError;
