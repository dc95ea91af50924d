//! # Slateboard CLI
//!
//! Administrative tooling for the Slateboard permission model.
//!
//! The library crate holds the command implementations so they can be
//! exercised against the in-memory store in tests; the binary wires them to
//! the Postgres store.

pub mod commands;
