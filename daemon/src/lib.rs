// Tessel ledger core library
// Ledger state, operation handlers and read-only queries

// Allow some clippy lints
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::type_complexity)]

extern crate log;

pub mod api;
pub mod config;
pub mod core;
