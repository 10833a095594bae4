//! Internal modules for the village governance client.
//!
//! This library provides command parsing, account lookups and logging
//! setup used by the vg_client binary.

pub mod account;
pub mod commands;
pub mod logging;
