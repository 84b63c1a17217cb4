//! Organise IMAP mail by moving old messages into monthly archive
//! folders under `Archives`.

pub mod args;
pub mod catalog;
pub mod credentials;
pub mod eligible;
pub mod error;
pub mod organize;
pub mod relocate;
pub mod session;
pub mod utils;
