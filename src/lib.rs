//! Library exports for taskgate, shared between the binary and tests.

pub mod config;
pub mod gateway;
pub mod mint;
pub mod prefs;
pub mod routes;
pub mod session;
pub mod startup;
pub mod state;
pub mod store;
pub mod utils;
