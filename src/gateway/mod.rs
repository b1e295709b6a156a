//! The request-forwarding core.
//!
//! Every resource route binds the same operation: mint a backend token for
//! the resolved user, forward the inbound request, relay the response.

pub mod client;

pub use client::Gateway;
