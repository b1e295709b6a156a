//! Session resolution for inbound requests.
//!
//! A request's identity comes from the session cookie, which either carries
//! a signed session token or an opaque id looked up in the in-memory
//! session store. Resolvers are tried in order; the first success wins.

pub mod cookie_resolver;
pub mod session;
pub mod session_store;

pub use cookie_resolver::SignedCookieResolver;
pub use session::{Session, SessionResolver, Sessions};
pub use session_store::SessionStore;
