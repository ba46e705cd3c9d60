//! Chat endpoint abstraction for Parley.
//!
//! - `ChatBackend`: RPITIT trait for the network collaborator that turns a
//!   request body into a reply. The HTTP implementation lives in parley-infra.

pub mod provider;
