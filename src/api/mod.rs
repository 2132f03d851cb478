//! Read-only HTTP retrieval surface over the artifact store.

pub mod routes;
pub mod server;
