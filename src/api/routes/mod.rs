//! Route handlers for the retrieval API.

pub mod component;
pub mod health;
