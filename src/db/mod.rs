//! Database layer: repositories, row models and error categorization.
//!
//! Handlers acquire a connection (or a transaction) from the pool and hand it
//! to a repository. Repositories never own a pool so the caller decides the
//! transaction boundary.

pub mod errors;
pub mod handlers;
pub mod models;
