//! # Database module: PostgreSQL connection pool management
//!
//! The shared PostgreSQL pool used by every server function. Entirely gated behind
//! `#[cfg(feature = "server")]` so browser builds never pull in SQLx or Tokio networking code.
//!
//! The pool is a lazy, process-wide singleton backed by a [`tokio::sync::OnceCell`]; the first
//! call to [`get_pool`] reads the [`crate::config::ServerConfig`] and opens the pool.

#[cfg(feature = "server")]
mod pool;

#[cfg(feature = "server")]
pub use pool::get_pool;
