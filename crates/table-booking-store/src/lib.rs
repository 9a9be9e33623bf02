//! In-memory reservation store for the restaurant's tables.
//!
//! The [`TableStore`] owns the tables and implements the reservation rules.
//! The [`Server`] wraps a store behind a mutex and answers [`Request`]s from
//! any number of transport threads.
//!
//! [`Request`]: table_booking_core::Request

mod error;
mod server;
mod store;

pub use error::StoreError;
pub use server::Server;
pub use store::{Cancellation, TableStore};

/// Entrypoint for the transport layer
///
/// Constructs a request handler over a fresh store with the restaurant's
/// tables, all of them available.
pub fn launch() -> Server {
    Server::new(TableStore::new())
}
