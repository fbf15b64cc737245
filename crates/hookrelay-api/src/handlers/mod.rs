//! Request handlers for the relay API.

pub mod accounts;
pub mod destinations;
pub mod ingest;
