//! Business logic behind the relay handlers.

pub mod account_service;
pub mod destination_service;
pub mod dispatch_service;
pub mod token_service;
