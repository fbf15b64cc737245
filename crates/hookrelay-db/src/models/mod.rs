//! Typed records for the relay's two tables.

pub mod account;
pub mod destination;

pub use account::{Account, CreateAccount, UpdateAccountFields};
pub use destination::{CreateDestination, Destination, UpdateDestinationFields};
