//! HTTP surface and fanout core of the hookrelay webhook relay.
//!
//! Accounts and destinations are plain CRUD over [`hookrelay_db`]; the
//! interesting path is data ingestion: a caller posts a JSON object under an
//! account's secret token and the payload is relayed synchronously to every
//! destination the account owns.
//!
//! Delivery is intentionally best-effort and fail-fast: destinations are
//! attempted one at a time in store order, and the first failure aborts the
//! fanout; destinations after it are never attempted. There is no queue, no
//! retry, and no per-destination isolation.

pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use error::{ApiError, ApiResult, ErrorResponse};
pub use router::{api_router, ApiState};
pub use services::dispatch_service::DispatchService;
pub use services::token_service::TokenAuthenticator;
