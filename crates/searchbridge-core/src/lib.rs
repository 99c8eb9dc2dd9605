// Public fallible APIs in this crate share one concrete error contract
// (`BridgeError`); per-function `# Errors` boilerplate would only restate it.
#![allow(
    clippy::missing_errors_doc,
    reason = "crate-wide fallible API uses one explicit error type"
)]

pub mod assessor;
pub mod config;
pub mod error;
pub mod request;
pub mod schema;
pub mod transport;
pub mod work;
pub mod works;

pub use assessor::{Assessment, SuccessAssessor};
pub use config::ServiceConfig;
pub use error::{BridgeError, Result};
pub use request::ApiRequest;
pub use transport::{HttpTransport, RawResponse, Transport};
pub use work::{ExecutionContext, Work};
