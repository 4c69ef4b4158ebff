//! Request and response types of the HTTP API

pub mod request;
pub mod response;

pub use request::{FieldError, IrisInput};
pub use response::{ErrorDetail, ErrorResponse, HealthResponse, PredictionResponse};
