//! HTTP layer: the session gateway, the response envelope and the error
//! taxonomy shared by every API operation.

pub mod envelope;
pub mod errors;
pub mod gateway;

pub use envelope::ApiResponse;
pub use errors::{ApiError, ApiResult};
pub use gateway::{DEFAULT_REQUEST_TIMEOUT, SessionGateway};
