//! Domain error types.

mod gateway_error;
mod resource_error;

pub use gateway_error::GatewayError;
pub use resource_error::ResourceError;
