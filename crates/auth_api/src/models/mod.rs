//! HTTP request and response models
//!
//! These types are distinct from domain types and exist only in the HTTP layer.

pub mod request;
pub mod response;

// Re-export commonly used types
pub use request::{
    DurationInput, LoginRequest, MappingWriteRequest, RenewRequest, WriteConfigRequest,
};
pub use response::{
    ConfigResponse, HealthCheckResponse, LoginMetadata, LoginResponse, MappingListResponse,
    MappingResponse,
};
