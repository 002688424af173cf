//! Requests module - the service request lifecycle.

mod errors;
mod requests_model;
mod requests_service;
mod requests_traits;


// Re-export the public interface
pub use errors::RequestError;
pub use requests_model::{
    decode_cursor, encode_cursor, NewServiceRequest, RequestFilter, RequestPage, RequestState,
    RequestStatus, ServiceRequest,
};
pub use requests_service::RequestService;
pub use requests_traits::{RequestServiceTrait, ServiceRequestRepositoryTrait};
