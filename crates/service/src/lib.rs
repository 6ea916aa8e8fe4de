//! Service layer providing business-oriented CRUD operations on top of models.
//! - One generic `ResourceService` shared by every resource type.
//! - Storage backends live in `storage` behind the `ResourceStore` contract.
//! - Clear error types; the HTTP layer owns status codes.

pub mod errors;
pub mod resource_service;
pub mod sample_service;
pub mod storage;
#[cfg(test)]
pub mod test_support;
