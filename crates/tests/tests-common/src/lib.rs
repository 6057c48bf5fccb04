//! Helpers shared by the integration tests.

pub mod deployment;
pub mod mock_api;
pub mod router;
