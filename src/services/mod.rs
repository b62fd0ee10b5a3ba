//! Service layer for the engine's asynchronous and batch operations.
//!
//! Separates orchestration from state so both stay independently testable.

pub mod load_service;
pub mod upload_service;

pub use load_service::FontLoadService;
