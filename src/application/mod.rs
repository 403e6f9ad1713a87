// Application layer - Use cases and ports
pub mod analysis_repository;
pub mod analysis_service;
pub mod plant_service;
pub mod session_store;
pub mod streaming_service;
