pub mod error;
pub mod points_service;
