/// Application layer - Use cases, engines and DTOs
///
/// This layer contains the application logic that orchestrates
/// governance services and coordinates with infrastructure through ports.
pub mod demo;
pub mod dto;
pub mod engines;
pub mod factories;
pub mod read_models;
pub mod use_cases;
