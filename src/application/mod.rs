/// Application layer - Use cases, DTOs and factories
///
/// This layer orchestrates the assembly domain and coordinates with
/// infrastructure through ports.
pub mod dto;
pub mod factories;
pub mod use_cases;
