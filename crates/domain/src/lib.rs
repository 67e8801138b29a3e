//! # Seller Console Domain
//!
//! Business domain types for the seller console.
//!
//! This crate contains:
//! - Lead and opportunity models, patches and enums
//! - List filters, sort keys and persisted preferences
//! - The error taxonomy shared by repositories and controllers
//! - Configuration structures and constants
//! - Pure utilities (sorting, e-mail validation)
//!
//! ## Architecture
//! - No dependencies on other console crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
pub use utils::sort::{SortDirection, SortKey};
