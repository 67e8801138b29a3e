//! Lead to opportunity conversion

pub mod service;

pub use service::{find_duplicate, ConversionOptions, ConversionService};
