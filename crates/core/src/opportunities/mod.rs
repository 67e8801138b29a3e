//! Opportunities: repository port and list controller

pub mod controller;
pub mod ports;

pub use controller::OpportunitiesController;
pub use ports::OpportunitiesRepository;
