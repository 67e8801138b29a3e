//! Leads: seed and repository ports, list controller

pub mod controller;
pub mod ports;

pub use controller::{LeadsController, LeadsOptions};
pub use ports::{LeadSeedSource, LeadsRepository};
