//! Shared test helpers for `seller-console-core` integration tests.
//!
//! These helpers provide reusable fixtures and lightweight mocks so that the
//! controller tests can focus on behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod fixtures;
pub mod repositories;
pub mod storage;
