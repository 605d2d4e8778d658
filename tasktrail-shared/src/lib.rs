//! # TaskTrail Shared Library
//!
//! This crate contains the data and business-logic layers shared by the
//! TaskTrail HTTP server and its tests.
//!
//! ## Module Organization
//!
//! - `models`: Database models and their SQL operations
//! - `services`: Business rules on top of the models
//! - `db`: Connection pool and migration runner

pub mod db;
pub mod models;
pub mod services;

/// Current version of the TaskTrail shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
