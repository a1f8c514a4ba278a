//! Volunteer matching backend: profiles, jobs and applications held in memory
//! and exposed over a JSON HTTP API.

pub mod config;
pub mod error;
pub mod marketplace;
pub mod telemetry;
