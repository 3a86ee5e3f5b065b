//! Shared library surface for the DroneView monitor and its tests.

pub mod config;
pub mod loops;
pub mod state;
