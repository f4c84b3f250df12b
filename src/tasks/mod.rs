//! Background tasks module
//!
//! This module contains the idle countdown driver and the housekeeping task
//! that run alongside the HTTP server.

pub mod idle_driver;
pub mod clock_recovery;

// Re-export main functions
pub use idle_driver::idle_driver_task;
pub use clock_recovery::clock_recovery_task;
