//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of the process.
//!
//! # Tasks
//! - Expiration sweep: purges expired records from every store

mod sweep;

pub use sweep::spawn_sweep_task;
