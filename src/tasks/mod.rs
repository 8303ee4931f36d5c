//! Background Tasks Module
//!
//! - Cache sweep: drops expired entries on a fixed period

mod cleanup;

pub use cleanup::spawn_cleanup_task;
