//! Recurring picker jobs: an in-memory registry of scheduled triggers and the
//! cron binding that drives them.
//!
//! One Tokio task per job sleeps until the next cron firing in the configured
//! timezone, runs the bound tick handler, and catches every handler failure
//! at the tick boundary so a bad tick never disables the job.

pub mod engine;
pub mod error;
pub mod registry;

pub use engine::{Scheduler, TickHandler};
pub use error::{Result, SchedulerError};
pub use registry::{JobRegistry, JobSnapshot, ScheduledJob};
