//! Moderator selection pipeline: roster resolution, random sampling and the
//! per-tick workflow that glues them to the Slack boundary.

pub mod error;
pub mod roster;
pub mod select;
pub mod workflow;

pub use error::PickerError;
pub use roster::RosterResolver;
pub use workflow::{PickOutcome, PickerWorkflow};
