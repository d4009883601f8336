pub mod config;
pub mod error;
pub mod types;

pub use config::ModpickConfig;
pub use error::{ModpickError, Result};
pub use types::{ChannelId, UserId};
