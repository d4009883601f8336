pub mod api;
pub mod client;
pub mod error;
pub mod types;

pub use api::ChatApi;
pub use client::SlackClient;
pub use error::SlackError;
pub use types::{OutgoingMessage, UserProfile};
