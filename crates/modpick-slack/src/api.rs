use async_trait::async_trait;

use modpick_core::{ChannelId, UserId};

use crate::{
    error::SlackError,
    types::{OutgoingMessage, UserProfile},
};

/// Interface to the chat platform, as seen by the picker pipeline.
///
/// Implementations must be `Send + Sync` so one client can serve the tick
/// tasks of several scheduled channels concurrently. All methods take `&self`;
/// a connected client sends without a mutable borrow.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// List member IDs of a channel, capped at `limit`.
    ///
    /// Returns an empty vector when the channel has no members visible to the
    /// bot; transport and API failures surface as errors.
    async fn list_members(
        &self,
        channel: &ChannelId,
        limit: u32,
    ) -> Result<Vec<UserId>, SlackError>;

    /// Fetch a single user's profile.
    async fn user_profile(&self, user: &UserId) -> Result<UserProfile, SlackError>;

    /// Deliver a message — broadcast, or ephemeral when the message carries a
    /// `user_id`. No retry at this boundary; failures are the caller's to
    /// handle.
    async fn post_message(&self, message: &OutgoingMessage) -> Result<(), SlackError>;
}
