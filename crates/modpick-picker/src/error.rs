use thiserror::Error;

use modpick_core::ChannelId;

/// Errors raised inside one picker tick.
///
/// The three roster dead-ends are caught and logged at the
/// [`RosterResolver`](crate::roster::RosterResolver) boundary and never reach
/// the workflow's caller; `Slack` covers transport/API failures and surfaces
/// to the scheduler's tick boundary.
#[derive(Debug, Error)]
pub enum PickerError {
    #[error("no members found in channel {channel}")]
    NoMembersFound { channel: ChannelId },

    #[error("no members left to pick from in channel {channel}")]
    NoEligibleMembers { channel: ChannelId },

    #[error("no human members found in channel {channel}")]
    NoHumanMembers { channel: ChannelId },

    #[error(transparent)]
    Slack(#[from] modpick_slack::SlackError),
}

pub type Result<T> = std::result::Result<T, PickerError>;
