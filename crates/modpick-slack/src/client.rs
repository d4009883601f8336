//! Reqwest-backed Slack Web API client.
//!
//! Slack wraps every response in an `{ok, error?}` envelope and reports
//! failures with HTTP 200, so each call checks `ok` before trusting the
//! payload.

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use modpick_core::{ChannelId, UserId};

use crate::{
    api::ChatApi,
    error::{Result, SlackError},
    types::{ApiEnvelope, MembersResponse, OutgoingMessage, UserInfoResponse, UserProfile},
};

const SLACK_API_BASE: &str = "https://slack.com/api";

pub struct SlackClient {
    http: reqwest::Client,
    bot_token: String,
    base_url: String,
}

impl SlackClient {
    pub fn new(bot_token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            bot_token: bot_token.into(),
            base_url: SLACK_API_BASE.to_string(),
        }
    }

    /// Point the client at a different API root (test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn url(&self, method: &str) -> String {
        format!("{}/{}", self.base_url, method)
    }

    async fn post_json(&self, method: &'static str, body: serde_json::Value) -> Result<()> {
        let envelope: ApiEnvelope = self
            .http
            .post(self.url(method))
            .bearer_auth(&self.bot_token)
            .json(&body)
            .send()
            .await?
            .json()
            .await?;

        if !envelope.ok {
            return Err(SlackError::Api {
                method,
                code: envelope.error.unwrap_or_else(|| "unknown_error".into()),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ChatApi for SlackClient {
    async fn list_members(&self, channel: &ChannelId, limit: u32) -> Result<Vec<UserId>> {
        let method = "conversations.members";
        let resp: MembersResponse = self
            .http
            .get(self.url(method))
            .bearer_auth(&self.bot_token)
            .query(&[("channel", channel.as_str()), ("limit", &limit.to_string())])
            .send()
            .await?
            .json()
            .await?;

        if !resp.ok {
            return Err(SlackError::Api {
                method,
                code: resp.error.unwrap_or_else(|| "unknown_error".into()),
            });
        }

        let members = resp.members.unwrap_or_default();
        debug!(channel = %channel, count = members.len(), "fetched channel members");
        Ok(members)
    }

    async fn user_profile(&self, user: &UserId) -> Result<UserProfile> {
        let method = "users.info";
        let resp: UserInfoResponse = self
            .http
            .get(self.url(method))
            .bearer_auth(&self.bot_token)
            .query(&[("user", user.as_str())])
            .send()
            .await?
            .json()
            .await?;

        if !resp.ok {
            return Err(SlackError::Api {
                method,
                code: resp.error.unwrap_or_else(|| "unknown_error".into()),
            });
        }

        let wire = resp.user.ok_or(SlackError::MalformedResponse {
            method,
            reason: "ok response without a user object".into(),
        })?;
        Ok(UserProfile {
            id: wire.id,
            is_bot: wire.is_bot,
        })
    }

    async fn post_message(&self, message: &OutgoingMessage) -> Result<()> {
        // Ephemeral when addressed to a single user, broadcast otherwise.
        // link_names makes Slack expand <@U…> mentions in both forms.
        match &message.user_id {
            Some(user) => {
                self.post_json(
                    "chat.postEphemeral",
                    json!({
                        "channel": message.channel_id.as_str(),
                        "user": user.as_str(),
                        "text": message.text,
                        "link_names": true,
                    }),
                )
                .await
            }
            None => {
                self.post_json(
                    "chat.postMessage",
                    json!({
                        "channel": message.channel_id.as_str(),
                        "text": message.text,
                        "link_names": true,
                    }),
                )
                .await
            }
        }
    }
}
