use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{ModpickError, Result};
use crate::types::ChannelId;

/// Default page size for `conversations.members` lookups.
pub const DEFAULT_MEMBERS_LIMIT: u32 = 50;
/// Default number of moderators drawn per tick.
pub const DEFAULT_MODERATOR_COUNT: usize = 2;
/// All jobs fire in this zone unless configured otherwise.
pub const DEFAULT_TIMEZONE: &str = "Europe/Berlin";

/// Top-level config (modpick.toml + MODPICK_* env overrides).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ModpickConfig {
    pub slack: SlackConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub picker: PickerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SlackConfig {
    /// Bot user OAuth token (`xoxb-…`).
    pub bot_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// IANA timezone applied to every cron expression (e.g. "Europe/Berlin").
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Recurring picker jobs, one per channel entry.
    #[serde(default)]
    pub jobs: Vec<JobConfig>,
}

impl SchedulerConfig {
    /// Parse the configured zone into a [`chrono_tz::Tz`].
    pub fn timezone(&self) -> Result<chrono_tz::Tz> {
        self.timezone
            .parse()
            .map_err(|_| ModpickError::UnknownTimezone(self.timezone.clone()))
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            jobs: Vec::new(),
        }
    }
}

/// One recurring picker job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    pub channel_id: ChannelId,
    /// Five-field cron expression (minute granularity).
    pub schedule: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickerConfig {
    /// How many moderators to draw per tick.
    #[serde(default = "default_moderator_count")]
    pub moderator_count: usize,
    /// Page size for the channel membership lookup.
    #[serde(default = "default_members_limit")]
    pub members_limit: u32,
    /// Members never considered for selection (e.g. the bot's own user,
    /// people who opted out).
    #[serde(default)]
    pub ignored_members: Vec<crate::types::UserId>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            moderator_count: default_moderator_count(),
            members_limit: default_members_limit(),
            ignored_members: Vec::new(),
        }
    }
}

impl ModpickConfig {
    /// Load config: explicit path > MODPICK_CONFIG env > ~/.modpick/modpick.toml,
    /// with MODPICK_* env vars overriding individual keys.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);

        let config: ModpickConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("MODPICK_").split("_"))
            .extract()
            .map_err(|e| ModpickError::Config(e.to_string()))?;

        Ok(config)
    }
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.modpick/modpick.toml", home)
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

fn default_moderator_count() -> usize {
    DEFAULT_MODERATOR_COUNT
}

fn default_members_limit() -> u32 {
    DEFAULT_MEMBERS_LIMIT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = ModpickConfig::default();
        assert_eq!(cfg.picker.moderator_count, 2);
        assert_eq!(cfg.picker.members_limit, 50);
        assert_eq!(cfg.scheduler.timezone, "Europe/Berlin");
        assert!(cfg.scheduler.jobs.is_empty());
    }

    #[test]
    fn default_timezone_parses() {
        let cfg = SchedulerConfig::default();
        assert!(cfg.timezone().is_ok());
    }

    #[test]
    fn bogus_timezone_is_rejected() {
        let cfg = SchedulerConfig {
            timezone: "Mars/Olympus_Mons".into(),
            jobs: Vec::new(),
        };
        assert!(matches!(
            cfg.timezone(),
            Err(ModpickError::UnknownTimezone(_))
        ));
    }

    #[test]
    fn toml_round_trip_with_jobs() {
        let toml = r#"
            [slack]
            bot_token = "xoxb-test"

            [scheduler]
            timezone = "UTC"

            [[scheduler.jobs]]
            channel_id = "C0123456789"
            schedule = "0 9 * * 1"

            [picker]
            ignored_members = ["U0AAAAAAA"]
        "#;
        let cfg: ModpickConfig = Figment::new()
            .merge(Toml::string(toml))
            .extract()
            .unwrap();
        assert_eq!(cfg.slack.bot_token, "xoxb-test");
        assert_eq!(cfg.scheduler.jobs.len(), 1);
        assert_eq!(cfg.scheduler.jobs[0].schedule, "0 9 * * 1");
        assert_eq!(cfg.picker.ignored_members.len(), 1);
        // Unset sections keep their defaults.
        assert_eq!(cfg.picker.moderator_count, 2);
    }
}
