//! In-memory registry of active scheduled jobs.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;
use uuid::Uuid;

use modpick_core::ChannelId;

use crate::error::{Result, SchedulerError};

/// One active recurring trigger. The cancellation token and task handle are
/// owned exclusively by the registry entry; cancelling the token is the only
/// way to silence future ticks.
pub struct ScheduledJob {
    pub id: String,
    pub channel_id: ChannelId,
    /// Original cron expression as configured.
    pub schedule: String,
    pub created_at: DateTime<Utc>,
    token: CancellationToken,
    /// Kept so the entry owns its task; the loop itself exits via the token,
    /// between firings, so a tick already in progress always completes.
    _task: JoinHandle<()>,
}

impl ScheduledJob {
    pub fn new(
        channel_id: ChannelId,
        schedule: impl Into<String>,
        token: CancellationToken,
        task: JoinHandle<()>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            channel_id,
            schedule: schedule.into(),
            created_at: Utc::now(),
            token,
            _task: task,
        }
    }

    pub fn snapshot(&self) -> JobSnapshot {
        JobSnapshot {
            id: self.id.clone(),
            channel_id: self.channel_id.clone(),
            schedule: self.schedule.clone(),
            created_at: self.created_at,
        }
    }

    fn cancel(&self) {
        self.token.cancel();
    }
}

/// Read-only view of a registry entry. Snapshots never observe later registry
/// mutations and carry no live handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSnapshot {
    pub id: String,
    pub channel_id: ChannelId,
    pub schedule: String,
    pub created_at: DateTime<Utc>,
}

/// Insertion-ordered store of active jobs.
///
/// An explicit capability object: construct one at startup, wrap it in an
/// `Arc` and hand it to whoever needs to add or enumerate jobs. Nothing here
/// deduplicates by channel; scheduling the same channel twice yields two
/// independent timers.
///
/// The backing Vec is mutex-guarded because the Tokio host is multi-threaded;
/// the lock is never held across an await point.
#[derive(Default)]
pub struct JobRegistry {
    jobs: Mutex<Vec<ScheduledJob>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a job. Always succeeds.
    pub fn add_job(&self, job: ScheduledJob) {
        let mut jobs = self.jobs.lock().unwrap();
        info!(job_id = %job.id, channel = %job.channel_id, "job registered");
        jobs.push(job);
    }

    /// Current contents in insertion order.
    pub fn list_jobs(&self) -> Vec<JobSnapshot> {
        self.jobs
            .lock()
            .unwrap()
            .iter()
            .map(ScheduledJob::snapshot)
            .collect()
    }

    /// Cancel one job and remove it from the registry.
    ///
    /// Future firings stop; a tick already in progress completes.
    pub fn cancel_job(&self, id: &str) -> Result<()> {
        let mut jobs = self.jobs.lock().unwrap();
        let idx = jobs
            .iter()
            .position(|j| j.id == id)
            .ok_or_else(|| SchedulerError::JobNotFound { id: id.to_string() })?;
        let job = jobs.remove(idx);
        job.cancel();
        info!(job_id = %id, channel = %job.channel_id, "job cancelled");
        Ok(())
    }

    /// Cancel every job (shutdown path).
    pub fn cancel_all(&self) {
        let mut jobs = self.jobs.lock().unwrap();
        for job in jobs.drain(..) {
            job.cancel();
        }
    }

    pub fn len(&self) -> usize {
        self.jobs.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.lock().unwrap().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idle_job(channel: &str, schedule: &str) -> ScheduledJob {
        ScheduledJob::new(
            channel.into(),
            schedule,
            CancellationToken::new(),
            tokio::spawn(async {}),
        )
    }

    #[tokio::test]
    async fn add_then_list_appends_in_order() {
        let registry = JobRegistry::new();
        assert!(registry.is_empty());

        let job = idle_job("C1", "0 9 * * 1");
        let expected = job.snapshot();
        registry.add_job(job);

        let listed = registry.list_jobs();
        assert_eq!(listed.len(), 1);
        assert_eq!(*listed.last().unwrap(), expected);

        registry.add_job(idle_job("C2", "0 9 * * 2"));
        let listed = registry.list_jobs();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0], expected);
        assert_eq!(listed[1].channel_id, "C2".into());
    }

    #[tokio::test]
    async fn duplicate_channels_are_independent_entries() {
        let registry = JobRegistry::new();
        registry.add_job(idle_job("C1", "0 9 * * 1"));
        registry.add_job(idle_job("C1", "0 9 * * 1"));

        let listed = registry.list_jobs();
        assert_eq!(listed.len(), 2);
        assert_ne!(listed[0].id, listed[1].id);
    }

    #[tokio::test]
    async fn list_is_a_snapshot() {
        let registry = JobRegistry::new();
        registry.add_job(idle_job("C1", "* * * * *"));
        let before = registry.list_jobs();
        registry.add_job(idle_job("C2", "* * * * *"));
        assert_eq!(before.len(), 1);
    }

    #[tokio::test]
    async fn cancel_removes_the_job() {
        let registry = JobRegistry::new();
        registry.add_job(idle_job("C1", "* * * * *"));
        let id = registry.list_jobs()[0].id.clone();

        registry.cancel_job(&id).unwrap();
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn cancel_unknown_job_errors() {
        let registry = JobRegistry::new();
        let result = registry.cancel_job("nope");
        assert!(matches!(result, Err(SchedulerError::JobNotFound { .. })));
    }
}
