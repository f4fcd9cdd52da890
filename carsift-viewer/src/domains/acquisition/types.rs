use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use carsift_config::AcquisitionConfig;
use carsift_model::prelude::{
    AcquisitionFailure, EntityKey, JobStatus, MediaCount,
};

/// Activation counter value. Strictly increasing across a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Epoch(u64);

impl Epoch {
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Epoch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Shared monotonic source of [`Epoch`] values.
///
/// Clones hand out from the same counter, so an epoch is never reused for a
/// key even after its coordinator was discarded and recreated.
#[derive(Debug, Clone, Default)]
pub struct EpochSource(Arc<AtomicU64>);

impl EpochSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> Epoch {
        Epoch(self.0.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

/// Identity of the activation a response belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub key: EntityKey,
    pub epoch: Epoch,
}

impl Ticket {
    pub fn new(key: EntityKey, epoch: Epoch) -> Self {
        Self { key, epoch }
    }
}

impl std::fmt::Display for Ticket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.key, self.epoch)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AcquisitionStatus {
    #[default]
    NotStarted,
    Checking,
    Triggering,
    Polling,
    Ready(MediaCount),
    Empty,
    Failed(AcquisitionFailure),
}

impl AcquisitionStatus {
    pub fn name(&self) -> &'static str {
        match self {
            Self::NotStarted => "not-started",
            Self::Checking => "checking",
            Self::Triggering => "triggering",
            Self::Polling => "polling",
            Self::Ready(_) => "ready",
            Self::Empty => "empty",
            Self::Failed(_) => "failed",
        }
    }

    /// A request or poll loop is outstanding.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Checking | Self::Triggering | Self::Polling)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready(_) | Self::Empty | Self::Failed(_))
    }

    /// `Empty` and `Failed` may be left again by a fresh activation.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Empty | Self::Failed(_))
    }

    pub fn ready_count(&self) -> Option<MediaCount> {
        match self {
            Self::Ready(count) => Some(*count),
            _ => None,
        }
    }
}

impl std::fmt::Display for AcquisitionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ready(count) => write!(f, "ready({count})"),
            Self::Failed(failure) => write!(f, "failed({failure})"),
            other => f.write_str(other.name()),
        }
    }
}

/// What observers see after every coordinator transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquisitionSnapshot {
    pub key: EntityKey,
    pub status: AcquisitionStatus,
    /// Poll ticks completed in the current activation.
    pub attempts: u32,
    pub max_attempts: u32,
    /// Last job status received; `None` until the first successful tick.
    pub progress: Option<JobStatus>,
}

impl AcquisitionSnapshot {
    /// `"current/total"`, with `…` standing in for an unknown total.
    pub fn progress_label(&self) -> Option<String> {
        if self.status != AcquisitionStatus::Polling {
            return None;
        }
        let progress = self.progress.unwrap_or_default();
        Some(if progress.total_known() {
            format!("{}/{}", progress.current, progress.total)
        } else {
            format!("{}/…", progress.current)
        })
    }
}

/// Bounded polling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        AcquisitionConfig::default().into()
    }
}

impl From<AcquisitionConfig> for PollPolicy {
    fn from(config: AcquisitionConfig) -> Self {
        Self {
            interval: config.poll_interval,
            max_attempts: config.max_poll_attempts,
        }
    }
}

impl From<&AcquisitionConfig> for PollPolicy {
    fn from(config: &AcquisitionConfig) -> Self {
        (*config).into()
    }
}
