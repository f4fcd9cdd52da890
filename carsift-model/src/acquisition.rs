//! Observable shape of a backend acquisition job.

/// Lifecycle phase reported by the backend for an entity's acquisition job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum JobPhase {
    #[default]
    Idle,
    Running,
    Complete,
    Failed,
}

impl JobPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobPhase::Idle => "idle",
            JobPhase::Running => "running",
            JobPhase::Complete => "complete",
            JobPhase::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobPhase::Complete | JobPhase::Failed)
    }
}

impl std::fmt::Display for JobPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time snapshot of a job.
///
/// `total == 0` means the backend does not know the final count yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JobStatus {
    pub phase: JobPhase,
    pub current: u32,
    pub total: u32,
}

impl JobStatus {
    pub fn new(phase: JobPhase, current: u32, total: u32) -> Self {
        Self {
            phase,
            current,
            total,
        }
    }

    pub fn running(current: u32, total: u32) -> Self {
        Self::new(JobPhase::Running, current, total)
    }

    pub fn failed() -> Self {
        Self::new(JobPhase::Failed, 0, 0)
    }

    pub fn total_known(&self) -> bool {
        self.total > 0
    }

    /// At least one asset has been produced.
    pub fn has_assets(&self) -> bool {
        self.current > 0
    }
}

/// Number of ready assets for an entity, independent of job phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct MediaCount(u32);

impl MediaCount {
    pub const ZERO: MediaCount = MediaCount(0);

    pub fn new(count: u32) -> Self {
        MediaCount(count)
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for MediaCount {
    fn from(count: u32) -> Self {
        MediaCount(count)
    }
}

impl std::fmt::Display for MediaCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why an acquisition stopped without producing a gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcquisitionFailure {
    /// The trigger request never reached an accepting backend.
    Transport(String),
    /// The backend reported the job itself as failed.
    Job,
}

impl AcquisitionFailure {
    pub fn is_transport(&self) -> bool {
        matches!(self, AcquisitionFailure::Transport(_))
    }
}

impl std::fmt::Display for AcquisitionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AcquisitionFailure::Transport(msg) => {
                write!(f, "transport failure: {msg}")
            }
            AcquisitionFailure::Job => write!(f, "acquisition job failed"),
        }
    }
}
