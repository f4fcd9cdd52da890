use carsift_model::prelude::{JobStatus, MediaCount};

use super::types::Ticket;
use crate::infra::errors::AcquisitionError;

/// Responses and timer ticks addressed to one coordinator activation.
#[derive(Debug, Clone)]
pub enum AcquisitionMessage {
    CountChecked(Ticket, Result<MediaCount, AcquisitionError>),
    Triggered(Ticket, Result<(), AcquisitionError>),
    PollDue(Ticket),
    Polled(Ticket, PollOutcome),
}

/// Everything one poll tick learned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollOutcome {
    pub progress: Result<JobStatus, AcquisitionError>,
    /// Fetched only when progress could not rule assets out.
    pub count: Option<Result<MediaCount, AcquisitionError>>,
}

impl AcquisitionMessage {
    pub fn ticket(&self) -> &Ticket {
        match self {
            Self::CountChecked(ticket, _)
            | Self::Triggered(ticket, _)
            | Self::PollDue(ticket)
            | Self::Polled(ticket, _) => ticket,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::CountChecked(..) => "Acquisition::CountChecked",
            Self::Triggered(..) => "Acquisition::Triggered",
            Self::PollDue(_) => "Acquisition::PollDue",
            Self::Polled(..) => "Acquisition::Polled",
        }
    }
}
