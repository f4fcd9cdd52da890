use carsift_model::prelude::{
    AcquisitionFailure, JobPhase, JobStatus, MediaCount,
};
use log::{debug, info, warn};

use super::coordinator::AcquisitionCoordinator;
use super::messages::{AcquisitionMessage, PollOutcome};
use super::types::AcquisitionStatus;
use crate::common::task::Task;
use crate::infra::errors::AcquisitionError;

impl AcquisitionCoordinator {
    /// Apply one response. Responses from a previous activation, or for a
    /// different key, are dropped without touching state.
    pub fn update(
        &mut self,
        message: AcquisitionMessage,
    ) -> Task<AcquisitionMessage> {
        if !self.accepts(message.ticket()) {
            debug!(
                "[Coordinator] {} dropping stale {} for {}",
                self.key(),
                message.name(),
                message.ticket()
            );
            return Task::none();
        }

        match (self.status.clone(), message) {
            (
                AcquisitionStatus::Checking,
                AcquisitionMessage::CountChecked(_, result),
            ) => self.handle_count_checked(result),
            (
                AcquisitionStatus::Triggering,
                AcquisitionMessage::Triggered(_, result),
            ) => self.handle_triggered(result),
            (AcquisitionStatus::Polling, AcquisitionMessage::PollDue(_)) => {
                self.poll()
            }
            (
                AcquisitionStatus::Polling,
                AcquisitionMessage::Polled(_, outcome),
            ) => self.handle_polled(outcome),
            (status, message) => {
                debug!(
                    "[Coordinator] {} ignoring {} while {}",
                    self.key(),
                    message.name(),
                    status
                );
                Task::none()
            }
        }
    }

    fn handle_count_checked(
        &mut self,
        result: Result<MediaCount, AcquisitionError>,
    ) -> Task<AcquisitionMessage> {
        match result {
            Ok(count) if !count.is_empty() => {
                info!("[Coordinator] {} already has {} assets", self.key(), count);
                self.transition(AcquisitionStatus::Ready(count));
                Task::none()
            }
            Ok(_) => {
                self.transition(AcquisitionStatus::Triggering);
                self.trigger()
            }
            Err(err) => {
                // An unknown count is treated like zero: the trigger is
                // idempotent on the backend.
                warn!(
                    "[Coordinator] {} count check failed, triggering anyway: {}",
                    self.key(),
                    err
                );
                self.transition(AcquisitionStatus::Triggering);
                self.trigger()
            }
        }
    }

    fn handle_triggered(
        &mut self,
        result: Result<(), AcquisitionError>,
    ) -> Task<AcquisitionMessage> {
        match result {
            Ok(()) => {
                self.attempts = 0;
                self.transition(AcquisitionStatus::Polling);
                self.schedule_poll()
            }
            Err(err) => {
                info!("[Coordinator] {} trigger rejected: {}", self.key(), err);
                self.transition(AcquisitionStatus::Failed(
                    AcquisitionFailure::Transport(err.to_string()),
                ));
                Task::none()
            }
        }
    }

    fn handle_polled(&mut self, outcome: PollOutcome) -> Task<AcquisitionMessage> {
        self.attempts += 1;
        let PollOutcome { progress, count } = outcome;

        let mut job_failed = false;
        let mut job_complete = false;
        let mut current = 0;
        match progress {
            Ok(status) => {
                current = status.current;
                job_failed = status.phase == JobPhase::Failed;
                job_complete = status.phase == JobPhase::Complete;
                self.progress = Some(status);
            }
            Err(AcquisitionError::Malformed(reason)) => {
                warn!(
                    "[Coordinator] {} malformed progress, treating job as failed: {}",
                    self.key(),
                    reason
                );
                job_failed = true;
                self.progress = Some(JobStatus::failed());
            }
            Err(err) => {
                warn!(
                    "[Coordinator] {} progress unavailable on tick {}: {}",
                    self.key(),
                    self.attempts,
                    err
                );
            }
        }

        let count = match count {
            Some(Ok(count)) => count.get(),
            Some(Err(err)) => {
                warn!("[Coordinator] {} count unavailable: {}", self.key(), err);
                0
            }
            None => 0,
        };

        // Any asset on disk is enough to show a gallery, whatever the job
        // says about itself.
        let ready = count.max(current);
        if ready > 0 {
            info!(
                "[Coordinator] {} ready with {} assets after {} polls",
                self.key(),
                ready,
                self.attempts
            );
            self.stop_polling();
            self.transition(AcquisitionStatus::Ready(MediaCount::new(ready)));
            return Task::none();
        }

        if job_failed {
            info!("[Coordinator] {} job failed", self.key());
            self.stop_polling();
            self.transition(AcquisitionStatus::Failed(AcquisitionFailure::Job));
            return Task::none();
        }

        if job_complete {
            info!("[Coordinator] {} job complete without assets", self.key());
            self.stop_polling();
            self.transition(AcquisitionStatus::Empty);
            return Task::none();
        }

        if self.attempts >= self.policy().max_attempts {
            info!(
                "[Coordinator] {} giving up after {} polls",
                self.key(),
                self.attempts
            );
            self.stop_polling();
            self.transition(AcquisitionStatus::Empty);
            return Task::none();
        }

        self.schedule_poll()
    }
}
