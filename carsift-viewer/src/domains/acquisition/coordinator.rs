use std::sync::Arc;

use carsift_model::prelude::{EntityKey, JobStatus, SourceRef};
use log::{debug, info};
use tokio_util::sync::CancellationToken;

use super::messages::{AcquisitionMessage, PollOutcome};
use super::types::{
    AcquisitionSnapshot, AcquisitionStatus, Epoch, EpochSource, PollPolicy,
    Ticket,
};
use crate::common::task::Task;
use crate::infra::services::acquisition::AcquisitionApiService;

/// Per-entity acquisition state machine.
///
/// All mutation happens through [`activate`](Self::activate),
/// [`deactivate`](Self::deactivate) and [`update`](Self::update); each
/// returns the follow-up work instead of running it.
#[derive(Debug)]
pub struct AcquisitionCoordinator {
    key: EntityKey,
    source_ref: SourceRef,
    service: Arc<dyn AcquisitionApiService>,
    policy: PollPolicy,
    epochs: EpochSource,
    pub(super) status: AcquisitionStatus,
    pub(super) attempts: u32,
    pub(super) progress: Option<JobStatus>,
    epoch: Option<Epoch>,
    cancel: CancellationToken,
}

impl AcquisitionCoordinator {
    pub fn new(
        key: EntityKey,
        source_ref: SourceRef,
        service: Arc<dyn AcquisitionApiService>,
        policy: PollPolicy,
        epochs: EpochSource,
    ) -> Self {
        Self {
            key,
            source_ref,
            service,
            policy,
            epochs,
            status: AcquisitionStatus::NotStarted,
            attempts: 0,
            progress: None,
            epoch: None,
            cancel: CancellationToken::new(),
        }
    }

    pub fn key(&self) -> &EntityKey {
        &self.key
    }

    pub fn source_ref(&self) -> &SourceRef {
        &self.source_ref
    }

    pub fn status(&self) -> &AcquisitionStatus {
        &self.status
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn progress(&self) -> Option<JobStatus> {
        self.progress
    }

    pub fn policy(&self) -> PollPolicy {
        self.policy
    }

    /// Epoch of the current activation, if any.
    pub fn epoch(&self) -> Option<Epoch> {
        self.epoch
    }

    pub fn snapshot(&self) -> AcquisitionSnapshot {
        AcquisitionSnapshot {
            key: self.key.clone(),
            status: self.status.clone(),
            attempts: self.attempts,
            max_attempts: self.policy.max_attempts,
            progress: self.progress,
        }
    }

    /// Start (or restart) acquisition.
    ///
    /// Idempotent while a request is outstanding or the gallery is already
    /// ready. From `NotStarted`, `Empty` or `Failed` a new activation begins
    /// with a fresh epoch and attempt counter.
    pub fn activate(&mut self) -> Task<AcquisitionMessage> {
        if self.status.is_in_flight()
            || matches!(self.status, AcquisitionStatus::Ready(_))
        {
            debug!(
                "[Coordinator] {} activate ignored while {}",
                self.key, self.status
            );
            return Task::none();
        }

        self.cancel.cancel();
        self.cancel = CancellationToken::new();
        let epoch = self.epochs.next();
        self.epoch = Some(epoch);
        self.attempts = 0;
        self.progress = None;
        info!("[Coordinator] {} activated at epoch {}", self.key, epoch);

        self.transition(AcquisitionStatus::Checking);
        self.check_count()
    }

    /// Stop all outstanding work. Late responses of the current activation
    /// are dropped from here on.
    pub fn deactivate(&mut self) {
        self.cancel.cancel();
        if self.epoch.take().is_some() {
            debug!("[Coordinator] {} deactivated while {}", self.key, self.status);
        }
        if self.status.is_in_flight() {
            self.transition(AcquisitionStatus::NotStarted);
        }
    }

    pub fn is_active(&self) -> bool {
        self.epoch.is_some()
    }

    /// Whether `ticket` belongs to the current activation.
    pub fn accepts(&self, ticket: &Ticket) -> bool {
        ticket.key == self.key && Some(ticket.epoch) == self.epoch
    }

    pub(super) fn ticket(&self) -> Option<Ticket> {
        self.epoch.map(|epoch| Ticket::new(self.key.clone(), epoch))
    }

    pub(super) fn transition(&mut self, next: AcquisitionStatus) {
        if self.status != next {
            debug!(
                "[Coordinator] {}: {} -> {}",
                self.key, self.status, next
            );
        }
        self.status = next;
    }

    pub(super) fn stop_polling(&mut self) {
        self.cancel.cancel();
    }

    pub(super) fn check_count(&self) -> Task<AcquisitionMessage> {
        let Some(ticket) = self.ticket() else {
            return Task::none();
        };
        let service = Arc::clone(&self.service);
        let key = self.key.clone();
        Task::perform(
            async move { service.media_count(&key).await },
            move |result| AcquisitionMessage::CountChecked(ticket, result),
        )
        .cancel_with(&self.cancel)
    }

    pub(super) fn trigger(&self) -> Task<AcquisitionMessage> {
        let Some(ticket) = self.ticket() else {
            return Task::none();
        };
        let service = Arc::clone(&self.service);
        let key = self.key.clone();
        let source_ref = self.source_ref.clone();
        Task::perform(
            async move { service.trigger(&key, &source_ref).await },
            move |result| AcquisitionMessage::Triggered(ticket, result),
        )
        .cancel_with(&self.cancel)
    }

    /// Wait one interval, then ask for the next tick.
    pub(super) fn schedule_poll(&self) -> Task<AcquisitionMessage> {
        let Some(ticket) = self.ticket() else {
            return Task::none();
        };
        let interval = self.policy.interval;
        Task::perform(tokio::time::sleep(interval), move |_| {
            AcquisitionMessage::PollDue(ticket)
        })
        .cancel_with(&self.cancel)
    }

    /// Read progress and, unless progress already rules assets out, the
    /// current count.
    pub(super) fn poll(&self) -> Task<AcquisitionMessage> {
        let Some(ticket) = self.ticket() else {
            return Task::none();
        };
        let service = Arc::clone(&self.service);
        let key = self.key.clone();
        Task::perform(
            async move {
                let progress = service.progress(&key).await;
                let needs_count = match &progress {
                    Ok(status) => {
                        status.has_assets() || status.phase.is_terminal()
                    }
                    Err(_) => true,
                };
                let count = if needs_count {
                    Some(service.media_count(&key).await)
                } else {
                    None
                };
                PollOutcome { progress, count }
            },
            move |outcome| AcquisitionMessage::Polled(ticket, outcome),
        )
        .cancel_with(&self.cancel)
    }
}

impl Drop for AcquisitionCoordinator {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
