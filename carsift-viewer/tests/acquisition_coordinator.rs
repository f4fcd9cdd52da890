use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use carsift_model::prelude::{
    AcquisitionFailure, EntityKey, JobPhase, JobStatus, MediaCount, SourceRef,
};
use carsift_viewer::common::task::Task;
use carsift_viewer::domains::acquisition::{
    AcquisitionCoordinator, AcquisitionMessage, AcquisitionStatus, EpochSource,
    PollPolicy, Ticket,
};
use carsift_viewer::infra::errors::AcquisitionError;
use carsift_viewer::infra::testing::{
    ScriptedAcquisitionService, ServiceCallKind,
};

const INTERVAL: Duration = Duration::from_millis(500);

fn key(raw: &str) -> EntityKey {
    EntityKey::new(raw).unwrap()
}

fn coordinator(
    stub: &ScriptedAcquisitionService,
    key: &EntityKey,
    max_attempts: u32,
) -> AcquisitionCoordinator {
    AcquisitionCoordinator::new(
        key.clone(),
        SourceRef::new(format!("https://listings.test/ad/{key}")).unwrap(),
        Arc::new(stub.clone()),
        PollPolicy {
            interval: INTERVAL,
            max_attempts,
        },
        EpochSource::new(),
    )
}

/// Run `task` and every follow-up to completion, one message at a time.
async fn settle(
    coordinator: &mut AcquisitionCoordinator,
    task: Task<AcquisitionMessage>,
) {
    let mut pending: VecDeque<_> = task.into_futures().into();
    while let Some(future) = pending.pop_front() {
        if let Some(message) = future.await {
            pending.extend(coordinator.update(message).into_futures());
        }
    }
}

#[tokio::test(start_paused = true)]
async fn existing_assets_skip_the_trigger() {
    let k = key("1001");
    let stub = ScriptedAcquisitionService::new().with_counts(&k, [5]);
    let mut coordinator = coordinator(&stub, &k, 20);

    let task = coordinator.activate();
    assert_eq!(coordinator.status(), &AcquisitionStatus::Checking);
    settle(&mut coordinator, task).await;

    assert_eq!(
        coordinator.status(),
        &AcquisitionStatus::Ready(MediaCount::new(5))
    );
    assert_eq!(stub.call_count(&k, ServiceCallKind::Trigger), 0);
    assert_eq!(stub.call_count(&k, ServiceCallKind::Progress), 0);
}

#[tokio::test(start_paused = true)]
async fn zero_count_triggers_then_polls_until_assets_appear() {
    let k = key("1002");
    let stub = ScriptedAcquisitionService::new()
        .with_counts(&k, [0, 4])
        .with_progress(
            &k,
            [
                JobStatus::running(0, 0),
                JobStatus::running(0, 0),
                JobStatus::running(2, 10),
            ],
        );
    let mut coordinator = coordinator(&stub, &k, 20);

    let started = tokio::time::Instant::now();
    let task = coordinator.activate();
    settle(&mut coordinator, task).await;

    assert_eq!(
        coordinator.status(),
        &AcquisitionStatus::Ready(MediaCount::new(4))
    );
    assert_eq!(coordinator.attempts(), 3);
    assert_eq!(stub.call_count(&k, ServiceCallKind::Trigger), 1);
    assert_eq!(stub.call_count(&k, ServiceCallKind::Progress), 3);
    // Count is read at the check and on the tick that reported assets.
    assert_eq!(stub.call_count(&k, ServiceCallKind::Count), 2);
    assert!(started.elapsed() >= INTERVAL * 3);
}

#[tokio::test(start_paused = true)]
async fn progress_current_counts_as_ready_when_count_lags() {
    let k = key("1003");
    let stub = ScriptedAcquisitionService::new()
        .with_counts(&k, [0])
        .with_progress(&k, [JobStatus::running(2, 6)]);
    let mut coordinator = coordinator(&stub, &k, 20);

    let task = coordinator.activate();
    settle(&mut coordinator, task).await;

    assert_eq!(
        coordinator.status(),
        &AcquisitionStatus::Ready(MediaCount::new(2))
    );
}

#[tokio::test(start_paused = true)]
async fn activate_is_idempotent_while_in_flight() {
    let k = key("1004");
    let stub = ScriptedAcquisitionService::new().with_counts(&k, [3]);
    let mut coordinator = coordinator(&stub, &k, 20);

    let task = coordinator.activate();
    let epoch = coordinator.epoch();
    assert!(coordinator.activate().is_none());
    assert_eq!(coordinator.epoch(), epoch);

    settle(&mut coordinator, task).await;
    assert!(coordinator.activate().is_none());
    assert_eq!(stub.call_count(&k, ServiceCallKind::Count), 1);
}

#[tokio::test(start_paused = true)]
async fn polling_is_bounded_and_ends_empty() {
    let k = key("1005");
    let stub = ScriptedAcquisitionService::new();
    let mut coordinator = coordinator(&stub, &k, 3);

    let started = tokio::time::Instant::now();
    let task = coordinator.activate();
    settle(&mut coordinator, task).await;

    assert_eq!(coordinator.status(), &AcquisitionStatus::Empty);
    assert_eq!(coordinator.attempts(), 3);
    assert_eq!(stub.call_count(&k, ServiceCallKind::Progress), 3);
    assert!(started.elapsed() >= INTERVAL * 3);
}

#[tokio::test(start_paused = true)]
async fn completed_job_without_assets_is_empty_immediately() {
    let k = key("1006");
    let stub = ScriptedAcquisitionService::new()
        .with_progress(&k, [JobStatus::new(JobPhase::Complete, 0, 0)]);
    let mut coordinator = coordinator(&stub, &k, 20);

    let task = coordinator.activate();
    settle(&mut coordinator, task).await;

    assert_eq!(coordinator.status(), &AcquisitionStatus::Empty);
    assert_eq!(coordinator.attempts(), 1);
}

#[tokio::test(start_paused = true)]
async fn rejected_trigger_fails_without_polling() {
    let k = key("1007");
    let stub = ScriptedAcquisitionService::new()
        .reject_trigger(&k, AcquisitionError::status(503, "busy"));
    let mut coordinator = coordinator(&stub, &k, 20);

    let task = coordinator.activate();
    settle(&mut coordinator, task).await;

    match coordinator.status() {
        AcquisitionStatus::Failed(failure) => assert!(failure.is_transport()),
        other => panic!("unexpected status {other}"),
    }
    assert_eq!(stub.call_count(&k, ServiceCallKind::Progress), 0);
}

#[tokio::test(start_paused = true)]
async fn failed_job_is_failed_unless_assets_exist() {
    let k = key("1008");
    let stub = ScriptedAcquisitionService::new()
        .with_progress(&k, [JobStatus::running(0, 3), JobStatus::failed()]);
    let mut failing = coordinator(&stub, &k, 20);
    let task = failing.activate();
    settle(&mut failing, task).await;
    assert_eq!(
        failing.status(),
        &AcquisitionStatus::Failed(AcquisitionFailure::Job)
    );

    let k = key("1009");
    let stub = ScriptedAcquisitionService::new()
        .with_counts(&k, [0, 2])
        .with_progress(&k, [JobStatus::failed()]);
    let mut partial = coordinator(&stub, &k, 20);
    let task = partial.activate();
    settle(&mut partial, task).await;
    assert_eq!(
        partial.status(),
        &AcquisitionStatus::Ready(MediaCount::new(2))
    );
}

#[tokio::test(start_paused = true)]
async fn malformed_progress_fails_the_job() {
    let k = key("1010");
    let stub = ScriptedAcquisitionService::new().with_progress_results(
        &k,
        [Err(AcquisitionError::Malformed("unknown status".into()))],
    );
    let mut coordinator = coordinator(&stub, &k, 20);

    let task = coordinator.activate();
    settle(&mut coordinator, task).await;

    assert_eq!(
        coordinator.status(),
        &AcquisitionStatus::Failed(AcquisitionFailure::Job)
    );
}

#[tokio::test(start_paused = true)]
async fn transport_errors_while_polling_are_retried() {
    let k = key("1011");
    let stub = ScriptedAcquisitionService::new()
        .with_counts(&k, [0, 0, 1])
        .with_progress_results(
            &k,
            [
                Err(AcquisitionError::transport("connection reset")),
                Ok(JobStatus::running(1, 3)),
            ],
        );
    let mut coordinator = coordinator(&stub, &k, 20);

    let task = coordinator.activate();
    settle(&mut coordinator, task).await;

    assert_eq!(
        coordinator.status(),
        &AcquisitionStatus::Ready(MediaCount::new(1))
    );
    assert_eq!(coordinator.attempts(), 2);
}

#[tokio::test(start_paused = true)]
async fn failed_count_check_still_triggers() {
    let k = key("1012");
    let stub = ScriptedAcquisitionService::new()
        .with_count_results(
            &k,
            [
                Err(AcquisitionError::transport("timeout")),
                Ok(MediaCount::new(6)),
            ],
        )
        .with_progress(&k, [JobStatus::new(JobPhase::Complete, 6, 6)]);
    let mut coordinator = coordinator(&stub, &k, 20);

    let task = coordinator.activate();
    settle(&mut coordinator, task).await;

    assert_eq!(stub.call_count(&k, ServiceCallKind::Trigger), 1);
    assert_eq!(
        coordinator.status(),
        &AcquisitionStatus::Ready(MediaCount::new(6))
    );
}

#[tokio::test(start_paused = true)]
async fn responses_from_a_previous_activation_are_dropped() {
    let k = key("1013");
    let stub = ScriptedAcquisitionService::new();
    let mut coordinator = coordinator(&stub, &k, 1);

    let task = coordinator.activate();
    let first = coordinator.epoch().unwrap();
    settle(&mut coordinator, task).await;
    assert_eq!(coordinator.status(), &AcquisitionStatus::Empty);

    // Retry from Empty starts a new activation.
    let _retry = coordinator.activate();
    let second = coordinator.epoch().unwrap();
    assert!(second > first);
    assert_eq!(coordinator.attempts(), 0);
    assert_eq!(coordinator.status(), &AcquisitionStatus::Checking);

    let late = AcquisitionMessage::CountChecked(
        Ticket::new(k.clone(), first),
        Ok(MediaCount::new(9)),
    );
    assert!(coordinator.update(late).is_none());
    assert_eq!(coordinator.status(), &AcquisitionStatus::Checking);

    let foreign = AcquisitionMessage::CountChecked(
        Ticket::new(key("other"), second),
        Ok(MediaCount::new(9)),
    );
    assert!(coordinator.update(foreign).is_none());
    assert_eq!(coordinator.status(), &AcquisitionStatus::Checking);
}

#[tokio::test(start_paused = true)]
async fn deactivate_cancels_outstanding_work() {
    let k = key("1014");
    let stub = ScriptedAcquisitionService::new();
    let gate = stub.gate(&k, ServiceCallKind::Count);
    let mut coordinator = coordinator(&stub, &k, 20);

    let task = coordinator.activate();
    let ticket = Ticket::new(k.clone(), coordinator.epoch().unwrap());
    coordinator.deactivate();
    assert_eq!(coordinator.status(), &AcquisitionStatus::NotStarted);
    assert!(!coordinator.is_active());

    for future in task.into_futures() {
        assert!(future.await.is_none());
    }
    gate.notify_one();

    let late = AcquisitionMessage::CountChecked(ticket, Ok(MediaCount::new(2)));
    assert!(coordinator.update(late).is_none());
    assert_eq!(coordinator.status(), &AcquisitionStatus::NotStarted);
}

#[tokio::test(start_paused = true)]
async fn assets_after_two_ticks_stop_polling() {
    let k = key("1015");
    let stub = ScriptedAcquisitionService::new()
        .with_progress(&k, [JobStatus::running(0, 0), JobStatus::running(3, 9)]);
    let mut coordinator = coordinator(&stub, &k, 20);

    let started = tokio::time::Instant::now();
    let task = coordinator.activate();
    settle(&mut coordinator, task).await;

    assert_eq!(
        coordinator.status(),
        &AcquisitionStatus::Ready(MediaCount::new(3))
    );
    assert_eq!(stub.call_count(&k, ServiceCallKind::Progress), 2);
    assert!(started.elapsed() >= INTERVAL * 2);
    assert!(started.elapsed() < INTERVAL * 3);

    // Nothing is left scheduled.
    tokio::time::sleep(INTERVAL * 4).await;
    assert_eq!(stub.call_count(&k, ServiceCallKind::Progress), 2);
}

#[tokio::test(start_paused = true)]
async fn default_policy_gives_up_after_twenty_running_polls() {
    let k = key("1016");
    let stub = ScriptedAcquisitionService::new()
        .with_progress(&k, [JobStatus::running(0, 0)]);
    let mut coordinator = AcquisitionCoordinator::new(
        k.clone(),
        SourceRef::new("https://listings.test/ad/1016").unwrap(),
        Arc::new(stub.clone()),
        PollPolicy::default(),
        EpochSource::new(),
    );

    let task = coordinator.activate();
    settle(&mut coordinator, task).await;

    assert_eq!(coordinator.status(), &AcquisitionStatus::Empty);
    assert_eq!(coordinator.attempts(), 20);
    assert_eq!(stub.call_count(&k, ServiceCallKind::Progress), 20);
}

#[tokio::test(start_paused = true)]
async fn rapid_activations_trigger_once() {
    let k = key("1017");
    let stub = ScriptedAcquisitionService::new()
        .with_counts(&k, [0, 1])
        .with_progress(&k, [JobStatus::running(1, 1)]);
    let mut coordinator = coordinator(&stub, &k, 20);

    let task = coordinator.activate();
    let again = coordinator.activate();
    assert!(again.is_none());
    settle(&mut coordinator, Task::batch([task, again])).await;

    // Activating once ready is also ignored.
    assert!(coordinator.activate().is_none());
    assert_eq!(stub.call_count(&k, ServiceCallKind::Trigger), 1);
    assert_eq!(
        coordinator.status(),
        &AcquisitionStatus::Ready(MediaCount::new(1))
    );
}
