use std::time::Duration;

use deploy_core::{DeploymentScheduler, EventOutcome, Settings, ViewController};
use shared::{
    domain::{AttemptId, DeploymentPhase, TokenDraft, TokenField, DEPLOY_DURATION},
    protocol::SequencerEvent,
};
use tokio::{
    runtime::Handle,
    sync::mpsc::{unbounded_channel, UnboundedReceiver},
    time::{timeout, Instant},
};

fn filled(controller: &mut ViewController, name: &str, symbol: &str) {
    controller.update_field(TokenField::Name, name);
    controller.update_field(TokenField::Symbol, symbol);
}

async fn drive_until_done(
    controller: &mut ViewController,
    rx: &mut UnboundedReceiver<SequencerEvent>,
) -> Vec<EventOutcome> {
    let mut outcomes = Vec::new();
    while controller.phase() == DeploymentPhase::Deploying {
        let event = rx.recv().await.expect("scheduler alive");
        outcomes.push(controller.apply(event));
    }
    outcomes
}

#[tokio::test(start_paused = true)]
async fn full_run_reaches_success_after_four_seconds() {
    let (tx, mut rx) = unbounded_channel();
    let mut scheduler = DeploymentScheduler::new(tx, Handle::current());
    let mut controller = ViewController::new();
    filled(&mut controller, "Neon Token", "NEON");

    let started = Instant::now();
    let attempt = controller.deploy().expect("deploy");
    scheduler.schedule(attempt);

    let outcomes = drive_until_done(&mut controller, &mut rx).await;
    assert_eq!(started.elapsed(), DEPLOY_DURATION);
    assert_eq!(controller.phase(), DeploymentPhase::Success);
    assert_eq!(outcomes.len(), 8);
    assert_eq!(
        outcomes[6],
        EventOutcome::Revealed {
            index: 6,
            progress_percent: 100
        }
    );
    assert_eq!(outcomes[7], EventOutcome::Completed);

    let receipt = controller
        .receipt(&Settings::default().explorer_base_url)
        .expect("receipt");
    assert!(receipt
        .explorer_url
        .starts_with("https://basescan.org/address/0x"));
    assert_eq!(receipt.token.name, "Neon Token");
}

#[tokio::test(start_paused = true)]
async fn progress_is_observable_mid_sequence() {
    let (tx, mut rx) = unbounded_channel();
    let mut scheduler = DeploymentScheduler::new(tx, Handle::current());
    let mut controller = ViewController::new();
    filled(&mut controller, "Mid", "MID");

    let attempt = controller.deploy().expect("deploy");
    scheduler.schedule(attempt);
    tokio::time::sleep(Duration::from_millis(1300)).await;
    while let Ok(event) = rx.try_recv() {
        controller.apply(event);
    }

    assert_eq!(controller.phase(), DeploymentPhase::Deploying);
    assert_eq!(controller.runtime().revealed().collect::<Vec<_>>(), vec![0, 1, 2]);
    assert_eq!(controller.runtime().progress_percent(), 43);
    assert!(controller.runtime().address().is_none());
}

#[tokio::test(start_paused = true)]
async fn reset_then_redeploy_ignores_the_old_attempt() {
    let (tx, mut rx) = unbounded_channel();
    let mut scheduler = DeploymentScheduler::new(tx, Handle::current());
    let mut controller = ViewController::new();
    filled(&mut controller, "First", "ONE");

    let first = controller.deploy().expect("deploy");
    scheduler.schedule(first);
    drive_until_done(&mut controller, &mut rx).await;
    let first_address = controller.runtime().address().cloned().expect("address");

    if let Some(previous) = controller.reset().expect("reset") {
        assert_eq!(previous, first);
        scheduler.cancel();
    }
    assert_eq!(controller.draft(), &TokenDraft::default());

    filled(&mut controller, "Second", "TWO");
    let second = controller.deploy().expect("redeploy");
    assert_eq!(second, AttemptId(2));
    scheduler.schedule(second);

    // A late event from the first attempt must not disturb the second.
    assert_eq!(
        controller.apply(SequencerEvent::StepRevealed {
            attempt: first,
            index: 5
        }),
        EventOutcome::Stale
    );

    let outcomes = drive_until_done(&mut controller, &mut rx).await;
    assert!(!outcomes.contains(&EventOutcome::Stale));
    assert_eq!(controller.phase(), DeploymentPhase::Success);
    assert_ne!(controller.runtime().address(), Some(&first_address));
}

#[tokio::test(start_paused = true)]
async fn invalid_draft_schedules_nothing() {
    let (tx, mut rx) = unbounded_channel::<SequencerEvent>();
    let scheduler = DeploymentScheduler::new(tx, Handle::current());
    let mut controller = ViewController::new();

    assert!(controller.deploy().is_err());
    assert_eq!(scheduler.active_attempt(), None);
    assert!(timeout(Duration::from_secs(5), rx.recv()).await.is_err());
}
