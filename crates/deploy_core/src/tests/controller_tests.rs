use super::*;
use rand::{rngs::StdRng, SeedableRng};
use shared::domain::DEPLOYMENT_STEPS;

fn filled_controller() -> ViewController {
    let mut controller = ViewController::new();
    controller.update_field(TokenField::Name, "Neon Token");
    controller.update_field(TokenField::Symbol, "NEON");
    controller
}

fn play_all_steps(controller: &mut ViewController, attempt: AttemptId) {
    for index in 0..DEPLOYMENT_STEPS.len() {
        controller.apply(SequencerEvent::StepRevealed { attempt, index });
    }
}

#[test]
fn starts_idle_with_default_draft() {
    let controller = ViewController::new();
    assert_eq!(controller.phase(), DeploymentPhase::Idle);
    assert_eq!(controller.draft(), &TokenDraft::default());
    assert!(!controller.is_valid());
    assert!(controller.runtime().attempt().is_none());
}

#[test]
fn deploy_is_a_no_op_for_invalid_drafts() {
    let mut controller = ViewController::new();
    controller.update_field(TokenField::Name, "Only Name");
    let before = controller.draft().clone();

    let err = controller.deploy().expect_err("symbol missing");
    assert_eq!(
        err,
        ControllerError::InvalidDraft(DraftError::MissingFields(vec![TokenField::Symbol]))
    );
    assert_eq!(controller.phase(), DeploymentPhase::Idle);
    assert_eq!(controller.draft(), &before);
    assert!(controller.runtime().attempt().is_none());
}

#[test]
fn clearing_supply_invalidates_the_draft() {
    let mut controller = filled_controller();
    controller.update_field(TokenField::TotalSupply, "");
    assert!(!controller.is_valid());
    assert!(matches!(
        controller.deploy(),
        Err(ControllerError::InvalidDraft(_))
    ));
}

#[test]
fn deploy_enters_deploying_with_fresh_runtime() {
    let mut controller = filled_controller();
    let attempt = controller.deploy().expect("valid draft");
    assert_eq!(attempt, AttemptId(1));
    assert_eq!(controller.phase(), DeploymentPhase::Deploying);
    assert_eq!(controller.runtime().attempt(), Some(attempt));
    assert_eq!(controller.runtime().revealed_count(), 0);
    assert_eq!(
        controller.deploy(),
        Err(ControllerError::NotIdle(DeploymentPhase::Deploying))
    );
}

#[test]
fn reveals_raise_progress_one_step_at_a_time() {
    let mut controller = filled_controller();
    let attempt = controller.deploy().expect("deploy");

    let expected = [14, 29, 43, 57, 71, 86, 100];
    for (index, percent) in expected.into_iter().enumerate() {
        assert_eq!(
            controller.apply(SequencerEvent::StepRevealed { attempt, index }),
            EventOutcome::Revealed {
                index,
                progress_percent: percent
            }
        );
    }
    assert_eq!(
        controller.apply(SequencerEvent::StepRevealed { attempt, index: 3 }),
        EventOutcome::AlreadyRevealed(3)
    );
    assert_eq!(controller.phase(), DeploymentPhase::Deploying);
}

#[test]
fn completion_moves_to_success_and_synthesizes_address() {
    let mut controller = filled_controller();
    let attempt = controller.deploy().expect("deploy");
    play_all_steps(&mut controller, attempt);

    let mut rng = StdRng::seed_from_u64(42);
    assert_eq!(
        controller.apply_with_rng(SequencerEvent::Completed { attempt }, &mut rng),
        EventOutcome::Completed
    );
    assert_eq!(controller.phase(), DeploymentPhase::Success);
    assert!(controller.completed_at().is_some());

    let address = controller.runtime().address().expect("address").clone();
    assert_eq!(
        address,
        generate_address(&mut StdRng::seed_from_u64(42)),
        "address comes from the supplied rng"
    );
}

#[test]
fn completion_does_not_wait_for_missing_reveals() {
    let mut controller = filled_controller();
    let attempt = controller.deploy().expect("deploy");
    controller.apply(SequencerEvent::StepRevealed { attempt, index: 0 });

    assert_eq!(
        controller.apply(SequencerEvent::Completed { attempt }),
        EventOutcome::Completed
    );
    assert_eq!(controller.phase(), DeploymentPhase::Success);
}

#[test]
fn events_for_other_attempts_are_stale() {
    let mut controller = filled_controller();
    let attempt = controller.deploy().expect("deploy");
    let other = attempt.next();

    assert_eq!(
        controller.apply(SequencerEvent::StepRevealed {
            attempt: other,
            index: 0
        }),
        EventOutcome::Stale
    );
    assert_eq!(
        controller.apply(SequencerEvent::Completed { attempt: other }),
        EventOutcome::Stale
    );
    assert_eq!(controller.phase(), DeploymentPhase::Deploying);
    assert_eq!(controller.runtime().revealed_count(), 0);
}

#[test]
fn events_while_idle_are_stale() {
    let mut controller = ViewController::new();
    assert_eq!(
        controller.apply(SequencerEvent::Completed {
            attempt: AttemptId(1)
        }),
        EventOutcome::Stale
    );
    assert_eq!(controller.phase(), DeploymentPhase::Idle);
}

#[test]
fn reset_is_only_accepted_after_completion() {
    let mut controller = filled_controller();
    assert_eq!(
        controller.reset(),
        Err(ControllerError::NotFinished(DeploymentPhase::Idle))
    );
    controller.deploy().expect("deploy");
    assert_eq!(
        controller.reset(),
        Err(ControllerError::NotFinished(DeploymentPhase::Deploying))
    );
}

#[test]
fn reset_restores_defaults_and_drops_late_events() {
    let mut controller = filled_controller();
    controller.update_field(TokenField::Description, "shiny");
    let attempt = controller.deploy().expect("deploy");
    play_all_steps(&mut controller, attempt);
    controller.apply(SequencerEvent::Completed { attempt });

    assert_eq!(controller.reset(), Ok(Some(attempt)));
    assert_eq!(controller.phase(), DeploymentPhase::Idle);
    assert_eq!(controller.draft(), &TokenDraft::default());
    assert_eq!(controller.runtime().progress_percent(), 0);
    assert!(controller.runtime().address().is_none());

    assert_eq!(
        controller.apply(SequencerEvent::StepRevealed { attempt, index: 6 }),
        EventOutcome::Stale
    );
}

#[test]
fn second_attempt_gets_new_id_and_new_address() {
    let mut controller = filled_controller();
    let first = controller.deploy().expect("deploy");
    controller.apply(SequencerEvent::Completed { attempt: first });
    let first_address = controller.runtime().address().cloned().expect("address");
    controller.reset().expect("reset");

    controller.update_field(TokenField::Name, "Second");
    controller.update_field(TokenField::Symbol, "TWO");
    let second = controller.deploy().expect("deploy again");
    assert_eq!(second, AttemptId(2));

    assert_eq!(
        controller.apply(SequencerEvent::Completed { attempt: first }),
        EventOutcome::Stale
    );
    controller.apply(SequencerEvent::Completed { attempt: second });
    let second_address = controller.runtime().address().cloned().expect("address");
    assert_ne!(first_address, second_address);
}

#[test]
fn receipt_is_available_only_on_success() {
    let base = Url::parse("https://basescan.org").expect("url");
    let mut controller = filled_controller();
    assert!(controller.receipt(&base).is_none());

    let attempt = controller.deploy().expect("deploy");
    assert!(controller.receipt(&base).is_none());
    controller.apply(SequencerEvent::Completed { attempt });

    let receipt = controller.receipt(&base).expect("receipt");
    assert_eq!(receipt.attempt, attempt);
    assert_eq!(receipt.token.symbol, "NEON");
    assert_eq!(
        receipt.explorer_url,
        format!("https://basescan.org/address/{}", receipt.address)
    );
    assert_eq!(Some(receipt.deployed_at), controller.completed_at());
}

#[test]
fn abort_returns_unscheduled_attempt_to_idle_with_draft() {
    let mut controller = filled_controller();
    let attempt = controller.deploy().expect("deploy");

    assert!(!controller.abort(attempt.next()));
    assert_eq!(controller.phase(), DeploymentPhase::Deploying);

    assert!(controller.abort(attempt));
    assert_eq!(controller.phase(), DeploymentPhase::Idle);
    assert_eq!(controller.draft().symbol, "NEON");
    assert!(controller.runtime().attempt().is_none());
    assert_eq!(
        controller.apply(SequencerEvent::Completed { attempt }),
        EventOutcome::Stale
    );

    let retry = controller.deploy().expect("retry");
    assert_eq!(retry, attempt.next());
}

#[test]
fn abort_is_refused_outside_deploying() {
    let mut controller = filled_controller();
    assert!(!controller.abort(AttemptId(1)));
    let attempt = controller.deploy().expect("deploy");
    controller.apply(SequencerEvent::Completed { attempt });
    assert!(!controller.abort(attempt));
    assert_eq!(controller.phase(), DeploymentPhase::Success);
}
