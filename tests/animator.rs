//! Animator behaviour on a paused tokio clock.

use mining_card::backend::progress::{Animator, PhaseKind, STAGES};
use mining_card::AppConfig;
use std::time::Duration;
use tokio::time::sleep;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[tokio::test(start_paused = true)]
async fn mount_ramps_to_five_then_hands_off() {
    let (mut animator, _updates) = Animator::new(&AppConfig::default());
    animator.mount().unwrap();

    sleep(ms(1500)).await;
    let halfway = animator.snapshot().unwrap();
    assert_eq!(halfway.phase, PhaseKind::InitialRamp);
    assert!(halfway.in_initial_phase);
    assert!(halfway.percentage > 2.0 && halfway.percentage < 3.0, "{}", halfway.percentage);

    sleep(ms(1600)).await;
    let ramped = animator.snapshot().unwrap();
    assert_eq!(ramped.percentage, 5.0);
    assert_eq!(ramped.phase, PhaseKind::MainProgress);
    assert!(!ramped.in_initial_phase);
    assert_eq!(ramped.label, STAGES[0].label);

    sleep(ms(1000)).await;
    assert!(animator.snapshot().unwrap().percentage > 5.0);
}

#[tokio::test(start_paused = true)]
async fn skip_eases_to_the_next_boundary_and_resumes() {
    let (mut animator, _updates) = Animator::new(&AppConfig::default());
    animator.mount().unwrap();
    sleep(ms(3100)).await;

    assert!(animator.skip().unwrap());
    sleep(ms(500)).await;
    let easing = animator.snapshot().unwrap();
    assert_eq!(easing.phase, PhaseKind::Skipping);
    assert!(easing.percentage > 5.0 && easing.percentage < 33.0);

    sleep(ms(600)).await;
    let landed = animator.snapshot().unwrap();
    assert_eq!(landed.percentage, 33.0);
    assert_eq!(landed.stage_index, 1);
    assert_eq!(landed.label, STAGES[1].label);
    assert_eq!(landed.phase, PhaseKind::MainProgress);

    sleep(ms(500)).await;
    assert!(animator.snapshot().unwrap().percentage > 33.0);
}

#[tokio::test(start_paused = true)]
async fn skipping_through_every_stage_completes() {
    let (mut animator, _updates) = Animator::new(&AppConfig::default());
    animator.mount().unwrap();

    for expected in [33.0, 66.0] {
        assert!(animator.skip().unwrap());
        sleep(ms(1050)).await;
        assert_eq!(animator.snapshot().unwrap().percentage, expected);
    }
    assert!(animator.skip().unwrap());
    sleep(ms(1050)).await;

    let done = animator.snapshot().unwrap();
    assert!(done.complete);
    assert_eq!(done.percentage, 100.0);
    assert_eq!(done.label, "Success!");
    assert!(!done.can_skip());
    assert!(!animator.skip().unwrap());

    sleep(ms(500)).await;
    assert!(!animator.is_running());
}

#[tokio::test(start_paused = true)]
async fn restart_resets_and_silences_the_old_driver() {
    let (mut animator, _updates) = Animator::new(&AppConfig::default());
    animator.mount().unwrap();
    for _ in 0..2 {
        animator.skip().unwrap();
        sleep(ms(1050)).await;
    }
    sleep(ms(30_000)).await;
    assert!(animator.snapshot().unwrap().percentage >= 66.0);

    animator.restart().unwrap();
    let reset = animator.snapshot().unwrap();
    assert_eq!(reset.percentage, 0.0);
    assert_eq!(reset.stage_index, 0);
    assert!(!reset.complete);
    assert!(reset.in_initial_phase);
    assert_eq!(reset.phase, PhaseKind::InitialRamp);

    for _ in 0..30 {
        sleep(ms(100)).await;
        assert!(animator.snapshot().unwrap().percentage <= 5.0);
    }
    sleep(ms(50)).await;
    assert_eq!(animator.snapshot().unwrap().percentage, 5.0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn restart_is_never_overwritten_by_an_in_flight_frame() {
    let mut config = AppConfig::default();
    config.timing.frame_interval_ms = 1;
    config.timing.tick_interval_ms = 1;
    config.timing.skip_duration_ms = 1;
    config.timing.ramp_duration_ms = 60_000;
    let (mut animator, updates) = Animator::new(&config);
    animator.mount().unwrap();

    for round in 0..50 {
        animator.skip().unwrap();
        sleep(ms(5)).await;
        animator.restart().unwrap();
        sleep(ms(3)).await;

        let seen = updates.borrow().clone();
        assert_eq!(seen.phase, PhaseKind::InitialRamp, "round {round}: {seen:?}");
        assert!(seen.percentage < 1.0, "round {round}: {seen:?}");
    }
}

#[tokio::test(start_paused = true)]
async fn unmount_stops_all_updates() {
    let (mut animator, _updates) = Animator::new(&AppConfig::default());
    animator.mount().unwrap();
    sleep(ms(500)).await;

    animator.unmount();
    let frozen = animator.snapshot().unwrap();
    assert_eq!(frozen.phase, PhaseKind::Idle);

    sleep(ms(10_000)).await;
    assert_eq!(animator.snapshot().unwrap().percentage, frozen.percentage);
    assert!(!animator.is_running());
    assert!(!animator.skip().unwrap());
}

#[tokio::test(start_paused = true)]
async fn subscribers_see_every_phase() {
    let (mut animator, mut updates) = Animator::new(&AppConfig::default());
    assert_eq!(updates.borrow().phase, PhaseKind::Idle);

    animator.mount().unwrap();
    updates.changed().await.unwrap();
    assert_eq!(updates.borrow_and_update().phase, PhaseKind::InitialRamp);

    let mut late = animator.subscribe();
    loop {
        late.changed().await.unwrap();
        if late.borrow_and_update().phase == PhaseKind::MainProgress {
            break;
        }
    }
    assert_eq!(late.borrow().percentage, 5.0);
}

#[tokio::test(start_paused = true)]
async fn runs_on_an_explicit_runtime_handle() {
    let handle = tokio::runtime::Handle::current();
    let (animator, _updates) = Animator::new(&AppConfig::default());
    let mut animator = animator.with_runtime(handle);
    animator.mount().unwrap();
    sleep(ms(3100)).await;
    assert_eq!(animator.snapshot().unwrap().percentage, 5.0);
}

#[tokio::test(start_paused = true)]
async fn fixed_step_ramp_also_lands_on_five() {
    let mut config = AppConfig::default();
    config.behavior.ramp_mode = mining_card::backend::utils::config::RampMode::FixedStep;
    let (mut animator, _updates) = Animator::new(&config);
    animator.mount().unwrap();

    sleep(ms(1550)).await;
    let halfway = animator.snapshot().unwrap().percentage;
    assert!((halfway - 2.5).abs() < 1e-9, "{halfway}");

    sleep(ms(1500)).await;
    let ramped = animator.snapshot().unwrap();
    assert_eq!(ramped.percentage, 5.0);
    assert_eq!(ramped.phase, PhaseKind::MainProgress);
}
