//! Ordered step pipeline scenarios

use futures_util::FutureExt;
use std::future::Ready;
use tandem_core::{Step, StepMode, delay_ms, run_ordered};

use crate::common::{Clock, assert_near, ms};

fn step(
    clock: &Clock,
    name: &'static str,
    millis: u64,
    mode: StepMode,
) -> Step<'static, (), u64, String> {
    let clock = clock.clone();
    Step::new(mode, millis, move |_, millis| {
        Ok(async move {
            clock.mark(format!("{name}:start"));
            delay_ms(millis).await;
            clock.mark(format!("{name}:end"));
            Ok::<_, String>(())
        })
    })
}

fn started(clock: &Clock) -> Vec<String> {
    clock
        .labels()
        .into_iter()
        .filter_map(|label| label.strip_suffix(":start").map(str::to_owned))
        .collect()
}

#[tokio::test(start_paused = true)]
async fn non_blocking_step_overlaps_following_blocking_step() {
    let clock = Clock::start();

    let result = run_ordered(vec![
        step(&clock, "a", 50, StepMode::Blocking),
        step(&clock, "b", 500, StepMode::Concurrent),
        step(&clock, "c", 10, StepMode::Blocking),
    ])
    .await;

    assert_eq!(result, Ok(()));
    assert_eq!(started(&clock), ["a", "b", "c"]);
    // A gates both B and C; B does not gate C.
    assert_near(clock.at("b:start"), ms(50));
    assert_near(clock.at("c:start"), ms(50));
    assert_near(clock.at("c:end"), ms(60));
    // The aggregate still waits for B.
    assert_near(clock.at("b:end"), ms(550));
    assert!(clock.elapsed() >= ms(550));
}

#[tokio::test(start_paused = true)]
async fn concurrent_steps_after_a_gate_start_in_declaration_order() {
    let clock = Clock::start();

    let result = run_ordered(vec![
        step(&clock, "gate", 20, StepMode::Blocking),
        step(&clock, "x", 100, StepMode::Concurrent),
        step(&clock, "y", 100, StepMode::Concurrent),
        step(&clock, "z", 100, StepMode::Concurrent),
    ])
    .await;

    assert_eq!(result, Ok(()));
    assert_eq!(started(&clock), ["gate", "x", "y", "z"]);
    for name in ["x:start", "y:start", "z:start"] {
        assert_near(clock.at(name), ms(20));
    }
    assert_near(clock.elapsed(), ms(120));
}

#[tokio::test(start_paused = true)]
async fn synchronous_construction_failure_keeps_pipeline_going() {
    let clock = Clock::start();

    let result = run_ordered(vec![
        step(&clock, "prepare", 20, StepMode::Blocking),
        Step::blocking(0, |_, _| {
            Err::<Ready<Result<(), String>>, _>("cannot open store".to_string())
        }),
        step(&clock, "cleanup", 20, StepMode::Blocking),
    ])
    .await;

    assert_eq!(result, Err("cannot open store".to_string()));
    assert!(clock.has("cleanup:end"));
    assert_near(clock.at("cleanup:start"), ms(20));
}

#[tokio::test(start_paused = true)]
async fn failing_step_does_not_stop_later_steps() {
    let clock = Clock::start();
    let failing = Step::blocking(30, |_, millis| {
        Ok(async move {
            delay_ms(millis).await;
            Err::<(), _>("sync rejected".to_string())
        })
    });

    let result = run_ordered(vec![failing, step(&clock, "next", 10, StepMode::Blocking)]).await;

    assert_eq!(result, Err("sync rejected".to_string()));
    assert_near(clock.at("next:start"), ms(30));
}

#[tokio::test]
async fn empty_pipeline_succeeds_immediately() {
    let steps: Vec<Step<'_, (), (), String>> = Vec::new();
    assert_eq!(run_ordered(steps).now_or_never(), Some(Ok(())));
}
