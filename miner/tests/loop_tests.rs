//! Integration tests exercising the full participation loop:
//! cadence evaluation → sub-task dispatch → state advancement → shutdown.
//!
//! These tests wire together components that are normally only connected
//! inside the daemon, using the nullable chain clients for determinism.

use std::sync::Arc;

use aegis_chain::{ChainError, LedgerClient};
use aegis_miner::{
    LoopState, MinerConfig, MinerMetrics, ParticipationLoop, ParticipationState,
    ShutdownController,
};
use aegis_nullables::{NullLedger, NullPolicy, NullServing, NullTelemetry};
use aegis_types::{Hotkey, Uid, VersionKey};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

type TestLoop = ParticipationLoop<NullLedger, NullPolicy, NullTelemetry, NullServing>;

fn test_config() -> MinerConfig {
    MinerConfig {
        tick_interval_ms: 0,
        ..MinerConfig::default()
    }
}

fn make_loop(
    config: MinerConfig,
    ledger: NullLedger,
    policy: NullPolicy,
    uid: u16,
) -> (ShutdownController, TestLoop) {
    let snapshot = ledger.snapshot(false).expect("initial snapshot");
    let current_block = ledger.current_block().expect("initial block");
    let state = ParticipationState::new(
        Uid::new(uid),
        Hotkey::new(format!("null-hotkey-{uid}")),
        VersionKey::new(1),
        current_block,
        snapshot,
    );

    let controller = ShutdownController::new();
    let listener = controller.listener();
    let participation = ParticipationLoop::new(
        config,
        state,
        ledger,
        policy,
        NullTelemetry::new(),
        NullServing::new(),
        Arc::new(MinerMetrics::new()),
        listener,
    );
    (controller, participation)
}

fn tick_n(lp: &mut TestLoop, n: u64) {
    for _ in 0..n {
        lp.tick();
    }
}

// ---------------------------------------------------------------------------
// 1. The step-0 startup scenario
// ---------------------------------------------------------------------------

#[test]
fn first_tick_fires_cadences_but_skips_submission() {
    let ledger = NullLedger::with_neurons(5000, 4);
    let mut config = test_config();
    config.set_weights = true;
    config.telemetry_enabled = true;
    let (_controller, mut lp) = make_loop(config, ledger, NullPolicy::allowing(), 1);

    lp.tick();

    // Weight submission was checked but skipped: delta is 0, not > 100.
    assert!(lp.ledger().submissions().is_empty());
    assert_eq!(lp.state().last_submitted_block, 5000);

    // Snapshot refreshed (light), forced resync also due at step 0.
    // One extra light sync happened in make_loop to seed the state.
    assert_eq!(lp.ledger().light_sync_count(), 2);
    assert_eq!(lp.ledger().forced_sync_count(), 1);

    // Blacklist queried once; telemetry emitted the five metrics.
    assert_eq!(lp.policy().queries().len(), 1);
    assert_eq!(lp.telemetry().emitted().len(), 5);

    // Step advanced by exactly 1.
    assert_eq!(lp.state().step, 1);
    assert_eq!(lp.loop_state(), LoopState::Running);
}

// ---------------------------------------------------------------------------
// 2. Cadence behavior over many ticks
// ---------------------------------------------------------------------------

#[test]
fn off_cadence_ticks_do_no_periodic_work() {
    let ledger = NullLedger::with_neurons(100, 2);
    let (_controller, mut lp) = make_loop(test_config(), ledger, NullPolicy::allowing(), 0);

    tick_n(&mut lp, 21); // steps 0..=20

    // Periodic work only at steps 0 and 20 (seed sync + 2 umbrella hits).
    assert_eq!(lp.ledger().light_sync_count(), 3);
    // Forced resync and blacklist only at step 0.
    assert_eq!(lp.ledger().forced_sync_count(), 1);
    assert_eq!(lp.policy().queries().len(), 1);
    // The counter advanced once per tick regardless.
    assert_eq!(lp.state().step, 21);
}

#[test]
fn blacklist_cadence_hits_at_step_300() {
    let ledger = NullLedger::with_neurons(100, 2);
    let policy = NullPolicy::allowing();
    policy.script_response(Ok(false)); // step 0
    policy.set_default_verdict(true); // step 300 onwards
    let (_controller, mut lp) = make_loop(test_config(), ledger, policy, 0);

    tick_n(&mut lp, 300); // steps 0..=299
    assert!(!lp.state().is_blacklisted);
    assert_eq!(lp.policy().queries().len(), 1);

    lp.tick(); // step 300
    assert!(lp.state().is_blacklisted);
    assert_eq!(lp.policy().queries().len(), 2);
}

// ---------------------------------------------------------------------------
// 3. Weight submission through the loop
// ---------------------------------------------------------------------------

#[test]
fn stale_window_submission_updates_watermark() {
    let ledger = NullLedger::with_neurons(1000, 4);
    let mut config = test_config();
    config.set_weights = true;
    let (_controller, mut lp) = make_loop(config, ledger, NullPolicy::allowing(), 2);

    // Chain advances past the staleness window before the first tick.
    lp.ledger().set_block(1101);
    lp.tick();

    let subs = lp.ledger().submissions();
    assert_eq!(subs.len(), 1);
    assert_eq!(subs[0].uid, Uid::new(2));
    assert_eq!(subs[0].weights.len(), 4);
    assert_eq!(subs[0].weights.iter().sum::<f64>(), 1.0);
    assert_eq!(subs[0].weights[2], 1.0);
    assert!(!subs[0].wait_for_inclusion);
    assert_eq!(lp.state().last_submitted_block, 1101);
}

#[test]
fn submissions_disabled_by_default() {
    let ledger = NullLedger::with_neurons(1000, 4);
    let (_controller, mut lp) = make_loop(test_config(), ledger, NullPolicy::allowing(), 0);
    lp.ledger().set_block(9999);
    lp.tick();
    assert!(lp.ledger().submissions().is_empty());
}

// ---------------------------------------------------------------------------
// 4. Failure isolation at the tick boundary
// ---------------------------------------------------------------------------

#[test]
fn sub_task_errors_never_stop_the_counter() {
    let ledger = NullLedger::with_neurons(1000, 4);
    let mut config = test_config();
    config.set_weights = true;
    let (_controller, mut lp) = make_loop(config, ledger, NullPolicy::allowing(), 0);

    // Every fallible call at step 0 fails.
    lp.ledger()
        .fail_next_current_block(ChainError::Transient("rpc timeout".into()));
    lp.ledger()
        .fail_next_snapshot(ChainError::Transient("rpc timeout".into()));
    lp.ledger()
        .fail_next_snapshot(ChainError::Transient("rpc timeout".into()));
    lp.policy()
        .script_response(Err(ChainError::Transient("dns failure".into())));

    lp.tick();
    assert_eq!(lp.state().step, 1, "errors must not block the counter");
    assert_eq!(lp.loop_state(), LoopState::Running);

    // The next cadence boundary proceeds normally.
    tick_n(&mut lp, 19); // steps 1..=19
    lp.ledger().set_block(1200);
    lp.tick(); // step 20
    assert_eq!(lp.state().step, 21);
    assert_eq!(lp.ledger().submissions().len(), 1);
}

#[test]
fn failed_blacklist_query_keeps_previous_verdict() {
    let ledger = NullLedger::with_neurons(100, 2);
    let policy = NullPolicy::allowing();
    policy.script_response(Ok(true));
    let (_controller, mut lp) = make_loop(test_config(), ledger, policy, 0);

    lp.tick(); // step 0: now blacklisted
    assert!(lp.state().is_blacklisted);

    lp.policy()
        .script_response(Err(ChainError::Transient("unreachable".into())));
    tick_n(&mut lp, 300); // through step 300
    assert!(
        lp.state().is_blacklisted,
        "transient failure must not clear the cached verdict"
    );
}

// ---------------------------------------------------------------------------
// 5. Shutdown
// ---------------------------------------------------------------------------

#[test]
fn shutdown_before_first_tick_stops_cleanly() {
    let ledger = NullLedger::with_neurons(100, 2);
    let (controller, mut lp) = make_loop(test_config(), ledger, NullPolicy::allowing(), 0);

    controller.shutdown();
    lp.run().expect("run should exit cleanly");

    assert_eq!(lp.loop_state(), LoopState::Stopped);
    assert_eq!(lp.state().step, 0, "no tick may run after the signal");
    assert_eq!(lp.serving().start_calls(), 1);
    assert_eq!(lp.serving().stop_calls(), 1);
    assert_eq!(lp.telemetry().flush_count(), 1);
}

#[test]
fn shutdown_between_ticks_finishes_in_flight_work() {
    let ledger = NullLedger::with_neurons(100, 2);
    let mut config = test_config();
    config.tick_interval_ms = 1;
    let (controller, mut lp) = make_loop(config, ledger, NullPolicy::allowing(), 0);

    let handle = std::thread::spawn(move || {
        lp.run().expect("run should exit cleanly");
        lp
    });

    std::thread::sleep(std::time::Duration::from_millis(20));
    controller.shutdown();
    let lp = handle.join().expect("loop thread panicked");

    assert_eq!(lp.loop_state(), LoopState::Stopped);
    assert!(lp.state().step > 0, "the loop should have ticked");
    assert_eq!(lp.serving().stop_calls(), 1, "exactly one stop call");
    assert_eq!(lp.telemetry().flush_count(), 1, "exactly one flush");
}
