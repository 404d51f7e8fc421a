//! End-to-end round scenarios driven purely through the public surface:
//! host-style ticking, keystrokes, substrate contact reports, and storage
//! hand-off.

use keyfall::sim::ContactEvent;
use keyfall::{
    FileRoundStore, RoundConfig, RoundEngine, RoundPhase, RoundStore, TypingMode,
};

const DT: f32 = 1.0 / 60.0;

/// Engine logging visible under `RUST_LOG` when a scenario fails.
fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn tick_for(engine: &mut RoundEngine, seconds: f32) {
    let steps = (seconds / DT).ceil() as usize;
    for _ in 0..steps {
        engine.tick(DT);
    }
}

fn single_target_config() -> RoundConfig {
    RoundConfig {
        quota: 1,
        ..RoundConfig::default()
    }
}

/// Full quota-1 round: a wrong symbol counts a mistype, the right one
/// fires, and the contact ends the round with exactly one keystroke record
/// handed off in the result.
#[test]
fn quota_one_full_round() {
    init_logging();
    let mut engine = RoundEngine::new(single_target_config(), 42);
    engine.start();

    // Let the single target spawn.
    tick_for(&mut engine, 2.5);
    assert_eq!(engine.remaining_targets(), 1);
    let target = engine.registry().iter().next().unwrap();
    let id = target.id;
    let symbol = target.symbol.clone();

    // Wrong symbol: one mistype, nothing else moves.
    let wrong = if symbol == "🍉" { "🚀" } else { "🍉" };
    engine.handle_symbol_input(wrong);
    assert_eq!(engine.total_mistypes(), 1);
    assert_eq!(engine.remaining_targets(), 1);
    assert!(engine.projectiles().is_empty());

    // Right symbol: target fired upon, projectile aimed at it.
    engine.handle_symbol_input(&symbol);
    assert!(engine.registry().get(id).unwrap().fired_upon);
    assert_eq!(engine.projectiles().len(), 1);
    let projectile = engine.projectiles()[0].id;

    // Substrate reports the hit: round over.
    engine.handle_contact(ContactEvent::projectile_hit(projectile, id));
    assert_eq!(engine.remaining_targets(), 0);
    assert_eq!(engine.phase(), RoundPhase::Ended);

    let result = engine.take_result().expect("round result");
    assert_eq!(result.keystrokes.len(), 1);
    assert_eq!(result.keystrokes[0].actual, symbol);
    assert_eq!(result.keystrokes[0].entered, symbol);
    assert!(result.keystrokes[0].time_to_type >= 0.0);
}

/// Destroy every currently unfired target back-to-back, lowest first, with
/// no ticking in between (so the streak chains uninterrupted). Returns how
/// many were destroyed.
fn destroy_all_live(engine: &mut RoundEngine) -> u32 {
    let mut destroyed = 0;
    loop {
        let Some(target) = engine
            .registry()
            .iter()
            .filter(|t| !t.fired_upon)
            .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        else {
            return destroyed;
        };
        let (id, symbol) = (target.id, target.symbol.clone());
        engine.handle_symbol_input(&symbol);
        let projectile = engine.projectiles().last().expect("projectile").id;
        engine.handle_contact(ContactEvent::projectile_hit(projectile, id));
        destroyed += 1;
    }
}

/// Ramp-up disabled: five consecutive destroys leave the spawn interval
/// untouched.
#[test]
fn ramp_up_disabled_keeps_interval() {
    init_logging();
    let config = RoundConfig {
        ramp_up_enabled: false,
        ..RoundConfig::default()
    };
    let base = config.base_spawn_interval;
    let mut engine = RoundEngine::new(config, 7);
    engine.start();

    // Fill the field to the concurrency cap, then clear it in one burst.
    tick_for(&mut engine, 11.0);
    let destroyed = destroy_all_live(&mut engine);

    assert!(destroyed >= 5);
    assert_eq!(engine.pacer().consecutive_destroys(), destroyed);
    assert!((engine.pacer().current_spawn_interval() - base).abs() < f32::EPSILON);
}

/// Ramp-up enabled with threshold 1: the second back-to-back destroy
/// shrinks the interval, and it never goes below the floor.
#[test]
fn ramp_up_shrinks_to_floor() {
    init_logging();
    let config = RoundConfig {
        quota: 100,
        ..RoundConfig::default()
    };
    let base = config.base_spawn_interval;
    let floor = config.min_spawn_interval;
    let mut engine = RoundEngine::new(config, 7);
    engine.start();

    // First burst: the interval is untouched after one destroy and strictly
    // smaller after the second.
    tick_for(&mut engine, 11.0);
    let target = engine
        .registry()
        .iter()
        .filter(|t| !t.fired_upon)
        .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .expect("live target");
    let (id, symbol) = (target.id, target.symbol.clone());
    engine.handle_symbol_input(&symbol);
    let projectile = engine.projectiles().last().expect("projectile").id;
    engine.handle_contact(ContactEvent::projectile_hit(projectile, id));
    assert!((engine.pacer().current_spawn_interval() - base).abs() < f32::EPSILON);

    destroy_all_live(&mut engine);
    assert!(engine.pacer().current_spawn_interval() < base);

    // Keep bursting through the quota: the interval walks down but is
    // clamped at the floor.
    while engine.phase() == RoundPhase::Running && !engine.pacer().quota_reached(engine.config()) {
        tick_for(&mut engine, 11.0);
        destroy_all_live(&mut engine);
        assert!(engine.pacer().current_spawn_interval() >= floor - f32::EPSILON);
    }
    assert!((engine.pacer().current_spawn_interval() - floor).abs() < 1e-6);
}

/// The round must not end early: quota reached with targets still alive
/// keeps it running, no matter how long the host ticks.
#[test]
fn no_early_end_while_targets_remain() {
    init_logging();
    let mut engine = RoundEngine::new(single_target_config(), 3);
    engine.start();
    tick_for(&mut engine, 2.5);
    assert!(engine.pacer().quota_reached(engine.config()));

    tick_for(&mut engine, 30.0);
    assert_eq!(engine.phase(), RoundPhase::Running);
    assert_eq!(engine.remaining_targets(), 1);

    // The stalled target froze just under the danger line instead of
    // escaping or failing the round.
    let target = engine.registry().iter().next().unwrap();
    assert!(target.pos.y < engine.config().danger_line());
    assert!(target.pos.y > 0.0);
    assert_eq!(target.vel, glam::Vec2::ZERO);
}

/// A finished round flows into the storage collaborator and back out of the
/// listing, with corrupt neighbors skipped.
#[test]
fn round_result_persists_through_store() {
    init_logging();
    let tmp = tempfile::tempdir().unwrap();
    let store = FileRoundStore::new(tmp.path());

    let mut engine = RoundEngine::new(single_target_config(), 11);
    engine.start();
    tick_for(&mut engine, 2.5);
    let target = engine.registry().iter().next().unwrap();
    let (id, symbol) = (target.id, target.symbol.clone());
    engine.handle_symbol_input(&symbol);
    let projectile = engine.projectiles()[0].id;
    engine.handle_contact(ContactEvent::projectile_hit(projectile, id));

    let result = engine.take_result().unwrap();
    store.save(&result).unwrap();
    std::fs::write(tmp.path().join("round_bad_0.json"), b"]broken[").unwrap();

    let rounds = store.all_rounds();
    assert_eq!(rounds.len(), 1);
    assert_eq!(rounds[0].game_mode, "Alien Invasion");
    assert_eq!(rounds[0].keystrokes.len(), 1);
}

/// The engine drives cleanly behind the mode trait the host swaps on.
#[test]
fn engine_as_typing_mode() {
    init_logging();
    let mut engine = RoundEngine::new(RoundConfig::default(), 5);
    engine.start();
    tick_for(&mut engine, 2.5);

    let mode: &mut dyn TypingMode = &mut engine;
    assert_eq!(mode.friendly_name(), "Alien Invasion");
    assert_eq!(mode.remaining_targets(), 1);
    mode.handle_symbol_input("not-a-symbol");
    assert_eq!(mode.total_mistypes(), 1);
}
