#![allow(clippy::float_cmp)]

use super::*;

/// # Safety
/// Env mutation is process-global; every env assertion lives in one test.
unsafe fn clear_seating_env() {
    unsafe {
        std::env::remove_var("SEATING_PICKER_TICK_MS");
        std::env::remove_var("SEATING_PICKER_TICKS");
        std::env::remove_var("SEATING_BULK_MAX");
        std::env::remove_var("SEATING_MIN_CANVAS_DIM");
    }
}

#[test]
fn defaults_match_constants() {
    let cfg = EngineConfig::default();
    assert_eq!(cfg.picker_tick_ms, 100);
    assert_eq!(cfg.picker_ticks, 16);
    assert_eq!(cfg.bulk_max, 50);
    assert_eq!(cfg.min_canvas_dim, 200.0);
    assert_eq!(cfg.picker_interval(), Duration::from_millis(100));
}

#[test]
fn from_env_overrides_and_fallbacks() {
    unsafe { clear_seating_env() };
    assert_eq!(EngineConfig::from_env(), EngineConfig::default());

    unsafe {
        std::env::set_var("SEATING_PICKER_TICK_MS", " 25 ");
        std::env::set_var("SEATING_PICKER_TICKS", "4");
        std::env::set_var("SEATING_BULK_MAX", "10");
        std::env::set_var("SEATING_MIN_CANVAS_DIM", "320.5");
    }
    let cfg = EngineConfig::from_env();
    assert_eq!(cfg.picker_tick_ms, 25);
    assert_eq!(cfg.picker_ticks, 4);
    assert_eq!(cfg.bulk_max, 10);
    assert_eq!(cfg.min_canvas_dim, 320.5);

    // Garbage falls back to the default; zero is raised to one.
    unsafe {
        std::env::set_var("SEATING_PICKER_TICK_MS", "fast");
        std::env::set_var("SEATING_PICKER_TICKS", "0");
        std::env::set_var("SEATING_BULK_MAX", "-3");
    }
    let cfg = EngineConfig::from_env();
    assert_eq!(cfg.picker_tick_ms, 100);
    assert_eq!(cfg.picker_ticks, 1);
    assert_eq!(cfg.bulk_max, 50);

    unsafe { clear_seating_env() };
}

#[test]
fn env_parse_missing_key_uses_default() {
    assert_eq!(env_parse("SEATING_TEST_NEVER_SET_KEY", 7_u32), 7);
}
