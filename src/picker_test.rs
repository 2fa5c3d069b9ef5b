use rand::SeedableRng;
use rand::rngs::StdRng;
use uuid::Uuid;

use super::*;

fn ids(n: usize) -> Vec<FurnitureId> {
    (0..n).map(|_| Uuid::new_v4()).collect()
}

#[test]
fn empty_pool_has_no_run() {
    assert!(PickerRun::new(TimerId(1), Vec::new(), 16).is_none());
}

#[test]
fn run_finishes_on_last_tick() {
    let pool = ids(3);
    let mut run = PickerRun::new(TimerId(7), pool.clone(), 16).unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..15 {
        match run.tick(&mut rng) {
            PickStep::Highlight(id) => assert!(pool.contains(&id)),
            other => panic!("expected highlight, got {other:?}"),
        }
    }
    match run.tick(&mut rng) {
        PickStep::Finished(id) => assert!(pool.contains(&id)),
        other => panic!("expected finish, got {other:?}"),
    }
    assert_eq!(run.ticks(), 16);
    assert_eq!(run.timer(), TimerId(7));
}

#[test]
fn zero_max_ticks_is_one() {
    let mut run = PickerRun::new(TimerId(1), ids(1), 0).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    assert!(matches!(run.tick(&mut rng), PickStep::Finished(_)));
}

#[test]
fn single_seat_always_wins() {
    let pool = ids(1);
    let mut run = PickerRun::new(TimerId(1), pool.clone(), 4).unwrap();
    let mut rng = StdRng::seed_from_u64(9);
    let mut last = None;
    for _ in 0..4 {
        last = Some(run.tick(&mut rng));
    }
    assert_eq!(last, Some(PickStep::Finished(pool[0])));
}

#[test]
fn picks_are_spread_over_pool() {
    let pool = ids(4);
    let mut run = PickerRun::new(TimerId(1), pool.clone(), u32::MAX).unwrap();
    let mut rng = StdRng::seed_from_u64(3);
    let mut seen = std::collections::HashSet::new();
    for _ in 0..200 {
        if let PickStep::Highlight(id) = run.tick(&mut rng) {
            seen.insert(id);
        }
    }
    assert_eq!(seen.len(), 4);
}

#[test]
fn retain_shrinks_pool_and_exhausts() {
    let pool = ids(2);
    let mut run = PickerRun::new(TimerId(1), pool.clone(), 16).unwrap();
    let keep = pool[1];
    run.retain(|id| *id == keep);
    assert_eq!(run.pool(), &[keep]);

    run.retain(|_| false);
    let mut rng = StdRng::seed_from_u64(5);
    assert_eq!(run.tick(&mut rng), PickStep::Exhausted);
    assert_eq!(run.ticks(), 0);
}
