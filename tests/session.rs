//! End-to-end sessions: engine actions routed through `dispatch` into a
//! memory store, a recording notifier, and real Tokio timers.

use std::time::Duration;

use seating::config::EngineConfig;
use seating::doc::{Configuration, FurnitureKind, RosterMode, Template};
use seating::engine::EngineCore;
use seating::host::{ConfigStore, MemoryStore, RecordingNotifier, Severity, dispatch};
use seating::input::{CanvasGeometry, Mode, Point};
use seating::timer::TokioScheduler;

struct Host {
    store: MemoryStore,
    notifier: RecordingNotifier,
    scheduler: TokioScheduler,
}

impl Host {
    fn run(&mut self, actions: Vec<seating::engine::Action>) -> bool {
        dispatch(actions, &mut self.store, &mut self.notifier, &mut self.scheduler)
    }

    fn last_message(&self) -> Option<&str> {
        self.notifier.messages.last().map(|(m, _)| m.as_str())
    }
}

fn roster_config(names: &str, template: Template) -> Configuration {
    Configuration {
        template,
        template_columns: 3,
        roster_mode: RosterMode::Custom,
        names: Some(names.to_string()),
        ..Configuration::default()
    }
}

#[tokio::test]
async fn build_assign_and_pick() {
    let settings = EngineConfig { picker_tick_ms: 2, picker_ticks: 5, ..EngineConfig::default() };
    let mut engine = EngineCore::with_seed(settings, 42);
    let (scheduler, mut ticks) = TokioScheduler::new();
    let mut host = Host {
        store: MemoryStore::new(roster_config("Ana\nBen\nCy\nDee\nEve\nFay", Template::Rows)),
        notifier: RecordingNotifier::default(),
        scheduler,
    };

    let loaded = engine.load_config(host.store.read()).unwrap();
    host.run(loaded);
    engine.set_canvas(CanvasGeometry::new(800.0, 600.0, 1.0));

    let actions = engine.apply_template();
    host.run(actions);
    assert_eq!(host.store.read().furniture.len(), 6);
    assert_eq!(host.last_message(), Some("Applied rows layout with 6 desks."));

    let (report, actions) = engine.assign_all_randomly();
    host.run(actions);
    assert_eq!(report.assigned, 6);
    assert_eq!(host.store.read().assignments.len(), 6);
    assert!(host.store.read().validate().is_ok());

    host.run(engine.pick_random());
    assert_eq!(host.scheduler.active(), 1);
    while engine.is_randomizing() {
        let timer = tokio::time::timeout(Duration::from_secs(2), ticks.recv()).await.unwrap().unwrap();
        host.run(engine.on_timer_tick(timer));
    }
    assert_eq!(host.scheduler.active(), 0);
    let winner = engine.random_highlight().unwrap();
    assert_eq!(engine.assigned_students(&winner).len(), 1);

    host.run(engine.teardown());
    assert_eq!(host.store.read(), *engine.config());
}

#[tokio::test]
async fn every_write_is_a_whole_valid_configuration() {
    let mut engine = EngineCore::with_seed(EngineConfig::default(), 5);
    let (scheduler, _ticks) = TokioScheduler::new();
    let mut host = Host { store: MemoryStore::default(), notifier: RecordingNotifier::default(), scheduler };
    engine.set_canvas(CanvasGeometry::new(800.0, 600.0, 1.0));

    host.run(engine.set_mode(Mode::Setup));
    host.run(engine.add_furniture(FurnitureKind::Desk, 1));
    let desk = engine.selection().unwrap();
    host.run(engine.add_furniture(FurnitureKind::TableRect, 1));
    let table = engine.selection().unwrap();

    let before = host.store.writes();
    host.run(engine.on_pointer_down(&desk, Point::new(0.0, 0.0)));
    for step in 1..=10 {
        host.run(engine.on_pointer_move(Point::new(f64::from(step) * 7.0, f64::from(step) * 3.0)));
    }
    assert_eq!(host.store.writes(), before);
    host.run(engine.on_pointer_up());
    assert_eq!(host.store.writes(), before + 1);

    host.run(engine.set_mode(Mode::Assign));
    host.run(engine.on_student_drop("Ana", &desk));
    host.run(engine.on_student_drop("Ben", &table));
    host.run(engine.on_student_drop("Cy", &table));

    host.run(engine.set_mode(Mode::Setup));
    host.run(engine.delete_furniture(&table));
    let stored = host.store.read();
    assert!(stored.validate().is_ok());
    assert_eq!(stored.assignments.len(), 1);
    assert_eq!(stored.furniture.len(), 1);
}

#[tokio::test]
async fn failures_surface_as_notifications() {
    let mut engine = EngineCore::with_seed(EngineConfig::default(), 9);
    let (scheduler, _ticks) = TokioScheduler::new();
    let mut host = Host { store: MemoryStore::default(), notifier: RecordingNotifier::default(), scheduler };
    let loaded = engine.load_config(roster_config("Ana", Template::Pods)).unwrap();
    host.run(loaded);

    let (_, actions) = engine.assign_all_randomly();
    host.run(actions);
    host.run(engine.pick_random());
    assert_eq!(
        host.notifier.messages,
        vec![
            ("No desks or tables available!".to_string(), Severity::Error),
            ("No students assigned to seats!".to_string(), Severity::Info),
        ]
    );
    assert_eq!(host.store.writes(), 0);
    assert_eq!(host.scheduler.active(), 0);
}
