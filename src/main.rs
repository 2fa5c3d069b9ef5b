use clap::Parser;
use seating::config::EngineConfig;
use seating::doc::{Configuration, FurnitureKind, RosterMode, Template};
use seating::engine::EngineCore;
use seating::error::SeatingError;
use seating::host::{ConfigStore, MemoryStore, TracingNotifier, dispatch};
use seating::input::CanvasGeometry;
use seating::layout::StudentGroup;
use seating::roster::{Student, class_names};
use seating::timer::TokioScheduler;

#[derive(Parser, Debug)]
#[command(name = "seating-demo", about = "Generate a seating chart and print its configuration as JSON")]
struct Cli {
    /// Layout template: rows, horseshoe, pods.
    #[arg(long, env = "SEATING_TEMPLATE", default_value = "rows")]
    template: Template,

    /// Number of students on the generated roster.
    #[arg(long, default_value_t = 24)]
    students: usize,

    /// Column count for the rows template.
    #[arg(long, default_value_t = 6)]
    columns: u32,

    #[arg(long, default_value_t = 800.0)]
    width: f64,

    #[arg(long, default_value_t = 600.0)]
    height: f64,

    #[arg(long, default_value_t = 20.0)]
    grid: f64,

    /// Import groups instead of applying a template, e.g. "Ana,Ben;Cy,Dee,Eve".
    #[arg(long)]
    groups: Option<String>,

    /// Seat every student at random after the layout is built.
    #[arg(long)]
    assign: bool,

    /// Run the random picker animation and report the winner.
    #[arg(long)]
    pick: bool,

    /// Print the furniture palette and exit.
    #[arg(long)]
    list_kinds: bool,
}

/// One line per furniture kind: wire name, palette label, seatability.
fn kind_listing() -> String {
    FurnitureKind::ALL
        .iter()
        .map(|kind| {
            let name = kind.to_string();
            let seats = if kind.is_seatable() { "seatable" } else { "not seatable" };
            format!("{name:<14}{:<16}{seats}", kind.label())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn parse_groups(raw: &str) -> Vec<StudentGroup> {
    raw.split(';')
        .enumerate()
        .map(|(i, members)| StudentGroup {
            label: format!("Group {}", i + 1),
            names: members.split(',').map(|n| n.trim().to_string()).collect(),
        })
        .collect()
}

#[tokio::main]
async fn main() -> Result<(), SeatingError> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    let output = if cli.list_kinds { kind_listing() } else { build_chart(&cli).await? };
    println!("{output}");
    Ok(())
}

/// Build the chart the flags describe and return its configuration JSON.
async fn build_chart(cli: &Cli) -> Result<String, SeatingError> {
    let mut engine = EngineCore::with_settings(EngineConfig::from_env());
    let mut store = MemoryStore::new(Configuration {
        grid_size: cli.grid,
        template: cli.template,
        template_columns: cli.columns,
        roster_mode: RosterMode::Class,
        ..Configuration::default()
    });
    let (mut scheduler, mut ticks) = TokioScheduler::new();
    let mut notifier = TracingNotifier;

    let loaded = engine.load_config(store.read())?;
    dispatch(loaded, &mut store, &mut notifier, &mut scheduler);
    let roster: Vec<Student> = (1..=cli.students).map(|i| Student::new("Student", i.to_string())).collect();
    engine.set_class_roster(class_names(&roster));
    engine.set_canvas(CanvasGeometry::new(cli.width, cli.height, 1.0));

    let actions = match cli.groups.as_deref() {
        Some(raw) => engine.apply_grouped(&parse_groups(raw)),
        None => engine.apply_template(),
    };
    dispatch(actions, &mut store, &mut notifier, &mut scheduler);

    if cli.assign {
        let (report, actions) = engine.assign_all_randomly();
        dispatch(actions, &mut store, &mut notifier, &mut scheduler);
        tracing::info!(assigned = report.assigned, remaining = report.remaining, "random assignment done");
    }

    if cli.pick {
        dispatch(engine.pick_random(), &mut store, &mut notifier, &mut scheduler);
        while engine.is_randomizing() {
            let Some(timer) = ticks.recv().await else {
                break;
            };
            dispatch(engine.on_timer_tick(timer), &mut store, &mut notifier, &mut scheduler);
        }
        if let Some(winner) = engine.random_highlight() {
            tracing::info!(%winner, students = ?engine.assigned_students(&winner), "picked");
        }
    }

    dispatch(engine.teardown(), &mut store, &mut notifier, &mut scheduler);
    store.read().to_json()
}
