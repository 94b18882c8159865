use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tour_allocator::config::AppConfig;
use tour_allocator::error::AppError;
use tour_allocator::telemetry;
use tour_allocator::workflows::tours::{
    views, AllocationEngine, AllocationReport, MailNotifier, NotificationSettings, ObserverChain,
    PreferenceRotator, QueueView, RegulatorNotifier, Scenario, TourId, TourStatusView,
    TracingMailSender, TracingRegulatorGateway,
};
use tracing::info;

const DEMO_SCENARIO: &str = include_str!("../demos/tour_scenario.json");

#[derive(Parser, Debug)]
#[command(
    name = "Tour Allocator",
    about = "Allocate waiting travelers to group tours and send confirmation notices",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run an allocation pass over a JSON scenario file
    Allocate(AllocateArgs),
    /// Run an allocation pass over the bundled demo scenario
    Demo(OutputArgs),
}

#[derive(Args, Debug)]
struct AllocateArgs {
    /// Scenario file with places, tours and travelers
    #[arg(long)]
    scenario: PathBuf,
    /// Explicitly confirm these tours after the pass (repeatable)
    #[arg(long = "confirm", value_name = "TOUR_ID")]
    confirm: Vec<String>,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug, Default)]
struct OutputArgs {
    /// Print the outcome as JSON instead of a text summary
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct AllocationOutput {
    pass: AllocationReport,
    tours: Vec<TourStatusView>,
    queue: QueueView,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        let mut cause = std::error::Error::source(&err);
        while let Some(inner) = cause {
            eprintln!("  caused by: {inner}");
            cause = inner.source();
        }
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    info!(environment = ?config.environment, "tour allocator starting");

    match cli.command {
        Command::Allocate(args) => {
            let scenario = Scenario::from_path(&args.scenario)?;
            run_allocation(scenario, &config.notifications, &args.confirm, &args.output)
        }
        Command::Demo(output) => {
            let scenario = Scenario::from_reader(DEMO_SCENARIO.as_bytes())?;
            run_allocation(scenario, &config.notifications, &[], &output)
        }
    }
}

fn observer_chain(settings: &NotificationSettings) -> ObserverChain {
    ObserverChain::new()
        .with(MailNotifier::new(settings.clone()).with_sender(Arc::new(TracingMailSender)))
        .with(RegulatorNotifier::new(
            Arc::new(TracingRegulatorGateway),
            settings,
        ))
        .with(PreferenceRotator)
}

fn run_allocation(
    scenario: Scenario,
    settings: &NotificationSettings,
    confirm: &[String],
    output: &OutputArgs,
) -> Result<(), AppError> {
    let mut engine = scenario.into_engine(observer_chain(settings))?;
    info!(
        observers = ?engine.observers().names(),
        tours = engine.tours().len(),
        waiting = engine.waiting().len(),
        "engine ready"
    );
    let pass = engine.run_allocation_pass()?;

    for id in confirm {
        engine.confirm_tour(&TourId(id.clone()))?;
    }

    let outcome = AllocationOutput {
        pass,
        tours: views::tour_statuses(&engine),
        queue: views::queue(&engine),
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if output.json {
        serde_json::to_writer_pretty(&mut out, &outcome)?;
        writeln!(out)?;
    } else {
        render_summary(&mut out, &engine, &outcome)?;
    }
    Ok(())
}

fn render_summary(
    out: &mut impl Write,
    engine: &AllocationEngine,
    outcome: &AllocationOutput,
) -> Result<(), AppError> {
    writeln!(out, "Allocation pass")?;
    writeln!(out, "  enrolled: {}", outcome.pass.enrollments.len())?;
    writeln!(out, "  pending: {}", outcome.pass.pending.len())?;
    writeln!(out, "  confirmed during pass: {}", outcome.pass.confirmed_tours.len())?;
    writeln!(out)?;

    writeln!(out, "Tours")?;
    for view in &outcome.tours {
        let enrolled = view
            .enrolled
            .iter()
            .map(|id| id.0.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(
            out,
            "  {:<12} {:<10} {}/{} seats  [{}]",
            view.tour.0,
            view.status,
            view.enrolled.len(),
            view.capacity,
            enrolled
        )?;
    }

    if !outcome.queue.pending.is_empty() {
        writeln!(out)?;
        writeln!(out, "Pending travelers")?;
        for id in &outcome.queue.pending {
            let budget = engine
                .traveler(id)
                .map(|traveler| traveler.budget.to_string())
                .unwrap_or_else(|| "-".to_string());
            writeln!(out, "  {:<12} budget {}", id.0, budget)?;
        }
    }

    Ok(())
}
