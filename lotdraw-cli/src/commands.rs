use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use lotdraw_config::LotdrawConfig;
use lotdraw_core::{Assignment, Slot, TopicCatalog};
use lotdraw_engine::{simulate_cycle, store_for, DrawService, SimulationPlan};
use lotdraw_telemetry::MetricsRecorder;

#[derive(Parser)]
#[command(name = "lotdraw", version, about = "Draw sequence slots and topics for participants")]
pub struct Cli {
    /// Explicit configuration file (skips the config/ directory lookup)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print Prometheus metrics after the command
    #[arg(long, global = true)]
    pub print_metrics: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Draw a slot and topic for a participant (repeat draws return the same result)
    Draw(DrawArgs),
    /// Clear every slot and start a new cycle
    Reset(ResetArgs),
    /// Show all slots in sequence order
    State(OutputArgs),
    /// List the topic catalog
    Topics,
    /// Print the effective configuration
    Config,
    /// Run a throwaway cycle in memory
    Simulate(SimulateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct DrawArgs {
    /// Participant name
    pub name: String,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug, Clone)]
pub struct ResetArgs {
    /// Confirm the reset; all draws in the current cycle are discarded
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// Number of generated participants
    #[arg(long, default_value_t = 13)]
    pub participants: usize,
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
    /// Include the designated participant halfway through
    #[arg(long)]
    pub with_admin: bool,
    #[command(flatten)]
    pub output: OutputArgs,
}

pub fn run_command(cli: Cli, config: LotdrawConfig) -> anyhow::Result<()> {
    let metrics = Arc::new(MetricsRecorder::new());

    match cli.command {
        Commands::Draw(args) => draw(&config, &args, metrics.clone())?,
        Commands::Reset(args) => reset(&config, &args, metrics.clone())?,
        Commands::State(args) => state(&config, &args, metrics.clone())?,
        Commands::Topics => topics(&config, metrics.clone())?,
        Commands::Config => print!("{}", config.to_yaml()?),
        Commands::Simulate(args) => simulate(&config, &args, metrics.clone())?,
    }

    if cli.print_metrics {
        print!("{}", metrics.gather_metrics()?);
    }
    Ok(())
}

fn open(config: &LotdrawConfig, metrics: Arc<MetricsRecorder>) -> anyhow::Result<DrawService> {
    let store = store_for(&config.storage);
    DrawService::open(&config.draw, store, metrics).with_context(|| {
        format!(
            "opening draw state at {} (run `lotdraw reset --yes` to discard it)",
            config.storage.snapshot_path.display()
        )
    })
}

fn draw(
    config: &LotdrawConfig,
    args: &DrawArgs,
    metrics: Arc<MetricsRecorder>,
) -> anyhow::Result<()> {
    let service = open(config, metrics)?;
    let outcome = service.draw(&args.name)?;

    if args.output.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", describe_assignment(&outcome.assignment));
    }
    Ok(())
}

fn reset(
    config: &LotdrawConfig,
    args: &ResetArgs,
    metrics: Arc<MetricsRecorder>,
) -> anyhow::Result<()> {
    if !args.yes {
        bail!("reset discards every draw in the current cycle; pass --yes to confirm");
    }
    let service = DrawService::open_fresh(&config.draw, store_for(&config.storage), metrics)?;
    let slots = service.reset()?;
    info!(slots = slots.len(), "Cycle reset");
    println!("Reset complete: {} empty slots", slots.len());
    Ok(())
}

fn state(
    config: &LotdrawConfig,
    args: &OutputArgs,
    metrics: Arc<MetricsRecorder>,
) -> anyhow::Result<()> {
    let slots = open(config, metrics)?.current_state();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&slots)?);
    } else {
        for slot in &slots {
            println!("{}", describe_slot(slot));
        }
    }
    Ok(())
}

fn topics(config: &LotdrawConfig, metrics: Arc<MetricsRecorder>) -> anyhow::Result<()> {
    let service = open(config, metrics)?;
    let drawn = service.drawn_topics();
    print!("{}", describe_catalog(service.topics(), |id| drawn.contains(&id)));
    Ok(())
}

fn simulate(
    config: &LotdrawConfig,
    args: &SimulateArgs,
    metrics: Arc<MetricsRecorder>,
) -> anyhow::Result<()> {
    let plan = SimulationPlan {
        participants: args.participants,
        seed: args.seed,
        with_admin: args.with_admin,
    };
    let report = simulate_cycle(&config.draw, &plan, metrics)?;

    if args.output.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for slot in &report.slots {
        println!("{}", describe_slot(slot));
    }
    for refusal in &report.refusals {
        println!("refused {}: {}", refusal.participant, refusal.reason);
    }
    println!(
        "seed {}: {} drawn, {} refused, {} repeated topics",
        report.seed,
        report.assignments.len(),
        report.refusals.len(),
        report.repeated_topics
    );
    Ok(())
}

fn describe_assignment(assignment: &Assignment) -> String {
    let verb = if assignment.is_replay() {
        "already drew"
    } else {
        "drew"
    };
    format!(
        "{} {} sequence #{} with topic {}: {}",
        assignment.participant,
        verb,
        assignment.sequence_number,
        assignment.topic.id,
        assignment.topic_text()
    )
}

fn describe_slot(slot: &Slot) -> String {
    match (&slot.occupant, &slot.topic) {
        (Some(name), Some(topic)) => format!(
            "#{:>3}  {}  [{}] {}",
            slot.sequence_number, name, topic.id, topic.text
        ),
        _ => format!("#{:>3}  (open)", slot.sequence_number),
    }
}

fn describe_catalog(catalog: &TopicCatalog, is_drawn: impl Fn(u32) -> bool) -> String {
    catalog
        .iter()
        .map(|topic| {
            let mark = if is_drawn(topic.id) { "x" } else { " " };
            format!("[{}] {:>3}. {}\n", mark, topic.id, topic.text)
        })
        .collect()
}
