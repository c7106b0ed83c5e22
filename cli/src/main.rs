use anyhow::{bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use pathweaver_core::{catalog, Phase, SequencerSnapshot, StageCatalog};
use pathweaver_sequencer::{ProgressTicker, StageSequencer, TimingProfile};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Command::new("pathweaver")
        .version("0.1.0")
        .about("Simulated agent execution progress")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("run")
                .about("Run the detail-stepped sequencer over a stage catalog")
                .arg(
                    Arg::new("catalog")
                        .long("catalog")
                        .default_value("agents")
                        .help("Built-in catalog name (agents, agents-compact, generation, components) or path to a JSON file"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_parser(value_parser!(u64))
                        .help("Random seed for a reproducible run"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Emit each snapshot as a JSON line on stdout"),
                ),
        )
        .subcommand(
            Command::new("progress")
                .about("Run the percentage progress ticker")
                .arg(
                    Arg::new("stages")
                        .long("stages")
                        .default_value("4")
                        .value_parser(value_parser!(usize))
                        .help("Number of evenly weighted stages"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_parser(value_parser!(u64))
                        .help("Random seed for a reproducible run"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Emit each snapshot as a JSON line on stdout"),
                ),
        )
        .get_matches();

    match cli.subcommand() {
        Some(("run", matches)) => run_sequencer(matches).await,
        Some(("progress", matches)) => run_ticker(matches).await,
        _ => bail!("unknown subcommand"),
    }
}

async fn run_sequencer(matches: &ArgMatches) -> Result<()> {
    let name = matches
        .get_one::<String>("catalog")
        .map_or("agents", String::as_str);
    let stages = load_catalog(name)?;
    let emit_json = matches.get_flag("json");

    let mut timing = TimingProfile::default();
    if let Some(seed) = matches.get_one::<u64>("seed") {
        timing = timing.with_seed(*seed);
    }
    // the component script runs behind a thinking phase
    if name == "components" {
        timing = timing.with_thinking(3_000, 7_000);
    }

    let sequencer = StageSequencer::new(stages, timing);
    let mut rx = sequencer.subscribe();
    sequencer.set_active(true);

    loop {
        rx.changed().await.context("sequencer channel closed")?;
        let snapshot = *rx.borrow();
        if emit_json {
            println!("{}", serde_json::to_string(&snapshot)?);
        } else {
            render(&sequencer, &snapshot);
        }
        if snapshot.is_terminal() {
            break;
        }
    }
    sequencer.set_active(false);
    Ok(())
}

async fn run_ticker(matches: &ArgMatches) -> Result<()> {
    let stage_count = matches.get_one::<usize>("stages").copied().unwrap_or(4);
    let emit_json = matches.get_flag("json");

    let mut timing = TimingProfile::default();
    if let Some(seed) = matches.get_one::<u64>("seed") {
        timing = timing.with_seed(*seed);
    }

    let ticker = ProgressTicker::new(stage_count, timing);
    let mut rx = ticker.subscribe();
    ticker.set_active(true);

    loop {
        rx.changed().await.context("ticker channel closed")?;
        let snapshot = *rx.borrow();
        if emit_json {
            println!("{}", serde_json::to_string(&snapshot)?);
        } else {
            tracing::info!(
                percent = snapshot.percent.round(),
                stage = snapshot.stage,
                of = snapshot.stage_count,
                "progress"
            );
        }
        if snapshot.is_complete {
            break;
        }
    }
    ticker.set_active(false);
    Ok(())
}

fn load_catalog(name: &str) -> Result<StageCatalog> {
    if let Some(builtin) = catalog::by_name(name) {
        return Ok(builtin);
    }
    let raw = std::fs::read_to_string(name)
        .with_context(|| format!("reading catalog file {name}"))?;
    StageCatalog::from_json(&raw).with_context(|| format!("parsing catalog file {name}"))
}

fn render(sequencer: &StageSequencer, snapshot: &SequencerSnapshot) {
    match snapshot.phase {
        Phase::Idle => tracing::info!("idle"),
        Phase::Thinking { elapsed_secs } => {
            tracing::info!(elapsed_secs, "thinking");
        }
        Phase::Stage { stage, item } => {
            let entry = sequencer.catalog().get(stage);
            let label = entry.map_or("?", |s| s.label.as_str());
            match item.and_then(|i| entry.and_then(|s| s.items.get(i))) {
                Some(detail) => {
                    tracing::info!(stage, label, detail = detail.as_str(), "executing");
                }
                None => tracing::info!(stage, label, "executing"),
            }
        }
        Phase::Complete => {
            tracing::info!(completed = snapshot.completed, "all stages complete");
        }
    }
}
