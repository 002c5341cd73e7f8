use std::collections::HashSet;
use std::path::PathBuf;

use chrono::Local;
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use station_scrap::{extract, info_time, walk, Config, Result, Traversal, WalkLimits, WikiClient};

#[derive(Parser)]
#[command(name = "station-scrap", version, about = "Run a station wiki scraper")]
struct Cli {
    /// JSON config file (YAML is not read). Built-in defaults are used when omitted.
    #[arg(short, long, global = true, value_name = "CONFIG.json")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract one article and print its record.
    Extract { identifier: String },
    /// Walk at random along neighbouring-station links, one JSON line per step.
    Walk(WalkArgs),
}

#[derive(Args)]
struct WalkArgs {
    /// Starting article, overrides the config.
    start: Option<String>,
    /// Number of steps, 0 for no limit.
    #[arg(long)]
    steps: Option<usize>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    stop_on_revisit: bool,
}

/// Walk settings after command-line flags are laid over the config.
#[derive(Debug)]
struct WalkPlan {
    start: String,
    seed: Option<u64>,
    limits: WalkLimits,
}

impl WalkPlan {
    fn new(args: WalkArgs, config: &Config) -> Self {
        Self {
            start: args.start.unwrap_or_else(|| config.start.clone()),
            seed: args.seed.or(config.seed),
            limits: WalkLimits {
                max_steps: args.steps.unwrap_or(config.max_steps),
                stop_on_revisit: args.stop_on_revisit || config.stop_on_revisit,
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("station_scrap=info")),
        )
        .init();

    let start_time = Local::now();
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let client = WikiClient::new(&config)?;

    match cli.command {
        Command::Extract { identifier } => {
            let record = extract(&client, &identifier, &config.markers).await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Command::Walk(args) => {
            let plan = WalkPlan::new(args, &config);
            let rng = match plan.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };

            let mut traversal = Traversal::new(client, plan.start, config.markers, rng);
            let mut visited = HashSet::new();
            walk(&mut traversal, plan.limits, &mut visited, |step| {
                println!("{}", serde_json::to_string(step)?);
                Ok(())
            })
            .await?;
            info_time!("visited {} distinct articles", visited.len());
        }
    }

    info_time!(start_time, "Full program time:");
    Ok(())
}
