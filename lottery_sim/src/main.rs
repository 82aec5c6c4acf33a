//! Lottery Simulator CLI
//!
//! Run seeded, timed draw sessions and shuffle uniformity checks.

use anyhow::{Context, Result};
use clap::Parser;
use lottery_core::{DrawOptions, FisherYates, Lottery, LotteryOptions};
use lottery_sim::{DrawSession, SessionConfig, SimContext, UniformityCheck};
use std::time::Duration;
use tracing::{error, info, Level};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Lottery Simulation CLI
#[derive(Parser, Debug)]
#[command(name = "lottery-sim")]
#[command(about = "Run seeded lottery draw sessions", long_about = None)]
struct Args {
    /// JSON session config (command line flags override it)
    #[arg(short, long)]
    config: Option<String>,

    /// Master seed for determinism (0 = random from time)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Comma separated participants
    #[arg(short, long, value_delimiter = ',')]
    entries: Option<Vec<String>>,

    /// Number of sequential draws
    #[arg(short, long)]
    winners: Option<usize>,

    /// Delay between draws in milliseconds (at most one day)
    #[arg(short, long)]
    interval_ms: Option<u64>,

    /// Remove winners from the pool
    #[arg(long)]
    no_replacement: bool,

    /// Channel name attached to the pool
    #[arg(long)]
    channel: Option<String>,

    /// Also run a uniformity check with this many trials
    #[arg(long)]
    uniformity: Option<u64>,

    /// Entry count for the uniformity check
    #[arg(long, default_value = "3")]
    uniformity_entries: usize,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// JSON output for CI parsing
    #[arg(long)]
    json: bool,
}

impl Args {
    /// Layers command line flags over the config file (or defaults).
    fn session_config(&self) -> Result<SessionConfig> {
        let mut config = match &self.config {
            Some(path) => SessionConfig::load(path)
                .with_context(|| format!("loading session config from {}", path))?,
            None => SessionConfig::default(),
        };

        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(entries) = &self.entries {
            config.entries = entries.iter().map(|e| e.trim().to_string()).collect();
        }
        if let Some(winners) = self.winners {
            config.winners = winners;
        }
        if let Some(interval_ms) = self.interval_ms {
            config.interval_ms = interval_ms;
        }
        if self.no_replacement {
            config.replacement = false;
        }
        if let Some(channel) = &self.channel {
            config.channel_name = Some(channel.clone());
        }

        config.validate().context("invalid session config")?;
        Ok(config)
    }
}

fn resolve_seed(seed: u64) -> Result<u64> {
    if seed != 0 {
        return Ok(seed);
    }
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .context("system clock before unix epoch")?
        .as_nanos();
    Ok(nanos as u64)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging (RUST_LOG overrides --verbose)
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    let config = args.session_config()?;
    let seed = resolve_seed(config.seed)?;

    if !args.json {
        info!("Lottery Simulator v{}", env!("CARGO_PKG_VERSION"));
        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    }

    let ctx = SimContext::new(seed);
    let mut options = LotteryOptions::default()
        .with_shuffle(FisherYates::new(ctx.clone()))
        .with_replacement(config.replacement);
    if let Some(channel) = &config.channel_name {
        options = options.with_channel_name(channel.clone());
    }
    let mut lottery = Lottery::new(config.entries.clone(), options);

    let report = DrawSession::new(ctx.clone())
        .with_rounds(config.winners)
        .with_interval(Duration::from_millis(config.interval_ms))
        .with_options(DrawOptions::default())
        .run(&mut lottery)
        .await;

    let uniformity = match args.uniformity {
        Some(trials) => {
            let check = UniformityCheck::new(args.uniformity_entries, trials)
                .context("invalid uniformity check")?;
            Some(check.run(SimContext::new(seed)))
        }
        None => None,
    };

    let uniform_ok = uniformity.as_ref().map_or(true, |u| u.passed);
    let passed = report.passed() && uniform_ok;

    if args.json {
        let summary = serde_json::json!({
            "seed": seed,
            "passed": passed,
            "session": report,
            "uniformity": uniformity,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        for record in &report.records {
            info!("  #{:<3} t={:>6}ms  winner: {}", record.round, record.at_ms, record.winner);
        }

        if let Some(u) = &uniformity {
            if u.passed {
                info!("✓ Uniformity: chi2={:.2} < {:.2} over {} trials", u.chi_square, u.critical, u.trials);
            } else {
                error!("✗ Uniformity: chi2={:.2} >= {:.2} over {} trials", u.chi_square, u.critical, u.trials);
            }
        }

        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        if passed {
            info!("✅ {} of {} draws completed (seed={})", report.records.len(), report.requested, seed);
        } else if report.exhausted {
            error!(
                "❌ Pool exhausted after {} of {} draws (seed={})",
                report.records.len(),
                report.requested,
                seed
            );
        } else {
            error!("❌ Run failed (seed={})", seed);
        }
    }

    // Exit with proper code for CI
    if !passed {
        std::process::exit(1);
    }
    Ok(())
}
