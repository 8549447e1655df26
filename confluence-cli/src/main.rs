//! Confluence CLI — evaluate and replay commands.
//!
//! Commands:
//! - `evaluate` — compose one decision per symbol from CSV fixtures or the
//!   seeded synthetic generator, optionally with a second quote source
//! - `replay` — walk a series with a sliding window, resolve each decision
//!   against the bar `horizon` steps ahead, and report accuracy metrics

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use confluence_core::data::{JitterProvider, QuoteProvider, SyntheticProvider};
use confluence_core::domain::{Action, Outcome, PriceBar, TradeDecision};
use confluence_core::risk::RiskProfile;
use confluence_core::tracker::DecisionRef;
use confluence_core::{Engine, EngineConfig};

mod data_loader;
mod output;

#[derive(Parser)]
#[command(
    name = "confluence",
    about = "Confluence CLI — dual-source technical signal advisor"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose one decision per symbol and print it.
    Evaluate {
        /// Symbols to evaluate (e.g. AAPL MSFT BTC-USD).
        #[arg(required = true)]
        symbols: Vec<String>,

        /// CSV bar file for the primary source (single symbol only).
        #[arg(long)]
        csv: Option<PathBuf>,

        /// CSV bar file for the secondary source.
        #[arg(long)]
        secondary_csv: Option<PathBuf>,

        /// Master seed for the synthetic generator.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Add a jittered secondary source in synthetic mode.
        #[arg(long, default_value_t = false)]
        secondary: bool,

        /// Maximum relative price jitter for the synthetic secondary.
        #[arg(long, default_value_t = 0.02)]
        jitter: f64,

        /// Path to a TOML engine config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Risk profile override: conservative, balanced, aggressive.
        #[arg(long)]
        profile: Option<String>,

        /// Emit decisions as JSON instead of text blocks.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Replay a series, resolving each decision against later bars.
    Replay {
        /// Symbol to replay.
        symbol: String,

        /// CSV bar file; falls back to the synthetic generator.
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Master seed for the synthetic generator.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Number of synthetic bars to generate.
        #[arg(long, default_value_t = 500)]
        bars: usize,

        /// Trailing window fed into each evaluation.
        #[arg(long, default_value_t = 60)]
        window: usize,

        /// Bars ahead at which an outcome is resolved.
        #[arg(long, default_value_t = 12)]
        horizon: usize,

        /// Path to a TOML engine config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Risk profile override: conservative, balanced, aggressive.
        #[arg(long)]
        profile: Option<String>,
    },
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_target(true)
        .with_level(true)
        .compact()
        .with_env_filter(filter)
        .init();

    match Cli::parse().command {
        Commands::Evaluate {
            symbols,
            csv,
            secondary_csv,
            seed,
            secondary,
            jitter,
            config,
            profile,
            json,
        } => run_evaluate(
            symbols,
            csv,
            secondary_csv,
            seed,
            secondary,
            jitter,
            config,
            profile,
            json,
        ),
        Commands::Replay {
            symbol,
            csv,
            seed,
            bars,
            window,
            horizon,
            config,
            profile,
        } => run_replay(symbol, csv, seed, bars, window, horizon, config, profile),
    }
}

fn load_config(path: Option<&PathBuf>, profile: Option<&str>) -> Result<EngineConfig> {
    let mut config = match path {
        Some(path) => EngineConfig::from_toml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(profile) = profile {
        config.risk_profile = profile
            .parse::<RiskProfile>()
            .map_err(anyhow::Error::msg)?;
    }
    Ok(config)
}

#[allow(clippy::too_many_arguments)]
fn run_evaluate(
    symbols: Vec<String>,
    csv: Option<PathBuf>,
    secondary_csv: Option<PathBuf>,
    seed: u64,
    secondary: bool,
    jitter: f64,
    config: Option<PathBuf>,
    profile: Option<String>,
    json: bool,
) -> Result<()> {
    let config = load_config(config.as_ref(), profile.as_deref())?;
    let engine = Engine::new(config)?;

    if let Some(csv_path) = csv {
        // CSV mode feeds one explicit series, so it is single-symbol.
        if symbols.len() != 1 {
            bail!("--csv provides bars for exactly one symbol");
        }
        let primary_bars = data_loader::load_bars_csv(&csv_path)?;
        let secondary_bars = secondary_csv
            .map(|path| data_loader::load_bars_csv(&path))
            .transpose()?;

        let decision = engine.evaluate(&symbols[0], &primary_bars, secondary_bars.as_deref())?;
        print_decision(&decision, json)?;
        return Ok(());
    }

    let primary = SyntheticProvider::new(seed);
    let jittered = secondary.then(|| JitterProvider::new(primary.clone(), seed.wrapping_add(1), jitter));

    let mut results: Vec<_> = symbols
        .par_iter()
        .map(|symbol| {
            let decision = engine.evaluate_from_providers(
                symbol,
                &primary,
                jittered.as_ref().map(|p| p as &dyn QuoteProvider),
            );
            (symbol.clone(), decision)
        })
        .collect();
    results.sort_by(|a, b| a.0.cmp(&b.0));

    let mut failures = 0usize;
    for (symbol, result) in results {
        match result {
            Ok(decision) => print_decision(&decision, json)?,
            Err(error) => {
                failures += 1;
                eprintln!("{symbol}: {error}");
            }
        }
    }
    if failures > 0 {
        bail!("{failures} symbol(s) failed to evaluate");
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_replay(
    symbol: String,
    csv: Option<PathBuf>,
    seed: u64,
    bars: usize,
    window: usize,
    horizon: usize,
    config: Option<PathBuf>,
    profile: Option<String>,
) -> Result<()> {
    let config = load_config(config.as_ref(), profile.as_deref())?;
    if window < config.required_lookback() {
        bail!(
            "window {window} is below the engine's required lookback of {}",
            config.required_lookback()
        );
    }
    if horizon == 0 {
        bail!("horizon must be >= 1");
    }

    let series: Vec<PriceBar> = match csv {
        Some(path) => data_loader::load_bars_csv(&path)?,
        None => SyntheticProvider::new(seed).generate(&symbol, bars),
    };
    if series.len() < window + horizon {
        bail!(
            "series of {} bars is too short for window {window} + horizon {horizon}",
            series.len()
        );
    }

    let engine = Engine::new(config)?;
    info!(symbol = %symbol, bars = series.len(), window, horizon, "starting replay");
    let mut counts = [0usize; 3]; // buy, sell, hold
    let mut resolved = 0usize;

    for end in window..=(series.len() - horizon) {
        let view = &series[end - window..end];
        let as_of = view[view.len() - 1].timestamp;
        let decision = engine.evaluate_at(&symbol, view, None, as_of)?;

        match decision.action {
            Action::Buy => counts[0] += 1,
            Action::Sell => counts[1] += 1,
            Action::Hold => counts[2] += 1,
        }

        // HOLD decisions get no outcome: there is no position to resolve.
        if !decision.action.is_directional() {
            continue;
        }

        let entry_close = view[view.len() - 1].close;
        let future = &series[end + horizon - 1];
        let realized_return = future.close / entry_close - 1.0;
        let signed_return = match decision.action {
            Action::Sell => -realized_return,
            _ => realized_return,
        };
        let outcome = Outcome {
            profit: signed_return * decision.position_size_pct,
            success: signed_return > 0.0,
            actual_hold_hours: (future.timestamp - as_of).num_minutes() as f64 / 60.0,
        };
        if engine.record_outcome(&DecisionRef::Id(decision.id.clone()), outcome) {
            resolved += 1;
        }
    }

    println!("replayed {symbol}: {} evaluations", counts.iter().sum::<usize>());
    println!(
        "  actions: {} buy / {} sell / {} hold ({resolved} outcomes resolved)",
        counts[0], counts[1], counts[2]
    );
    println!("  {}", output::format_metrics(&engine.metrics()));

    if let Some(last) = engine.history(1).into_iter().next() {
        println!("\nlast decision:");
        print!("{}", output::format_decision(&last.decision));
    }
    Ok(())
}

fn print_decision(decision: &TradeDecision, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(decision)?);
    } else {
        print!("{}", output::format_decision(decision));
    }
    Ok(())
}
