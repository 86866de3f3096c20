// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! ENAQT chain simulator
//!
//! Runs disorder-averaged transport simulations for a list of dephasing
//! rates and reports the sink efficiency per rate.
//!
//! # Usage
//!
//! ```bash
//! # Run the default experiment (N=7, W=5, rates 0, 1.5, 10)
//! enaqt-sim run
//!
//! # Custom sweep, machine-readable output for a plotter
//! enaqt-sim run --rates 0,0.5,1.5,5,10 --samples 200 --format json
//!
//! # Show effective configuration
//! enaqt-sim config --config /path/to/enaqt.yaml
//! ```

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use enaqt_chain::config::{parse_rate_list, Config};
use enaqt_chain::ensemble::{EnsembleParams, EnsembleResult, RealizationPolicy, RegimeSummary};
use enaqt_chain::{Result, VERSION};

/// Environment-assisted transport on a disordered chain
#[derive(Parser)]
#[command(name = "enaqt-sim")]
#[command(author = "QubitOS Contributors")]
#[command(version = VERSION)]
#[command(about = "Disorder-averaged ENAQT simulations on a tight-binding chain")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a dephasing-rate sweep
    Run {
        /// Master seed
        #[arg(long)]
        seed: Option<u64>,

        /// Disorder realizations per rate
        #[arg(long)]
        samples: Option<usize>,

        /// Comma-separated dephasing rates
        #[arg(long)]
        rates: Option<String>,

        /// Number of time steps
        #[arg(long)]
        steps: Option<usize>,

        /// Time step
        #[arg(long)]
        dt: Option<f64>,

        /// Disorder half-width
        #[arg(long)]
        disorder: Option<f64>,

        /// Realization policy (shared, independent, continued)
        #[arg(long)]
        policy: Option<String>,

        /// Run samples on a single thread
        #[arg(long)]
        sequential: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Show effective configuration
    Config,

    /// Validate configuration file
    Validate,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

/// JSON document handed to external renderers.
#[derive(Serialize)]
struct RunReport<'a> {
    version: &'a str,
    params: &'a EnsembleParams,
    seed: u64,
    policy: RealizationPolicy,
    optimal_rate: Option<f64>,
    summaries: Vec<RegimeSummary>,
    trajectories: &'a EnsembleResult,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    // Initialize logging
    init_logging(&config.logging.level, &config.logging.format);
    if let Some(path) = Config::missing_file(cli.config.as_deref()) {
        warn!(path = %path.display(), "Config file not found, using defaults");
    }

    match cli.command {
        Commands::Run {
            seed,
            samples,
            rates,
            steps,
            dt,
            disorder,
            policy,
            sequential,
            format,
        } => {
            // Override config with CLI args
            if let Some(seed) = seed {
                config.ensemble.seed = seed;
            }
            if let Some(samples) = samples {
                config.ensemble.samples = samples;
            }
            if let Some(rates) = rates {
                config.ensemble.dephasing_rates = parse_rate_list(&rates)?;
            }
            if let Some(steps) = steps {
                config.evolution.num_time_steps = steps;
            }
            if let Some(dt) = dt {
                config.evolution.dt = dt;
            }
            if let Some(disorder) = disorder {
                config.chain.disorder = disorder;
            }
            if let Some(policy) = policy {
                config.ensemble.policy = policy.parse()?;
            }
            if sequential {
                config.ensemble.parallel = false;
            }

            let sweep = config.build_sweep()?;
            info!(
                version = VERSION,
                rates = ?sweep.rates(),
                parallel = sweep.simulator().is_parallel(),
                "Starting ENAQT simulation"
            );

            let started = Instant::now();
            let result = sweep.run()?;
            info!(
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Simulation finished"
            );

            match format {
                OutputFormat::Json => {
                    let report = RunReport {
                        version: VERSION,
                        params: sweep.simulator().params(),
                        seed: sweep.seed(),
                        policy: sweep.policy(),
                        optimal_rate: result.optimal_rate(),
                        summaries: result.summaries(),
                        trajectories: &result,
                    };
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
                OutputFormat::Table => print_summary(&result),
            }
        }

        Commands::Config => {
            // Show effective configuration
            println!("{}", serde_yaml::to_string(&config)?);
        }

        Commands::Validate => {
            // Validate configuration
            match config.validate() {
                Ok(()) => {
                    println!("Configuration is valid");
                }
                Err(e) => {
                    eprintln!("Configuration error: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

/// Initialize logging with tracing.
fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Logs go to stderr so stdout stays parseable.
    let registry = tracing_subscriber::registry().with(filter);
    if format == "json" {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

fn print_summary(result: &EnsembleResult) {
    println!(
        "{:>10}  {:>10}  {:>10}  {:>6}  {:>10}  regime",
        "rate", "final", "peak", "step", "mean"
    );
    for s in result.summaries() {
        println!(
            "{:>10.3}  {:>10.5}  {:>10.5}  {:>6}  {:>10.5}  {}",
            s.rate, s.final_efficiency, s.peak_efficiency, s.peak_step, s.mean_efficiency, s.regime
        );
    }
    match result.optimal_rate() {
        Some(best) if result.has_interior_optimum() => {
            println!("\nOptimal dephasing rate {} lies inside the sweep (ENAQT)", best);
        }
        Some(best) => {
            println!("\nOptimal dephasing rate {} is at the edge of the sweep", best);
        }
        None => {}
    }
}
