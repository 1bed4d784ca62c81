use anyhow::{Context, Result};
use brent_dashboard::report::{
    fit_summary, forecast_table, price_table, to_json, write_forecast_csv, write_history_csv,
};
use brent_dashboard::{Dashboard, DashboardConfig};
use brent_forecast::utils::{demo_model, generate_sample_history};
use brent_forecast::Lookback;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "brent-dashboard", version, about = "Explore Brent prices and model forecasts")]
struct Cli {
    /// Configuration file (TOML, JSON or YAML)
    #[arg(long, short)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show historical prices for a date range
    History {
        /// First date to include (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Last date to include (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,
        /// Only print the first N rows of the table
        #[arg(long)]
        preview: Option<usize>,
        /// Print the chart series as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Generate a forecast and split it into fit and projection
    Forecast {
        /// Days to forecast past the end of history
        #[arg(long)]
        horizon: Option<usize>,
        /// Days of model fit to keep before the forecast
        #[arg(long, conflicts_with = "all_history")]
        lookback_days: Option<usize>,
        /// Keep the whole model fit regardless of configuration
        #[arg(long)]
        all_history: bool,
        /// Print the chart series as JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Also write every forecast row to this CSV file
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Write a synthetic price history and a matching model artifact
    Sample {
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        #[arg(long, default_value_t = 730)]
        days: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

fn init_log() {
    let my_code_level = if cfg!(debug_assertions) {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter(None, log::LevelFilter::Warn)
        .filter(Some("brent_forecast"), my_code_level)
        .filter(Some("brent_dashboard"), my_code_level)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    init_log();
    let cli = Cli::parse();

    match cli.command {
        Command::Sample {
            out_dir,
            days,
            seed,
        } => run_sample(out_dir, days, seed),
        command => {
            let config = DashboardConfig::load(cli.config.as_deref())
                .context("Failed to load configuration")?;
            let dashboard = Dashboard::new(config)?;
            run_view(&dashboard, command)
        }
    }
}

fn run_view(dashboard: &Dashboard, command: Command) -> Result<()> {
    match command {
        Command::History {
            start,
            end,
            preview,
            json,
        } => {
            let selection: Vec<NaiveDate> = start.into_iter().chain(end).collect();
            let view = dashboard
                .history_view(&selection)
                .context("Historical prices unavailable")?;

            if let Some(notice) = view.notice() {
                eprintln!("{}", notice);
            }

            if json {
                println!("{}", to_json(&view.chart)?);
                return Ok(());
            }

            println!(
                "Brent prices from {} to {} ({} rows)",
                view.filtered.start,
                view.filtered.end,
                view.filtered.len()
            );
            let records = match preview {
                Some(n) => view.filtered.head(n),
                None => &view.filtered.records[..],
            };
            println!("{}", price_table(records));
        }
        Command::Forecast {
            horizon,
            lookback_days,
            all_history,
            json,
            export,
        } => {
            let lookback = if all_history {
                Some(Lookback::All)
            } else {
                lookback_days.map(Lookback::Days)
            };
            let view = dashboard
                .forecast_view(horizon, lookback)
                .context("Forecast unavailable")?;

            if let Some(path) = &export {
                let written = write_forecast_csv(path, &view.partition)
                    .with_context(|| format!("Failed to export to {}", path.display()))?;
                eprintln!("Wrote {} rows to {}", written, path.display());
            }

            if json {
                println!("{}", to_json(&view.chart)?);
                return Ok(());
            }

            println!(
                "{}: {} day forecast starting {}",
                view.model_name, view.horizon_days, view.partition.forecast_start
            );
            println!("{}", forecast_table(&view.partition.future));

            match dashboard.fit_metrics(&view) {
                Ok(metrics) => println!("{}", fit_summary(&metrics)),
                Err(e) => eprintln!("Fit metrics unavailable: {}", e),
            }
        }
        Command::Sample {
            out_dir,
            days,
            seed,
        } => run_sample(out_dir, days, seed)?,
    }
    Ok(())
}

fn run_sample(out_dir: PathBuf, days: usize, seed: u64) -> Result<()> {
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("Cannot create {}", out_dir.display()))?;

    let start = NaiveDate::from_ymd_opt(2020, 1, 1).context("invalid start date")?;
    let history = generate_sample_history(start, days, 65.0, 1.2, seed)?;

    let history_path = out_dir.join("petroleo_hist.csv");
    write_history_csv(&history_path, history.records())?;

    let model_path = out_dir.join("modelo_prophet.json");
    demo_model("brent-sample", &history).save(&model_path)?;

    println!(
        "Wrote {} prices to {} and a model to {}",
        history.len(),
        history_path.display(),
        model_path.display()
    );
    Ok(())
}
