use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use sales_insights::analytics::{self, AnalyticsError};
use sales_insights::config::AppConfig;
use sales_insights::loader::load_csv;
use sales_insights::models::Dataset;
use sales_insights::utils::{self, fmt_currency};

#[derive(Parser)]
#[command(name = "sales-insights", about = "Walmart weekly sales insights", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to the sales CSV (overrides config)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Dataset-wide summary: average sales, top store, fuel-price correlation
    Summary {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Summary for one store (see `stores` for the valid ids)
    Store {
        /// Store id
        id: u32,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List all store ids present in the dataset
    Stores,

    /// Rank stores by average weekly sales
    Top {
        /// How many stores to show
        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,
    },

    /// Show the first rows of the dataset
    Preview {
        /// Row count (default from config)
        #[arg(short, long)]
        rows: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "sales_insights=info,warn",
        1 => "sales_insights=debug,info",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .compact()
        .with_target(false)
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = AppConfig::load()?;
    let csv_path = cli.data.unwrap_or_else(|| config.data.csv_path.clone());

    let dataset = {
        let _t = utils::Timer::start("CSV load");
        load_csv(&csv_path)?
    };

    match cli.command {
        Command::Summary { json } => cmd_summary(&dataset, &config, json)?,
        Command::Store { id, json } => cmd_store(&dataset, &config, id, json)?,
        Command::Stores => cmd_stores(&dataset),
        Command::Top { count } => cmd_top(&dataset, &config, count)?,
        Command::Preview { rows } => cmd_preview(&dataset, &config, rows),
    }

    Ok(())
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn cmd_summary(dataset: &Dataset, config: &AppConfig, json: bool) -> Result<()> {
    let cur = &config.display.currency;

    if json {
        let summary = analytics::global_summary(dataset)?;
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("─────────────────────────────────────────");
    println!("  Walmart Sales Insights — Overview");
    println!("─────────────────────────────────────────");
    println!("  Records       : {}", dataset.len());

    match analytics::global_summary(dataset) {
        Ok(summary) => {
            println!("  Avg weekly    : {}", fmt_currency(cur, summary.avg_sales));
            println!("  Top store     : #{}", summary.top_store_id);
            println!(
                "  Top store avg : {}",
                fmt_currency(cur, summary.top_store_avg_sales)
            );
            println!(
                "  Sales ~ fuel  : {:+.4} ({})",
                summary.fuel_sales_correlation, summary.correlation_label
            );
        }
        // Zero variance in one of the inputs: show the remaining metrics
        // with a placeholder instead of dropping the whole view.
        Err(AnalyticsError::DegenerateCorrelation) => {
            let avg = analytics::avg_weekly_sales(dataset)?;
            let top = analytics::top_stores(dataset, 1)?;
            println!("  Avg weekly    : {}", fmt_currency(cur, avg));
            if let Some(best) = top.first() {
                println!("  Top store     : #{}", best.store_id);
                println!("  Top store avg : {}", fmt_currency(cur, best.avg_sales));
            }
            println!("  Sales ~ fuel  : — (no relationship)");
        }
        Err(e) => return Err(e.into()),
    }

    let holidays = analytics::holiday_summary(dataset)?;
    let side = |avg: Option<f64>, weeks: usize| match avg {
        Some(v) => format!("{} over {} weeks", fmt_currency(cur, v), weeks),
        None => "—".to_string(),
    };
    println!("─────────────────────────────────────────");
    println!(
        "  Holiday avg   : {}",
        side(holidays.holiday_avg_sales, holidays.holiday_weeks)
    );
    println!(
        "  Regular avg   : {}",
        side(holidays.non_holiday_avg_sales, holidays.non_holiday_weeks)
    );
    println!("─────────────────────────────────────────");

    Ok(())
}

fn cmd_store(dataset: &Dataset, config: &AppConfig, id: u32, json: bool) -> Result<()> {
    let summary = analytics::store_summary(dataset, id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let cur = &config.display.currency;
    println!("─────────────────────────────────────────");
    println!("  Store #{}", summary.store_id);
    println!("─────────────────────────────────────────");
    println!("  Weeks      : {}", summary.time_series.len());
    println!("  Avg weekly : {}", fmt_currency(cur, summary.avg_sales));
    println!("  Best week  : {}", fmt_currency(cur, summary.max_sales));
    println!("  Worst week : {}", fmt_currency(cur, summary.min_sales));
    if let (Some((first, _)), Some((last, _))) =
        (summary.time_series.first(), summary.time_series.last())
    {
        println!("  From       : {}", first);
        println!("  To         : {}", last);
    }
    println!("─────────────────────────────────────────");
    println!("  Recent weeks:");
    for (date, sales) in summary.time_series.iter().rev().take(5).rev() {
        println!("    {}  {}", date, fmt_currency(cur, *sales));
    }

    Ok(())
}

fn cmd_stores(dataset: &Dataset) {
    let ids = analytics::store_ids(dataset);
    if ids.is_empty() {
        println!("No stores — dataset is empty.");
    } else {
        println!("{} stores:", ids.len());
        for id in &ids {
            println!("  {}", id);
        }
    }
}

fn cmd_top(dataset: &Dataset, config: &AppConfig, count: usize) -> Result<()> {
    let ranking = analytics::top_stores(dataset, count)?;
    let cur = &config.display.currency;

    println!("Top {} stores by average weekly sales:", ranking.len());
    for (rank, entry) in ranking.iter().enumerate() {
        println!(
            "  {:>2}. store {:<4} {}",
            rank + 1,
            entry.store_id,
            fmt_currency(cur, entry.avg_sales)
        );
    }

    Ok(())
}

fn cmd_preview(dataset: &Dataset, config: &AppConfig, rows: Option<usize>) {
    let n = rows.unwrap_or(config.display.preview_rows);

    println!(
        "{:>5}  {:>10}  {:>14}  {:>10}  holiday",
        "store", "date", "weekly_sales", "fuel_price"
    );
    for r in dataset.records().iter().take(n) {
        println!(
            "{:>5}  {:>10}  {:>14.2}  {:>10.3}  {}",
            r.store,
            r.date.to_string(),
            r.weekly_sales,
            r.fuel_price,
            if r.is_holiday { "yes" } else { "no" }
        );
    }
    if dataset.len() > n {
        println!("  … {} more rows", dataset.len() - n);
    }
}
