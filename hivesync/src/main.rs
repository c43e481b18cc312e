//! hivesync - CLI for the beekeeping records sync client
//!
//! Loads the five record collections from the configured spreadsheet-backed
//! endpoint, reports per-collection results, and offers small record
//! mutations for scripting.
//!
//! Uses XDG Base Directory specification for file locations:
//! - Logs: $XDG_STATE_HOME/hivesync/hivesync.log (~/.local/state/hivesync/hivesync.log)
//! - Config: $XDG_CONFIG_HOME/hivesync/config.toml (~/.config/hivesync/config.toml)

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use hivesync_core::{
    Config, DashboardSummary, HiveStatus, MetricsTrend, NewHive, NewTask, Store, SyncClient,
    TaskPriority,
};

#[derive(Parser)]
#[command(name = "hivesync")]
#[command(about = "Sync and inspect beekeeping records")]
#[command(version)]
struct Args {
    /// Path to config file (defaults to ~/.config/hivesync/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check whether the records endpoint is reachable
    Health,

    /// Load all collections and report per-collection results
    Sync {
        /// Apiaries-first load, seeding a default apiary on empty sheets
        #[arg(long)]
        bootstrap: bool,
    },

    /// Load all collections and print the dashboard summary
    Dashboard,

    /// Add a task
    AddTask {
        /// Task title
        #[arg(long)]
        title: String,

        /// Priority: low, medium, high, critical
        #[arg(long, default_value = "medium")]
        priority: String,

        /// Hive the task applies to (optional)
        #[arg(long)]
        hive: Option<i64>,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,

        /// Longer description
        #[arg(long)]
        description: Option<String>,
    },

    /// Add a hive to an apiary
    AddHive {
        /// Apiary the hive belongs to
        #[arg(long)]
        apiary: i64,

        /// Hive name
        #[arg(long)]
        name: String,

        /// Hive type (e.g., Langstroth, Top Bar)
        #[arg(long = "type")]
        hive_type: Option<String>,

        /// Install date (YYYY-MM-DD)
        #[arg(long)]
        install_date: Option<String>,
    },

    /// Delete an apiary (refused while hives still reference it)
    DeleteApiary {
        /// Apiary ID
        #[arg(long)]
        id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Ensure XDG environment variables are set before using core library
    Config::ensure_xdg_env();

    let config = match &args.config {
        Some(path) => Config::load_from(path).context("failed to load configuration")?,
        None => Config::load().context("failed to load configuration")?,
    };

    let _log_guard =
        hivesync_core::logging::init(&config.logging).context("failed to initialize logging")?;

    tracing::info!("hivesync starting");

    let store = Arc::new(Store::new());
    let client =
        SyncClient::from_config(&config, store.clone()).context("failed to create sync client")?;

    match args.command {
        Command::Health => {
            if client.health().await? {
                println!("Endpoint is healthy");
            } else {
                println!("Endpoint is unreachable or unhealthy");
                std::process::exit(1);
            }
        }

        Command::Sync { bootstrap } => {
            let report = if bootstrap {
                client.bootstrap().await.context("bootstrap load failed")?
            } else {
                client.load_all().await
            };

            for (collection, count) in &report.loaded {
                println!("  {}: {} record(s)", collection, count);
            }
            for (collection, error) in &report.errors {
                println!("  {}: FAILED - {}", collection, error);
            }
            if report.is_complete() {
                println!("Synced {} record(s)", report.total_records());
            } else {
                println!(
                    "Partial sync: {} record(s), {} collection(s) failed",
                    report.total_records(),
                    report.errors.len()
                );
                std::process::exit(1);
            }
        }

        Command::Dashboard => {
            let report = client.load_all().await;
            if !report.is_complete() {
                for (collection, error) in &report.errors {
                    eprintln!("warning: {} failed to load: {}", collection, error);
                }
            }

            let summary = DashboardSummary::compute(client.store());
            println!("Hives:         {}", summary.total_hives);
            println!("Active hives:  {}", summary.active_hives);
            println!("Pending tasks: {}", summary.pending_tasks);

            if !summary.upcoming_tasks.is_empty() {
                println!("\nUpcoming tasks:");
                for task in &summary.upcoming_tasks {
                    let due = task
                        .due_date
                        .map(|d| format!(" (due {})", d))
                        .unwrap_or_default();
                    println!("  [{}] {}{}", task.priority, task.title, due);
                }
            }

            if !summary.recent_inspections.is_empty() {
                println!("\nRecent inspections:");
                for inspection in &summary.recent_inspections {
                    println!(
                        "  Hive {} by {} on {}",
                        inspection.hive_id,
                        inspection.inspector.as_deref().unwrap_or("unknown"),
                        inspection
                            .date
                            .map(|d| d.to_string())
                            .unwrap_or_else(|| "N/A".to_string())
                    );
                }
            }

            let trend = MetricsTrend::compute(&client.store().metrics());
            if !trend.is_empty() {
                println!("\nMetrics trend (last {} readings):", trend.labels.len());
                for (i, label) in trend.labels.iter().enumerate() {
                    println!(
                        "  {}: {:.1}C  {:.1}kg  {:.0}%",
                        label, trend.temperature[i], trend.weight[i], trend.humidity[i]
                    );
                }
            }
        }

        Command::AddTask {
            title,
            priority,
            hive,
            due,
            description,
        } => {
            let priority: TaskPriority = priority
                .parse()
                .map_err(|e: String| anyhow::anyhow!("invalid priority: {}", e))?;
            let due_date = due.as_deref().map(parse_date).transpose()?;

            // Mutations validate against the cache, so load first
            client.load_all().await;
            client
                .add_task(NewTask {
                    hive_id: hive,
                    title: title.clone(),
                    description,
                    due_date,
                    priority,
                })
                .await
                .context("failed to add task")?;
            println!("Added task '{}'", title);
        }

        Command::AddHive {
            apiary,
            name,
            hive_type,
            install_date,
        } => {
            let install_date = install_date.as_deref().map(parse_date).transpose()?;

            client.load_all().await;
            client
                .add_hive(NewHive {
                    apiary_id: apiary,
                    name: name.clone(),
                    hive_type,
                    install_date,
                    status: HiveStatus::Active,
                    qr_code: None,
                    notes: None,
                })
                .await
                .context("failed to add hive")?;
            println!("Added hive '{}' to apiary {}", name, apiary);
        }

        Command::DeleteApiary { id } => {
            client.load_all().await;
            client
                .delete_apiary(id)
                .await
                .context("failed to delete apiary")?;
            println!("Deleted apiary {}", id);
        }
    }

    Ok(())
}

/// Parse a YYYY-MM-DD argument.
fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{}', expected YYYY-MM-DD", s))
}
