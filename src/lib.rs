pub mod chart;
pub mod classify;
pub mod cli;
pub mod dashboard;
pub mod data;
pub mod dataset;
pub mod decode;
pub mod error;
pub mod ingest;
pub mod store;
pub mod table;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};

use crate::{
    cli::{Cli, Commands, StoreArgs},
    dataset::Caller,
    store::{DatasetStore, FileStore},
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("sheetboard", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Ingest(args) => handle_ingest(&args),
        Commands::List(args) => handle_list(&args),
        Commands::Dashboard(args) => handle_dashboard(&args),
        Commands::Chart(args) => handle_chart(&args),
        Commands::Preview(args) => handle_preview(&args),
        Commands::Delete(args) => handle_delete(&args),
    }
}

fn open_store(args: &StoreArgs) -> Result<FileStore> {
    FileStore::open(&args.store).with_context(|| format!("Opening store {:?}", args.store))
}

fn caller(args: &StoreArgs) -> Caller {
    Caller {
        id: args.user.clone(),
        role: args.role,
    }
}

fn handle_ingest(args: &cli::IngestArgs) -> Result<()> {
    let bytes = std::fs::read(&args.input)
        .with_context(|| format!("Reading spreadsheet {:?}", args.input))?;
    let filename = args
        .input
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    let mut store = open_store(&args.store)?;
    let receipt = ingest::ingest(&mut store, &args.store.user, filename, &bytes)
        .with_context(|| format!("Ingesting {:?}", args.input))?;
    println!("{}", serde_json::to_string_pretty(&receipt)?);
    Ok(())
}

fn handle_list(args: &cli::ListArgs) -> Result<()> {
    let store = open_store(&args.store)?;
    let datasets = store.list_by_owner(&args.store.user)?;
    let headers = ["id", "filename", "rows", "category", "quality", "created"]
        .map(String::from)
        .to_vec();
    let rows: Vec<Vec<String>> = datasets
        .iter()
        .map(|d| {
            vec![
                d.id.to_string(),
                d.filename.clone(),
                d.row_count().to_string(),
                d.category.clone(),
                d.quality.to_string(),
                d.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            ]
        })
        .collect();
    table::print_table(&headers, &rows);
    info!(
        "Listed {} dataset(s) for '{}'",
        datasets.len(),
        args.store.user
    );
    Ok(())
}

fn handle_dashboard(args: &cli::DashboardArgs) -> Result<()> {
    let store = open_store(&args.store)?;
    let datasets = store.list_by_owner(&args.store.user)?;
    let data = dashboard::aggregate(&datasets, chrono::Utc::now());
    println!("{}", serde_json::to_string_pretty(&data)?);
    Ok(())
}

fn handle_chart(args: &cli::ChartArgs) -> Result<()> {
    let store = open_store(&args.store)?;
    let dataset = store.get_by_id(args.id, &caller(&args.store))?;
    let series = chart::project(&dataset, &args.x_field, &args.y_field, args.chart_type)?;
    println!("{}", serde_json::to_string_pretty(&series)?);
    Ok(())
}

fn handle_preview(args: &cli::PreviewArgs) -> Result<()> {
    let store = open_store(&args.store)?;
    let dataset = store.get_by_id(args.id, &caller(&args.store))?;
    let rows: Vec<Vec<String>> = dataset
        .records
        .iter()
        .take(args.rows)
        .map(|record| record.iter().map(|cell| cell.as_display()).collect())
        .collect();
    table::print_table(&dataset.headers, &rows);
    info!(
        "Displayed {} of {} row(s) from '{}'",
        rows.len(),
        dataset.row_count(),
        dataset.filename
    );
    Ok(())
}

fn handle_delete(args: &cli::DeleteArgs) -> Result<()> {
    let mut store = open_store(&args.store)?;
    store.delete(args.id, &caller(&args.store))?;
    info!("Deleted dataset {}", args.id);
    Ok(())
}
