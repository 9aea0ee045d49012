use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{chart::ChartType, dataset::Role};

#[derive(Debug, Parser)]
#[command(author, version, about = "Ingest spreadsheets and aggregate dashboard analytics", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse a spreadsheet and persist it as a dataset
    Ingest(IngestArgs),
    /// List the caller's datasets, newest first
    List(ListArgs),
    /// Print aggregated dashboard statistics for the caller's datasets
    Dashboard(DashboardArgs),
    /// Project one dataset into a chart-ready series
    Chart(ChartArgs),
    /// Preview the first rows of one dataset in a formatted table
    Preview(PreviewArgs),
    /// Delete one dataset (owner or admin only)
    Delete(DeleteArgs),
}

#[derive(Debug, Args)]
pub struct StoreArgs {
    /// Dataset store file (created on first ingest)
    #[arg(short = 's', long = "store", default_value = "sheetboard.store")]
    pub store: PathBuf,
    /// Caller identity used for ownership and access checks
    #[arg(short = 'u', long = "user")]
    pub user: String,
    /// Caller role
    #[arg(long, value_enum, default_value_t = Role::User)]
    pub role: Role,
}

#[derive(Debug, Args)]
pub struct IngestArgs {
    /// Spreadsheet to ingest (.xlsx or .xls)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Debug, Args)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Debug, Args)]
pub struct ChartArgs {
    /// Dataset id as returned by `ingest`
    #[arg(long)]
    pub id: uuid::Uuid,
    /// Header name plotted on the x axis
    #[arg(short = 'x', long = "x-field")]
    pub x_field: String,
    /// Header name plotted on the y axis
    #[arg(short = 'y', long = "y-field")]
    pub y_field: String,
    /// Chart shape to project
    #[arg(short = 't', long = "chart-type", value_enum, default_value_t = ChartType::Bar)]
    pub chart_type: ChartType,
    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Dataset id as returned by `ingest`
    #[arg(long)]
    pub id: uuid::Uuid,
    /// Number of rows to display
    #[arg(long, default_value_t = 10)]
    pub rows: usize,
    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Dataset id as returned by `ingest`
    #[arg(long)]
    pub id: uuid::Uuid,
    #[command(flatten)]
    pub store: StoreArgs,
}
