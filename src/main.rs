mod chart;
mod dashboard;
mod error;
mod ingest;
mod series;
mod table;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::io::{self, Write};
use std::path::PathBuf;

use crate::chart::{build_options, ChartKind};
use crate::dashboard::DashboardState;
use crate::series::{derive, SeriesRequest, ValueSelector, COUNT_SENTINEL};
use crate::table::Table;

#[derive(Parser, Debug)]
#[command(name = "dashgrid")]
#[command(about = "Derive chart series and dashboard options from CSV data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the input's columns with their inferred kind
    Columns {
        /// CSV file to read (stdin when omitted)
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Build the renderer options for a single chart
    Chart {
        /// Category column whose values become labels
        #[arg(long)]
        category: String,
        /// Value column, or "<count>" to tally rows per category
        #[arg(long, default_value = COUNT_SENTINEL)]
        value: String,
        /// Chart kind tag (e.g. bar, stacked-bar, pie, gauge)
        #[arg(long, default_value = "bar")]
        kind: ChartKind,
        /// CSV file to read (stdin when omitted)
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Render every chart of a saved dashboard document
    Dashboard {
        /// Dashboard JSON document to load
        #[arg(long)]
        state: PathBuf,
        /// CSV file to read (stdin when omitted)
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Columns { input } => {
            let table = read_input(&input)?;
            write_json(&columns_document(&table))?;
        }
        Command::Chart {
            category,
            value,
            kind,
            input,
        } => {
            let table = read_input(&input)?;
            let request = SeriesRequest {
                category,
                value: ValueSelector::parse(&value),
            };
            let series = derive(&table, &request)?;
            write_json(&build_options(kind, &series))?;
        }
        Command::Dashboard { state, input } => {
            let state = DashboardState::load(&state)?;
            let table = read_input(&input)?;
            let panels = state.render(&table)?;
            let document = serde_json::to_value(&panels).context("Failed to serialize panels")?;
            write_json(&document)?;
        }
    }

    Ok(())
}

// Read CSV from the given file, or from stdin when no path was given
fn read_input(input: &Option<PathBuf>) -> Result<Table> {
    match input {
        Some(path) => ingest::read_table_from_path(path)
            .with_context(|| format!("Failed to read CSV from '{}'", path.display())),
        None => ingest::read_table_from_stdin().context("Failed to read CSV from stdin"),
    }
}

fn columns_document(table: &Table) -> Value {
    let columns: Vec<Value> = table
        .columns()
        .iter()
        .map(|column| {
            let kind = if column.is_numeric() { "numeric" } else { "text" };
            json!({ "name": column.name(), "kind": kind })
        })
        .collect();
    json!({ "rows": table.row_count(), "columns": columns })
}

// Write JSON to stdout
fn write_json(value: &Value) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, value).context("Failed to write JSON to stdout")?;
    handle
        .write_all(b"\n")
        .context("Failed to write JSON to stdout")?;
    handle.flush().context("Failed to flush stdout")?;

    Ok(())
}
