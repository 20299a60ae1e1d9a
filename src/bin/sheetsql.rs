//! sheetsql CLI
//!
//! Runs SQL-subset statements against a directory of CSV sheets.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use sheetsql::{render_cell, Config, CsvStore, HeaderMap, Sheets, SheetStore};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// sheetsql - query CSV sheets with a small SQL subset
#[derive(Parser)]
#[command(name = "sheetsql")]
#[command(about = "Query named sheets with SELECT/INSERT/DELETE", long_about = None)]
#[command(version)]
struct Cli {
    /// Data directory holding sheets and the registry
    #[arg(long, env = "SHEETSQL_DATA_DIR", default_value = "~/.sheetsql")]
    data_dir: PathBuf,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(long, short)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a sheet name for a CSV file
    Register {
        /// Sheet name used in statements
        name: String,

        /// CSV file path (relative paths resolve against the data directory)
        path: PathBuf,
    },

    /// List registered sheets
    Sheets,

    /// Run a SELECT statement
    Query {
        /// SQL statement
        sql: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },

    /// Append a row from a JSON object keyed by column name
    Insert {
        /// Sheet name
        table: String,

        /// JSON object, e.g. '{"Name": "Jane", "Age": 25}'
        json: String,
    },

    /// Run a DELETE statement
    Delete {
        /// SQL statement
        sql: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Table,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let data_dir = shellexpand::tilde(&cli.data_dir.to_string_lossy()).to_string();
    let data_dir = PathBuf::from(data_dir);

    match cli.command {
        Commands::Register { name, path } => cmd_register(&data_dir, name, path)?,
        Commands::Sheets => cmd_sheets(&data_dir)?,
        Commands::Query { sql, format } => cmd_query(&data_dir, &sql, format)?,
        Commands::Insert { table, json } => cmd_insert(&data_dir, &table, &json)?,
        Commands::Delete { sql } => cmd_delete(&data_dir, &sql)?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open(data_dir: &Path) -> anyhow::Result<Sheets<CsvStore>> {
    let store = CsvStore::open(data_dir)
        .with_context(|| format!("Failed to open data directory {}", data_dir.display()))?;
    Ok(Sheets::new(store))
}

fn cmd_register(data_dir: &Path, name: String, path: PathBuf) -> anyhow::Result<()> {
    let mut config = Config::load(data_dir)?;
    let message = format!("Registered '{}' -> {}", name, path.display());
    config.register(name, path);
    config
        .save(data_dir)
        .with_context(|| format!("Failed to save registry in {}", data_dir.display()))?;
    println!("{}", message);
    Ok(())
}

fn cmd_sheets(data_dir: &Path) -> anyhow::Result<()> {
    let config = Config::load(data_dir)?;
    if config.sheets.is_empty() {
        println!("No sheets registered in {}", data_dir.display());
    }
    for (name, path) in config.list() {
        println!("{}\t{}", name, path.display());
    }
    Ok(())
}

fn cmd_query(data_dir: &Path, sql: &str, format: Format) -> anyhow::Result<()> {
    let sheets = open(data_dir)?;
    let query = sheetsql::parse_select(sql)?;

    match format {
        Format::Json => {
            for object in sheets.select_maps(&query)? {
                println!("{}", serde_json::to_string(&object)?);
            }
        }
        Format::Table => {
            let header = HeaderMap::new(&sheets.store().fetch_rows(query.table())?.header);
            println!("{}", header.names().join("\t"));
            for row in sheets.select_rows(&query)? {
                let cells: Vec<String> = row.iter().map(|c| render_cell(c).into_owned()).collect();
                println!("{}", cells.join("\t"));
            }
        }
    }
    Ok(())
}

fn cmd_insert(data_dir: &Path, table: &str, json: &str) -> anyhow::Result<()> {
    let value: serde_json::Value = serde_json::from_str(json).context("Invalid JSON")?;
    let Some(object) = value.as_object() else {
        bail!("Expected a JSON object, got: {}", json);
    };

    let mut sheets = open(data_dir)?;
    sheets.insert_map(table, object)?;
    println!("Inserted 1 row into {}", table);
    Ok(())
}

fn cmd_delete(data_dir: &Path, sql: &str) -> anyhow::Result<()> {
    let mut sheets = open(data_dir)?;
    let deleted = sheets.delete_sql(sql)?;
    println!("Deleted {} row(s)", deleted);
    Ok(())
}
