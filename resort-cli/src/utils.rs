//! Utility functions for CLI operations.
//!
//! Configuration loading, database access, and output formatting shared by
//! the commands.

use crate::error::CliError;
use resort::config::OutputFormat;
use resort::database::{resolve_data_dir as default_data_dir, DATABASE_FILE_NAME};
use resort::operations::{ExecutionResult, OperationPlan, PlanExecutor};
use resort::{
    Config, ConfigBuilder, Database, DatabaseConfig, LogNotifier, MediaStore, Notifier,
    NullNotifier,
};
use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,
}

/// Resolve the data directory: `--data-dir`, then `RESORT_DATA_DIR`, then `~/.resort`.
pub fn resolve_data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match global.data_dir {
        Some(ref dir) => Ok(dir.clone()),
        None => default_data_dir().map_err(|e| CliError::Config(e.to_string())),
    }
}

/// Load hierarchical configuration.
///
/// Precedence, highest first: environment variables, `resort.local.yaml`,
/// `resort.yaml`, the user config in the data directory, built-in defaults.
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let data_dir = resolve_data_dir(global)?;
    ConfigBuilder::new()
        .with_data_dir(&data_dir)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Open database with configuration.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is disabled.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = resolve_data_dir(global)?.join(DATABASE_FILE_NAME);

    let autoinit_disabled = global.disable_autoinit || config.disable_autoinit == Some(true);
    if !db_path.exists() && autoinit_disabled {
        return Err(CliError::NoDataDirectory);
    }

    let timeout_seconds = global
        .busy_timeout
        .map_or_else(|| config.lock_wait_seconds(), u64::from);
    let db_config =
        DatabaseConfig::new(db_path).with_busy_timeout(Duration::from_secs(timeout_seconds));

    Database::open(db_config).map_err(CliError::from)
}

/// The notifier the configuration asks for.
pub fn notifier(config: &Config) -> Box<dyn Notifier> {
    if config.notifications_enabled() {
        Box::new(LogNotifier::new(
            config.resort_name(),
            config.admin_email().map(String::from),
        ))
    } else {
        Box::new(NullNotifier)
    }
}

/// Upload storage rooted at the configured directory, or `<data_dir>/uploads`.
pub fn media_store(global: &GlobalOptions, config: &Config) -> Result<MediaStore, CliError> {
    let root = match config.uploads.as_ref().and_then(|u| u.directory.as_ref()) {
        Some(dir) => PathBuf::from(dir),
        None => resolve_data_dir(global)?.join("uploads"),
    };
    Ok(MediaStore::new(root, config.max_upload_bytes()))
}

/// Output format: the command flag if given, else the configured one.
pub fn output_format(flag: Option<OutputFormat>, config: &Config) -> OutputFormat {
    flag.or(config.output_format).unwrap_or_default()
}

/// clap value parser for output formats.
pub fn parse_output_format(s: &str) -> Result<OutputFormat, String> {
    s.parse().map_err(|e: resort::Error| e.to_string())
}

/// Plan and execute inside one IMMEDIATE transaction, or only plan for a dry run.
///
/// Returns `None` for a dry run after printing the plan.
pub fn run_plan<F>(
    db: &mut Database,
    global: &GlobalOptions,
    dry_run: bool,
    build: F,
) -> Result<Option<ExecutionResult>, CliError>
where
    F: FnOnce(&resort::database::Connection) -> resort::Result<OperationPlan>,
{
    if dry_run {
        let plan = build(db.connection())?;
        print_plan(&plan, global);
        return Ok(None);
    }

    let tx = db.begin_transaction()?;
    let plan = build(&tx)?;
    let result = PlanExecutor::new(&tx).at(SystemTime::now()).execute(&plan)?;
    tx.commit()
        .map_err(resort::Error::from)
        .map_err(CliError::from)?;

    if !global.quiet {
        for warning in &result.warnings {
            eprintln!("Warning: {warning}");
        }
    }
    Ok(Some(result))
}

/// Print a plan for `--dry-run`.
pub fn print_plan(plan: &OperationPlan, global: &GlobalOptions) {
    if global.quiet {
        return;
    }
    eprintln!("Dry run - {}", plan.description);
    if plan.is_empty() {
        eprintln!("  (nothing to do)");
    }
    for (i, action) in plan.actions.iter().enumerate() {
        eprintln!("  {}. {}", i + 1, action.description());
    }
    for warning in &plan.warnings {
        eprintln!("  Warning: {warning}");
    }
}

/// Format a timestamp for display.
pub fn format_timestamp(ts: SystemTime) -> String {
    use chrono::{DateTime, Utc};
    let dt: DateTime<Utc> = ts.into();
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Tabular output: one header row, then records of the same width.
pub struct Records {
    /// Column names, lowercase.
    pub headers: Vec<&'static str>,
    /// Rows of cell text.
    pub rows: Vec<Vec<String>>,
}

impl Records {
    /// Write the records to `out` in `format`.
    pub fn write(&self, format: OutputFormat, out: &mut dyn Write) -> Result<(), CliError> {
        match format {
            OutputFormat::Table => self.write_table(out),
            OutputFormat::Json => self.write_json(out),
            OutputFormat::Csv => self.write_delimited(out, b','),
            OutputFormat::Tsv => self.write_delimited(out, b'\t'),
        }
    }

    fn write_table(&self, out: &mut dyn Write) -> Result<(), CliError> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.len()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let header: Vec<String> = self.headers.iter().map(|h| h.to_uppercase()).collect();
        write_padded(out, &header, &widths)?;
        for row in &self.rows {
            write_padded(out, row, &widths)?;
        }
        Ok(())
    }

    fn write_json(&self, out: &mut dyn Write) -> Result<(), CliError> {
        let objects: Vec<serde_json::Value> = self
            .rows
            .iter()
            .map(|row| {
                let map: serde_json::Map<String, serde_json::Value> = self
                    .headers
                    .iter()
                    .zip(row)
                    .map(|(h, v)| ((*h).to_string(), serde_json::Value::String(v.clone())))
                    .collect();
                serde_json::Value::Object(map)
            })
            .collect();

        serde_json::to_writer_pretty(&mut *out, &objects)
            .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
        writeln!(out)?;
        Ok(())
    }

    fn write_delimited(&self, out: &mut dyn Write, delimiter: u8) -> Result<(), CliError> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(out);
        writer.write_record(&self.headers).map_err(csv_error)?;
        for row in &self.rows {
            writer.write_record(row).map_err(csv_error)?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn write_padded(out: &mut dyn Write, cells: &[String], widths: &[usize]) -> Result<(), CliError> {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "{}", line.trim_end())?;
    Ok(())
}

/// Convert `csv::Error` to `CliError`.
fn csv_error(e: csv::Error) -> CliError {
    CliError::Io(std::io::Error::other(e))
}
