//! Performance history import and program export.
//!
//! History can be read from JSON (an array of `UserPerformance`) or CSV
//! with a `week,reps_on_last_set,sets_completed,weight` header. Programs
//! are exported as a JSON envelope or as flat CSV rows.

use crate::{Error, ProgressionConfig, Result, UserPerformance, WeeklyLog};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// A generated program with the inputs that produced it
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProgramExport {
    pub generated_at: DateTime<Utc>,
    pub config: ProgressionConfig,
    pub weeks: Vec<WeeklyLog>,
}

impl ProgramExport {
    pub fn new(config: ProgressionConfig, weeks: Vec<WeeklyLog>) -> Self {
        Self {
            generated_at: Utc::now(),
            config,
            weeks,
        }
    }
}

/// A row in the CSV output
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    week: u32,
    goal: &'a str,
    weight: f64,
    action: &'a str,
    training_max: f64,
    is_deload: bool,
}

impl<'a> From<&'a WeeklyLog> for CsvRow<'a> {
    fn from(log: &'a WeeklyLog) -> Self {
        CsvRow {
            week: log.week,
            goal: &log.goal,
            weight: log.weight,
            action: &log.action,
            training_max: log.training_max,
            is_deload: log.is_deload,
        }
    }
}

/// Load performance history, choosing the parser by file extension
///
/// `.csv` files are read as CSV, anything else as JSON.
pub fn load_history(path: &Path) -> Result<Vec<UserPerformance>> {
    let file = std::fs::File::open(path)?;
    let is_csv = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    let history = if is_csv {
        read_history_csv(file)?
    } else {
        read_history_json(file)?
    };

    tracing::info!("Loaded {} performance entries from {:?}", history.len(), path);
    Ok(history)
}

pub fn read_history_json<R: Read>(reader: R) -> Result<Vec<UserPerformance>> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn read_history_csv<R: Read>(reader: R) -> Result<Vec<UserPerformance>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut history = Vec::new();

    for (row, record) in csv_reader.deserialize::<UserPerformance>().enumerate() {
        match record {
            Ok(perf) => history.push(perf),
            Err(e) => {
                // row + 2: one for the header, one for 1-based numbering
                return Err(Error::Data(format!(
                    "invalid history row {}: {}",
                    row + 2,
                    e
                )));
            }
        }
    }

    Ok(history)
}

/// Write program weeks as CSV with a header row
pub fn write_program_csv<W: Write>(weeks: &[WeeklyLog], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for log in weeks {
        csv_writer.serialize(CsvRow::from(log))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the export envelope as pretty JSON
pub fn write_program_json<W: Write>(export: &ProgramExport, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, export)?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// Atomically write an exported program to `path`
///
/// Content is produced by `write` into a temp file in the same directory,
/// synced, then renamed over the target.
pub fn save_atomic<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut std::io::BufWriter<&std::fs::File>) -> Result<()>,
{
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let temp = NamedTempFile::new_in(parent)?;
    {
        let mut writer = std::io::BufWriter::new(temp.as_file());
        write(&mut writer)?;
        writer.flush()?;
    }
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| Error::Io(e.error))?;

    tracing::info!("Wrote program to {:?}", path);
    Ok(())
}
