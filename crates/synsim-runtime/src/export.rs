//! Result export: write recorded rows as CSV and read them back.
//!
//! The table has one row per simulation step and a fixed header:
//!
//! ```text
//! time,pre_activity,post_activity,synaptic_weight[,region]
//! ```
//!
//! Floats are written in their shortest round-trip form, so reading a file
//! back yields bit-identical values. Records end with `\n`.

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use synsim_core::error::{OutputError, Result, SynsimError};
use synsim_core::types::ResultRow;
use tracing::{debug, info};

/// Directory results are written to unless an explicit path is given.
pub const DEFAULT_OUTPUT_DIR: &str = "data";

/// File stem for result tables.
pub const OUTPUT_STEM: &str = "synapse_data";

const PLAIN_HEADER: [&str; 4] = ["time", "pre_activity", "post_activity", "synaptic_weight"];
const REGION_HEADER: [&str; 5] = ["time", "pre_activity", "post_activity", "synaptic_weight", "region"];

/// Column layout of a result table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsvLayout {
    /// `time,pre_activity,post_activity,synaptic_weight`
    Plain,
    /// Plain columns plus a trailing `region` column.
    WithRegion,
}

impl CsvLayout {
    /// `WithRegion` for labelled runs, `Plain` otherwise.
    pub fn for_region(region: Option<&str>) -> Self {
        match region {
            Some(_) => CsvLayout::WithRegion,
            None => CsvLayout::Plain,
        }
    }

    pub fn header(&self) -> &'static [&'static str] {
        match self {
            CsvLayout::Plain => &PLAIN_HEADER,
            CsvLayout::WithRegion => &REGION_HEADER,
        }
    }
}

#[derive(Serialize)]
struct PlainRecord {
    time: f64,
    pre_activity: u8,
    post_activity: u8,
    synaptic_weight: f64,
}

#[derive(Serialize)]
struct RegionRecord<'a> {
    time: f64,
    pre_activity: u8,
    post_activity: u8,
    synaptic_weight: f64,
    region: &'a str,
}

/// Write rows as CSV to any writer. The header is written even with no rows.
pub fn write_csv<W: Write>(writer: W, rows: &[ResultRow], layout: CsvLayout) -> Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv.write_record(layout.header())?;
    for row in rows {
        match layout {
            CsvLayout::Plain => csv.serialize(PlainRecord {
                time: row.time,
                pre_activity: row.pre_activity,
                post_activity: row.post_activity,
                synaptic_weight: row.synaptic_weight,
            })?,
            CsvLayout::WithRegion => csv.serialize(RegionRecord {
                time: row.time,
                pre_activity: row.pre_activity,
                post_activity: row.post_activity,
                synaptic_weight: row.synaptic_weight,
                region: &row.region,
            })?,
        }
    }
    csv.flush()?;
    Ok(())
}

/// Render rows as a CSV string.
pub fn to_csv_string(rows: &[ResultRow], layout: CsvLayout) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, rows, layout)?;
    String::from_utf8(buffer).map_err(|e| SynsimError::Serialization(e.to_string()))
}

/// Save rows to `path`, creating missing parent directories.
///
/// Any failure to create or write the file is reported as
/// [`OutputError::NotWritable`] naming the path.
pub fn save_results(path: &Path, rows: &[ResultRow], layout: CsvLayout) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| SynsimError::not_writable(path, e))?;
    }

    let file = File::create(path).map_err(|e| SynsimError::not_writable(path, e))?;
    write_csv(BufWriter::new(file), rows, layout).map_err(|e| SynsimError::not_writable(path, e))?;

    info!(path = %path.display(), rows = rows.len(), "results saved");
    Ok(())
}

/// Parse a result table from any reader. Accepts both layouts.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<ResultRow>> {
    let mut csv = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
    let mut rows = Vec::new();
    for record in csv.deserialize() {
        let row: ResultRow = record?;
        rows.push(row);
    }
    Ok(rows)
}

/// Load a result table previously written by [`save_results`].
pub fn load_results(path: &Path) -> Result<Vec<ResultRow>> {
    let unreadable = |reason: String| {
        SynsimError::Output(OutputError::Unreadable {
            path: path.to_path_buf(),
            reason,
        })
    };

    let file = File::open(path).map_err(|e| unreadable(e.to_string()))?;
    let rows = read_csv(file).map_err(|e| unreadable(e.to_string()))?;
    debug!(path = %path.display(), rows = rows.len(), "results loaded");
    Ok(rows)
}

/// Default output location: `data/synapse_data.csv`, or
/// `data/synapse_data_<region>.csv` for labelled runs.
pub fn default_output_path(region: Option<&str>) -> PathBuf {
    let file_name = match region {
        Some(region) => format!("{}_{}.csv", OUTPUT_STEM, file_safe(region)),
        None => format!("{}.csv", OUTPUT_STEM),
    };
    Path::new(DEFAULT_OUTPUT_DIR).join(file_name)
}

/// Replace characters that would escape the output directory or break the
/// file name.
fn file_safe(label: &str) -> String {
    label
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_whitespace() || c.is_control() => '_',
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use synsim_core::types::ActivitySample;

    fn rows(region: &str) -> Vec<ResultRow> {
        vec![
            ResultRow::new(0.0, ActivitySample::coincident(), 0.5045, region),
            ResultRow::new(0.01, ActivitySample::new(true, false), 0.504_449_55, region),
            ResultRow::new(0.02, ActivitySample::silent(), 0.1 + 0.2, region),
        ]
    }

    #[test]
    fn plain_header_is_exact() {
        let csv = to_csv_string(&[], CsvLayout::Plain).unwrap();
        assert_eq!(csv, "time,pre_activity,post_activity,synaptic_weight\n");
    }

    #[test]
    fn region_header_appends_region() {
        let csv = to_csv_string(&[], CsvLayout::WithRegion).unwrap();
        assert_eq!(csv, "time,pre_activity,post_activity,synaptic_weight,region\n");
    }

    #[test]
    fn one_line_per_row_with_binary_activity() {
        let csv = to_csv_string(&rows(""), CsvLayout::Plain).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("0.0,1,1,0.5045"), "got {}", lines[1]);
        assert!(lines[2].contains(",1,0,"));
        assert!(!csv.contains('\r'));
    }

    #[test]
    fn region_column_is_written() {
        let csv = to_csv_string(&rows("ca1"), CsvLayout::WithRegion).unwrap();
        assert!(csv.lines().skip(1).all(|l| l.ends_with(",ca1")));
    }

    #[test]
    fn round_trip_preserves_values() {
        let original = rows("");
        let csv = to_csv_string(&original, CsvLayout::Plain).unwrap();
        let parsed = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(parsed.len(), original.len());
        for (a, b) in original.iter().zip(&parsed) {
            assert_eq!(a.time.to_bits(), b.time.to_bits());
            assert_eq!(a.sample(), b.sample());
            assert_eq!(a.synaptic_weight.to_bits(), b.synaptic_weight.to_bits());
            assert_eq!(b.region, "");
        }
    }

    #[test]
    fn round_trip_with_region() {
        let original = rows("dentate gyrus");
        let csv = to_csv_string(&original, CsvLayout::WithRegion).unwrap();
        assert_eq!(read_csv(csv.as_bytes()).unwrap(), original);
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.csv");
        save_results(&path, &rows(""), CsvLayout::Plain).unwrap();
        assert_eq!(load_results(&path).unwrap().len(), 3);
    }

    #[test]
    fn unwritable_path_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as a file
        let err = save_results(dir.path(), &rows(""), CsvLayout::Plain).unwrap_err();
        match err {
            SynsimError::Output(OutputError::NotWritable { path, .. }) => assert_eq!(path, dir.path()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_results(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, SynsimError::Output(OutputError::Unreadable { .. })));
    }

    #[test]
    fn default_paths() {
        assert_eq!(default_output_path(None), Path::new("data").join("synapse_data.csv"));
        assert_eq!(
            default_output_path(Some("cortex")),
            Path::new("data").join("synapse_data_cortex.csv")
        );
        assert_eq!(
            default_output_path(Some("../etc/x y")),
            Path::new("data").join("synapse_data_.._etc_x_y.csv")
        );
    }

    #[test]
    fn layout_follows_region() {
        assert_eq!(CsvLayout::for_region(None), CsvLayout::Plain);
        assert_eq!(CsvLayout::for_region(Some("amygdala")), CsvLayout::WithRegion);
    }
}
