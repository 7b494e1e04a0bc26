//! Flat CSV import/export of annotations.
//!
//! Export writes one row per annotation in frame order. Import validates the
//! header once and then tolerates bad rows individually, counting what it skips.

use serde::Serialize;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::constants::CSV_COLUMNS;
use crate::error::{AnnotatorError, Result};
use crate::state::{Annotation, AnnotationRecord, Category};
use crate::utils::format_seconds;

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "Frame Number")]
    frame_number: u64,
    #[serde(rename = "Time Instant (s)")]
    time_instant: String,
    #[serde(rename = "Annotation")]
    annotation: &'a str,
    #[serde(rename = "Comment")]
    comment: &'a str,
    #[serde(rename = "Category")]
    category: &'static str,
}

/// Raw cells of an import row; a short record leaves trailing cells as `None`.
#[derive(Debug, Default)]
struct ImportRow<'a> {
    frame_number: Option<&'a str>,
    time_instant: Option<&'a str>,
    annotation: Option<&'a str>,
    comment: Option<&'a str>,
    category: Option<&'a str>,
}

/// Header positions of the required columns, resolved once per file.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    frame_number: usize,
    time_instant: usize,
    annotation: usize,
    comment: usize,
    category: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> std::result::Result<Self, Vec<String>> {
        let position = |column: &str| headers.iter().position(|header| header == column);
        match CSV_COLUMNS.map(position) {
            [Some(frame_number), Some(time_instant), Some(annotation), Some(comment), Some(category)] => {
                Ok(Self {
                    frame_number,
                    time_instant,
                    annotation,
                    comment,
                    category,
                })
            }
            _ => Err(missing_columns(headers)),
        }
    }

    fn row<'a>(&self, record: &'a csv::StringRecord) -> ImportRow<'a> {
        ImportRow {
            frame_number: record.get(self.frame_number),
            time_instant: record.get(self.time_instant),
            annotation: record.get(self.annotation),
            comment: record.get(self.comment),
            category: record.get(self.category),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub rows: usize,
}

/// Parsed import, ready to be swapped into the store.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportReport {
    pub records: Vec<AnnotationRecord>,
    pub loaded: usize,
    pub skipped: usize,
}

impl ImportReport {
    pub fn counts(&self) -> ImportCounts {
        ImportCounts {
            loaded: self.loaded,
            skipped: self.skipped,
        }
    }
}

/// Outcome of an applied import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportCounts {
    pub loaded: usize,
    pub skipped: usize,
}

impl ImportCounts {
    /// User-facing summary line.
    pub fn summary(&self) -> String {
        let mut message = format!("Successfully loaded {} annotations.", self.loaded);
        if self.skipped > 0 {
            message.push_str(&format!("\nSkipped {} invalid entries.", self.skipped));
        }
        message
    }
}

/// Write annotations (already in display order) to `path`.
pub fn write_annotations<'a, I>(path: &Path, annotations: I) -> Result<ExportSummary>
where
    I: IntoIterator<Item = &'a Annotation>,
{
    let file = File::create(path).map_err(|source| AnnotatorError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = write_rows(file, annotations).map_err(|source| csv_error(path, source))?;
    info!(path = %path.display(), rows, "annotations exported");
    Ok(ExportSummary {
        path: path.to_path_buf(),
        rows,
    })
}

fn write_rows<'a, W, I>(writer: W, annotations: I) -> std::result::Result<usize, csv::Error>
where
    W: io::Write,
    I: IntoIterator<Item = &'a Annotation>,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    // Written explicitly so an empty export still carries the header.
    writer.write_record(CSV_COLUMNS)?;
    let mut rows = 0;
    for annotation in annotations {
        writer.serialize(ExportRow {
            frame_number: annotation.frame_number,
            time_instant: format_seconds(annotation.time_instant),
            annotation: &annotation.text,
            comment: &annotation.comment,
            category: annotation.category.label(),
        })?;
        rows += 1;
    }
    writer.flush()?;
    Ok(rows)
}

/// Read annotations from `path`, keeping rows whose frame lies in `[0, total_frames)`.
pub fn read_annotations(path: &Path, total_frames: u64) -> Result<ImportReport> {
    let file = File::open(path).map_err(|source| AnnotatorError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let report = read_rows(file, path, total_frames)?;
    info!(
        path = %path.display(),
        loaded = report.loaded,
        skipped = report.skipped,
        "annotations imported"
    );
    Ok(report)
}

fn read_rows<R: io::Read>(reader: R, path: &Path, total_frames: u64) -> Result<ImportReport> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|source| csv_error(path, source))?
        .clone();
    let columns = ColumnIndex::from_headers(&headers).map_err(AnnotatorError::MissingColumns)?;

    let mut records = Vec::new();
    let mut skipped = 0;
    let mut record = csv::StringRecord::new();
    let mut line = 1;

    loop {
        line += 1;
        match reader.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(err) if err.is_io_error() => return Err(csv_error(path, err)),
            Err(err) => {
                warn!(line, error = %err, "skipping unreadable row");
                skipped += 1;
                continue;
            }
        }
        match parse_row(columns.row(&record), total_frames) {
            Some(parsed) => records.push(parsed),
            None => {
                warn!(line, "skipping invalid row");
                skipped += 1;
            }
        }
    }

    Ok(ImportReport {
        loaded: records.len(),
        records,
        skipped,
    })
}

/// Quick structural check that only reads the header row.
pub fn probe_header(path: &Path) -> bool {
    let Ok(file) = File::open(path) else {
        return false;
    };
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(file);
    match reader.headers() {
        Ok(headers) => missing_columns(headers).is_empty(),
        Err(_) => false,
    }
}

fn missing_columns(headers: &csv::StringRecord) -> Vec<String> {
    CSV_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|header| header == **column))
        .map(|column| column.to_string())
        .collect()
}

fn parse_row(row: ImportRow<'_>, total_frames: u64) -> Option<AnnotationRecord> {
    let frame_number = parse_frame_number(row.frame_number?)?;
    let time_instant = row
        .time_instant?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|time| time.is_finite())?;

    if frame_number < 0 || frame_number as u64 >= total_frames {
        return None;
    }

    let category = non_empty(row.category)
        .map(Category::from_label_or_other)
        .unwrap_or(Category::Other);

    Some(AnnotationRecord {
        frame_number: frame_number as u64,
        time_instant,
        category,
        text: non_empty(row.annotation).unwrap_or_default().to_string(),
        comment: non_empty(row.comment).unwrap_or_default().to_string(),
    })
}

/// Integers parse directly; finite floats are truncated toward zero.
fn parse_frame_number(value: &str) -> Option<i64> {
    let value = value.trim();
    if let Ok(frame) = value.parse::<i64>() {
        return Some(frame);
    }
    let float = value.parse::<f64>().ok()?;
    if !float.is_finite() {
        return None;
    }
    Some(float.trunc() as i64)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

fn csv_error(path: &Path, source: csv::Error) -> AnnotatorError {
    AnnotatorError::Csv {
        path: path.to_path_buf(),
        source,
    }
}
