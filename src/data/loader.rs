use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use arrow::array::{Array, ArrayRef, AsArray, Float64Array, StringArray};
use arrow::datatypes::{DataType, Float64Type, UInt32Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::{LaunchDataset, LaunchRecord, Outcome};

// Column names of the launch table.
pub const COL_SITE: &str = "Launch Site";
pub const COL_PAYLOAD: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";
pub const COL_FLIGHT_NUMBER: &str = "Flight Number";
pub const COL_BOOSTER_VERSION: &str = "Booster Version";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row; extra columns (e.g. an unnamed index) are ignored
/// * `.json`    – `[{ "Launch Site": "...", "Payload Mass (kg)": 0.0, ... }, ...]`
/// * `.parquet` – flat columns with the same names
///
/// Any schema violation is an error: a missing required column, a
/// non-numeric or non-finite payload, a `class` other than 0/1, a null cell.
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::debug!(
        "{}: {} launches, sites {:?}",
        path.display(),
        dataset.len(),
        dataset.sites()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Row validation shared by the serde-based loaders
// ---------------------------------------------------------------------------

/// One row as it appears in CSV / JSON, before validation.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Launch Site")]
    site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "class")]
    class: f64,
    #[serde(rename = "Booster Version Category")]
    booster_category: String,
    #[serde(rename = "Flight Number", default)]
    flight_number: Option<u32>,
    #[serde(rename = "Booster Version", default)]
    booster_version: Option<String>,
}

impl RawRecord {
    fn validate(self, row: usize) -> Result<LaunchRecord> {
        build_record(
            row,
            self.site,
            self.payload_mass_kg,
            self.class,
            self.booster_category,
            self.flight_number,
            self.booster_version,
        )
    }
}

fn build_record(
    row: usize,
    site: String,
    payload_mass_kg: f64,
    class: f64,
    booster_category: String,
    flight_number: Option<u32>,
    booster_version: Option<String>,
) -> Result<LaunchRecord> {
    if !payload_mass_kg.is_finite() {
        bail!("Row {row}: '{COL_PAYLOAD}' is not a finite number ({payload_mass_kg})");
    }
    let outcome = Outcome::from_class(class)
        .with_context(|| format!("Row {row}: '{COL_CLASS}' must be 0 or 1, got {class}"))?;
    Ok(LaunchRecord {
        flight_number,
        booster_version: booster_version.filter(|v| !v.is_empty()),
        ..LaunchRecord::new(site, payload_mass_kg, outcome, booster_category)
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<LaunchDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .context("opening CSV")?;

    let headers = reader.headers().context("reading CSV headers")?.clone();
    for required in [COL_SITE, COL_PAYLOAD, COL_CLASS, COL_BOOSTER_CATEGORY] {
        if !headers.iter().any(|h| h == required) {
            bail!("CSV missing '{required}' column");
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawRecord>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(raw.validate(row_no)?);
    }

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
fn load_json(path: &Path) -> Result<LaunchDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let rows: Vec<RawRecord> = serde_json::from_str(&text).context("parsing JSON")?;

    let records = rows
        .into_iter()
        .enumerate()
        .map(|(i, raw)| raw.validate(i))
        .collect::<Result<Vec<_>>>()?;

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with the launch columns.
///
/// Numeric columns may use any integer or float type, string columns
/// `Utf8` or `LargeUtf8`; everything is cast to a common type per column.
fn load_parquet(path: &Path) -> Result<LaunchDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;

    // Checked against the schema so that files without row groups are covered.
    let schema = builder.schema();
    for required in [COL_SITE, COL_PAYLOAD, COL_CLASS, COL_BOOSTER_CATEGORY] {
        if schema.field_with_name(required).is_err() {
            bail!("Parquet file missing '{required}' column");
        }
    }

    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let sites = string_column(&batch, COL_SITE)?;
        let payloads = f64_column(&batch, COL_PAYLOAD)?;
        let classes = f64_column(&batch, COL_CLASS)?;
        let boosters = string_column(&batch, COL_BOOSTER_CATEGORY)?;
        let flights = optional_column(&batch, COL_FLIGHT_NUMBER)
            .map(|col| cast_column(&col, COL_FLIGHT_NUMBER, &DataType::UInt32))
            .transpose()?;
        let versions = optional_column(&batch, COL_BOOSTER_VERSION)
            .map(|col| cast_column(&col, COL_BOOSTER_VERSION, &DataType::Utf8))
            .transpose()?;

        for i in 0..batch.num_rows() {
            let row = records.len();
            for (name, col) in [
                (COL_SITE, &sites as &dyn Array),
                (COL_PAYLOAD, &payloads as &dyn Array),
                (COL_CLASS, &classes as &dyn Array),
                (COL_BOOSTER_CATEGORY, &boosters as &dyn Array),
            ] {
                if col.is_null(i) {
                    bail!("Row {row}: null value in '{name}'");
                }
            }

            let flight_number = flights
                .as_ref()
                .map(|c| c.as_primitive::<UInt32Type>())
                .filter(|c| c.is_valid(i))
                .map(|c| c.value(i));
            let booster_version = versions
                .as_ref()
                .map(|c| c.as_string::<i32>())
                .filter(|c| c.is_valid(i))
                .map(|c| c.value(i).to_string());

            records.push(build_record(
                row,
                sites.value(i).to_string(),
                payloads.value(i),
                classes.value(i),
                boosters.value(i).to_string(),
                flight_number,
                booster_version,
            )?);
        }
    }

    Ok(LaunchDataset::from_records(records))
}

// -- Parquet / Arrow helpers --

fn optional_column(batch: &RecordBatch, name: &str) -> Option<ArrayRef> {
    batch.column_by_name(name).cloned()
}

fn required_column(batch: &RecordBatch, name: &str) -> Result<ArrayRef> {
    optional_column(batch, name).ok_or_else(|| anyhow!("Parquet file missing '{name}' column"))
}

fn cast_column(col: &ArrayRef, name: &str, to: &DataType) -> Result<ArrayRef> {
    arrow::compute::cast(col, to).with_context(|| {
        format!("column '{name}' has type {:?}, expected {to:?}", col.data_type())
    })
}

fn f64_column(batch: &RecordBatch, name: &str) -> Result<Float64Array> {
    let col = required_column(batch, name)?;
    if !col.data_type().is_numeric() {
        bail!("column '{name}' has type {:?}, expected a number", col.data_type());
    }
    let cast = cast_column(&col, name, &DataType::Float64)?;
    Ok(cast.as_primitive::<Float64Type>().clone())
}

fn string_column(batch: &RecordBatch, name: &str) -> Result<StringArray> {
    let col = required_column(batch, name)?;
    let cast = cast_column(&col, name, &DataType::Utf8)?;
    Ok(cast.as_string::<i32>().clone())
}
