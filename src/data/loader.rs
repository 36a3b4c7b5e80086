use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray, Float64Array, StringArray};
use arrow::compute::{can_cast_types, cast};
use arrow::datatypes::{DataType, Float64Type};
use calamine::{open_workbook_auto, Data, Reader};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::{LoadError, LoadResult};
use super::model::{CellValue, LandDataset, LandRecord, REQUIRED_COLUMNS};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load land records from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xls` / `.ods` – first worksheet, header in row 1
/// * `.csv`     – header row followed by records
/// * `.json`    – `[{ "Account No.": 12, "Land owner name": "...", ... }, ...]`
/// * `.parquet` – one column per field
pub fn load_file(path: &Path) -> LoadResult<LandDataset> {
    if !path.exists() {
        return Err(LoadError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        });
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "xlsx" | "xlsm" | "xls" | "ods" => read_workbook(path)?,
        "csv" => read_csv(path)?,
        "json" => read_json(path)?,
        "parquet" | "pq" => read_parquet(path)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    };

    let records = table.into_records()?;
    let source = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(LandDataset::from_records(records, source))
}

// ---------------------------------------------------------------------------
// RawTable – header + untyped cells, shared by every format
// ---------------------------------------------------------------------------

struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    fn new(headers: impl IntoIterator<Item = String>) -> Self {
        RawTable {
            headers: headers.into_iter().map(|h| h.trim().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Position of every required column, or the list of those missing.
    fn column_positions(&self) -> LoadResult<[usize; 7]> {
        let mut positions = [0usize; 7];
        let mut missing = Vec::new();
        for (slot, name) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
            match self.headers.iter().position(|h| h == name) {
                Some(idx) => *slot = idx,
                None => missing.push(name.to_string()),
            }
        }
        if missing.is_empty() {
            Ok(positions)
        } else {
            Err(LoadError::MissingColumns(missing))
        }
    }

    /// Trim strings and coerce numbers; cells that fail coercion become null.
    fn into_records(self) -> LoadResult<Vec<LandRecord>> {
        let [account, owner, parcel, nature, class, sub_class, extent] =
            self.column_positions()?;

        let mut coerced = 0usize;
        let records: Vec<LandRecord> = self
            .rows
            .iter()
            .map(|row| {
                let cell = |i: usize| row.get(i).unwrap_or(&CellValue::Empty);
                let mut int = |i: usize| {
                    let v = cell(i).to_i64();
                    if v.is_none() && cell(i) != &CellValue::Empty {
                        coerced += 1;
                    }
                    v
                };
                let account_number = int(account);
                let parcel_number = int(parcel);
                let extent_acres = cell(extent).to_f64();
                if extent_acres.is_none() && cell(extent) != &CellValue::Empty {
                    coerced += 1;
                }
                LandRecord {
                    account_number,
                    owner_name: cell(owner).to_text(),
                    parcel_number,
                    land_nature: cell(nature).to_text(),
                    land_classification: cell(class).to_text(),
                    land_sub_classification: cell(sub_class).to_text(),
                    extent_acres,
                }
            })
            .collect();

        if coerced > 0 {
            log::debug!("{coerced} numeric cell(s) could not be parsed and were set to null");
        }
        Ok(records)
    }
}

// ---------------------------------------------------------------------------
// Workbook loader
// ---------------------------------------------------------------------------

/// First worksheet; row 1 is the header.
fn read_workbook(path: &Path) -> LoadResult<RawTable> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(LoadError::NoWorksheet)??;

    let mut rows = range.rows();
    let header = rows.next().ok_or(LoadError::EmptyTable)?;
    let mut table = RawTable::new(header.iter().map(|c| workbook_cell(c).to_text()));

    for row in rows {
        table.rows.push(row.iter().map(workbook_cell).collect());
    }
    Ok(table)
}

fn workbook_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => text_cell(s),
        Data::Empty => CellValue::Empty,
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn read_csv(path: &Path) -> LoadResult<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(LoadError::EmptyTable);
    }
    let mut table = RawTable::new(headers.iter().map(str::to_string));

    for result in reader.records() {
        let record = result?;
        table.rows.push(record.iter().map(text_cell).collect());
    }
    Ok(table)
}

fn text_cell(s: &str) -> CellValue {
    if s.trim().is_empty() {
        CellValue::Empty
    } else {
        CellValue::Text(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`:
///
/// ```json
/// [
///   { "Account No.": 12, "Land owner name": "Ravi", "Land Parcel Number": 101, ... },
///   ...
/// ]
/// ```
///
/// The header is the union of keys across all records.
fn read_json(path: &Path) -> LoadResult<RawTable> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let records = root.as_array().ok_or(LoadError::MalformedRow {
        row: 0,
        reason: "expected a top-level JSON array".to_string(),
    })?;

    let mut headers: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec.as_object().ok_or_else(|| LoadError::MalformedRow {
            row: i,
            reason: "not a JSON object".to_string(),
        })?;
        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }
    if headers.is_empty() {
        return Err(LoadError::EmptyTable);
    }

    let mut table = RawTable::new(headers.iter().cloned());
    for rec in records {
        let row = headers
            .iter()
            .map(|h| rec.get(h).map(json_cell).unwrap_or(CellValue::Empty))
            .collect();
        table.rows.push(row);
    }
    Ok(table)
}

fn json_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => text_cell(s),
        JsonValue::Number(n) => n
            .as_f64()
            .map(CellValue::Number)
            .unwrap_or_else(|| CellValue::Text(n.to_string())),
        JsonValue::Null => CellValue::Empty,
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Flat parquet file with one column per field. Works with files written by
/// both **Pandas** (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn read_parquet(path: &Path) -> LoadResult<RawTable> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build()?;

    let mut table = RawTable::new(headers);
    for batch_result in reader {
        let batch = batch_result?;
        let columns: Vec<ArrowColumn> =
            batch.columns().iter().map(ArrowColumn::normalize).collect();
        for row in 0..batch.num_rows() {
            table.rows.push(columns.iter().map(|col| col.cell(row)).collect());
        }
    }
    Ok(table)
}

/// A parquet column cast once per batch to the two shapes `CellValue` knows.
/// Integers of every width, decimals and floats become `Float64`; strings,
/// string views, dictionaries and booleans become `Utf8`.
enum ArrowColumn {
    Numbers(Float64Array),
    Text(StringArray),
    Unsupported,
}

impl ArrowColumn {
    fn normalize(col: &ArrayRef) -> Self {
        let target = if col.data_type().is_numeric() {
            DataType::Float64
        } else {
            DataType::Utf8
        };
        if !can_cast_types(col.data_type(), &target) {
            log::debug!(
                "parquet column of type {} is not readable, loading as null",
                col.data_type()
            );
            return ArrowColumn::Unsupported;
        }
        match cast(col, &target) {
            Ok(array) if target == DataType::Float64 => {
                ArrowColumn::Numbers(array.as_primitive::<Float64Type>().clone())
            }
            Ok(array) => ArrowColumn::Text(array.as_string::<i32>().clone()),
            Err(e) => {
                log::debug!("cannot cast parquet column of type {}: {e}", col.data_type());
                ArrowColumn::Unsupported
            }
        }
    }

    fn cell(&self, row: usize) -> CellValue {
        match self {
            ArrowColumn::Numbers(a) if a.is_valid(row) => CellValue::Number(a.value(row)),
            ArrowColumn::Text(a) if a.is_valid(row) => text_cell(a.value(row)),
            _ => CellValue::Empty,
        }
    }
}
