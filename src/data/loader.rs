use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, ArrayRef, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    LargeStringArray, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{
    ClassGradesTable, DatasetStore, DemographicRow, GpaRecord, GradeRow, TuitionRecord,
};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load every dashboard table from `dir`.
///
/// Each table is looked up by a fixed stem name with any supported extension
/// (`.csv`, `.parquet`/`.pq`, `.json`), so a directory can mix formats freely.
pub fn load_store(dir: &Path) -> Result<DatasetStore> {
    Ok(DatasetStore {
        tuition: tuition_table(&read_table(dir, "tuition")?)?,
        class_grades: class_grades_table(&read_table(dir, "class_grades")?)?,
        school_gpa: gpa_table(&read_table(dir, "course_gpa")?)?,
        genders: demographic_table(&read_table(dir, "genders")?)?,
        generations: demographic_table(&read_table(dir, "generations")?)?,
        loads: demographic_table(&read_table(dir, "loads")?)?,
        races: demographic_table(&read_table(dir, "races")?)?,
        residencies: demographic_table(&read_table(dir, "residencies")?)?,
        schools: demographic_table(&read_table(dir, "schools")?)?,
    })
}

// ---------------------------------------------------------------------------
// RawTable – an untyped table as it came off disk
// ---------------------------------------------------------------------------

/// A single parsed cell before typed conversion.
#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Text(String),
    Int(i64),
    Float(f64),
    Null,
}

impl Cell {
    fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(i) => Some(*i as f64),
            Cell::Float(f) => Some(*f),
            _ => None,
        }
    }
}

/// Ordered headers plus row-major cells. Pandas index columns (empty header
/// or `Unnamed: 0`) are stripped at construction.
#[derive(Debug, Clone)]
struct RawTable {
    name: String,
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

fn is_index_column(header: &str) -> bool {
    header.is_empty() || header.starts_with("Unnamed:")
}

impl RawTable {
    fn new(name: &str, headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let keep: Vec<usize> = (0..headers.len())
            .filter(|&i| !is_index_column(&headers[i]))
            .collect();

        let headers = keep.iter().map(|&i| headers[i].clone()).collect();
        let rows = rows
            .into_iter()
            .map(|row| keep.iter().map(|&i| row[i].clone()).collect())
            .collect();

        RawTable {
            name: name.to_string(),
            headers,
            rows,
        }
    }

    fn column(&self, header: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == header)
            .with_context(|| {
                format!(
                    "table '{}' has no '{}' column (found {:?})",
                    self.name, header, self.headers
                )
            })
    }

    fn number(&self, row: usize, col: usize) -> Result<f64> {
        self.rows[row][col].as_f64().with_context(|| {
            format!(
                "table '{}' row {row}: column '{}' is not numeric",
                self.name, self.headers[col]
            )
        })
    }

    fn label(&self, row: usize, col: usize) -> Result<String> {
        match &self.rows[row][col] {
            Cell::Text(s) => Ok(s.clone()),
            Cell::Int(i) => Ok(i.to_string()),
            Cell::Float(f) => Ok(f.to_string()),
            Cell::Null => bail!(
                "table '{}' row {row}: column '{}' is empty",
                self.name,
                self.headers[col]
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Format dispatch
// ---------------------------------------------------------------------------

fn read_table(dir: &Path, stem: &str) -> Result<RawTable> {
    for ext in ["csv", "parquet", "pq", "json"] {
        let path = dir.join(format!("{stem}.{ext}"));
        if path.is_file() {
            return read_file(&path, stem)
                .with_context(|| format!("loading {}", path.display()));
        }
    }
    bail!(
        "no {stem}.csv / {stem}.parquet / {stem}.json under {}",
        dir.display()
    );
}

fn read_file(path: &Path, stem: &str) -> Result<RawTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => read_csv(path, stem),
        "parquet" | "pq" => read_parquet(path, stem),
        "json" => read_json(path, stem),
        other => bail!("unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

fn read_csv(path: &Path, stem: &str) -> Result<RawTable> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        if record.len() != headers.len() {
            bail!(
                "CSV row {row_no} has {} fields, expected {}",
                record.len(),
                headers.len()
            );
        }
        rows.push(record.iter().map(guess_cell).collect());
    }

    Ok(RawTable::new(stem, headers, rows))
}

fn guess_cell(s: &str) -> Cell {
    let s = s.trim();
    if s.is_empty() {
        return Cell::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Cell::Int(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return Cell::Float(f);
    }
    Cell::Text(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Pandas `df.to_json(orient='split')` layout, which keeps column order:
///
/// ```json
/// { "columns": ["Year", "Tuition"], "data": [[1970, 405.0], ...] }
/// ```
///
/// An optional `"index"` array is ignored.
fn read_json(path: &Path, stem: &str) -> Result<RawTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;
    let obj = root
        .as_object()
        .context("expected a top-level JSON object (pandas orient='split')")?;

    let headers: Vec<String> = obj
        .get("columns")
        .and_then(|v| v.as_array())
        .context("missing 'columns' array")?
        .iter()
        .map(|v| {
            v.as_str()
                .map(str::to_string)
                .context("column name is not a string")
        })
        .collect::<Result<_>>()?;

    let data = obj
        .get("data")
        .and_then(|v| v.as_array())
        .context("missing 'data' array")?;

    let mut rows = Vec::with_capacity(data.len());
    for (i, row) in data.iter().enumerate() {
        let arr = row
            .as_array()
            .with_context(|| format!("row {i} is not an array"))?;
        if arr.len() != headers.len() {
            bail!("row {i} has {} values, expected {}", arr.len(), headers.len());
        }
        rows.push(arr.iter().map(json_cell).collect());
    }

    Ok(RawTable::new(stem, headers, rows))
}

fn json_cell(v: &JsonValue) -> Cell {
    match v {
        JsonValue::String(s) => Cell::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Cell::Int(i)
            } else if let Some(f) = n.as_f64() {
                Cell::Float(f)
            } else {
                Cell::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => Cell::Text(b.to_string()),
        JsonValue::Null => Cell::Null,
        other => Cell::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet
// ---------------------------------------------------------------------------

fn read_parquet(path: &Path, stem: &str) -> Result<RawTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            let cells = (0..batch.num_columns())
                .map(|col| scalar_cell(batch.column(col), row))
                .collect::<Result<Vec<Cell>>>()?;
            rows.push(cells);
        }
    }

    Ok(RawTable::new(stem, headers, rows))
}

/// Read one scalar cell out of an Arrow column.
fn scalar_cell(col: &ArrayRef, row: usize) -> Result<Cell> {
    if col.is_null(row) {
        return Ok(Cell::Null);
    }
    let cell = match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Cell::Text(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<LargeStringArray>()
                .context("expected LargeStringArray")?;
            Cell::Text(arr.value(row).to_string())
        }
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            Cell::Int(arr.value(row) as i64)
        }
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            Cell::Int(arr.value(row))
        }
        DataType::Float32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float32Array>()
                .context("expected Float32Array")?;
            Cell::Float(arr.value(row) as f64)
        }
        DataType::Float64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float64Array>()
                .context("expected Float64Array")?;
            Cell::Float(arr.value(row))
        }
        DataType::Boolean => {
            let arr = col
                .as_any()
                .downcast_ref::<BooleanArray>()
                .context("expected BooleanArray")?;
            Cell::Text(arr.value(row).to_string())
        }
        other => bail!("unsupported parquet column type {other:?}"),
    };
    Ok(cell)
}

// ---------------------------------------------------------------------------
// Typed conversions
// ---------------------------------------------------------------------------

fn tuition_table(raw: &RawTable) -> Result<Vec<TuitionRecord>> {
    let year = raw.column("Year")?;
    let tuition = raw.column("Tuition")?;

    let mut records = Vec::with_capacity(raw.rows.len());
    for row in 0..raw.rows.len() {
        records.push(TuitionRecord {
            year: raw.number(row, year)? as i32,
            tuition: raw.number(row, tuition)?,
        });
    }
    // the line chart runs earliest → latest
    records.sort_by_key(|r| r.year);
    Ok(records)
}

fn class_grades_table(raw: &RawTable) -> Result<ClassGradesTable> {
    let key = raw.column("Course Number")?;
    let bucket_cols: Vec<usize> = (0..raw.headers.len()).filter(|&i| i != key).collect();
    if bucket_cols.is_empty() {
        bail!("table '{}' has no grade bucket columns", raw.name);
    }

    let buckets = bucket_cols
        .iter()
        .map(|&i| raw.headers[i].clone())
        .collect();

    let mut rows = Vec::with_capacity(raw.rows.len());
    for row in 0..raw.rows.len() {
        let counts = bucket_cols
            .iter()
            .map(|&col| raw.number(row, col))
            .collect::<Result<Vec<f64>>>()?;
        rows.push(GradeRow {
            course: raw.label(row, key)?,
            counts,
        });
    }

    Ok(ClassGradesTable { buckets, rows })
}

fn gpa_table(raw: &RawTable) -> Result<Vec<GpaRecord>> {
    let course = raw.column("Course Number")?;
    let school = raw.column("Class Academic Group")?;
    // the GPA column is whatever numeric column remains
    let gpa = (0..raw.headers.len())
        .find(|&i| i != course && i != school)
        .with_context(|| format!("table '{}' has no GPA column", raw.name))?;

    let mut records = Vec::with_capacity(raw.rows.len());
    for row in 0..raw.rows.len() {
        records.push(GpaRecord {
            course: raw.label(row, course)?,
            school: raw.label(row, school)?,
            gpa: raw.number(row, gpa)?,
        });
    }
    Ok(records)
}

fn demographic_table(raw: &RawTable) -> Result<Vec<DemographicRow>> {
    if raw.headers.len() < 2 {
        bail!(
            "table '{}' needs a label column and a count column",
            raw.name
        );
    }

    let mut rows = Vec::with_capacity(raw.rows.len());
    for row in 0..raw.rows.len() {
        rows.push(DemographicRow {
            label: raw.label(row, 0)?,
            count: raw.number(row, 1)?,
        });
    }
    Ok(rows)
}
