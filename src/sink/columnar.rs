use crate::sink::error::SinkError;
use crate::types::row::{FieldValue, FlatRow};
use crate::types::schema::{ColumnDef, ColumnType, TableSchema};
use log::{debug, info};
use polars::prelude::*;
use std::collections::BTreeMap;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// Append-only bronze tables, one snappy-compressed parquet file per table
/// under the store directory.
///
/// Each call opens the table file, works on it and closes it again; nothing is
/// held open between calls. Appends rewrite the file through a staged copy
/// that is renamed into place, so readers never observe a partial table.
#[derive(Debug, Clone)]
pub struct ColumnarSink {
    store_dir: PathBuf,
    tables: BTreeMap<&'static str, TableSchema>,
}

impl ColumnarSink {
    /// A sink holding the seven bronze tables.
    pub fn new(store_dir: impl Into<PathBuf>) -> Self {
        Self::with_tables(store_dir, TableSchema::bronze_tables())
    }

    pub fn with_tables(
        store_dir: impl Into<PathBuf>,
        tables: impl IntoIterator<Item = TableSchema>,
    ) -> Self {
        Self {
            store_dir: store_dir.into(),
            tables: tables.into_iter().map(|t| (t.name, t)).collect(),
        }
    }

    pub fn store_dir(&self) -> &Path {
        &self.store_dir
    }

    /// Registered table names, sorted.
    pub fn list_tables(&self) -> Vec<&'static str> {
        self.tables.keys().copied().collect()
    }

    pub fn table_schema(&self, table: &str) -> Result<&TableSchema, SinkError> {
        self.tables
            .get(table)
            .ok_or_else(|| SinkError::UnknownTable(table.to_string()))
    }

    fn table_path(&self, table: &str) -> PathBuf {
        self.store_dir.join(format!("{table}.parquet"))
    }

    /// Appends `rows` to `table` and returns the number of rows appended.
    ///
    /// Every row must have exactly the table's arity and cell types that fit
    /// the column types (integers are accepted by float columns). A single
    /// offending row fails the whole call and leaves the table untouched.
    pub fn append_rows(&self, table: &str, rows: &[FlatRow]) -> Result<usize, SinkError> {
        let schema = self.table_schema(table)?;
        if rows.is_empty() {
            return Ok(0);
        }
        let mut frame = rows_to_frame(schema, rows)?;

        std::fs::create_dir_all(&self.store_dir)
            .map_err(|e| SinkError::StoreDirCreation(self.store_dir.clone(), e))?;
        let path = self.table_path(table);
        if let Some(existing) = self.read_existing(table, &path)? {
            let mut combined = existing;
            combined.vstack_mut(&frame).map_err(|e| polars_error(table, e))?;
            frame = combined;
        }
        self.write_table(table, &path, &mut frame)?;

        info!(
            "Appended {} rows to {} ({} rows total)",
            rows.len(),
            table,
            frame.height()
        );
        Ok(rows.len())
    }

    /// Removes every row of `table`. Clearing an empty table is a no-op.
    pub fn clear(&self, table: &str) -> Result<(), SinkError> {
        self.table_schema(table)?;
        let path = self.table_path(table);
        match std::fs::remove_file(&path) {
            Ok(()) => {
                debug!("Cleared table {}", table);
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SinkError::TableIo(path, e)),
        }
    }

    pub fn clear_all(&self) -> Result<(), SinkError> {
        for table in self.list_tables() {
            self.clear(table)?;
        }
        Ok(())
    }

    pub fn row_count(&self, table: &str) -> Result<usize, SinkError> {
        Ok(self.read_table(table)?.height())
    }

    /// The whole table, materialized.
    pub fn read_table(&self, table: &str) -> Result<DataFrame, SinkError> {
        let schema = self.table_schema(table)?;
        let path = self.table_path(table);
        Ok(self
            .read_existing(table, &path)?
            .unwrap_or_else(|| DataFrame::empty_with_schema(&schema.polars_schema())))
    }

    /// Lazy scan over `table` for analytical queries. An empty table scans as
    /// a frame with the table's columns and no rows.
    pub fn scan(&self, table: &str) -> Result<LazyFrame, SinkError> {
        let schema = self.table_schema(table)?;
        let path = self.table_path(table);
        if !path.is_file() {
            return Ok(DataFrame::empty_with_schema(&schema.polars_schema()).lazy());
        }
        LazyFrame::scan_parquet(&path, Default::default()).map_err(|e| polars_error(table, e))
    }

    fn read_existing(&self, table: &str, path: &Path) -> Result<Option<DataFrame>, SinkError> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SinkError::TableIo(path.to_path_buf(), e)),
        };
        ParquetReader::new(file)
            .finish()
            .map(Some)
            .map_err(|e| polars_error(table, e))
    }

    fn write_table(&self, table: &str, path: &Path, frame: &mut DataFrame) -> Result<(), SinkError> {
        let mut staged = tempfile::Builder::new()
            .prefix(&format!(".{table}-"))
            .suffix(".tmp")
            .tempfile_in(&self.store_dir)
            .map_err(|e| SinkError::TableIo(self.store_dir.clone(), e))?;
        ParquetWriter::new(staged.as_file_mut())
            .with_compression(ParquetCompression::Snappy)
            .finish(frame)
            .map_err(|e| polars_error(table, e))?;
        staged
            .persist(path)
            .map_err(|e| SinkError::TableIo(path.to_path_buf(), e.error))?;
        Ok(())
    }
}

fn polars_error(table: &str, source: PolarsError) -> SinkError {
    SinkError::Polars {
        table: table.to_string(),
        source,
    }
}

/// Transposes rows into one typed column per schema column.
fn rows_to_frame(schema: &TableSchema, rows: &[FlatRow]) -> Result<DataFrame, SinkError> {
    let mut cells: Vec<Vec<FieldValue>> = schema
        .columns
        .iter()
        .map(|_| Vec::with_capacity(rows.len()))
        .collect();

    for row in rows {
        if row.arity() != schema.arity() {
            return Err(SinkError::SchemaMismatch {
                table: schema.name.to_string(),
                expected: schema.arity(),
                found: row.arity(),
            });
        }
        for (column, value) in cells.iter_mut().zip(row.values()) {
            column.push(value);
        }
    }

    let columns = schema
        .columns
        .iter()
        .zip(cells)
        .map(|(def, values)| build_column(schema.name, def, values))
        .collect::<Result<Vec<Column>, SinkError>>()?;
    DataFrame::new(columns).map_err(|e| polars_error(schema.name, e))
}

fn kind_name(value: &FieldValue) -> &'static str {
    match value {
        FieldValue::Null => "null",
        FieldValue::Bool(_) => "a boolean",
        FieldValue::Int(_) => "an integer",
        FieldValue::Float(_) => "a float",
        FieldValue::Text(_) => "text",
        FieldValue::Timestamp(_) => "a timestamp",
        FieldValue::Json(_) => "a structured value",
    }
}

fn build_column(table: &str, def: &ColumnDef, values: Vec<FieldValue>) -> Result<Column, SinkError> {
    let mismatch = |value: &FieldValue| SinkError::ColumnTypeMismatch {
        table: table.to_string(),
        column: def.name.to_string(),
        expected: def.kind,
        found: kind_name(value),
    };
    let name: PlSmallStr = def.name.into();

    let series = match def.kind {
        ColumnType::Boolean => {
            let cells = values
                .into_iter()
                .map(|v| match v {
                    FieldValue::Null => Ok(None),
                    FieldValue::Bool(b) => Ok(Some(b)),
                    other => Err(mismatch(&other)),
                })
                .collect::<Result<Vec<Option<bool>>, _>>()?;
            Series::new(name, cells)
        }
        ColumnType::Int64 => {
            let cells = values
                .into_iter()
                .map(|v| match v {
                    FieldValue::Null => Ok(None),
                    FieldValue::Int(i) => Ok(Some(i)),
                    other => Err(mismatch(&other)),
                })
                .collect::<Result<Vec<Option<i64>>, _>>()?;
            Series::new(name, cells)
        }
        ColumnType::Float64 => {
            let cells = values
                .into_iter()
                .map(|v| match v {
                    FieldValue::Null => Ok(None),
                    FieldValue::Float(f) => Ok(Some(f)),
                    FieldValue::Int(i) => Ok(Some(i as f64)),
                    other => Err(mismatch(&other)),
                })
                .collect::<Result<Vec<Option<f64>>, _>>()?;
            Series::new(name, cells)
        }
        ColumnType::Utf8 => {
            let cells = values
                .into_iter()
                .map(|v| match v {
                    FieldValue::Null => Ok(None),
                    FieldValue::Text(s) => Ok(Some(s)),
                    other => Err(mismatch(&other)),
                })
                .collect::<Result<Vec<Option<String>>, _>>()?;
            Series::new(name, cells)
        }
        ColumnType::Json => {
            let cells = values
                .into_iter()
                .map(|v| match v {
                    FieldValue::Null => Ok(None),
                    FieldValue::Json(value) => Ok(Some(value.to_string())),
                    other => Err(mismatch(&other)),
                })
                .collect::<Result<Vec<Option<String>>, _>>()?;
            Series::new(name, cells)
        }
        ColumnType::Timestamp => {
            let micros = values
                .into_iter()
                .map(|v| match v {
                    FieldValue::Null => Ok(None),
                    FieldValue::Timestamp(t) => Ok(Some(t.and_utc().timestamp_micros())),
                    other => Err(mismatch(&other)),
                })
                .collect::<Result<Vec<Option<i64>>, _>>()?;
            Series::new(name, micros)
                .cast(&def.kind.dtype())
                .map_err(|e| polars_error(table, e))?
        }
    };
    Ok(Column::from(series))
}
