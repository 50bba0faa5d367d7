//! Physical readers for the source tables.
//!
//! Tables are read into Arrow record batches with every column cast to
//! UTF-8 text, so CSV and Parquet inputs reach the model layer in the same
//! shape. Typing happens when rows are converted into records.

use std::io::Seek;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use arrow::array::ArrayRef;
use arrow::compute::cast;
use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::record_batch::RecordBatch;
use arrow_schema::{DataType, Field, Schema, SchemaRef};
use itertools::Itertools;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::config::StoreConfig;
use crate::error::Result;
use crate::error::util::safe_open_file;
use crate::schema;
use crate::utils::{log_operation_complete, log_operation_start};

/// On-disk format of a source table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// Comma separated values with a header row
    Csv,
    /// Apache Parquet
    Parquet,
}

impl TableFormat {
    /// Pick the format from a file extension; anything but `.parquet` is CSV
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("parquet") => Self::Parquet,
            _ => Self::Csv,
        }
    }
}

/// A source table held as text columns
#[derive(Debug, Clone)]
pub struct TextTable {
    /// Text schema of the table, present even when there are no rows
    pub schema: SchemaRef,
    /// Record batches in file order
    pub batches: Vec<RecordBatch>,
}

impl TextTable {
    /// Total number of rows across all batches
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.batches.iter().map(RecordBatch::num_rows).sum()
    }

    /// Fail with `MissingColumn` unless every required column is present
    pub fn require(&self, table: &'static str, path: &Path, required: &[&str]) -> Result<()> {
        schema::require_columns(&self.schema, table, path, required)
    }

    /// Apply `(alias, canonical)` column renames to the schema and every batch
    pub fn normalize(self, aliases: &[(&str, &str)]) -> Result<Self> {
        let empty = RecordBatch::new_empty(Arc::clone(&self.schema));
        let schema = schema::normalize_columns(&empty, aliases)?.schema();
        let batches = self
            .batches
            .iter()
            .map(|batch| schema::normalize_columns(batch, aliases))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { schema, batches })
    }
}

/// Reads CSV and Parquet tables into text record batches
#[derive(Debug, Clone)]
pub struct TableReader {
    batch_size: usize,
    infer_schema_rows: usize,
}

impl TableReader {
    /// Create a reader with explicit tuning
    #[must_use]
    pub const fn new(batch_size: usize, infer_schema_rows: usize) -> Self {
        Self {
            batch_size,
            infer_schema_rows,
        }
    }

    /// Create a reader using the store configuration
    #[must_use]
    pub const fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.batch_size, config.infer_schema_rows)
    }

    /// Read a table, dispatching on the file extension
    ///
    /// # Arguments
    /// * `path` - Path to the table file
    /// * `table` - Logical table name used in log lines and errors
    pub fn read(&self, path: &Path, table: &'static str) -> Result<TextTable> {
        let start = Instant::now();
        log_operation_start(&format!("Reading {table} table"), path);

        let text_table = match TableFormat::from_path(path) {
            TableFormat::Csv => self.read_csv(path, table)?,
            TableFormat::Parquet => self.read_parquet(path, table)?,
        };

        log_operation_complete(
            "read",
            path,
            text_table.num_rows(),
            Some(start.elapsed()),
        );
        Ok(text_table)
    }

    fn read_csv(&self, path: &Path, table: &'static str) -> Result<TextTable> {
        let mut file = safe_open_file(path, table)?;

        // Only the header names are used; every column is read back as text
        let (inferred, _) = Format::default()
            .with_header(true)
            .infer_schema(&mut file, Some(self.infer_schema_rows))?;
        file.rewind()?;

        let schema = text_schema(&inferred);
        let reader = ReaderBuilder::new(Arc::clone(&schema))
            .with_header(true)
            .with_batch_size(self.batch_size)
            .build(file)?;

        let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(TextTable { schema, batches })
    }

    fn read_parquet(&self, path: &Path, table: &'static str) -> Result<TextTable> {
        let file = safe_open_file(path, table)?;
        let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
        let schema = text_schema(builder.schema());
        let reader = builder.with_batch_size(self.batch_size).build()?;

        let batches = reader
            .map(|batch| {
                let batch = batch?;
                cast_to_text(&batch, &schema)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(TextTable { schema, batches })
    }
}

impl Default for TableReader {
    fn default() -> Self {
        Self::from_config(&StoreConfig::default())
    }
}

/// Build a schema with the same column names where every column is nullable text
#[must_use]
pub fn text_schema(schema: &Schema) -> SchemaRef {
    let fields = schema
        .fields()
        .iter()
        .map(|f| Field::new(f.name(), DataType::Utf8, true))
        .collect_vec();
    Arc::new(Schema::new(fields))
}

/// Cast every column of a batch to UTF-8 text
pub fn cast_to_text(batch: &RecordBatch, schema: &SchemaRef) -> Result<RecordBatch> {
    let columns = batch
        .columns()
        .iter()
        .map(|column| cast(column, &DataType::Utf8))
        .collect::<std::result::Result<Vec<ArrayRef>, _>>()?;
    Ok(RecordBatch::try_new(Arc::clone(schema), columns)?)
}

/// Project a batch onto the named columns that exist in it, in the given order
pub fn project_columns(batch: &RecordBatch, columns: &[&str]) -> Result<RecordBatch> {
    let schema = batch.schema();
    let indices = columns
        .iter()
        .filter_map(|name| schema.index_of(name).ok())
        .collect_vec();
    Ok(batch.project(&indices)?)
}
