//! Column checks and normalization applied to source tables before typing.
//!
//! Every table is read as text first. This module verifies that the columns a
//! model needs are present and renames the alternative column spellings that
//! upstream scoring processes produce.

pub mod date_utils;

use std::path::Path;
use std::sync::Arc;

use arrow::array::ArrayRef;
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use arrow_schema::{Field, Schema};

use crate::error::{Result, SignalError};

pub use date_utils::{DateFormatConfig, parse_calendar_date, parse_timestamp};

/// Columns renamed to their canonical spelling when present.
///
/// When both spellings exist the `_ML` column wins and the other is dropped.
pub const RISK_COLUMN_ALIASES: [(&str, &str); 2] = [
    ("Risk_Score_ML", "Risk_Score"),
    ("Final_Risk_Category_ML", "Final_Risk_Category"),
];

/// Check that every required column exists in a schema
///
/// # Arguments
/// * `schema` - Schema of the loaded table
/// * `table` - Logical table name for error messages
/// * `path` - Source path for error messages
/// * `required` - Column names that must exist
pub fn require_columns(
    schema: &Schema,
    table: &'static str,
    path: &Path,
    required: &[&str],
) -> Result<()> {
    for column in required {
        if schema.field_with_name(column).is_err() {
            return Err(SignalError::MissingColumn {
                table,
                column: (*column).to_string(),
                path: path.to_path_buf(),
            });
        }
    }
    Ok(())
}

/// Rename columns according to `(alias, canonical)` pairs
///
/// A canonical column is dropped when its alias is also present so the
/// resulting batch never carries duplicate names.
pub fn normalize_columns(batch: &RecordBatch, aliases: &[(&str, &str)]) -> Result<RecordBatch> {
    let schema = batch.schema();
    let has = |name: &str| schema.field_with_name(name).is_ok();

    let mut fields: Vec<Field> = Vec::with_capacity(schema.fields().len());
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(schema.fields().len());

    for (field, column) in schema.fields().iter().zip(batch.columns()) {
        let name = field.name().as_str();
        if aliases.iter().any(|(alias, canonical)| *canonical == name && has(*alias)) {
            continue;
        }
        let renamed = aliases
            .iter()
            .find(|(alias, _)| *alias == name)
            .map_or(name, |(_, canonical)| *canonical);
        fields.push(field.as_ref().clone().with_name(renamed));
        columns.push(Arc::clone(column));
    }

    let options = RecordBatchOptions::new().with_row_count(Some(batch.num_rows()));
    Ok(RecordBatch::try_new_with_options(
        Arc::new(Schema::new(fields)),
        columns,
        &options,
    )?)
}
