use std::fs;
use std::path::Path;
use std::path::PathBuf;

use bytesize::ByteSize;
use serde::Serialize;
use strum_macros::Display;
use tracing::debug;

use crate::calendar;
use crate::error::Result;
use crate::scenario::Dataset;
use crate::subscriptions;
use crate::viewing;

pub const DIM_DATE: &str = "DimDate";
pub const FACT_VIEWING_DAILY: &str = "FactViewingDaily";
pub const FACT_SUBSCRIPTIONS_MONTHLY: &str = "FactSubscriptionsMonthly";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum Format {
    #[default]
    #[strum(serialize = "csv")]
    CSV,
    #[strum(serialize = "tsv")]
    TSV,
}

impl Format {
    pub fn delimiter(&self) -> u8 {
        match self {
            Format::CSV => b',',
            Format::TSV => b'\t',
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Format::CSV => "csv",
            Format::TSV => "tsv",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    pub path: PathBuf,
    pub rows: usize,
    pub size: ByteSize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub dim_date: FileSummary,
    pub viewing: FileSummary,
    pub subscriptions: FileSummary,
}

/// Writes a header line followed by one line per row. The header is written
/// even when there are no rows.
pub fn write_table<T: Serialize>(
    path: &Path,
    format: Format,
    columns: &[&str],
    rows: &[T],
) -> Result<FileSummary> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(format.delimiter())
        .has_headers(false)
        .from_path(path)?;
    wtr.write_record(columns)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;

    let size = ByteSize::b(fs::metadata(path)?.len());
    debug!("written {:?}: {} rows, {}", path, rows.len(), size);

    Ok(FileSummary {
        path: path.to_path_buf(),
        rows: rows.len(),
        size,
    })
}

pub fn table_path(dir: &Path, table: &str, format: Format) -> PathBuf {
    dir.join(format!("{table}.{}", format.extension()))
}

pub fn write_dataset(dir: &Path, format: Format, dataset: &Dataset) -> Result<Summary> {
    fs::create_dir_all(dir)?;

    Ok(Summary {
        dim_date: write_table(
            &table_path(dir, DIM_DATE, format),
            format,
            &calendar::COLUMNS,
            &dataset.dim_date,
        )?,
        viewing: write_table(
            &table_path(dir, FACT_VIEWING_DAILY, format),
            format,
            &viewing::COLUMNS,
            &dataset.viewing,
        )?,
        subscriptions: write_table(
            &table_path(dir, FACT_SUBSCRIPTIONS_MONTHLY, format),
            format,
            &subscriptions::COLUMNS,
            &dataset.subscriptions,
        )?,
    })
}
