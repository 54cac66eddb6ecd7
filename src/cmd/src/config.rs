use std::path::Path;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::ValueEnum;
use dateparser::DateTimeUtc;
use facts_gen::output::Format;
use facts_gen::scenario;
use facts_gen::viewing;
use serde_derive::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing::Level;

use crate::error::Error;
use crate::error::Result;

pub const ENV_PREFIX: &str = "FACTS";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Data {
    pub titles_path: PathBuf,
    pub out_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Period {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Generator {
    pub seed: u64,
    pub base_viewers: u64,
    pub titles_per_segment: usize,
    #[serde(default)]
    pub progress: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Output {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Log {
    pub level: LogLevel,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub data: Data,
    pub period: Period,
    pub generator: Generator,
    pub output: Output,
    pub log: Log,
}

impl Config {
    /// Built-in defaults, then the optional file, then `FACTS_*` variables
    /// (`FACTS_GENERATOR__SEED=7`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .set_default("data.titles_path", "../netflix_titles.csv")?
            .set_default("data.out_path", "data/generated")?
            .set_default("period.from", "2023-01-01")?
            .set_default("period.to", "2024-12-31")?
            .set_default("generator.seed", scenario::DEFAULT_SEED as i64)?
            .set_default("generator.base_viewers", viewing::DEFAULT_BASE_VIEWERS as i64)?
            .set_default(
                "generator.titles_per_segment",
                viewing::DEFAULT_TITLES_PER_SEGMENT as i64,
            )?
            .set_default("generator.progress", false)?
            .set_default("output.format", "csv")?
            .set_default("log.level", "info")?;

        if let Some(path) = path {
            if !path.try_exists()? {
                return Err(Error::FileNotFound(format!("config {path:?} doesn't exist")));
            }
            builder = builder.add_source(config::File::from(path));
        }

        let cfg = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(cfg.try_deserialize()?)
    }
}

/// Validated settings for one generator run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub titles_path: PathBuf,
    pub out_path: PathBuf,
    pub format: Format,
    pub log_level: LevelFilter,
    pub scenario: scenario::Config,
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }

    Ok(s.parse::<DateTimeUtc>()?.0.date_naive())
}

impl TryInto<Settings> for Config {
    type Error = Error;

    fn try_into(self) -> Result<Settings> {
        if self.generator.titles_per_segment == 0 {
            return Err(Error::BadRequest(
                "generator.titles_per_segment must be positive".to_string(),
            ));
        }

        Ok(Settings {
            titles_path: self.data.titles_path,
            out_path: self.data.out_path,
            format: self.output.format.into(),
            log_level: self.log.level.into(),
            scenario: scenario::Config {
                seed: self.generator.seed,
                from: parse_date(self.period.from.as_str())?,
                to: parse_date(self.period.to.as_str())?,
                viewing: viewing::Config {
                    base_viewers: self.generator.base_viewers,
                    titles_per_segment: self.generator.titles_per_segment,
                    progress: self.generator.progress,
                },
            },
        })
    }
}

#[derive(Deserialize, Copy, Debug, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[serde(rename = "csv")]
    Csv,
    #[serde(rename = "tsv")]
    Tsv,
}

impl From<OutputFormat> for Format {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Csv => Format::CSV,
            OutputFormat::Tsv => Format::TSV,
        }
    }
}

#[derive(Deserialize, Copy, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum LogLevel {
    #[serde(rename = "trace")]
    Trace,
    #[serde(rename = "debug")]
    Debug,
    #[serde(rename = "info")]
    Info,
    #[serde(rename = "warn")]
    Warn,
    #[serde(rename = "error")]
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
        .into()
    }
}
