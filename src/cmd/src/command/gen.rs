use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use facts_gen::catalog::Catalog;
use facts_gen::output;
use facts_gen::output::Summary;
use facts_gen::scenario::Scenario;
use tracing::debug;
use tracing::info;

use crate::config::Config;
use crate::config::LogLevel;
use crate::config::OutputFormat;
use crate::config::Settings;
use crate::error::Error;
use crate::error::Result;

#[derive(Parser, Clone, Debug, Default)]
pub struct Gen {
    /// TOML file layered over the built-in defaults
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub titles_path: Option<PathBuf>,
    #[arg(long)]
    pub out_path: Option<PathBuf>,
    /// First day, inclusive
    #[arg(long)]
    pub from: Option<String>,
    /// Last day, inclusive
    #[arg(long)]
    pub to: Option<String>,
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,
    #[arg(long, default_value = "false")]
    pub progress: bool,
}

impl Gen {
    /// Command line flags win over every other source.
    pub fn apply(&self, cfg: &mut Config) {
        if let Some(v) = &self.titles_path {
            cfg.data.titles_path = v.clone();
        }
        if let Some(v) = &self.out_path {
            cfg.data.out_path = v.clone();
        }
        if let Some(v) = &self.from {
            cfg.period.from = v.clone();
        }
        if let Some(v) = &self.to {
            cfg.period.to = v.clone();
        }
        if let Some(v) = self.seed {
            cfg.generator.seed = v;
        }
        if let Some(v) = self.format {
            cfg.output.format = v;
        }
        if let Some(v) = self.log_level {
            cfg.log.level = v;
        }
        if self.progress {
            cfg.generator.progress = true;
        }
    }

    pub fn settings(&self) -> Result<Settings> {
        let mut cfg = Config::load(self.config.as_deref())?;
        self.apply(&mut cfg);

        cfg.try_into()
    }
}

pub fn start(settings: Settings) -> Result<Summary> {
    debug!("titles path: {:?}", settings.titles_path);
    debug!("out path: {:?} ({})", settings.out_path, settings.format);
    debug!(
        "period: {} - {}, seed {}",
        settings.scenario.from, settings.scenario.to, settings.scenario.seed
    );

    if !settings.titles_path.try_exists()? {
        return Err(Error::FileNotFound(format!(
            "titles path {:?} doesn't exist",
            settings.titles_path
        )));
    }

    info!("loading titles...");
    let catalog = Catalog::try_new_from_csv(File::open(&settings.titles_path)?)?;

    let mut scenario = Scenario::new(settings.scenario, catalog);
    let dataset = scenario.run()?;

    info!("writing to {:?}...", settings.out_path);
    let summary = output::write_dataset(&settings.out_path, settings.format, &dataset)?;
    for file in [&summary.dim_date, &summary.viewing, &summary.subscriptions] {
        info!("- {} ({})", file.path.display(), file.size);
    }
    info!(
        "rows: {} viewing rows; {} subscription rows",
        summary.viewing.rows, summary.subscriptions.rows
    );

    Ok(summary)
}
