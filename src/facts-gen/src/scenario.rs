use std::time::Duration;
use std::time::Instant;

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;
use tracing::info;

use crate::calendar;
use crate::calendar::DateRow;
use crate::catalog::Catalog;
use crate::error::Result;
use crate::subscriptions;
use crate::subscriptions::SubscriberState;
use crate::subscriptions::SubscriptionRow;
use crate::viewing;
use crate::viewing::ViewingRow;

pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone)]
pub struct Config {
    pub seed: u64,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub viewing: viewing::Config,
}

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub dim_date: Vec<DateRow>,
    pub viewing: Vec<ViewingRow>,
    pub subscriptions: Vec<SubscriptionRow>,
}

pub struct Scenario {
    pub rng: StdRng,
    pub catalog: Catalog,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub viewing: viewing::Config,
}

impl Scenario {
    pub fn new(cfg: Config, catalog: Catalog) -> Self {
        Self {
            rng: StdRng::seed_from_u64(cfg.seed),
            catalog,
            from: cfg.from,
            to: cfg.to,
            viewing: cfg.viewing,
        }
    }

    /// Runs every stage against the one generator. Viewing draws all come
    /// before subscription draws, so a seed pins the whole dataset.
    pub fn run(&mut self) -> Result<Dataset> {
        let start = Instant::now();

        let dim_date = calendar::build_dim_date(self.from, self.to);
        debug!("date dimension: {} day(s)", dim_date.len());

        info!("generating daily viewing...");
        let viewing = viewing::generate(&mut self.rng, &self.viewing, &self.catalog, &dim_date)?;

        info!("generating monthly subscriptions...");
        let months = calendar::months(self.from, self.to);
        let (subscriptions, state) =
            subscriptions::generate(&mut self.rng, &months, SubscriberState::default())?;
        debug!("closing subscribers: {:?}", state);

        info!(
            "generated in {}",
            humantime::format_duration(Duration::from_millis(start.elapsed().as_millis() as u64))
        );

        Ok(Dataset {
            dim_date,
            viewing,
            subscriptions,
        })
    }
}
