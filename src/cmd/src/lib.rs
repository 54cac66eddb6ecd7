use tracing::level_filters::LevelFilter;
use tracing_subscriber::FmtSubscriber;

use crate::error::Result;

pub mod command;
pub mod config;
pub mod error;

pub fn init_tracing(level: LevelFilter) -> Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();

    Ok(tracing::subscriber::set_global_default(subscriber)?)
}
