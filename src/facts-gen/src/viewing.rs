use chrono::NaiveDate;
use enum_iterator::all;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::calendar::day_multiplier;
use crate::calendar::DateRow;
use crate::catalog::Catalog;
use crate::error::FactsGenError;
use crate::error::Result;
use crate::probability;
use crate::segments::Country;
use crate::segments::Device;

pub const DEFAULT_BASE_VIEWERS: u64 = 45000;
pub const DEFAULT_TITLES_PER_SEGMENT: usize = 60;
// below 1 the allocation concentrates on a few hits
pub const ALLOCATION_CONCENTRATION: f64 = 0.6;
pub const SESSIONS_STD_DEV: f64 = 0.15;
pub const MINUTES_STD_DEV: f64 = 6.;

pub const MIN_VIEWERS: i64 = 1;
pub const MIN_SESSIONS: i64 = 1;
pub const MIN_WATCH_MINUTES: i64 = 5;

pub const COLUMNS: [&str; 8] = [
    "Date",
    "DateKey",
    "ShowKey",
    "Country",
    "Device",
    "UniqueViewers",
    "Sessions",
    "WatchMinutes",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ViewingRow {
    pub date: NaiveDate,
    pub date_key: i32,
    pub show_key: String,
    pub country: Country,
    pub device: Device,
    pub unique_viewers: i64,
    pub sessions: i64,
    pub watch_minutes: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleMetrics {
    /// Index into the catalog.
    pub title: usize,
    pub viewers: i64,
    pub sessions: i64,
    pub watch_minutes: i64,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub base_viewers: u64,
    pub titles_per_segment: usize,
    pub progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_viewers: DEFAULT_BASE_VIEWERS,
            titles_per_segment: DEFAULT_TITLES_PER_SEGMENT,
            progress: false,
        }
    }
}

pub fn day_total_viewers(base_viewers: u64, date: NaiveDate) -> i64 {
    (base_viewers as f64 * day_multiplier(date)) as i64
}

pub fn country_viewers(day_total: i64, country: Country) -> i64 {
    (day_total as f64 * country.viewer_share()) as i64
}

pub fn device_viewers(country_total: i64, device: Device) -> i64 {
    (country_total as f64 * device.viewer_share()) as i64
}

/// Metrics for one (day, country, device) segment. Titles come out in the
/// order they were sampled; every random draw happens here, in that order.
pub fn generate_segment<R: Rng + ?Sized>(
    rng: &mut R,
    catalog: &Catalog,
    device: Device,
    viewers: i64,
    titles_per_segment: usize,
) -> Result<Vec<TitleMetrics>> {
    let chosen =
        probability::sample_without_replacement(rng, &catalog.weights, titles_per_segment)?;
    let alloc =
        probability::dirichlet_allocation(rng, ALLOCATION_CONCENTRATION, titles_per_segment)?;
    let usage = device.usage();

    let mut res = Vec::with_capacity(chosen.len());
    for (title, share) in chosen.into_iter().zip(alloc) {
        let viewers = ((share * viewers as f64) as i64).max(MIN_VIEWERS);

        let sessions_per_viewer = probability::normal(rng, usage.avg_sessions, SESSIONS_STD_DEV)?;
        let sessions =
            probability::round_even(viewers as f64 * sessions_per_viewer).max(MIN_SESSIONS);

        let minutes_per_session = probability::normal(rng, usage.avg_minutes, MINUTES_STD_DEV)?;
        let watch_minutes =
            probability::round_even(sessions as f64 * minutes_per_session).max(MIN_WATCH_MINUTES);

        res.push(TitleMetrics {
            title,
            viewers,
            sessions,
            watch_minutes,
        });
    }

    Ok(res)
}

fn progress_bar(cfg: &Config, days: usize) -> Result<ProgressBar> {
    if !cfg.progress {
        return Ok(ProgressBar::hidden());
    }

    let pb = ProgressBar::new(days as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} days ({eta})",
        )
        .map_err(|err| FactsGenError::General(err.to_string()))?
        .progress_chars("#>-"),
    );

    Ok(pb)
}

pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    cfg: &Config,
    catalog: &Catalog,
    dim_date: &[DateRow],
) -> Result<Vec<ViewingRow>> {
    debug!("sampling from {} titles", catalog.len());
    let segments = all::<Country>().count() * all::<Device>().count();
    let mut rows = Vec::with_capacity(dim_date.len() * segments * cfg.titles_per_segment);
    let pb = progress_bar(cfg, dim_date.len())?;

    for day in dim_date {
        let day_total = day_total_viewers(cfg.base_viewers, day.date);
        for country in all::<Country>() {
            let c_viewers = country_viewers(day_total, country);
            for device in all::<Device>() {
                let d_viewers = device_viewers(c_viewers, device);
                let metrics =
                    generate_segment(rng, catalog, device, d_viewers, cfg.titles_per_segment)?;
                for m in metrics {
                    rows.push(ViewingRow {
                        date: day.date,
                        date_key: day.date_key,
                        show_key: catalog.titles[m.title].show_key.clone(),
                        country,
                        device,
                        unique_viewers: m.viewers,
                        sessions: m.sessions,
                        watch_minutes: m.watch_minutes,
                    });
                }
            }
        }
        debug!("{}: {} viewers", day.date, day_total);
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::catalog::Title;

    fn catalog(n: usize) -> Catalog {
        let titles = (0..n)
            .map(|i| Title::new(format!("s{i}"), Some(1990 + (i % 30) as i32)))
            .collect();
        Catalog::try_new(titles).unwrap()
    }

    #[test]
    fn test_viewer_split() {
        // saturday in july: 45000 * 1.25 * 1.12
        let date = NaiveDate::from_ymd_opt(2023, 7, 1).unwrap();
        let total = day_total_viewers(45000, date);
        assert_eq!(total, 63000);
        assert_eq!(country_viewers(total, Country::UnitedStates), 18900);
        assert_eq!(device_viewers(18900, Device::TV), 7560);
        assert_eq!(device_viewers(18900, Device::Tablet), 1323);
    }

    #[test]
    fn test_segment_metrics() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(7);
        let cat = catalog(100);
        let metrics = generate_segment(&mut rng, &cat, Device::Mobile, 5000, 60)?;

        assert_eq!(metrics.len(), 60);
        assert_eq!(metrics.iter().map(|m| m.title).collect::<HashSet<_>>().len(), 60);
        for m in metrics.iter() {
            assert!(m.viewers >= MIN_VIEWERS);
            assert!(m.sessions >= MIN_SESSIONS);
            assert!(m.watch_minutes >= MIN_WATCH_MINUTES);
        }
        // floors only ever lose viewers, clamps add at most one per title
        let total: i64 = metrics.iter().map(|m| m.viewers).sum();
        assert!(total <= 5000 + 60);

        Ok(())
    }

    #[test]
    fn test_segment_without_viewers_is_clamped() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(8);
        let metrics = generate_segment(&mut rng, &catalog(60), Device::Tablet, 0, 60)?;
        assert!(metrics.iter().all(|m| m.viewers == 1));
        assert!(metrics.iter().all(|m| m.sessions >= 1 && m.watch_minutes >= 5));

        Ok(())
    }

    #[test]
    fn test_segment_needs_enough_titles() {
        let mut rng = StdRng::seed_from_u64(9);
        let res = generate_segment(&mut rng, &catalog(59), Device::TV, 1000, 60);
        assert!(matches!(res, Err(FactsGenError::NotEnoughTitles { .. })));
    }
}
