use std::collections::BTreeMap;

use chrono::Datelike;
use chrono::NaiveDate;
use enum_iterator::all;
use rand::Rng;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::calendar::year_month;
use crate::error::FactsGenError;
use crate::error::Result;
use crate::probability;
use crate::segments::Country;

pub const MIN_SUBSCRIBERS: i64 = 1000;
pub const ARPU_STD_DEV: f64 = 0.35;

pub const COLUMNS: [&str; 9] = [
    "MonthStartDate",
    "MonthKey",
    "YearMonth",
    "Country",
    "Subscribers",
    "NewSubscribers",
    "ChurnedSubscribers",
    "ARPU",
    "Revenue",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscriptionRow {
    #[serde(rename = "MonthStartDate")]
    pub month_start_date: NaiveDate,
    #[serde(rename = "MonthKey")]
    pub month_key: i32,
    #[serde(rename = "YearMonth")]
    pub year_month: String,
    #[serde(rename = "Country")]
    pub country: Country,
    #[serde(rename = "Subscribers")]
    pub subscribers: i64,
    #[serde(rename = "NewSubscribers")]
    pub new_subscribers: i64,
    #[serde(rename = "ChurnedSubscribers")]
    pub churned_subscribers: i64,
    #[serde(rename = "ARPU")]
    pub arpu: Decimal,
    #[serde(rename = "Revenue")]
    pub revenue: Decimal,
}

/// Subscriber count per country, carried from one month into the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriberState {
    subscribers: BTreeMap<Country, i64>,
}

impl SubscriberState {
    pub fn new(subscribers: BTreeMap<Country, i64>) -> Self {
        Self { subscribers }
    }

    pub fn subscribers(&self, country: Country) -> i64 {
        self.subscribers
            .get(&country)
            .copied()
            .unwrap_or_else(|| country.starting_subscribers())
    }

    fn set(&mut self, country: Country, subscribers: i64) {
        self.subscribers.insert(country, subscribers);
    }
}

impl Default for SubscriberState {
    fn default() -> Self {
        Self::new(
            all::<Country>()
                .map(|c| (c, c.starting_subscribers()))
                .collect(),
        )
    }
}

// holiday spike: more sign-ups, fewer cancellations
pub fn season_multiplier(month: u32) -> f64 {
    match month {
        11 | 12 | 1 => 1.08,
        _ => 1.,
    }
}

fn to_money(v: f64) -> Result<Decimal> {
    Decimal::from_f64_retain(v)
        .map(|d| d.round_dp(2))
        .ok_or_else(|| FactsGenError::General(format!("can't represent {v} as decimal")))
}

/// One month of one country. Depends only on the country's previous count.
pub fn step_country<R: Rng + ?Sized>(
    rng: &mut R,
    month: NaiveDate,
    country: Country,
    prev: i64,
) -> Result<SubscriptionRow> {
    let season = season_multiplier(month.month());

    let growth: f64 = rng.gen_range(0.015..0.03);
    let churn: f64 = rng.gen_range(0.010..0.022);
    let new_subscribers = (prev as f64 * growth * season) as i64;
    let churned_subscribers = (prev as f64 * churn / season) as i64;
    let subscribers = (prev + new_subscribers - churned_subscribers).max(MIN_SUBSCRIBERS);

    let arpu = probability::normal(rng, country.base_arpu(), ARPU_STD_DEV)?;
    let revenue = subscribers as f64 * arpu;

    Ok(SubscriptionRow {
        month_start_date: month,
        month_key: month.year() * 10000 + month.month() as i32 * 100 + 1,
        year_month: year_month(month),
        country,
        subscribers,
        new_subscribers,
        churned_subscribers,
        arpu: to_money(arpu)?,
        revenue: to_money(revenue)?,
    })
}

/// Advances every country by one month and returns the updated state.
pub fn step_month<R: Rng + ?Sized>(
    rng: &mut R,
    month: NaiveDate,
    mut state: SubscriberState,
) -> Result<(Vec<SubscriptionRow>, SubscriberState)> {
    let mut rows = Vec::with_capacity(all::<Country>().count());
    for country in all::<Country>() {
        let row = step_country(rng, month, country, state.subscribers(country))?;
        state.set(country, row.subscribers);
        rows.push(row);
    }

    Ok((rows, state))
}

pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    months: &[NaiveDate],
    mut state: SubscriberState,
) -> Result<(Vec<SubscriptionRow>, SubscriberState)> {
    let mut rows = Vec::with_capacity(months.len() * all::<Country>().count());
    for month in months {
        let (month_rows, next) = step_month(rng, *month, state)?;
        rows.extend(month_rows);
        state = next;
    }

    Ok((rows, state))
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn month(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    #[test]
    fn test_default_state() {
        let state = SubscriberState::default();
        assert_eq!(state.subscribers(Country::Canada), 1_200_000);
        assert_eq!(state.subscribers(Country::UnitedStates), 6_500_000);
        assert_eq!(state.subscribers(Country::India), 5_200_000);
        assert_eq!(state.subscribers(Country::UnitedKingdom), 2_100_000);
        assert_eq!(state.subscribers(Country::Australia), 900_000);
    }

    #[test]
    fn test_step_country() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(10);
        let row = step_country(&mut rng, month(2023, 12), Country::India, 5_200_000)?;

        assert_eq!(row.month_key, 20231201);
        assert_eq!(row.year_month, "2023-12");
        assert_eq!(row.country, Country::India);
        assert!(row.new_subscribers >= (5_200_000. * 0.015 * 1.08) as i64);
        assert!(row.new_subscribers <= (5_200_000. * 0.03 * 1.08) as i64);
        assert!(row.churned_subscribers >= (5_200_000. * 0.010 / 1.08) as i64);
        assert!(row.churned_subscribers <= (5_200_000. * 0.022 / 1.08) as i64);
        assert_eq!(
            row.subscribers,
            5_200_000 + row.new_subscribers - row.churned_subscribers
        );
        assert!(row.arpu.scale() <= 2);
        assert!(row.revenue.scale() <= 2);

        Ok(())
    }

    #[test]
    fn test_subscribers_floor() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let row = step_country(&mut rng, month(2023, 6), Country::Australia, 10)?;
            assert_eq!(row.subscribers, MIN_SUBSCRIBERS);
        }

        Ok(())
    }

    #[test]
    fn test_state_is_threaded() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(12);
        let months = vec![month(2023, 1), month(2023, 2), month(2023, 3)];
        let (rows, state) = generate(&mut rng, &months, SubscriberState::default())?;

        assert_eq!(rows.len(), 15);
        for country in all::<Country>() {
            let series = rows
                .iter()
                .filter(|r| r.country == country)
                .collect::<Vec<_>>();
            assert_eq!(series.len(), 3);
            for pair in series.windows(2) {
                assert_eq!(
                    pair[1].subscribers,
                    (pair[0].subscribers + pair[1].new_subscribers - pair[1].churned_subscribers)
                        .max(MIN_SUBSCRIBERS)
                );
            }
            assert_eq!(state.subscribers(country), series[2].subscribers);
        }

        Ok(())
    }

    #[test]
    fn test_season_multiplier() {
        assert_eq!(season_multiplier(1), 1.08);
        assert_eq!(season_multiplier(11), 1.08);
        assert_eq!(season_multiplier(12), 1.08);
        assert_eq!(season_multiplier(7), 1.);
    }
}
