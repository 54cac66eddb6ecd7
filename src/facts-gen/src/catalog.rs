use std::collections::HashSet;
use std::io;

use serde::Deserialize;
use tracing::debug;
use tracing::info;

use crate::error::FactsGenError;
use crate::error::Result;

pub const REQUIRED_COLUMNS: [&str; 6] = [
    "show_id",
    "title",
    "type",
    "release_year",
    "rating",
    "listed_in",
];

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct CSVTitle {
    show_id: Option<String>,
    title: String,
    #[serde(rename = "type")]
    typ: String,
    #[serde(deserialize_with = "csv::invalid_option")]
    release_year: Option<f64>,
    rating: String,
    listed_in: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Title {
    pub show_key: String,
    pub name: String,
    pub category: String,
    pub release_year: Option<i32>,
    pub rating: String,
    pub genres: Vec<String>,
}

impl Title {
    pub fn new(show_key: impl Into<String>, release_year: Option<i32>) -> Self {
        Self {
            show_key: show_key.into(),
            release_year,
            ..Default::default()
        }
    }
}

/// Deduplicated titles with their popularity weights, aligned by index.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub titles: Vec<Title>,
    pub weights: Vec<f64>,
}

impl Catalog {
    pub fn try_new_from_csv<R: io::Read>(rdr: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(rdr);
        let headers = rdr.headers()?.clone();
        for col in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == col) {
                return Err(FactsGenError::MissingColumn(col.to_string()));
            }
        }

        let mut titles = Vec::with_capacity(10000);
        let mut seen = HashSet::new();
        let mut missing_keys = 0;
        let mut duplicate_keys = 0;
        for res in rdr.records() {
            // ragged rows are padded with empty fields or cut to the header width
            let mut record = res?;
            record.truncate(headers.len());
            while record.len() < headers.len() {
                record.push_field("");
            }
            let rec: CSVTitle = record.deserialize(Some(&headers))?;
            let show_key = match rec.show_id {
                Some(key) if !key.is_empty() => key,
                _ => {
                    missing_keys += 1;
                    continue;
                }
            };
            if !seen.insert(show_key.clone()) {
                duplicate_keys += 1;
                continue;
            }

            titles.push(Title {
                show_key,
                name: rec.title,
                category: rec.typ,
                release_year: rec
                    .release_year
                    .filter(|y| y.is_finite())
                    .map(|y| y as i32),
                rating: rec.rating,
                genres: rec
                    .listed_in
                    .split(',')
                    .map(|g| g.trim())
                    .filter(|g| !g.is_empty())
                    .map(|g| g.to_string())
                    .collect(),
            });
        }
        titles.shrink_to_fit();

        debug!("dropped {missing_keys} title(s) without key, {duplicate_keys} duplicate(s)");
        let catalog = Self::try_new(titles)?;
        info!("loaded {} titles", catalog.len());

        Ok(catalog)
    }

    pub fn try_new(titles: Vec<Title>) -> Result<Self> {
        if titles.is_empty() {
            return Err(FactsGenError::EmptyCatalog);
        }

        let years = titles.iter().map(|t| t.release_year).collect::<Vec<_>>();
        let weights = popularity_weights(&years);

        Ok(Self { titles, weights })
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

fn median(values: &[i32]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.)
    } else {
        Some(sorted[mid] as f64)
    }
}

/// Newer titles are slightly more popular: weight grows linearly with release
/// year, the oldest title getting 1. Missing years take the median.
pub fn popularity_weights(years: &[Option<i32>]) -> Vec<f64> {
    let present = years.iter().flatten().copied().collect::<Vec<_>>();
    let Some(fill) = median(&present) else {
        return vec![1. / years.len() as f64; years.len()];
    };

    let filled = years
        .iter()
        .map(|y| y.map(|v| v as f64).unwrap_or(fill))
        .collect::<Vec<_>>();
    let min = filled.iter().copied().fold(f64::INFINITY, f64::min);
    let raw = filled.iter().map(|y| y - min + 1.).collect::<Vec<_>>();
    let total: f64 = raw.iter().sum();

    raw.into_iter().map(|w| w / total).collect()
}
