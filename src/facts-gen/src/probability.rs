use rand::seq::index;
use rand::Rng;
use rand_distr::Dirichlet;
use rand_distr::Distribution;
use rand_distr::Normal;

use crate::error::FactsGenError;
use crate::error::Result;

/// Picks `amount` distinct indices into `weights`, each draw proportional to the
/// remaining weights. Zero-weight entries are never picked.
pub fn sample_without_replacement<R: Rng + ?Sized>(
    rng: &mut R,
    weights: &[f64],
    amount: usize,
) -> Result<Vec<usize>> {
    let available = weights.iter().filter(|w| **w > 0.).count();
    if available < amount {
        return Err(FactsGenError::NotEnoughTitles {
            requested: amount,
            available,
        });
    }

    let picked = index::sample_weighted(rng, weights.len(), |i| weights[i], amount)
        .map_err(|err| FactsGenError::InvalidDistribution(err.to_string()))?;

    Ok(picked.into_vec())
}

/// Splits a unit of mass across `size` buckets with a symmetric Dirichlet draw.
pub fn dirichlet_allocation<R: Rng + ?Sized>(
    rng: &mut R,
    concentration: f64,
    size: usize,
) -> Result<Vec<f64>> {
    match size {
        0 => return Ok(vec![]),
        1 => return Ok(vec![1.]),
        _ => {}
    }

    let dist = Dirichlet::new_with_size(concentration, size)
        .map_err(|err| FactsGenError::InvalidDistribution(err.to_string()))?;

    Ok(dist.sample(rng))
}

/// One draw from `Normal(mean, std_dev)`. `std_dev` must be finite and not negative.
pub fn normal<R: Rng + ?Sized>(rng: &mut R, mean: f64, std_dev: f64) -> Result<f64> {
    if std_dev < 0. {
        return Err(FactsGenError::InvalidDistribution(format!(
            "negative standard deviation {std_dev}"
        )));
    }
    let dist = Normal::new(mean, std_dev)
        .map_err(|err| FactsGenError::InvalidDistribution(err.to_string()))?;

    Ok(dist.sample(rng))
}

// half-to-even, so 2.5 -> 2 and 3.5 -> 4
pub fn round_even(v: f64) -> i64 {
    v.round_ties_even() as i64
}
