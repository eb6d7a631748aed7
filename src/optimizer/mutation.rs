use crate::error::{SampPickError, SpResult};
use crate::scorer::{Cohort, Pool};
use fastrand::Rng;

/// `amount` distinct indices from `0..len`, uniformly, via a partial
/// Fisher-Yates shuffle.
pub fn sample_distinct(rng: &mut Rng, len: usize, amount: usize) -> Vec<usize> {
    let amount = amount.min(len);
    let mut indices: Vec<usize> = (0..len).collect();
    for i in 0..amount {
        let j = rng.usize(i..len);
        indices.swap(i, j);
    }
    indices.truncate(amount);
    indices
}

/// Draws `size` distinct donors from the pool.
pub fn initial(rng: &mut Rng, pool: &Pool, size: usize) -> SpResult<Cohort> {
    if size > pool.len() {
        return Err(SampPickError::Configuration(format!(
            "cannot draw {} donors from a pool of {}",
            size,
            pool.len()
        )));
    }
    Ok(Cohort::from_positions(sample_distinct(rng, pool.len(), size)))
}

/// Replaces `changes` distinct positions of `cohort` with donors from outside
/// the cohort.
///
/// The outside set is computed once per call, so with `changes > 1` the same
/// donor can land on more than one position.
pub fn perturb(rng: &mut Rng, cohort: &Cohort, pool: &Pool, changes: usize) -> SpResult<Cohort> {
    if changes == 0 || changes > cohort.len() {
        return Err(SampPickError::Configuration(format!(
            "changes must be between 1 and the cohort size {}, got {}",
            cohort.len(),
            changes
        )));
    }

    let targets = sample_distinct(rng, cohort.len(), changes);

    let mut in_cohort = vec![false; pool.len()];
    for &p in cohort.positions() {
        if let Some(flag) = in_cohort.get_mut(p) {
            *flag = true;
        }
    }
    let outside: Vec<usize> = (0..pool.len()).filter(|&p| !in_cohort[p]).collect();
    if outside.is_empty() {
        return Err(SampPickError::Configuration(
            "no donors left outside the cohort to swap in".to_string(),
        ));
    }

    let mut members = cohort.positions().to_vec();
    for slot in targets {
        members[slot] = outside[rng.usize(0..outside.len())];
    }
    Ok(Cohort::from_positions(members))
}
