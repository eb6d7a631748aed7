pub mod divergence;
pub mod loader;
pub mod profile;
pub mod types;

pub use self::types::{
    AlleleDomain, Cohort, FrequencyDistribution, Individual, Pool, TargetDistribution,
};
use crate::error::SpResult;

/// Scores cohorts against a fixed target distribution.
#[derive(Debug, Clone)]
pub struct Scorer {
    target: TargetDistribution,
}

impl Scorer {
    pub fn new(target: TargetDistribution) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &TargetDistribution {
        &self.target
    }

    pub fn domain(&self) -> &AlleleDomain {
        self.target.domain()
    }

    pub fn profile(&self, cohort: &Cohort, pool: &Pool) -> FrequencyDistribution {
        profile::compute(cohort, pool, self.target.domain())
    }

    pub fn score_profile(&self, dist: &FrequencyDistribution) -> SpResult<f64> {
        divergence::score(dist, &self.target)
    }

    /// Full profile and score of `cohort`, recomputed from scratch.
    pub fn score_cohort(&self, cohort: &Cohort, pool: &Pool) -> SpResult<f64> {
        self.score_profile(&self.profile(cohort, pool))
    }
}
