use crate::config::Config;
use crate::error::SpResult;
use crate::optimizer::AnnealingEngine;
use crate::scorer::{Cohort, Pool, Scorer};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnealingOptions {
    pub cohort_size: usize,
    pub iterations: usize,
    pub alpha: f64,
    pub changes: usize,
}

impl Default for AnnealingOptions {
    fn default() -> Self {
        Self {
            cohort_size: 50,
            iterations: 10_000,
            alpha: 0.0007,
            changes: 1,
        }
    }
}

impl From<&Config> for AnnealingOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            cohort_size: cfg.search.size,
            iterations: cfg.search.iterations,
            alpha: cfg.search.alpha,
            changes: cfg.search.changes,
        }
    }
}

/// Snapshot handed to a [`ProgressCallback`] every
/// [`PROGRESS_INTERVAL`](crate::optimizer::PROGRESS_INTERVAL) iterations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressReport {
    pub iteration: usize,
    pub candidate_score: f64,
    pub current_score: f64,
    pub draw: f64,
    pub temperature: f64,
    pub remaining: usize,
}

/// Receives periodic updates during the search. The search always runs its
/// full budget; callbacks only observe.
pub trait ProgressCallback {
    fn on_progress(&self, report: &ProgressReport);
}

/// Discards progress.
pub struct Silent;

impl ProgressCallback for Silent {
    fn on_progress(&self, _report: &ProgressReport) {}
}

/// Logs a progress line when enabled (`--verbose`).
pub struct ProgressLogger {
    pub enabled: bool,
}

impl ProgressCallback for ProgressLogger {
    fn on_progress(&self, r: &ProgressReport) {
        if self.enabled {
            info!(
                "new: {:.6} | current: {:.6} | random: {:.6} | temp: {:.6} | left: {}",
                r.candidate_score, r.current_score, r.draw, r.temperature, r.remaining
            );
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnnealingOutcome {
    pub cohort: Cohort,
    pub score: f64,
    /// Lowest score the search held at any point.
    pub best_score: f64,
    /// Initial score followed by the post-decision score of every iteration.
    pub history: Vec<f64>,
    pub accepted: usize,
}

/// Runs one annealing search with a generator seeded from `seed`, or from
/// entropy when `seed` is `None`.
pub fn select_cohort<CB: ProgressCallback + ?Sized>(
    scorer: &Scorer,
    pool: &Pool,
    options: AnnealingOptions,
    seed: Option<u64>,
    callback: &CB,
) -> SpResult<AnnealingOutcome> {
    let engine = AnnealingEngine::new(scorer, pool, options)?;
    let mut rng = if let Some(s) = seed {
        fastrand::Rng::with_seed(s)
    } else {
        fastrand::Rng::new()
    };
    engine.run(&mut rng, callback)
}
