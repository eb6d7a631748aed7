pub mod mutation;
pub mod runner;

pub use self::runner::{
    AnnealingOptions, AnnealingOutcome, ProgressCallback, ProgressLogger, ProgressReport, Silent,
};
use crate::error::{SampPickError, SpResult};
use crate::scorer::{Cohort, Pool, Scorer};
use fastrand::Rng;

pub const INITIAL_TEMPERATURE: f64 = 1.0;
pub const PROGRESS_INTERVAL: usize = 1000;
/// The score history holds one entry per iteration plus the initial score.
pub const MAX_ITERATIONS: usize = isize::MAX as usize / std::mem::size_of::<f64>() - 1;

#[derive(Debug, Clone)]
pub struct SearchState {
    pub cohort: Cohort,
    pub score: f64,
    pub temperature: f64,
    pub iteration: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    pub candidate_score: f64,
    pub draw: f64,
    pub accepted: bool,
}

/// A candidate replaces the current cohort when it scores strictly lower, or
/// when the uniform draw falls under the temperature. How much worse a
/// candidate is plays no part.
#[inline(always)]
pub fn accepts(candidate_score: f64, current_score: f64, draw: f64, temperature: f64) -> bool {
    candidate_score < current_score || draw < temperature
}

/// Temperature after `iteration` geometric cooling steps.
pub fn temperature_at(alpha: f64, iteration: usize) -> f64 {
    INITIAL_TEMPERATURE * (1.0 - alpha).powf(iteration as f64)
}

pub struct AnnealingEngine<'a> {
    scorer: &'a Scorer,
    pool: &'a Pool,
    options: AnnealingOptions,
}

impl<'a> AnnealingEngine<'a> {
    /// Checks every sizing precondition up front so a bad configuration fails
    /// before the first draw.
    pub fn new(scorer: &'a Scorer, pool: &'a Pool, options: AnnealingOptions) -> SpResult<Self> {
        let n = options.cohort_size;

        if scorer.target().is_empty() {
            return Err(SampPickError::Configuration(
                "target distribution has no non-zero entries".to_string(),
            ));
        }
        if n == 0 {
            return Err(SampPickError::Configuration(
                "sample size must be at least 1".to_string(),
            ));
        }
        if n >= pool.len() {
            return Err(SampPickError::Configuration(format!(
                "Please choose a sample size less than the total number available \
                 (requested {}, available {}).",
                n,
                pool.len()
            )));
        }
        if options.changes == 0 || options.changes > n {
            return Err(SampPickError::Configuration(format!(
                "changes must be between 1 and the sample size {}, got {}",
                n, options.changes
            )));
        }
        if pool.len() - n < options.changes {
            return Err(SampPickError::Configuration(format!(
                "only {} donors remain outside the sample, fewer than {} changes",
                pool.len() - n,
                options.changes
            )));
        }
        if options.iterations > MAX_ITERATIONS {
            return Err(SampPickError::Configuration(format!(
                "iterations must be at most {}, got {}",
                MAX_ITERATIONS, options.iterations
            )));
        }
        if !(0.0..1.0).contains(&options.alpha) {
            return Err(SampPickError::Configuration(format!(
                "alpha must be in [0, 1), got {}",
                options.alpha
            )));
        }

        Ok(Self {
            scorer,
            pool,
            options,
        })
    }

    pub fn initial_state(&self, rng: &mut Rng) -> SpResult<SearchState> {
        let cohort = mutation::initial(rng, self.pool, self.options.cohort_size)?;
        let score = self.scorer.score_cohort(&cohort, self.pool)?;
        Ok(SearchState {
            cohort,
            score,
            temperature: INITIAL_TEMPERATURE,
            iteration: 0,
        })
    }

    /// One perturb, score, accept/reject, cool transition.
    pub fn step(&self, state: &mut SearchState, rng: &mut Rng) -> SpResult<StepReport> {
        let candidate = mutation::perturb(rng, &state.cohort, self.pool, self.options.changes)?;
        let candidate_score = self.scorer.score_cohort(&candidate, self.pool)?;
        let draw = rng.f64();

        let accepted = accepts(candidate_score, state.score, draw, state.temperature);
        if accepted {
            state.cohort = candidate;
            state.score = candidate_score;
        }

        state.temperature *= 1.0 - self.options.alpha;
        state.iteration += 1;

        Ok(StepReport {
            candidate_score,
            draw,
            accepted,
        })
    }

    pub fn run<CB: ProgressCallback + ?Sized>(
        &self,
        rng: &mut Rng,
        callback: &CB,
    ) -> SpResult<AnnealingOutcome> {
        let total = self.options.iterations;
        let mut state = self.initial_state(rng)?;

        let mut history = Vec::with_capacity(total + 1);
        history.push(state.score);
        let mut best_score = state.score;
        let mut accepted = 0;

        while state.iteration < total {
            let step = self.step(&mut state, rng)?;
            history.push(state.score);
            if step.accepted {
                accepted += 1;
            }
            best_score = best_score.min(state.score);

            if state.iteration % PROGRESS_INTERVAL == 0 {
                callback.on_progress(&ProgressReport {
                    iteration: state.iteration,
                    candidate_score: step.candidate_score,
                    current_score: state.score,
                    draw: step.draw,
                    temperature: state.temperature,
                    remaining: total - state.iteration,
                });
            }
        }

        Ok(AnnealingOutcome {
            cohort: state.cohort,
            score: state.score,
            best_score,
            history,
            accepted,
        })
    }
}
