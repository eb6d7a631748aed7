use crate::error::{SampPickError, SpResult};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub search: SearchParams,
    #[command(flatten)]
    pub report: ReportParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Sample size desired
    #[arg(short = 's', long, default_value_t = 50)]
    pub size: usize,
    /// Number of iterations for simulated annealing
    #[arg(short = 'i', long, default_value_t = 10_000)]
    pub iterations: usize,
    /// Temperature decrease rate
    #[arg(short = 'a', long, default_value_t = 0.0007)]
    pub alpha: f64,
    /// Number of donors replaced on each iteration
    #[arg(short = 'c', long, default_value_t = 1)]
    pub changes: usize,
    /// Seed for a reproducible run
    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
    /// Log progress every 1000 iterations
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            size: 50,
            iterations: 10_000,
            alpha: 0.0007,
            changes: 1,
            seed: None,
            verbose: false,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportParams {
    /// Background distribution CSV (allele,frequency)
    #[arg(short = 't', long, default_value = "NA_DRB1_frequencies.csv")]
    pub target: String,
    /// Reference cohort CSV to compare against (id,allele1,allele2)
    #[arg(short = 'r', long)]
    pub reference: Option<String>,
    /// Base name for the CSV and PNG files created
    #[arg(short = 'o', long, default_value = "Results")]
    pub outfile: String,
    /// Column name for the selected cohort
    #[arg(short = 'n', long, default_value = "Optimized Sample")]
    pub name: String,
    /// Also write the per-iteration score history
    #[arg(long, default_value_t = false)]
    pub history: bool,
}

impl Default for ReportParams {
    fn default() -> Self {
        Self {
            target: "NA_DRB1_frequencies.csv".to_string(),
            reference: None,
            outfile: "Results".to_string(),
            name: "Optimized Sample".to_string(),
            history: false,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SpResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Overrides file values with the flags the user actually typed.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($group:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$group.$field = cli.$group.$field.clone();
                }
            };
        }

        update_if_present!(search.size);
        update_if_present!(search.iterations);
        update_if_present!(search.alpha);
        update_if_present!(search.changes);
        update_if_present!(search.seed);
        update_if_present!(search.verbose);

        update_if_present!(report.target);
        update_if_present!(report.reference);
        update_if_present!(report.outfile);
        update_if_present!(report.name);
        update_if_present!(report.history);
    }

    /// Range checks that do not need the pool. Pool-relative sizing is
    /// checked by the annealing engine.
    pub fn validate(&self) -> SpResult<()> {
        let s = &self.search;
        if s.size == 0 {
            return Err(SampPickError::Configuration(
                "--size must be at least 1".to_string(),
            ));
        }
        if s.changes == 0 || s.changes > s.size {
            return Err(SampPickError::Configuration(format!(
                "--changes must be between 1 and --size ({}), got {}",
                s.size, s.changes
            )));
        }
        if !(0.0..1.0).contains(&s.alpha) {
            return Err(SampPickError::Configuration(format!(
                "--alpha must be in [0, 1), got {}",
                s.alpha
            )));
        }
        if self.report.outfile.trim().is_empty() {
            return Err(SampPickError::Configuration(
                "--outfile must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
