use super::load_reference;
use samppick::config::Config;
use samppick::error::SpResult;
use samppick::optimizer::runner::{self, AnnealingOptions, ProgressLogger};
use samppick::reports::{tables, FixedColumn, FrequencyTable, ReportWriter};
use samppick::scorer::{loader, Scorer};
use tracing::info;

pub fn run(config: &Config, available: &str) -> SpResult<()> {
    config.validate()?;

    info!("📂 Loading Target: {}", config.report.target);
    let target = loader::load_target_distribution(&config.report.target)?;
    let reference = load_reference(config.report.reference.as_deref(), &target)?;

    info!("📂 Loading Available Pool: {}", available);
    let pool = loader::load_pool(available)?;

    let scorer = Scorer::new(target);
    let options = AnnealingOptions::from(config);
    info!(
        "🔥 Annealing: N={} | iterations={} | alpha={} | changes={}",
        options.cohort_size, options.iterations, options.alpha, options.changes
    );
    if let Some(seed) = config.search.seed {
        info!("🎲 Seed: {}", seed);
    }

    let logger = ProgressLogger {
        enabled: config.search.verbose,
    };
    let outcome = runner::select_cohort(&scorer, &pool, options, config.search.seed, &logger)?;

    let mut table = FrequencyTable::new(scorer.target());
    table.push_column(&config.report.name, &scorer.profile(&outcome.cohort, &pool));
    if let Some(reference) = &reference {
        table.push_column(FixedColumn::Reference.to_string(), reference);
        info!(
            "Reference divergence: {:.6}",
            scorer.score_profile(reference)?
        );
    }

    tables::print_run_summary(&outcome);
    tables::print_frequency_table(&table);

    let history = config.report.history.then_some(outcome.history.as_slice());
    ReportWriter::new(&config.report.outfile).write_selection(
        &outcome.cohort,
        &pool,
        &table,
        history,
    )?;

    info!("\n=== 🏆 FINAL RESULT ===");
    info!("Score: {:.6}", outcome.score);
    Ok(())
}
