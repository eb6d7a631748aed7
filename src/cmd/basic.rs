use super::load_reference;
use samppick::config::Config;
use samppick::error::SpResult;
use samppick::reports::{tables, FixedColumn, FrequencyTable, ReportWriter};
use samppick::scorer::{loader, profile};
use tracing::info;

/// Tabulates and charts the whole available sample against the target; no
/// search is run.
pub fn run(config: &Config, available: &str) -> SpResult<()> {
    info!("📂 Loading Target: {}", config.report.target);
    let target = loader::load_target_distribution(&config.report.target)?;
    let reference = load_reference(config.report.reference.as_deref(), &target)?;

    info!("📂 Loading Available Sample: {}", available);
    let individuals = loader::load_individuals(available)?;
    let sample = profile::from_individuals(individuals.iter(), target.domain());
    info!("📊 Profiled {} donors", individuals.len());

    let mut table = FrequencyTable::new(&target);
    table.push_column(&config.report.name, &sample);
    if let Some(reference) = &reference {
        table.push_column(FixedColumn::Reference.to_string(), reference);
    }

    tables::print_frequency_table(&table);
    ReportWriter::new(&config.report.outfile).write_basic(&table)
}
