pub mod basic;
pub mod select;

use samppick::error::SpResult;
use samppick::scorer::{loader, profile, FrequencyDistribution, TargetDistribution};
use tracing::info;

/// Profile of the optional `--reference` cohort over the target alleles.
pub fn load_reference(
    path: Option<&str>,
    target: &TargetDistribution,
) -> SpResult<Option<FrequencyDistribution>> {
    let Some(path) = path.filter(|p| !p.is_empty()) else {
        return Ok(None);
    };
    info!("📂 Loading Reference: {}", path);
    let individuals = loader::load_individuals(path)?;
    Ok(Some(profile::from_individuals(
        individuals.iter(),
        target.domain(),
    )))
}
