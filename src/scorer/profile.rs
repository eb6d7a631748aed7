use super::types::{AlleleDomain, Cohort, FrequencyDistribution, Individual, Pool};
use std::collections::HashMap;

/// Allele frequency profile of a cohort: each member contributes both of its
/// alleles, counts are divided by `2N`, and every domain allele the cohort
/// lacks is present with frequency 0.
pub fn compute(cohort: &Cohort, pool: &Pool, domain: &AlleleDomain) -> FrequencyDistribution {
    from_individuals(cohort.individuals(pool), domain)
}

/// Profiles an arbitrary run of individuals (a whole pool, a reference file).
/// An empty run yields an all-zero profile over `domain`.
pub fn from_individuals<'a, I>(individuals: I, domain: &AlleleDomain) -> FrequencyDistribution
where
    I: IntoIterator<Item = &'a Individual>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut draws = 0usize;

    for ind in individuals {
        for allele in &ind.alleles {
            *counts.entry(allele.as_str()).or_insert(0) += 1;
            draws += 1;
        }
    }

    let mut dist = FrequencyDistribution::with_capacity(counts.len().max(domain.len()));
    if draws > 0 {
        let scale = draws as f64;
        for (allele, count) in counts {
            dist.insert(allele, count as f64 / scale);
        }
    }
    dist.zero_fill(domain);
    dist
}
