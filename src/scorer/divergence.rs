use super::types::{AlleleDomain, FrequencyDistribution, TargetDistribution};
use crate::error::{SampPickError, SpResult};

pub const DEFAULT_LAMBDA: f64 = 0.5;

// Rounding can push a perfect match a hair below zero.
const NEGATIVE_TOLERANCE: f64 = 1e-12;

#[inline(always)]
fn kl_term(p: f64, q: f64) -> f64 {
    if p != 0.0 {
        p * (p / q).ln()
    } else {
        0.0
    }
}

/// `sum P[a] * ln(P[a] / Q[a])` over `domain`, skipping alleles where `P` is 0.
///
/// Only `P` is guarded. A domain allele with `Q[a] == 0` and `P[a] != 0`
/// contributes `+inf`.
pub fn relative_entropy(
    p: &FrequencyDistribution,
    q: &FrequencyDistribution,
    domain: &AlleleDomain,
) -> f64 {
    domain.iter().map(|a| kl_term(p.get(a), q.get(a))).sum()
}

/// Square root of the lambda-weighted Jensen-Shannon divergence between a
/// sample profile and the target, over the target's alleles.
pub fn score(sample: &FrequencyDistribution, target: &TargetDistribution) -> SpResult<f64> {
    score_with_lambda(sample, target, DEFAULT_LAMBDA)
}

pub fn score_with_lambda(
    sample: &FrequencyDistribution,
    target: &TargetDistribution,
    lambda: f64,
) -> SpResult<f64> {
    let mut to_sample = 0.0;
    let mut to_target = 0.0;

    for allele in target.domain().iter() {
        let s = sample.get(allele);
        let t = target.get(allele);
        let avg = (s + t) / 2.0;
        to_sample += kl_term(s, avg);
        to_target += kl_term(t, avg);
    }

    root(lambda * to_sample + (1.0 - lambda) * to_target)
}

/// Square root of `js`, with values a rounding error below zero read as 0.
fn root(js: f64) -> SpResult<f64> {
    if !js.is_finite() {
        return Err(SampPickError::MathDomain(format!(
            "divergence is not finite ({})",
            js
        )));
    }
    if js < -NEGATIVE_TOLERANCE {
        return Err(SampPickError::MathDomain(format!(
            "divergence is negative ({:e}); profile and target are not distributions",
            js
        )));
    }
    Ok(js.max(0.0).sqrt())
}
