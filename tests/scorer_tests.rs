mod common;

use rstest::rstest;
use samppick::scorer::divergence::{relative_entropy, score, score_with_lambda};
use samppick::scorer::{
    profile, Cohort, FrequencyDistribution, Individual, Pool, Scorer, TargetDistribution,
};

fn pool_of(rows: &[(&str, &str, &str)]) -> Pool {
    Pool::from_individuals(rows.iter().map(|(id, a, b)| Individual::new(*id, *a, *b)))
}

#[test]
fn test_profile_sums_to_one_over_two_n() {
    let pool = common::synthetic_pool(60, 11);
    let target = common::synthetic_target();
    let cohort = Cohort::from_positions((0..25).collect());

    let dist = profile::compute(&cohort, &pool, target.domain());
    assert!((dist.total() - 1.0).abs() < 1e-12);
    for allele in target.domain().iter() {
        assert!(dist.contains(allele), "missing zero-fill for {allele}");
    }
}

#[test]
fn test_profile_counts_homozygous_twice() {
    let pool = pool_of(&[("d1", "A", "A"), ("d2", "B", "C")]);
    let target = TargetDistribution::from_pairs(vec![("A", 0.5), ("B", 0.25), ("C", 0.25)]);
    let dist = profile::compute(&Cohort::from_positions(vec![0, 1]), &pool, target.domain());

    assert_eq!(dist.get("A"), 0.5);
    assert_eq!(dist.get("B"), 0.25);
    assert_eq!(dist.get("C"), 0.25);
}

#[test]
fn test_cohort_matching_target_scores_zero() {
    let pool = pool_of(&[("d1", "A", "A"), ("d2", "B", "C"), ("d3", "X", "Y")]);
    let target = TargetDistribution::from_pairs(vec![("A", 0.5), ("B", 0.25), ("C", 0.25)]);
    let scorer = Scorer::new(target);

    let s = scorer
        .score_cohort(&Cohort::from_positions(vec![0, 1]), &pool)
        .unwrap();
    assert!(s.abs() < 1e-9, "expected 0, got {s}");
}

#[test]
fn test_alleles_outside_target_are_ignored() {
    let target = TargetDistribution::from_pairs(vec![("A", 0.5), ("B", 0.5)]);
    let mut with_extra = FrequencyDistribution::new();
    with_extra.insert("A", 0.25);
    with_extra.insert("B", 0.25);
    with_extra.insert("Z", 0.5);

    let mut without = FrequencyDistribution::new();
    without.insert("A", 0.25);
    without.insert("B", 0.25);

    assert_eq!(
        score(&with_extra, &target).unwrap(),
        score(&without, &target).unwrap()
    );
}

#[rstest]
#[case(&[0.3, 0.25, 0.2, 0.15, 0.1])]
#[case(&[0.2, 0.2, 0.2, 0.2, 0.2])]
#[case(&[0.96, 0.01, 0.01, 0.01, 0.01])]
fn test_relative_entropy_self_is_zero(#[case] freqs: &[f64]) {
    let pairs = common::ALLELES.iter().copied().zip(freqs.iter().copied());
    let target = TargetDistribution::from_pairs(pairs);
    let p = target.distribution();
    assert!(relative_entropy(p, p, target.domain()).abs() < 1e-15);
}

#[rstest]
#[case(0.0)]
#[case(0.25)]
#[case(0.5)]
#[case(1.0)]
fn test_score_is_bounded_for_any_lambda(#[case] lambda: f64) {
    let target = common::synthetic_target();
    let mut sample = FrequencyDistribution::new();
    sample.insert(common::ALLELES[0], 1.0);
    sample.zero_fill(target.domain());

    let s = score_with_lambda(&sample, &target, lambda).unwrap();
    // Each KL term against the midpoint is at most ln 2.
    assert!(s >= 0.0 && s <= 2f64.ln().sqrt() + 1e-12);
}

#[test]
fn test_closer_cohort_scores_lower() {
    let target = TargetDistribution::from_pairs(vec![("A", 0.5), ("B", 0.5)]);
    let pool = pool_of(&[("d1", "A", "B"), ("d2", "A", "A"), ("d3", "B", "B"), ("d4", "A", "A")]);
    let scorer = Scorer::new(target);

    let balanced = scorer
        .score_cohort(&Cohort::from_positions(vec![1, 2]), &pool)
        .unwrap();
    let skewed = scorer
        .score_cohort(&Cohort::from_positions(vec![1, 3]), &pool)
        .unwrap();
    assert!(balanced < skewed);
}
