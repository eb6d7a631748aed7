#![allow(dead_code)]

use samppick::scorer::{Individual, Pool, TargetDistribution};
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub const ALLELES: [&str; 5] = [
    "DRB1*01:01",
    "DRB1*03:01",
    "DRB1*04:01",
    "DRB1*07:01",
    "DRB1*15:01",
];

pub const TARGET_FREQS: [f64; 5] = [0.30, 0.25, 0.20, 0.15, 0.10];

pub fn synthetic_target() -> TargetDistribution {
    TargetDistribution::from_pairs(ALLELES.iter().copied().zip(TARGET_FREQS))
}

/// `n` donors with alleles drawn from [`ALLELES`], fixed by `seed`.
pub fn synthetic_individuals(n: usize, seed: u64) -> Vec<Individual> {
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..n)
        .map(|i| {
            Individual::new(
                format!("donor_{:03}", i),
                ALLELES[rng.usize(0..ALLELES.len())],
                ALLELES[rng.usize(0..ALLELES.len())],
            )
        })
        .collect()
}

pub fn synthetic_pool(n: usize, seed: u64) -> Pool {
    Pool::from_individuals(synthetic_individuals(n, seed))
}

pub fn write_target_csv(path: &Path, pairs: &[(&str, f64)]) {
    let mut f = File::create(path).unwrap();
    writeln!(f, "Allele,Frequency").unwrap();
    for (allele, freq) in pairs {
        writeln!(f, "{},{}", allele, freq).unwrap();
    }
}

pub fn write_individuals_csv(path: &Path, individuals: &[Individual]) {
    let mut f = File::create(path).unwrap();
    writeln!(f, "ID,Allele1,Allele2").unwrap();
    for ind in individuals {
        writeln!(f, "{},{},{}", ind.id, ind.alleles[0], ind.alleles[1]).unwrap();
    }
}

pub fn default_target_pairs() -> Vec<(&'static str, f64)> {
    ALLELES.iter().copied().zip(TARGET_FREQS).collect()
}
